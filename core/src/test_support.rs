//! Mock implementations of platform traits for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::error::FetchError;
use crate::platform::{Clock, Environment, HttpClient, HttpResponse};

/// A GET request observed by [`MockHttp`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Mock HTTP client returning one canned outcome and recording every request
pub struct MockHttp {
    outcome: Result<(u16, Vec<u8>), FetchError>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttp {
    pub fn respond(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok((status, body.as_bytes().to_vec())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(err: FetchError) -> Self {
        Self {
            outcome: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl HttpClient for MockHttp {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        match &self.outcome {
            Ok((status, body)) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Err(e) => Err(e.clone()),
        }
    }
}

/// Shares a [`MockHttp`] between a helper under test and the assertions
#[async_trait(?Send)]
impl HttpClient for Arc<MockHttp> {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        self.as_ref().get(url, headers).await
    }
}

/// Mock clock with a fixed timestamp
pub struct MockClock(pub DateTime<Utc>);

impl MockClock {
    pub fn at(secs: i64) -> Self {
        Self(DateTime::from_timestamp(secs, 0).unwrap())
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Mock environment backed by an in-memory HashMap
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl Environment for MockEnv {
    fn get_var(&self, name: &str) -> Option<String> {
        self.vars.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

/// In-memory audit sink that can be read back after the log takes ownership
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    /// Lines with the trailing newline removed
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that rejects every write
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}
