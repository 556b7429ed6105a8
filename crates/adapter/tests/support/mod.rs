#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gh_transport::{Transport, TransportError};
use http::StatusCode;
use serde_json::Value;

/// Canned upstream: answers endpoints from a table and records every call.
#[derive(Default)]
pub struct StubTransport {
    responses: HashMap<String, Value>,
    failures: HashMap<String, TransportError>,
    calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, endpoint: impl Into<String>, value: Value) -> Self {
        self.responses.insert(endpoint.into(), value);
        self
    }

    pub fn fail(mut self, endpoint: impl Into<String>, status: StatusCode, message: &str) -> Self {
        let endpoint = endpoint.into();
        let err = TransportError::status(status, endpoint.clone(), message);
        self.failures.insert(endpoint, err);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn fetch(&self, endpoint: &str) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        if let Some(err) = self.failures.get(endpoint) {
            return Err(err.clone());
        }
        match self.responses.get(endpoint) {
            Some(value) => Ok(value.clone()),
            None => panic!("unexpected upstream call: {endpoint}"),
        }
    }
}
