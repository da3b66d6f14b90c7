#![allow(dead_code)]
use async_trait::async_trait;
use error_stack::{Report, Result};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use trx_transaction_builder::address::Base58Address;
use trx_transaction_builder::errors::{HttpErrorKind, ProviderError};
use trx_transaction_builder::provider::{HttpMethod, NodeRequest};
use trx_transaction_builder::static_values::ADDRESS_PREFIX_BYTE;
use trx_transaction_builder::TransactionBuilder;

pub static OWNER_HEX: &str = "41a614f803b6fd780986a42c78ec9c7f77e6ded13c";
pub static OWNER_BASE58: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub path: String,
    pub payload: Value,
    pub method: HttpMethod,
}

/// Records every request and answers with a canned response.
pub struct MockNode {
    requests: Mutex<Vec<Recorded>>,
    answer: Option<Value>,
}

impl MockNode {
    pub fn new() -> Arc<MockNode> {
        MockNode::answering(json!({
            "visible": false,
            "txID": "2f9a0f5c2a1b4d3e",
            "raw_data": {"contract": []}
        }))
    }

    pub fn answering(answer: Value) -> Arc<MockNode> {
        Arc::new(MockNode {
            requests: Mutex::new(Vec::new()),
            answer: Some(answer),
        })
    }

    pub fn unreachable() -> Arc<MockNode> {
        Arc::new(MockNode {
            requests: Mutex::new(Vec::new()),
            answer: None,
        })
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> Recorded {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl NodeRequest for MockNode {
    async fn request(
        &self,
        path: &str,
        payload: Value,
        method: HttpMethod,
    ) -> Result<Value, ProviderError> {
        self.requests.lock().unwrap().push(Recorded {
            path: path.to_string(),
            payload,
            method,
        });
        match &self.answer {
            Some(answer) => Ok(answer.clone()),
            None => Err(Report::new(ProviderError::Http(HttpErrorKind::Send))
                .attach_printable("connection refused")),
        }
    }
}

pub fn builder(node: &Arc<MockNode>) -> TransactionBuilder {
    TransactionBuilder::new(node.clone()).with_default_address(OWNER_BASE58)
}

/// Random address in display form together with its canonical hex.
pub fn random_address() -> (String, String) {
    let mut bytes = [0u8; 21];
    bytes[0] = ADDRESS_PREFIX_BYTE;
    for byte in bytes.iter_mut().skip(1) {
        *byte = rand::random();
    }
    (Base58Address::encode_check(&bytes), hex::encode(bytes))
}
