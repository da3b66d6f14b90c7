//! Interpretation of full node answers.
//!
//! A round trip that reached the node can still carry a failure: an
//! `Error` field, a `result.message` (hex encoded), or for contract calls a
//! missing/false `result.result` flag. These are turned into a tagged
//! outcome once, here, instead of being inspected by each operation.

use crate::errors::*;
use crate::tools;
use error_stack::{Report, Result};
use log::warn;
use serde_json::Value;

/// Which parts of a response signal a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `Error` field or `result.message`.
    Plain,
    /// Like `Plain`, and `result.result` must also be truthy.
    Flagged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeResponse {
    Transaction(Value),
    /// The node answered with an explicit `Error` field.
    ProtocolError(String),
    /// The node refused the transaction with a message.
    ApplicationError(String),
    /// The node refused the transaction without a message.
    Rejected(Value),
}

pub fn classify(response: Value, envelope: Envelope) -> NodeResponse {
    if let Some(error) = response.get("Error") {
        return NodeResponse::ProtocolError(match error {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        });
    }

    let result = response.get("result");
    if let Some(message) = result.and_then(|r| r.get("message")).filter(|m| is_truthy(m)) {
        let message = match message {
            Value::String(raw) => tools::to_utf8(raw).unwrap_or_else(|_| raw.clone()),
            other => other.to_string(),
        };
        return NodeResponse::ApplicationError(message);
    }

    if envelope == Envelope::Flagged && !result.and_then(|r| r.get("result")).map_or(false, is_truthy)
    {
        return NodeResponse::Rejected(response);
    }

    NodeResponse::Transaction(response)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl NodeResponse {
    pub fn into_result(self) -> Result<Value, BuilderError> {
        match self {
            NodeResponse::Transaction(transaction) => Ok(transaction),
            NodeResponse::ProtocolError(message) => {
                warn!("full node error: {}", message);
                Err(with_detail(
                    Report::new(BuilderError::Remote(RemoteErrorKind::Protocol)),
                    message,
                ))
            }
            NodeResponse::ApplicationError(message) => {
                warn!("transaction rejected: {}", message);
                Err(with_detail(
                    Report::new(BuilderError::Remote(RemoteErrorKind::Application)),
                    message,
                ))
            }
            NodeResponse::Rejected(response) => {
                warn!("transaction rejected without message");
                Err(with_detail(
                    Report::new(BuilderError::Remote(RemoteErrorKind::Application)),
                    response.to_string(),
                )
                .attach(response))
            }
        }
    }
}
