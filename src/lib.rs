pub mod abi;
pub mod address;
pub mod builder;
pub mod errors;
pub mod handler;
pub mod provider;
pub mod response;
pub mod static_values;
pub mod tools;
pub mod transaction;
pub mod types;

pub use builder::TransactionBuilder;
pub use errors::{reason, BuilderError};
pub use provider::{HttpProvider, NodeConfig, NodeRequest};
