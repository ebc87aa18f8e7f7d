#![recursion_limit = "256"]

pub mod config;
pub mod descriptor;
pub mod error;
pub mod gc;
pub mod mqtt_client;
pub mod payload;
pub mod reconcile;
pub mod topic;

pub use error::{Error, Result};
