mod client;
mod error;
mod types;

pub use client::BackendClient;
pub use error::Error;
pub use types::*;
