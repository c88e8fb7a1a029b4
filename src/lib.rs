pub mod artifacts;
pub mod config;
pub mod error;
pub mod house;
pub mod server;

pub use error::{Error, Result};
