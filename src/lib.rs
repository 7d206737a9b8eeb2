pub mod config;
pub mod display;
pub mod error;
pub mod feedback;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
