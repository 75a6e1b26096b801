//! Thin Gemini API client and the quickstart sequence built on it.

pub mod client;
pub mod error;
pub mod models;
pub mod quickstart;

#[cfg(test)]
mod test_support;

pub use gemini_quickstart_types as types;

pub use client::{Client, ClientBuilder, HttpOptions};
pub use error::{Error, Result};
pub use models::{GenerativeModel, Models};
