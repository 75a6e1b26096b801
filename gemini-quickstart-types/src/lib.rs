//! Wire types for the Gemini models list and `generateContent` endpoints.

pub mod config;
pub mod content;
pub mod enums;
pub mod models;
pub mod response;
