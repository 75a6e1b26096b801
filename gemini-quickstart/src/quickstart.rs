//! The quickstart sequence: list models, then ask one question.
//!
//! Output goes to any [`Write`] so the exact lines can be checked in tests.
//! The listing is printed and otherwise ignored; the model asked is always
//! [`MODEL`].

use std::io::Write;

use crate::client::Client;
use crate::error::Result;
use crate::models::text_or_err;

/// Model used for generation.
pub const MODEL: &str = "gemini-pro";

/// Prompt sent to [`MODEL`].
pub const PROMPT: &str = "What is the capital of France?";

/// Label printed before the generated text.
pub const RESPONSE_LABEL: &str = "Gemini response:";

/// Run the sequence against `client`, writing two lines to `out`.
///
/// # Errors
/// Returns the first error from either call. Nothing after the failing step
/// is written.
pub async fn run<W: Write>(client: &Client, out: &mut W) -> Result<()> {
    let listing = client.models().list().await?;
    let models = listing.models.unwrap_or_default();
    tracing::info!(count = models.len(), "listed models");
    writeln!(out, "{models:?}")?;

    let model = client.generative_model(MODEL);
    let response = model.generate_content(PROMPT).await?;
    let text = text_or_err(&response)?;
    writeln!(out, "{RESPONSE_LABEL} {text}")?;
    out.flush()?;
    Ok(())
}
