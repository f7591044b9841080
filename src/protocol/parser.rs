//! Line codec for the server's stdin/stdout protocol.
//!
//! Each input line holds one JSON request; each output line holds one
//! JSON `Outbound` envelope.

use thiserror::Error;

use super::message::{Inbound, Outbound};

/// Errors that can occur while reading a request line.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty client id")]
    EmptyClient,
}

/// Parses a single line into a request.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_request(line: &str) -> Result<Option<Inbound>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let inbound: Inbound = serde_json::from_str(trimmed)?;
    if inbound.client.is_empty() {
        return Err(ParseError::EmptyClient);
    }
    Ok(Some(inbound))
}

/// Encodes an outbound event as a single line, without the trailing newline.
pub fn encode_outbound(out: &Outbound) -> Result<String, serde_json::Error> {
    serde_json::to_string(out)
}
