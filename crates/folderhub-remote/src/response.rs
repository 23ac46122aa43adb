//! Classification of backend responses.
//!
//! The backend answers 2xx on success, 202 when it resolved a duplicate
//! name, and anything else on failure, usually with a `{ "message" }` body.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use folderhub_core::error::{AppError, ErrorKind};
use folderhub_core::result::AppResult;
use folderhub_core::types::{Conflict, Envelope};

/// Status the backend uses to signal a duplicate-name conflict.
pub const CONFLICT_STATUS: StatusCode = StatusCode::ACCEPTED;

/// A response that was not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified<'a> {
    /// The request was applied; carries the raw body.
    Success(&'a [u8]),
    /// The backend stored a disambiguated entity instead.
    Conflict(Conflict),
}

/// Sort a response into success, conflict, or failure.
///
/// Endpoints that cannot conflict pass `conflicts = false`, which treats a
/// 202 as a plain success.
pub fn classify(status: StatusCode, body: &[u8], conflicts: bool) -> AppResult<Classified<'_>> {
    if conflicts && status == CONFLICT_STATUS {
        let conflict: Conflict = serde_json::from_slice(body).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                "Malformed conflict response",
                e,
            )
        })?;
        return Ok(Classified::Conflict(conflict));
    }
    if status.is_success() {
        return Ok(Classified::Success(body));
    }
    Err(AppError::remote(failure_message(status, body)))
}

/// The message to surface for a failed request: the body's `message` when
/// present, else the status reason.
pub fn failure_message(status: StatusCode, body: &[u8]) -> Option<String> {
    serde_json::from_slice::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|m| !m.trim().is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
}

/// Decode a `{ message, data }` success body. An empty body decodes to an
/// empty envelope.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> AppResult<Envelope<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Envelope {
            message: None,
            data: None,
        });
    }
    Ok(serde_json::from_slice(body)?)
}

/// Decode a success body whose `data` is optional, defaulting when absent.
pub fn decode_data_or_default<T: DeserializeOwned + Default>(body: &[u8]) -> AppResult<T> {
    Ok(decode_envelope(body)?.data.unwrap_or_default())
}

/// Decode a success body and require its `data` field.
pub fn decode_data<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    decode_envelope(body)?.data.ok_or_else(|| {
        AppError::new(ErrorKind::Serialization, "Response carried no data")
    })
}
