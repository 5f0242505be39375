use thiserror::Error;

use super::types::{GraphPayload, PayloadError};

#[derive(Debug, Error)]
pub enum FetchError {
	#[error("graph request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("backend reported status {0:?}")]
	Backend(String),
	#[error("invalid graph payload: {0}")]
	Payload(#[from] PayloadError),
}

/// Fetches and validates a graph payload. Transport failures, HTTP error
/// statuses, undecodable bodies, a non-"OK" backend status and payload
/// contract violations all surface as [`FetchError`]; the caller treats
/// them identically.
pub async fn fetch_graph(api_path: &str) -> Result<GraphPayload, FetchError> {
	let payload: GraphPayload = reqwest::get(api_path)
		.await?
		.error_for_status()?
		.json()
		.await?;
	if !payload.is_ok() {
		return Err(FetchError::Backend(payload.status));
	}
	payload.validate()?;
	Ok(payload)
}
