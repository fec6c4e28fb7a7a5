//! Handoff token codec.
//!
//! A token is the JSON form of a [`HandoffState`] encoded as URL-safe base64
//! without padding, so it can sit in a query parameter unescaped. Tokens
//! produced with the standard alphabet (and padding) are accepted on decode.

use crate::error::HandoffError;
use crate::state::HandoffState;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;

/// Name of the query parameter carrying a handoff token.
pub const HANDOFF_PARAM: &str = "handoff";

/// Serialize a state to a URL-safe token.
pub fn encode_token(state: &HandoffState) -> Result<String, HandoffError> {
    let json = serde_json::to_vec(state).map_err(HandoffError::Encode)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Parse a token back into a state.
///
/// Returns `None` for anything that is not valid base64 wrapping a JSON
/// object with a `timestamp`. No TTL check happens here.
pub fn decode_token(token: &str) -> Option<HandoffState> {
    // Form decoding turns a raw '+' into a space
    let normalized = token.trim().replace(' ', "+");
    let unpadded = normalized.trim_end_matches('=');

    let bytes = match URL_SAFE_NO_PAD
        .decode(unpadded)
        .or_else(|_| STANDARD_NO_PAD.decode(unpadded))
    {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("[handoff] Failed to decode handoff token: {e}");
            return None;
        }
    };

    match serde_json::from_slice::<HandoffState>(&bytes) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("[handoff] Failed to parse handoff token: {e}");
            None
        }
    }
}

/// Parse a JSON-serialized state, as stored in the session store.
pub fn decode_json(json: &str) -> Option<HandoffState> {
    match serde_json::from_str::<HandoffState>(json) {
        Ok(state) => Some(state),
        Err(e) => {
            log::error!("[handoff] Failed to parse handoff state: {e}");
            None
        }
    }
}
