use crate::error::HandoffError;
use crate::state::HandoffState;

/// A channel that can carry one handoff payload at a time.
///
/// Implementations hold the raw payload (a JSON string, a URL token, ...)
/// and know how to translate it to and from a [`HandoffState`]. TTL checks
/// are left to the caller.
pub trait HandoffTransport {
    /// Store a raw payload, replacing any previous one.
    fn write(&mut self, payload: &str);

    /// Read the raw payload without consuming it.
    fn peek(&self) -> Option<String>;

    /// Drop the payload from the channel.
    fn clear(&mut self);

    /// Serialize a state into this channel's payload format.
    fn encode(&self, state: &HandoffState) -> Result<String, HandoffError>;

    /// Parse a payload. Malformed payloads yield `None`.
    fn decode(&self, payload: &str) -> Option<HandoffState>;

    /// Read the raw payload and remove it, if present.
    fn peek_and_clear(&mut self) -> Option<String> {
        let payload = self.peek()?;
        self.clear();
        Some(payload)
    }

    /// Encode and store a state.
    fn write_state(&mut self, state: &HandoffState) -> Result<(), HandoffError> {
        let payload = self.encode(state)?;
        self.write(&payload);
        Ok(())
    }

    /// Decode the current payload, leaving it in place.
    fn peek_state(&self) -> Option<HandoffState> {
        self.decode(&self.peek()?)
    }

    /// Consume the payload: it is removed whether or not it decodes.
    fn read_once(&mut self) -> Option<HandoffState> {
        let payload = self.peek_and_clear()?;
        self.decode(&payload)
    }
}
