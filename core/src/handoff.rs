//! Producing and consuming handoff state.
//!
//! Two channels exist:
//! - URL token: cross-origin navigations carry the state in the `handoff`
//!   query parameter of the target URL.
//! - Session store: same-tab navigations toward the portal write the state
//!   under the configured shared key before leaving the page.
//!
//! Every read path returns `Option`. Malformed, missing and expired payloads
//! all look the same to the caller.

use crate::codec::{self, HANDOFF_PARAM};
use crate::config::{Direction, PortalIntegrationConfig};
use crate::error::HandoffError;
use crate::query;
use crate::state::{Clock, HandoffRequest, HandoffState, SystemClock};
use crate::transport::{HandoffTransport, Navigator, SessionStorage, SessionTransport};

/// Handoff operations bound to one environment's configuration.
#[derive(Debug, Clone)]
pub struct Handoff<C = SystemClock> {
    config: PortalIntegrationConfig,
    clock: C,
}

impl Handoff<SystemClock> {
    pub fn new(config: PortalIntegrationConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Handoff<C> {
    pub fn with_clock(config: PortalIntegrationConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &PortalIntegrationConfig {
        &self.config
    }

    /// Session-store channel on the configured shared key.
    pub fn session_transport(&self, storage: SessionStorage) -> SessionTransport {
        SessionTransport::new(storage, self.config.shared_state_key.clone())
    }

    /// Stamp a request with the current time.
    pub fn stamp(&self, request: HandoffRequest) -> HandoffState {
        request.stamp(self.clock.now_millis())
    }

    /// Absolute URL for a route, with the state attached as a `handoff` token.
    ///
    /// Without a state the plain target URL is returned.
    pub fn build_outbound_url(
        &self,
        direction: Direction,
        route: &str,
        state: Option<HandoffRequest>,
    ) -> Result<String, HandoffError> {
        let target = self.config.target_url(direction, route)?;
        let Some(request) = state else {
            return Ok(target);
        };
        let token = codec::encode_token(&self.stamp(request))?;
        Ok(query::append_param(&target, HANDOFF_PARAM, &token))
    }

    /// Leave the current page for a route in the other app.
    ///
    /// Toward the portal, state goes through the session store and the URL
    /// stays clean. Toward the dashboard, state travels as a URL token.
    pub fn navigate_outbound<S, N>(
        &self,
        direction: Direction,
        route: &str,
        state: Option<HandoffRequest>,
        session: &mut S,
        navigator: &mut N,
    ) -> Result<(), HandoffError>
    where
        S: HandoffTransport,
        N: Navigator,
    {
        let url = match direction {
            Direction::ToPortal => {
                let url = self.config.target_url(direction, route)?;
                if let Some(request) = state {
                    session.write_state(&self.stamp(request))?;
                }
                url
            }
            Direction::ToDashboard => self.build_outbound_url(direction, route, state)?,
        };
        navigator.navigate(&url);
        Ok(())
    }

    /// Read the `handoff` token from the page URL and strip it from the address bar.
    ///
    /// The parameter is removed whether the token was valid, expired or garbage.
    pub fn decode_from_url<T: HandoffTransport>(&self, url: &mut T) -> Option<HandoffState> {
        let state = url.read_once()?;
        self.check_ttl(state)
    }

    /// Read the `handoff` token without touching the URL.
    pub fn peek_from_url<T: HandoffTransport>(&self, url: &T) -> Option<HandoffState> {
        self.check_ttl(url.peek_state()?)
    }

    /// Consume the session-store entry. A second call always returns `None`.
    pub fn read_and_clear_session_state<T: HandoffTransport>(
        &self,
        session: &mut T,
    ) -> Option<HandoffState> {
        let state = session.read_once()?;
        self.check_ttl(state)
    }

    fn check_ttl(&self, state: HandoffState) -> Option<HandoffState> {
        let now = self.clock.now_millis();
        if state.is_valid_at(now) {
            Some(state)
        } else {
            log::debug!(
                "[handoff] Ignoring expired handoff state ({} ms old)",
                now.saturating_sub(state.timestamp)
            );
            None
        }
    }
}
