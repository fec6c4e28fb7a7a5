//! Page-facing handoff resolution.
//!
//! A page resolves its handoff once, on first render: the URL token wins,
//! the session store is the fallback, and later renders see the same result.

use crate::handoff::Handoff;
use crate::state::{Clock, HandoffState};
use crate::transport::HandoffTransport;
use serde::Serialize;

/// What a page sees of its handoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffView {
    pub state: Option<HandoffState>,
    pub is_loading: bool,
    pub has_state: bool,
}

/// Prefer the URL channel; consult the session store only if it had nothing.
pub fn resolve_handoff<C, U, S>(
    handoff: &Handoff<C>,
    url: &mut U,
    session: &mut S,
) -> Option<HandoffState>
where
    C: Clock,
    U: HandoffTransport,
    S: HandoffTransport,
{
    if let Some(state) = handoff.decode_from_url(url) {
        log::debug!("[handoff] Resolved handoff from URL");
        return Some(state);
    }
    let state = handoff.read_and_clear_session_state(session);
    if state.is_some() {
        log::debug!("[handoff] Resolved handoff from session store");
    }
    state
}

/// Resolves a page's handoff exactly once and caches the outcome.
#[derive(Debug, Clone, Default)]
pub struct HandoffConsumer {
    resolved: Option<Option<HandoffState>>,
}

impl HandoffConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Run resolution on the first call; later calls return the cached view
    /// without touching either channel.
    pub fn resolve<C, U, S>(
        &mut self,
        handoff: &Handoff<C>,
        url: &mut U,
        session: &mut S,
    ) -> HandoffView
    where
        C: Clock,
        U: HandoffTransport,
        S: HandoffTransport,
    {
        if self.resolved.is_none() {
            self.resolved = Some(resolve_handoff(handoff, url, session));
        }
        self.view()
    }

    pub fn view(&self) -> HandoffView {
        match &self.resolved {
            None => HandoffView {
                state: None,
                is_loading: true,
                has_state: false,
            },
            Some(state) => HandoffView {
                state: state.clone(),
                is_loading: false,
                has_state: state.is_some(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Direction, PortalIntegrationConfig};
    use crate::state::{FixedClock, HandoffRequest};
    use crate::transport::{PageLocation, SessionStorage, UrlTransport};

    const NOW: i64 = 1_700_000_000_000;

    fn handoff() -> Handoff<FixedClock> {
        Handoff::with_clock(PortalIntegrationConfig::default(), FixedClock(NOW))
    }

    #[test]
    fn test_loading_until_resolved() {
        let consumer = HandoffConsumer::new();
        let view = consumer.view();
        assert!(view.is_loading);
        assert!(!view.has_state);
        assert!(!consumer.is_resolved());
    }

    #[test]
    fn test_url_preferred_over_session() {
        let handoff = handoff();
        let url = handoff
            .build_outbound_url(
                Direction::ToDashboard,
                "home",
                Some(HandoffRequest::new().with_return_url("/from-url")),
            )
            .unwrap();
        let storage = SessionStorage::new();
        let mut session = handoff.session_transport(storage.clone());
        session
            .write_state(&HandoffRequest::new().with_return_url("/from-session").stamp(NOW))
            .unwrap();
        let mut url = UrlTransport::new(PageLocation::new(url));

        let view = HandoffConsumer::new().resolve(&handoff, &mut url, &mut session);
        assert!(view.has_state);
        assert_eq!(view.state.unwrap().return_url.as_deref(), Some("/from-url"));
        // Session store was not consulted
        assert!(storage.get_item("xcloud_shared_state").is_some());
    }

    #[test]
    fn test_falls_back_to_session() {
        let handoff = handoff();
        let storage = SessionStorage::new();
        let mut session = handoff.session_transport(storage.clone());
        session
            .write_state(&HandoffRequest::new().with_return_url("/from-session").stamp(NOW))
            .unwrap();
        let mut url = UrlTransport::new(PageLocation::new("http://localhost:5173/?keep=1"));

        let view = HandoffConsumer::new().resolve(&handoff, &mut url, &mut session);
        assert_eq!(
            view.state.unwrap().return_url.as_deref(),
            Some("/from-session")
        );
        assert!(storage.is_empty());
    }

    #[test]
    fn test_expired_url_token_falls_back_to_session() {
        let handoff = handoff();
        let stale = Handoff::with_clock(PortalIntegrationConfig::default(), FixedClock(NOW - 400_000))
            .build_outbound_url(Direction::ToDashboard, "team", Some(HandoffRequest::new()))
            .unwrap();
        let mut session = handoff.session_transport(SessionStorage::new());
        session
            .write_state(&HandoffRequest::new().with_return_url("/fresh").stamp(NOW))
            .unwrap();
        let mut url = UrlTransport::new(PageLocation::new(stale));

        let state = resolve_handoff(&handoff, &mut url, &mut session).unwrap();
        assert_eq!(state.return_url.as_deref(), Some("/fresh"));
    }

    #[test]
    fn test_resolves_only_once() {
        let handoff = handoff();
        let storage = SessionStorage::new();
        let mut session = handoff.session_transport(storage.clone());
        let mut url = UrlTransport::new(PageLocation::new("http://localhost:5173/"));
        let mut consumer = HandoffConsumer::new();

        let first = consumer.resolve(&handoff, &mut url, &mut session);
        assert!(!first.is_loading);
        assert!(!first.has_state);

        // State arriving after the first resolution is not picked up
        session
            .write_state(&HandoffRequest::new().stamp(NOW))
            .unwrap();
        let second = consumer.resolve(&handoff, &mut url, &mut session);
        assert_eq!(first, second);
        assert!(!storage.is_empty());
    }
}
