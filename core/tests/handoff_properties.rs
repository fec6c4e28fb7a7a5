//! End-to-end handoff behavior across both channels.
//!
//! Each test plays both apps: one side builds or writes the handoff, the
//! other side arrives on the resulting page and reads it.

use handoff::state::{Clock, FixedClock, SystemClock};
use handoff::transport::{HandoffTransport, PageLocation, SessionStorage, UrlTransport};
use handoff::{
    Direction, Environment, Handoff, HandoffConsumer, HandoffRequest, PortalIntegrationConfig,
};
use serde_json::json;

const NOW: i64 = 1_700_000_000_000;

fn config() -> PortalIntegrationConfig {
    PortalIntegrationConfig::for_environment(Environment::Development)
}

fn at(now: i64) -> Handoff<FixedClock> {
    Handoff::with_clock(config(), FixedClock(now))
}

#[test]
fn test_url_channel_roundtrip_with_system_clock() {
    let handoff = Handoff::new(config());
    let request = HandoffRequest::new()
        .with_return_url("http://localhost:3000/profile?tab=security")
        .with_context_value("from", "portal")
        .with_context_value("filters", json!({ "status": ["live", "failed"], "page": 2 }));

    let started = SystemClock.now_millis();
    let url = handoff
        .build_outbound_url(Direction::ToDashboard, "deployments", Some(request.clone()))
        .unwrap();

    let mut transport = UrlTransport::new(PageLocation::new(url));
    let state = handoff.decode_from_url(&mut transport).unwrap();

    assert_eq!(state.return_url, request.return_url);
    assert_eq!(state.context, request.context);
    assert!(state.timestamp >= started);
    assert!(state.timestamp - started < 1_000);
}

#[test]
fn test_session_channel_single_consumption() {
    let storage = SessionStorage::new();
    let handoff = at(NOW);
    let mut session = handoff.session_transport(storage.clone());
    session
        .write_state(
            &HandoffRequest::new()
                .with_return_url("/x")
                .with_context_value("a", 1)
                .stamp(NOW - 1_000),
        )
        .unwrap();

    let state = handoff.read_and_clear_session_state(&mut session).unwrap();
    assert_eq!(state.return_url.as_deref(), Some("/x"));
    assert_eq!(state.context.unwrap()["a"], 1);

    // Still inside the TTL window, but already consumed
    for _ in 0..3 {
        assert!(handoff.read_and_clear_session_state(&mut session).is_none());
    }
}

#[test]
fn test_expired_session_entry_is_consumed() {
    let storage = SessionStorage::new();
    let mut session = at(NOW).session_transport(storage.clone());
    session
        .write_state(&HandoffRequest::new().stamp(NOW - 600_000))
        .unwrap();

    assert!(at(NOW).read_and_clear_session_state(&mut session).is_none());
    assert!(storage.get_item("xcloud_shared_state").is_none());
}

#[test]
fn test_malformed_session_entry() {
    let storage = SessionStorage::new();
    storage.set_item("xcloud_shared_state", "not json");
    let handoff = at(NOW);
    let mut session = handoff.session_transport(storage.clone());

    assert!(handoff.read_and_clear_session_state(&mut session).is_none());
    assert!(storage.get_item("xcloud_shared_state").is_none());
}

#[test]
fn test_expiry_boundary_on_url_channel() {
    for (age, valid) in [(299_999, true), (300_001, false)] {
        let url = at(NOW - age)
            .build_outbound_url(Direction::ToDashboard, "home", Some(HandoffRequest::new()))
            .unwrap();
        let mut transport = UrlTransport::new(PageLocation::new(url));
        assert_eq!(at(NOW).decode_from_url(&mut transport).is_some(), valid, "age {age}");
    }
}

#[test]
fn test_url_cleanup_keeps_path_and_other_params() {
    let fresh = at(NOW)
        .build_outbound_url(Direction::ToDashboard, "team", Some(HandoffRequest::new()))
        .unwrap();
    let stale = at(NOW - 400_000)
        .build_outbound_url(Direction::ToDashboard, "team", Some(HandoffRequest::new()))
        .unwrap();
    let garbage = "http://localhost:5173/team?handoff=bm90IGpzb24".to_owned();

    for (url, valid) in [(fresh, true), (stale, false), (garbage, false)] {
        let location = PageLocation::new(format!("{url}&keep=1"));
        let mut transport = UrlTransport::new(location.clone());
        assert_eq!(at(NOW).decode_from_url(&mut transport).is_some(), valid);
        assert_eq!(location.href(), "http://localhost:5173/team?keep=1");
        assert_eq!(location.history_len(), 1);
    }
}

#[test]
fn test_page_without_handoff() {
    let handoff = at(NOW);
    let location = PageLocation::new("http://localhost:5173/analytics?range=7d");
    let mut url = UrlTransport::new(location.clone());
    let mut session = handoff.session_transport(SessionStorage::new());

    let view = HandoffConsumer::new().resolve(&handoff, &mut url, &mut session);
    assert!(!view.is_loading);
    assert!(!view.has_state);
    assert_eq!(view.state, None);
    assert_eq!(location.href(), "http://localhost:5173/analytics?range=7d");
}

#[test]
fn test_dashboard_to_portal_and_back() {
    // Dashboard sends the user to the portal's auth page via the session store
    let storage = SessionStorage::new();
    let dashboard = at(NOW);
    let mut tab = PageLocation::new("http://localhost:5173/deployments");
    let mut session = dashboard.session_transport(storage.clone());
    dashboard
        .navigate_outbound(
            Direction::ToPortal,
            "auth",
            Some(HandoffRequest::new().with_return_url("/deployments")),
            &mut session,
            &mut tab,
        )
        .unwrap();
    assert_eq!(tab.href(), "http://localhost:3000/auth");

    // Portal picks it up on arrival
    let portal = at(NOW + 2_000);
    let mut url = UrlTransport::new(tab.clone());
    let view = HandoffConsumer::new().resolve(&portal, &mut url, &mut session);
    let state = view.state.unwrap();
    assert_eq!(state.return_url.as_deref(), Some("/deployments"));

    // Portal sends the user back with a URL token
    let mut portal_session = portal.session_transport(storage.clone());
    portal
        .navigate_outbound(
            Direction::ToDashboard,
            "deployments",
            Some(HandoffRequest::new().with_context_value("from", "portal")),
            &mut portal_session,
            &mut tab,
        )
        .unwrap();
    assert!(storage.is_empty());

    let mut url = UrlTransport::new(tab.clone());
    let back = at(NOW + 3_000).decode_from_url(&mut url).unwrap();
    assert_eq!(back.context.unwrap()["from"], "portal");
    assert_eq!(tab.href(), "http://localhost:5173/deployments");
}

#[test]
fn test_environments_are_isolated() {
    let prod = Handoff::new(PortalIntegrationConfig::for_environment(Environment::Production));
    let dev = Handoff::new(PortalIntegrationConfig::for_environment(Environment::Development));

    for direction in [Direction::ToPortal, Direction::ToDashboard] {
        let routes: Vec<String> = prod
            .config()
            .handoff_routes
            .for_direction(direction)
            .keys()
            .cloned()
            .collect();
        for route in routes {
            let prod_url = prod
                .build_outbound_url(direction, &route, Some(HandoffRequest::new()))
                .unwrap();
            let dev_url = dev
                .build_outbound_url(direction, &route, Some(HandoffRequest::new()))
                .unwrap();
            assert!(!prod_url.contains("localhost"), "{prod_url}");
            assert!(dev_url.starts_with("http://localhost:"), "{dev_url}");
        }
    }
}

#[test]
fn test_peek_then_consume_on_same_page() {
    let handoff = at(NOW);
    let url = handoff
        .build_outbound_url(
            Direction::ToDashboard,
            "home",
            Some(HandoffRequest::new().with_return_url("/x")),
        )
        .unwrap();
    let location = PageLocation::new(url);
    let widget = UrlTransport::new(location.clone());
    let mut owner = UrlTransport::new(location.clone());

    assert!(handoff.peek_from_url(&widget).is_some());
    assert!(handoff.decode_from_url(&mut owner).is_some());
    assert!(handoff.peek_from_url(&widget).is_none());
    assert!(widget.peek().is_none());
}
