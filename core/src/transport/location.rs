//! URL-token transport.
//!
//! [`PageLocation`] stands in for the page's location and history: it knows
//! the current URL, can replace it in place (no new history entry, no
//! navigation), and records full navigations. [`UrlTransport`] keeps the
//! handoff token in the `handoff` query parameter of that location.

use super::traits::HandoffTransport;
use crate::codec::{self, HANDOFF_PARAM};
use crate::error::HandoffError;
use crate::query;
use crate::state::HandoffState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Something that can send the user to another URL.
///
/// A navigation ends the current page; callers should not expect to do more
/// work on it afterwards.
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

#[derive(Debug, Default)]
struct LocationInner {
    history: Vec<String>,
    navigations: usize,
}

/// Current page URL plus its session history.
#[derive(Debug, Clone)]
pub struct PageLocation {
    inner: Arc<Mutex<LocationInner>>,
}

impl PageLocation {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LocationInner {
                history: vec![url.into()],
                navigations: 0,
            })),
        }
    }

    fn inner(&self) -> MutexGuard<'_, LocationInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The full current URL.
    pub fn href(&self) -> String {
        self.inner().history.last().cloned().unwrap_or_default()
    }

    /// Query string of the current URL, without the leading `?`.
    pub fn search(&self) -> String {
        let href = self.href();
        query::split_url(&href).1.to_owned()
    }

    /// Swap the current history entry for `url` without navigating.
    pub fn replace_state(&self, url: impl Into<String>) {
        let url = url.into();
        let mut inner = self.inner();
        match inner.history.last_mut() {
            Some(current) => *current = url,
            None => inner.history.push(url),
        }
    }

    /// Number of entries in the session history.
    pub fn history_len(&self) -> usize {
        self.inner().history.len()
    }

    /// Number of full navigations performed from this page.
    pub fn navigation_count(&self) -> usize {
        self.inner().navigations
    }
}

impl Navigator for PageLocation {
    fn navigate(&mut self, url: &str) {
        log::debug!("[handoff] Navigating to {url}");
        let mut inner = self.inner();
        inner.history.push(url.to_owned());
        inner.navigations += 1;
    }
}

/// Handoff channel backed by the `handoff` query parameter of a page.
#[derive(Debug, Clone)]
pub struct UrlTransport {
    location: PageLocation,
}

impl UrlTransport {
    pub fn new(location: PageLocation) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &PageLocation {
        &self.location
    }
}

impl HandoffTransport for UrlTransport {
    fn write(&mut self, payload: &str) {
        let href = self.location.href();
        let (base, search, fragment) = query::split_url(&href);
        let remaining = query::remove_param(search, HANDOFF_PARAM);
        let without = if remaining.is_empty() {
            format!("{base}{fragment}")
        } else {
            format!("{base}?{remaining}{fragment}")
        };
        self.location
            .replace_state(query::append_param(&without, HANDOFF_PARAM, payload));
    }

    fn peek(&self) -> Option<String> {
        query::get_param(&self.location.search(), HANDOFF_PARAM).filter(|v| !v.is_empty())
    }

    fn clear(&mut self) {
        let href = self.location.href();
        let (base, search, fragment) = query::split_url(&href);
        let remaining = query::remove_param(search, HANDOFF_PARAM);
        if remaining == search {
            return;
        }
        let clean = if remaining.is_empty() {
            format!("{base}{fragment}")
        } else {
            format!("{base}?{remaining}{fragment}")
        };
        self.location.replace_state(clean);
    }

    fn peek_and_clear(&mut self) -> Option<String> {
        // An empty `handoff=` is still stripped from the address bar
        let payload = self.peek();
        self.clear();
        payload
    }

    fn encode(&self, state: &HandoffState) -> Result<String, HandoffError> {
        codec::encode_token(state)
    }

    fn decode(&self, payload: &str) -> Option<HandoffState> {
        codec::decode_token(payload)
    }
}
