//! Handoff state carried between the portal and the dashboard.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum age of a handoff payload, in milliseconds (5 minutes).
pub const HANDOFF_TTL_MS: i64 = 5 * 60 * 1000;

/// Source of the current wall-clock time in milliseconds since the epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or_default()
    }
}

/// Clock frozen at a given instant. Useful for TTL checks in tests and tools.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// State transferred when navigating from one app to the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
    /// Creation time in milliseconds since the epoch. Only set by the encoder.
    pub timestamp: i64,
}

impl HandoffState {
    /// Whether the state is still within its TTL at `now_ms`.
    ///
    /// A timestamp ahead of `now_ms` (clock skew between apps) counts as fresh.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.timestamp) < HANDOFF_TTL_MS
    }

    /// Interpret the context map as a [`NavigationContext`], if it has that shape.
    pub fn navigation_context(&self) -> Option<NavigationContext> {
        let context = self.context.as_ref()?;
        serde_json::from_value(Value::Object(context.clone())).ok()
    }
}

/// Caller-supplied part of a handoff. The timestamp is added when it is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Map<String, Value>>,
}

impl HandoffRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    /// Set a single context entry, creating the context map if needed.
    pub fn with_context_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Merge a typed navigation context into the free-form context map.
    pub fn with_navigation(mut self, nav: &NavigationContext) -> Self {
        if let Ok(Value::Object(fields)) = serde_json::to_value(nav) {
            self.context.get_or_insert_with(Map::new).extend(fields);
        }
        self
    }

    /// Produce a full state stamped at `now_ms`.
    pub fn stamp(self, now_ms: i64) -> HandoffState {
        HandoffState {
            return_url: self.return_url,
            context: self.context,
            timestamp: now_ms,
        }
    }
}

/// Which application initiated a handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum App {
    Portal,
    Dashboard,
}

/// What the user intends to do on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    View,
    Edit,
    Create,
    Delete,
}

/// Well-known shape for the `context` payload shared by both apps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationContext {
    pub from: App,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl NavigationContext {
    pub fn from_app(from: App) -> Self {
        Self {
            from,
            intent: None,
            resource_id: None,
            resource_type: None,
        }
    }
}
