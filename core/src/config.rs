//! Portal integration configuration.
//!
//! Each deployment environment carries a complete, immutable description of
//! where the portal and dashboard live, which session-store key carries
//! handoff state, and the symbolic routes each side exposes. The config is
//! built once at startup and handed to [`crate::Handoff`] explicitly.

use crate::error::HandoffError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Session-store key shared by both built-in environments.
pub const DEFAULT_SHARED_STATE_KEY: &str = "xcloud_shared_state";

/// Deployment environment the apps are running in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Select an environment from a build/runtime indicator such as a
    /// `MODE` or `NODE_ENV` value. Unrecognized indicators fall back to
    /// development.
    pub fn from_indicator(indicator: &str) -> Self {
        match indicator.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => {
                if !other.is_empty() {
                    log::debug!("[config] Unknown environment '{other}', using development");
                }
                Self::Development
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which application a navigation is headed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    ToPortal,
    ToDashboard,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToPortal => "toPortal",
            Self::ToDashboard => "toDashboard",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route name to path mappings for each direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffRoutes {
    pub to_portal: BTreeMap<String, String>,
    pub to_dashboard: BTreeMap<String, String>,
}

impl HandoffRoutes {
    pub fn for_direction(&self, direction: Direction) -> &BTreeMap<String, String> {
        match direction {
            Direction::ToPortal => &self.to_portal,
            Direction::ToDashboard => &self.to_dashboard,
        }
    }
}

impl Default for HandoffRoutes {
    fn default() -> Self {
        let routes = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(name, path)| ((*name).to_owned(), (*path).to_owned()))
                .collect()
        };
        Self {
            to_portal: routes(&[("landing", "/"), ("auth", "/auth"), ("profile", "/profile")]),
            to_dashboard: routes(&[
                ("home", "/"),
                ("deployments", "/deployments"),
                ("analytics", "/analytics"),
                ("team", "/team"),
            ]),
        }
    }
}

/// Everything the handoff module needs to know about the two applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalIntegrationConfig {
    pub portal_url: String,
    pub dashboard_url: String,
    pub sso_endpoint: String,
    pub shared_state_key: String,
    pub handoff_routes: HandoffRoutes,
}

impl PortalIntegrationConfig {
    /// Built-in configuration for an environment.
    pub fn for_environment(env: Environment) -> Self {
        let (portal_url, dashboard_url) = match env {
            Environment::Development => ("http://localhost:3000", "http://localhost:5173"),
            Environment::Production => ("https://portal.xcloud.io", "https://dashboard.xcloud.io"),
        };
        Self {
            portal_url: portal_url.to_owned(),
            dashboard_url: dashboard_url.to_owned(),
            sso_endpoint: format!("{portal_url}/api/auth/sso"),
            shared_state_key: DEFAULT_SHARED_STATE_KEY.to_owned(),
            handoff_routes: HandoffRoutes::default(),
        }
    }

    /// Load a configuration override from a JSON file.
    ///
    /// The file uses the same camelCase shape as the web apps' config object.
    pub fn load(path: &Path) -> Result<Self, HandoffError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("[config] Loaded portal config from {}", path.display());
        Ok(config)
    }

    /// Check that URLs are absolute and route paths are rooted.
    pub fn validate(&self) -> Result<(), HandoffError> {
        for (field, url) in [
            ("portalUrl", &self.portal_url),
            ("dashboardUrl", &self.dashboard_url),
            ("ssoEndpoint", &self.sso_endpoint),
        ] {
            if !is_absolute_http_url(url) {
                return Err(HandoffError::config(format!(
                    "{field} must be an absolute http(s) URL, got '{url}'"
                )));
            }
        }
        if self.shared_state_key.trim().is_empty() {
            return Err(HandoffError::config("sharedStateKey must not be empty"));
        }
        for direction in [Direction::ToPortal, Direction::ToDashboard] {
            for (name, path) in self.handoff_routes.for_direction(direction) {
                if !path.starts_with('/') {
                    return Err(HandoffError::config(format!(
                        "{direction} route '{name}' must start with '/', got '{path}'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Base URL of the application a direction points at, without a trailing slash.
    pub fn base_url(&self, direction: Direction) -> &str {
        let url = match direction {
            Direction::ToPortal => &self.portal_url,
            Direction::ToDashboard => &self.dashboard_url,
        };
        url.trim_end_matches('/')
    }

    /// Look up the path for a symbolic route name.
    pub fn route_path(&self, direction: Direction, route: &str) -> Result<&str, HandoffError> {
        self.handoff_routes
            .for_direction(direction)
            .get(route)
            .map(String::as_str)
            .ok_or_else(|| HandoffError::unknown_route(direction, route))
    }

    /// Absolute target URL for a route, without any handoff payload.
    pub fn target_url(&self, direction: Direction, route: &str) -> Result<String, HandoffError> {
        let path = self.route_path(direction, route)?;
        Ok(format!("{}{path}", self.base_url(direction)))
    }
}

impl Default for PortalIntegrationConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

fn is_absolute_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.starts_with('/'))
}
