//! Best-effort SSO session probe against the portal.

use crate::config::PortalIntegrationConfig;
use crate::error::HandoffError;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the portal's SSO check endpoint.
///
/// The client keeps a cookie store so session cookies are sent along with
/// the probe, matching a credentialed browser request.
#[derive(Debug, Clone)]
pub struct SsoClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SsoClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, HandoffError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &PortalIntegrationConfig) -> Result<Self, HandoffError> {
        Self::new(config.sso_endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether the portal reports an authenticated session.
    ///
    /// Only the status code matters. Network errors and non-2xx responses
    /// are logged and reported as `false`.
    pub async fn check_remote_authentication(&self) -> bool {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                log::debug!(
                    "[sso] {} responded with {}",
                    self.endpoint,
                    resp.status()
                );
                false
            }
            Err(e) => {
                log::error!("[sso] SSO authentication check failed: {e}");
                false
            }
        }
    }
}

/// One-shot probe using the configured endpoint.
pub async fn check_remote_authentication(config: &PortalIntegrationConfig) -> bool {
    match SsoClient::from_config(config) {
        Ok(client) => client.check_remote_authentication().await,
        Err(e) => {
            log::error!("[sso] Failed to build HTTP client: {e}");
            false
        }
    }
}
