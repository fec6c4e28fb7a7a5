use super::print_json;
use crate::cli::OutputFormat;
use crate::config::PortalIntegrationConfig;
use crate::sso::SsoClient;
use colored::Colorize;

pub fn run(config: &PortalIntegrationConfig, format: OutputFormat) -> Result<(), String> {
    let client = SsoClient::from_config(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;
    let authenticated = runtime.block_on(client.check_remote_authentication());

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "endpoint": client.endpoint(),
            "authenticated": authenticated,
        }));
    }

    if authenticated {
        println!("{} {}", "authenticated".green(), client.endpoint());
    } else {
        println!("{} {}", "not authenticated".yellow(), client.endpoint());
    }
    Ok(())
}
