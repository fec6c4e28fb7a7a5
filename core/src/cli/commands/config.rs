use super::print_json;
use crate::cli::OutputFormat;
use crate::config::{Direction, PortalIntegrationConfig};
use colored::Colorize;

pub fn run(config: &PortalIntegrationConfig, format: OutputFormat) -> Result<(), String> {
    if format == OutputFormat::Json {
        return print_json(config);
    }

    println!("{}      {}", "Portal:".bold(), config.portal_url);
    println!("{}   {}", "Dashboard:".bold(), config.dashboard_url);
    println!("{}         {}", "SSO:".bold(), config.sso_endpoint);
    println!("{} {}", "Session key:".bold(), config.shared_state_key);

    for direction in [Direction::ToPortal, Direction::ToDashboard] {
        println!();
        println!("{}", direction.as_str().bold());
        for (name, path) in config.handoff_routes.for_direction(direction) {
            println!("  {name:<12} {}{path}", config.base_url(direction));
        }
    }

    Ok(())
}
