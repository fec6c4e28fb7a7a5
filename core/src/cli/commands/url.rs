use super::print_json;
use crate::cli::OutputFormat;
use crate::config::{Direction, PortalIntegrationConfig};
use crate::handoff::Handoff;
use crate::state::HandoffRequest;
use serde_json::Value;

pub fn run(
    config: PortalIntegrationConfig,
    direction: Direction,
    route: &str,
    return_url: Option<String>,
    context: &[String],
    format: OutputFormat,
) -> Result<(), String> {
    let request = build_request(return_url, context)?;
    let handoff = Handoff::new(config);
    let url = handoff.build_outbound_url(direction, route, request)?;

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({ "url": url }));
    }
    println!("{url}");
    Ok(())
}

/// Build the handoff request from CLI flags. No flags means no state.
fn build_request(
    return_url: Option<String>,
    context: &[String],
) -> Result<Option<HandoffRequest>, String> {
    if return_url.is_none() && context.is_empty() {
        return Ok(None);
    }
    let mut request = HandoffRequest::new();
    request.return_url = return_url;
    for entry in context {
        let (key, value) = parse_context_entry(entry)?;
        request = request.with_context_value(key, value);
    }
    Ok(Some(request))
}

/// Parse `key=value`; the value is JSON if it parses as JSON, else a string.
fn parse_context_entry(entry: &str) -> Result<(String, Value), String> {
    let (key, raw) = entry
        .split_once('=')
        .ok_or_else(|| format!("Invalid context entry '{entry}': expected KEY=VALUE"))?;
    if key.is_empty() {
        return Err(format!("Invalid context entry '{entry}': empty key"));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
    Ok((key.to_owned(), value))
}
