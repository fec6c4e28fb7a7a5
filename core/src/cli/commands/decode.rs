use super::print_json;
use crate::cli::OutputFormat;
use crate::config::PortalIntegrationConfig;
use crate::handoff::Handoff;
use crate::state::{Clock, HandoffState, SystemClock};
use crate::transport::{HandoffTransport, PageLocation, UrlTransport};
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DecodeReport {
    state: Option<HandoffState>,
    token_present: bool,
    age_ms: Option<i64>,
    clean_url: String,
}

pub fn run(config: PortalIntegrationConfig, url: &str, format: OutputFormat) -> Result<(), String> {
    let handoff = Handoff::new(config);
    let location = PageLocation::new(url);
    let mut transport = UrlTransport::new(location.clone());

    let token_present = transport.peek().is_some();
    // Decoded without the TTL check, for reporting the age
    let raw = transport.peek_state();
    let state = handoff.decode_from_url(&mut transport);

    let report = DecodeReport {
        age_ms: raw
            .as_ref()
            .map(|s| SystemClock.now_millis().saturating_sub(s.timestamp)),
        state,
        token_present,
        clean_url: location.href(),
    };

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    match (&report.state, &raw, report.token_present) {
        (Some(state), _, _) => {
            println!("{}", "valid".green());
            if let Some(return_url) = &state.return_url {
                println!("  returnUrl: {return_url}");
            }
            if let Some(context) = &state.context {
                println!("  context:   {}", serde_json::Value::Object(context.clone()));
            }
        }
        (None, Some(_), _) => println!("{}", "expired".yellow()),
        (None, None, true) => println!("{}", "malformed".red()),
        (None, None, false) => println!("{}", "no handoff".dimmed()),
    }
    if let Some(age) = report.age_ms {
        println!("  age:       {age} ms");
    }
    println!("  clean url: {}", report.clean_url);

    Ok(())
}
