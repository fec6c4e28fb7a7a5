pub mod config;
pub mod decode;
pub mod sso;
pub mod url;

/// Serialize a value as pretty-printed JSON and print it to stdout.
fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON output: {e}"))?;
    println!("{json}");
    Ok(())
}
