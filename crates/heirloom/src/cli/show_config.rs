//! `heirloom config`.

use heirloom::HeirloomConfig;

/// Print the merged configuration as JSON. The API key is never printed.
pub fn show_config(config: &HeirloomConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if config.openai().api_key().is_some() {
        println!("# API key: set");
    } else {
        println!("# API key: not set (export OPENAI_API_KEY)");
    }
    Ok(())
}
