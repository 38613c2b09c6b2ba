use crate::prelude::{println, *};
use bookmeta_core::config::{ProviderKind, ProvidersConfig};
use colored::Colorize;
use std::time::Duration;

const TIMEOUT_VAR: &str = "BOOKMETA_TIMEOUT_SECS";

/// Show the configured providers
#[derive(Debug, clap::Args, Clone)]
pub struct ProvidersOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn base_url_var(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Google => "GOOGLE_BOOKS_BASE_URL",
        ProviderKind::OpenLibrary => "OPEN_LIBRARY_BASE_URL",
    }
}

fn quota_var(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::Google => "GOOGLE_BOOKS_CALLS_PER_MINUTE",
        ProviderKind::OpenLibrary => "OPEN_LIBRARY_CALLS_PER_MINUTE",
    }
}

fn parse_positive(name: &str, value: &str) -> std::result::Result<u32, Error> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Config(format!(
            "{name} must be a positive integer, got {value:?}"
        ))),
    }
}

/// Load provider configuration from environment variables
///
/// Each provider's base URL and calls-per-minute quota can be overridden;
/// anything unset keeps the built-in default.
pub fn from_env() -> std::result::Result<ProvidersConfig, Error> {
    from_lookup(|name| std::env::var(name).ok())
}

pub fn from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> std::result::Result<ProvidersConfig, Error> {
    let mut config = ProvidersConfig::default();

    let timeout = match lookup(TIMEOUT_VAR) {
        Some(value) => Some(Duration::from_secs(
            parse_positive(TIMEOUT_VAR, &value)? as u64,
        )),
        None => None,
    };

    for kind in ProviderKind::ALL {
        let provider = config.get_mut(kind);

        if let Some(url) = lookup(base_url_var(kind)) {
            let url = url.trim().to_string();
            if url.is_empty() {
                return Err(Error::Config(format!("{} is empty", base_url_var(kind))));
            }
            provider.base_url = url;
        }

        if let Some(value) = lookup(quota_var(kind)) {
            provider.calls_per_minute = parse_positive(quota_var(kind), &value)?;
        }

        if let Some(timeout) = timeout {
            provider.timeout = timeout;
        }
    }

    Ok(config)
}

pub fn run(options: ProvidersOptions, config: &ProvidersConfig) -> Result<()> {
    if options.json {
        println!("{}", format_providers_json(config)?);
        return Ok(());
    }

    println!("{}\n", "CONFIGURED PROVIDERS".bright_cyan().bold());
    format_providers_table(config).printstd();

    Ok(())
}

fn format_providers_json(config: &ProvidersConfig) -> Result<String> {
    let providers: Vec<serde_json::Value> = ProviderKind::ALL
        .iter()
        .map(|&kind| {
            let provider = config.get(kind);
            serde_json::json!({
                "provider": kind,
                "name": kind.display_name(),
                "base_url": provider.base_url,
                "calls_per_minute": provider.calls_per_minute,
                "timeout_secs": provider.timeout.as_secs(),
            })
        })
        .collect();

    serde_json::to_string_pretty(&providers).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_providers_table(config: &ProvidersConfig) -> prettytable::Table {
    let mut table = new_table();
    table.add_row(prettytable::row![
        "Provider".bold().cyan(),
        "Name".bold().cyan(),
        "Base URL".bold().cyan(),
        "Calls/min".bold().cyan(),
        "Timeout".bold().cyan()
    ]);

    for kind in ProviderKind::ALL {
        let provider = config.get(kind);
        table.add_row(prettytable::row![
            kind.as_str(),
            kind.display_name(),
            provider.base_url,
            provider.calls_per_minute,
            format!("{}s", provider.timeout.as_secs())
        ]);
    }

    table
}
