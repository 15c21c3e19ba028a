//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    let pricing = &ctx.config.pricing;
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", pricing.currency.code());
    ctx.output.kv(
        "tax_rate_bps",
        &format!("{} ({}%)", pricing.tax_rate_bps, pricing.tax_rate_percent()),
    );
    ctx.output.kv(
        "shipping_fee",
        &format!("{} ({})", pricing.shipping_fee, pricing.shipping_fee()),
    );

    let checkout = &ctx.config.checkout;
    ctx.output.info("[checkout]");
    ctx.output.kv("timeout_ms", &checkout.timeout_ms.to_string());
    ctx.output.kv("max_attempts", &checkout.max_attempts.to_string());
    ctx.output.kv("retry_delay_ms", &checkout.retry_delay_ms.to_string());

    let gateway = &ctx.config.gateway;
    ctx.output.info("[gateway]");
    ctx.output.kv("kind", &format!("{:?}", gateway.kind).to_lowercase());
    ctx.output.kv("latency_ms", &gateway.latency_ms.to_string());
    ctx.output.kv("success_rate", &gateway.success_rate.to_string());
    if let Some(ref endpoint) = gateway.endpoint {
        ctx.output.kv("endpoint", endpoint);
    }
    if gateway.api_key.is_some() {
        ctx.output.kv("api_key", "********");
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    // Context::load already rejected invalid files; only warnings remain here.
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config_path.is_none() {
        warnings.push("no techknot.toml found, using built-in defaults".to_string());
    }
    if ctx.config.checkout.max_attempts == 0 {
        warnings.push("checkout.max_attempts = 0 is treated as 1".to_string());
    }
    if ctx.config.gateway.success_rate == 0.0 {
        warnings.push("gateway.success_rate = 0.0 declines every payment".to_string());
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "valid": true, "warnings": warnings }));
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }
    ctx.output.success("Configuration is valid");

    Ok(())
}
