//! `ibx config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = ctx.config.masked();

    if ctx.output_format.print_structured(&config)? {
        return Ok(());
    }

    let unset = || "(not set)".dimmed().to_string();
    let field = |value: Option<String>| value.unwrap_or_else(unset);

    println!("{}", "Current Configuration:".bold());
    println!();
    println!("  {} {}", "host:".bold(), field(config.host.clone()));
    println!("  {} {}", "port:".bold(), field(config.port.map(|p| p.to_string())));
    println!("  {} {}", "wapi_version:".bold(), field(config.wapi_version.clone()));
    println!("  {} {}", "username:".bold(), field(config.username.clone()));
    println!("  {} {}", "password:".bold(), field(config.password.clone()));
    let ssl_verify = config.ssl_verify.map(|v| v.to_string());
    let timeout = config.timeout_secs.map(|t| format!("{t}s"));
    println!("  {} {}", "ssl_verify:".bold(), field(ssl_verify));
    println!("  {} {}", "timeout:".bold(), field(timeout));
    println!("  {} {}", "tenant_id:".bold(), field(config.tenant_id.clone()));
    println!("  {} {}", "cmp_type:".bold(), config.cmp_type());
    println!("  {} {}", "subdomain_match:".bold(), config.subdomain_match);
    println!(
        "  {} {}",
        "output_format:".bold(),
        config.output_format.unwrap_or(OutputFormat::Pretty)
    );

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let shown = if key == "password" { "****" } else { value };
    println!("{} {} set to {}.", "Success:".green().bold(), key, shown.cyan());
    Ok(())
}

fn show_path() -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
