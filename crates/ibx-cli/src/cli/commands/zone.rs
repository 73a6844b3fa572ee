//! `ibx zone` - Authoritative DNS zones.

use anyhow::Result;
use colored::Colorize;
use ibx::provision::zone::{self, ZoneAuthConfig, ZoneAuthState};

use super::Context;
use crate::cli::args::{ZoneArgs, ZoneCommands};

pub async fn execute(ctx: Context, args: ZoneArgs) -> Result<()> {
    match args.command {
        ZoneCommands::Create { fqdn, dns_view } => create_zone(ctx, fqdn, dns_view).await,
        ZoneCommands::Show { reference, fqdn } => show_zone(ctx, reference, fqdn).await,
        ZoneCommands::Delete { reference, fqdn } => delete_zone(ctx, reference, fqdn).await,
        ZoneCommands::Update { reference } => update_zone(&ctx, reference),
        ZoneCommands::List => list_zones(ctx).await,
    }
}

async fn create_zone(ctx: Context, fqdn: String, dns_view: String) -> Result<()> {
    let config = ZoneAuthConfig::new(fqdn, ctx.tenant_id.clone()).view(dns_view);
    config.validate()?;

    let objects = ctx.objects()?;
    let state = zone::create(&objects, &config).await?;

    if !ctx.output_format.print_structured(&state)? {
        print_state(&state);
    }

    Ok(())
}

async fn show_zone(ctx: Context, reference: String, fqdn: String) -> Result<()> {
    let objects = ctx.objects()?;
    let config = ZoneAuthConfig::new(fqdn, ctx.tenant_id.clone());
    let mut state = ZoneAuthState::existing(reference, config);
    zone::read(&objects, &mut state).await?;

    if !ctx.output_format.print_structured(&state)? {
        print_state(&state);
    }

    Ok(())
}

async fn delete_zone(ctx: Context, reference: String, fqdn: String) -> Result<()> {
    let objects = ctx.objects()?;
    let config = ZoneAuthConfig::new(fqdn.clone(), ctx.tenant_id.clone());
    let mut state = ZoneAuthState::existing(reference, config);
    zone::delete(&objects, &mut state, ctx.config.subdomain_match).await?;

    println!("{} Zone {} deleted.", "Success:".green().bold(), fqdn.cyan());
    Ok(())
}

fn update_zone(ctx: &Context, reference: String) -> Result<()> {
    let config = ZoneAuthConfig::new("", ctx.tenant_id.clone());
    let state = ZoneAuthState::existing(reference, config.clone());
    zone::update(&state, &config)?;
    Ok(())
}

async fn list_zones(ctx: Context) -> Result<()> {
    let objects = ctx.objects()?;
    let zones = objects.list_zones().await?;

    if ctx.output_format.print_structured(&zones)? {
        return Ok(());
    }

    println!("{}", "Auth Zones:".bold());
    println!();

    if zones.is_empty() {
        println!("  No auth zones found.");
        println!();
        println!("  Create one with: {} zone create <FQDN>", "ibx".cyan());
    } else {
        for z in &zones {
            println!("  {} {}", z.fqdn.cyan(), z.view.dimmed());
            if ctx.verbose {
                println!("    {}", z.reference);
            }
        }
    }

    Ok(())
}

fn print_state(state: &ZoneAuthState) {
    println!("{}", "Auth Zone:".bold());
    println!();
    println!(
        "  {} {}",
        "id:".bold(),
        state.id.as_deref().unwrap_or("(none)").cyan()
    );
    println!("  {} {}", "fqdn:".bold(), state.config.fqdn);
    println!("  {} {}", "view:".bold(), state.config.dns_view);
    if !state.config.tenant_id.is_empty() {
        println!("  {} {}", "tenant:".bold(), state.config.tenant_id);
    }
}
