//! `ibx network` - Network allocation and lookup.

use anyhow::Result;
use colored::Colorize;
use ibx::provision::allocation::{self, NetworkAllocationConfig, NetworkAllocationState};
use ibx::provision::lookup::{self, NetworkLookup};

use super::Context;
use crate::cli::args::{NetworkArgs, NetworkCommands};

pub async fn execute(ctx: Context, args: NetworkArgs) -> Result<()> {
    match args.command {
        NetworkCommands::Allocate {
            cidr,
            prefix_length,
            view,
            name,
            gateway,
            reserve,
        } => {
            let mut config =
                NetworkAllocationConfig::new(cidr, prefix_length, ctx.tenant_id.clone())
                    .view(view)
                    .reserve_ip(reserve);
            config.network_name = name;
            config.gateway = gateway;
            allocate_network(ctx, config).await
        }
        NetworkCommands::Show { reference, view } => show_network(ctx, reference, view).await,
        NetworkCommands::Delete { reference, view } => delete_network(ctx, reference, view).await,
        NetworkCommands::Update { reference } => update_network(&ctx, reference),
        NetworkCommands::Lookup { cidr, view } => lookup_network(ctx, cidr, view).await,
    }
}

/// Settings for a block known only by reference
fn known(ctx: &Context, view: String) -> NetworkAllocationConfig {
    NetworkAllocationConfig::new("", "", ctx.tenant_id.clone()).view(view)
}

async fn allocate_network(ctx: Context, config: NetworkAllocationConfig) -> Result<()> {
    // Reject bad input before touching the grid
    config.request()?;

    let objects = ctx.objects()?;
    let state = allocation::create(&objects, &config).await?;

    if !ctx.output_format.print_structured(&state)? {
        print_state(&state);
    }

    Ok(())
}

async fn show_network(ctx: Context, reference: String, view: String) -> Result<()> {
    let objects = ctx.objects()?;
    let mut state = NetworkAllocationState::existing(reference, known(&ctx, view));
    allocation::read(&objects, &mut state).await?;

    if !ctx.output_format.print_structured(&state)? {
        print_state(&state);
    }

    Ok(())
}

async fn delete_network(ctx: Context, reference: String, view: String) -> Result<()> {
    let objects = ctx.objects()?;
    let mut state = NetworkAllocationState::existing(reference.clone(), known(&ctx, view));
    allocation::delete(&objects, &mut state).await?;

    println!("{} Network {} deleted.", "Success:".green().bold(), reference.cyan());
    Ok(())
}

fn update_network(ctx: &Context, reference: String) -> Result<()> {
    let config = known(ctx, ibx::DEFAULT_VIEW.to_string());
    let state = NetworkAllocationState::existing(reference, config.clone());
    allocation::update(&state, &config)?;
    Ok(())
}

async fn lookup_network(ctx: Context, cidr: String, view: String) -> Result<()> {
    let objects = ctx.objects()?;
    let query = NetworkLookup {
        network_view_name: view,
        cidr,
        tenant_id: ctx.tenant_id.clone(),
    };
    let record = lookup::read(&objects, &query).await?;

    if !ctx.output_format.print_structured(&record)? {
        println!("{}", "Network:".bold());
        println!();
        println!("  {} {}", "id:".bold(), record.id.cyan());
        println!("  {} {}", "cidr:".bold(), record.cidr);
        println!("  {} {}", "view:".bold(), record.network_view_name);
        if !record.tenant_id.is_empty() {
            println!("  {} {}", "tenant:".bold(), record.tenant_id);
        }
    }

    Ok(())
}

fn print_state(state: &NetworkAllocationState) {
    println!("{}", "Network Allocation:".bold());
    println!();
    println!(
        "  {} {}",
        "id:".bold(),
        state.id.as_deref().unwrap_or("(none)").cyan()
    );
    if let Some(cidr) = &state.allocated_cidr {
        println!("  {} {}", "cidr:".bold(), cidr);
    }
    if !state.config.cidr.is_empty() {
        println!("  {} {}", "parent:".bold(), state.config.cidr);
    }
    println!("  {} {}", "view:".bold(), state.config.network_view_name);
    if let Some(name) = &state.config.network_name {
        println!("  {} {}", "name:".bold(), name);
    }
    if let Some(gateway) = &state.gateway_ip {
        println!("  {} {}", "gateway:".bold(), gateway.green());
    }
    if !state.reserved_ips.is_empty() {
        println!("  {} {}", "reserved:".bold(), state.reserved_ips.join(", "));
    }
    if !state.config.tenant_id.is_empty() {
        println!("  {} {}", "tenant:".bold(), state.config.tenant_id);
    }
}
