//! `dcart` - CLI for donationcart
//!
//! This binary loads a donor session file and either reports its totals or
//! completes checkout for it.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use donationcart::checkout::{Checkout, CheckoutPolicy, CheckoutState};
use donationcart::cli::{CheckoutCommand, Cli, Command, ConfigCommand, TotalsCommand};
use donationcart::{init_logging, Config, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match cli.command {
        Command::Totals(cmd) => handle_totals(&load_config(cli.config)?, &cmd),
        Command::Checkout(cmd) => handle_checkout(&load_config(cli.config)?, &cmd),
        Command::Config(ConfigCommand::Validate { file }) => {
            handle_validate(file.or(cli.config))
        }
        Command::Config(cmd) => handle_config(&load_config(cli.config)?, cmd),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(path).context("loading configuration")
}

fn handle_totals(config: &Config, cmd: &TotalsCommand) -> anyhow::Result<()> {
    let store = Session::load(&cmd.session)?.into_store(config.fee_schedule());
    let totals = store.calculate_totals()?;
    let fee_offer = store.fee_offer()?;

    if cmd.json {
        let report = serde_json::json!({
            "items": store.items(),
            "payment_method": store.payment_method(),
            "cover_fees": store.cover_fees(),
            "fee_offer": fee_offer,
            "totals": totals,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if store.is_empty() {
        println!("Your donation cart is empty.");
        return Ok(());
    }

    println!("Donation Summary");
    println!("----------------");
    for item in store.items() {
        println!(
            "  {:<20} {:<10} ${}",
            item.id(),
            item.kind().label(),
            item.amount()
        );
    }
    println!();
    println!("Payment method:  {}", store.payment_method().label());
    println!("Subtotal:        ${}", totals.subtotal);
    if !totals.processing_fee.is_zero() {
        println!("Processing fee:  ${}", totals.processing_fee);
    } else if store.payment_method().has_processing_fee() {
        println!("Add ${fee_offer} to cover credit card processing fees.");
    }
    println!("Total:           ${}", totals.total);
    Ok(())
}

fn handle_checkout(config: &Config, cmd: &CheckoutCommand) -> anyhow::Result<()> {
    let mut store = Session::load(&cmd.session)?.into_store(config.fee_schedule());
    let policy = CheckoutPolicy::from_config(&config.checkout)?;
    let mut checkout = Checkout::begin(&mut store, &policy);

    if checkout.state() == CheckoutState::Empty {
        println!("Your donation cart is empty. Browse our projects to make a difference today.");
        return Ok(());
    }

    let confirmation = checkout.submit(&cmd.donor_form())?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&confirmation)?);
    } else {
        print!("{}", confirmation.render(&config.organization));
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Fees]");
                println!("  Percent (bps):      {}", config.fees.percent_bps);
                println!("  Fixed (cents):      {}", config.fees.fixed_cents);
                println!();
                println!("[Checkout]");
                println!(
                    "  Email pattern:      {}",
                    config.checkout.email_pattern.as_deref().unwrap_or("(none)")
                );
                println!(
                    "  Require honoree:    {}",
                    config.checkout.require_honoree_name
                );
                println!(
                    "  Require employer:   {}",
                    config.checkout.require_employer_name
                );
                println!(
                    "  Confirmation:       {}-0..{}",
                    config.checkout.confirmation_prefix, config.checkout.confirmation_max
                );
                println!();
                println!("[Organization]");
                println!("  Name:               {}", config.organization.name);
                println!("  Zelle email:        {}", config.organization.zelle_email);
                println!("  Support email:      {}", config.organization.support_email);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => return handle_validate(file),
    }
    Ok(())
}

fn handle_validate(file: Option<PathBuf>) -> anyhow::Result<()> {
    let path = file.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    Config::load_from(Some(path.clone()))
        .with_context(|| format!("configuration {} is invalid", path.display()))?;
    println!("Configuration is valid.");
    Ok(())
}
