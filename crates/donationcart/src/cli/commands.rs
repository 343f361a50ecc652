//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::checkout::DonorForm;

/// Totals command arguments.
#[derive(Debug, Args)]
pub struct TotalsCommand {
    /// Session file describing the cart (JSON)
    pub session: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Checkout command arguments.
#[derive(Debug, Args)]
pub struct CheckoutCommand {
    /// Session file describing the cart (JSON)
    pub session: PathBuf,

    /// Donor's name
    #[arg(short, long)]
    pub name: String,

    /// Donor's email address
    #[arg(short, long)]
    pub email: String,

    /// Honoree name for in-honor or in-memory donations
    #[arg(long)]
    pub honoree: Option<String>,

    /// Name of the employer matching the donation
    #[arg(long)]
    pub employer: Option<String>,

    /// Contact email for the matching employer
    #[arg(long)]
    pub employer_email: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl CheckoutCommand {
    /// The donor form these arguments describe.
    #[must_use]
    pub fn donor_form(&self) -> DonorForm {
        DonorForm {
            donor_name: self.name.clone(),
            donor_email: self.email.clone(),
            honoree_name: self.honoree.clone(),
            employer_name: self.employer.clone(),
            employer_email: self.employer_email.clone(),
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
