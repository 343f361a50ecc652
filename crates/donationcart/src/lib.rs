//! `donationcart` - Donation cart and checkout for a charitable foundation
//!
//! This library holds a donor's in-progress contributions, derives subtotal,
//! processing fee and total in fixed-point cents, and runs the checkout that
//! validates the donor form and produces a display-only confirmation.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cart;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod logging;
pub mod money;
pub mod session;

pub use cart::{
    CartStore, DonationFor, DonationItem, DonationType, EmployerMatch, FeeSchedule, ItemId,
    PaymentMethod, Totals,
};
pub use checkout::{Checkout, CheckoutPolicy, CheckoutState, DonorForm};
pub use config::Config;
pub use confirmation::{Confirmation, ConfirmationIssuer, ConfirmationNumber, RandomIssuer};
pub use error::{Error, Field, Result, ValidationError};
pub use logging::init_logging;
pub use money::Money;
pub use session::Session;
