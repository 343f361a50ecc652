//! Confirmation records produced by a completed checkout.
//!
//! A confirmation is display-only: the number is drawn at random on the
//! client, nothing is persisted, and nothing can be verified later.

use std::fmt;

use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::Serialize;

use crate::cart::{DonationFor, DonationItem, EmployerMatch, PaymentMethod, Totals};
use crate::config::OrganizationConfig;

/// Source of confirmation numbers.
pub trait ConfirmationIssuer {
    /// Draw a number in `0..max`.
    fn next_number(&mut self, max: u32) -> u32;
}

/// Draws confirmation numbers from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIssuer;

impl ConfirmationIssuer for RandomIssuer {
    fn next_number(&mut self, max: u32) -> u32 {
        rand::thread_rng().gen_range(0..max.max(1))
    }
}

/// A display-only confirmation number such as `IHC-482913`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfirmationNumber {
    prefix: String,
    value: u32,
}

impl ConfirmationNumber {
    /// Create a confirmation number.
    #[must_use]
    pub fn new(prefix: impl Into<String>, value: u32) -> Self {
        Self {
            prefix: prefix.into(),
            value,
        }
    }

    /// The numeric part.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for ConfirmationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.value)
    }
}

impl Serialize for ConfirmationNumber {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The donor identity captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Donor {
    /// Donor's name.
    pub name: String,
    /// Donor's email address.
    pub email: String,
}

/// Receipt for a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    /// Display-only confirmation number.
    pub number: ConfirmationNumber,
    /// Local date the donation was made.
    pub date: NaiveDate,
    /// Payment method chosen by the donor.
    pub payment_method: PaymentMethod,
    /// Who made the donation.
    pub donor: Donor,
    /// Attribution, with any honoree name entered at checkout.
    pub donation_for: DonationFor,
    /// Employer match, with any employer details entered at checkout.
    pub employer_match: EmployerMatch,
    /// The items that were in the cart.
    pub items: Vec<DonationItem>,
    /// Amounts at the moment of submission.
    pub totals: Totals,
}

impl Confirmation {
    /// Today's date in the local time zone.
    #[must_use]
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Label for the payment method line.
    #[must_use]
    pub fn payment_method_label(&self) -> &'static str {
        self.payment_method.label()
    }

    /// Render the confirmation as plain text.
    #[must_use]
    pub fn render(&self, org: &OrganizationConfig) -> String {
        let mut out = String::new();
        out.push_str("Thank You for Your Donation!\n\n");
        out.push_str("Donation Details\n");
        out.push_str("----------------\n");
        out.push_str(&format!("Confirmation Number:  {}\n", self.number));
        out.push_str(&format!("Date:                 {}\n", self.date.format("%m/%d/%Y")));
        out.push_str(&format!("Payment Method:       {}\n", self.payment_method_label()));
        out.push_str(&format!("Donor:                {} <{}>\n", self.donor.name, self.donor.email));
        out.push_str(&format!("Attribution:          {}\n", self.donation_for.label()));
        if self.employer_match.enabled {
            let company = self.employer_match.company.as_deref().unwrap_or("(not given)");
            out.push_str(&format!("Employer Match:       {company}\n"));
        }
        out.push('\n');
        for item in &self.items {
            out.push_str(&format!(
                "  {:<20} {:<10} ${}\n",
                item.id(),
                item.kind().label(),
                item.amount()
            ));
        }
        out.push('\n');
        out.push_str(&format!("Subtotal:             ${}\n", self.totals.subtotal));
        if !self.totals.processing_fee.is_zero() {
            out.push_str(&format!(
                "Processing Fee:       ${}\n",
                self.totals.processing_fee
            ));
        }
        out.push_str(&format!("Total:                ${}\n", self.totals.total));
        if self.payment_method == PaymentMethod::Zelle {
            out.push('\n');
            out.push_str(&format!(
                "To donate via Zelle, please use the email: {}\n",
                org.zelle_email
            ));
            out.push_str("Include your name and donation purpose in the memo.\n");
        }
        out.push('\n');
        out.push_str(&format!(
            "If you have any questions, please contact {} at {}\n",
            org.name, org.support_email
        ));
        out
    }
}
