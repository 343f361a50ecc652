//! The donation cart store.
//!
//! [`CartStore`] is the single source of truth for a donor's in-progress
//! contribution set and checkout preferences. Line items are appended and
//! removed through the store; totals are derived on every read, so they are
//! never stale.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::money::Money;

/// Opaque identifier of a donation line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an identifier from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The category of a donation line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonationType {
    /// A single gift.
    #[default]
    OneTime,
    /// A gift repeated every month.
    Monthly,
    /// Obligatory almsgiving.
    Zakat,
    /// Voluntary charity.
    Sadaqah,
    /// A gift in honor of someone.
    InHonor,
    /// A gift in memory of someone.
    InMemory,
}

impl DonationType {
    /// Human-readable label for receipts.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::OneTime => "One-time",
            Self::Monthly => "Monthly",
            Self::Zakat => "Zakat",
            Self::Sadaqah => "Sadaqah",
            Self::InHonor => "In honor",
            Self::InMemory => "In memory",
        }
    }
}

impl fmt::Display for DonationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneTime => write!(f, "one-time"),
            Self::Monthly => write!(f, "monthly"),
            Self::Zakat => write!(f, "zakat"),
            Self::Sadaqah => write!(f, "sadaqah"),
            Self::InHonor => write!(f, "in-honor"),
            Self::InMemory => write!(f, "in-memory"),
        }
    }
}

/// One pledged contribution in the cart.
///
/// Items are immutable once created. The amount is always greater than zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDonationItem")]
pub struct DonationItem {
    id: ItemId,
    #[serde(rename = "type")]
    kind: DonationType,
    amount: Money,
}

#[derive(Deserialize)]
struct RawDonationItem {
    id: ItemId,
    #[serde(rename = "type", default)]
    kind: DonationType,
    amount: Money,
}

impl TryFrom<RawDonationItem> for DonationItem {
    type Error = Error;

    fn try_from(raw: RawDonationItem) -> Result<Self> {
        Self::new(raw.id, raw.kind, raw.amount)
    }
}

impl DonationItem {
    /// Create a new line item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAmount`] if `amount` is zero.
    pub fn new(id: impl Into<ItemId>, kind: DonationType, amount: Money) -> Result<Self> {
        let id = id.into();
        if amount.is_zero() {
            return Err(Error::invalid_amount(format!(
                "donation '{id}' must be greater than zero"
            )));
        }
        Ok(Self { id, kind, amount })
    }

    /// The item's identifier.
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// The item's category.
    #[must_use]
    pub fn kind(&self) -> DonationType {
        self.kind
    }

    /// The pledged amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.amount
    }
}

/// Who a donation is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DonationFor {
    /// The donor themself.
    #[default]
    #[serde(rename = "self")]
    Myself,
    /// In honor of a living person.
    Behalf {
        /// The honoree's name.
        #[serde(default)]
        name: String,
    },
    /// In memory of someone.
    Memory {
        /// The name of the person remembered.
        #[serde(default)]
        name: String,
    },
}

impl DonationFor {
    /// The honoree's name, if this attribution carries one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Myself => None,
            Self::Behalf { name } | Self::Memory { name } => Some(name),
        }
    }

    /// Check if this attribution needs an honoree name.
    #[must_use]
    pub fn needs_name(&self) -> bool {
        !matches!(self, Self::Myself)
    }

    /// The same attribution with the honoree name replaced.
    ///
    /// `Myself` carries no name and is returned unchanged.
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        match self {
            Self::Myself => Self::Myself,
            Self::Behalf { .. } => Self::Behalf { name: name.into() },
            Self::Memory { .. } => Self::Memory { name: name.into() },
        }
    }

    /// Receipt line describing the attribution.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Myself => "Donated as yourself".to_string(),
            Self::Behalf { name } => format!("In honor of {name}"),
            Self::Memory { name } => format!("In memory of {name}"),
        }
    }
}

/// Optional matching-gift details from the donor's employer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployerMatch {
    /// Whether the donor's employer will match the donation.
    pub enabled: bool,
    /// The employer's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// The employer's contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EmployerMatch {
    /// An enabled match for the given company.
    #[must_use]
    pub fn for_company(company: impl Into<String>, email: Option<String>) -> Self {
        Self {
            enabled: true,
            company: Some(company.into()),
            email,
        }
    }
}

/// How the donor intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    Card,
    /// Zelle bank transfer.
    Zelle,
}

impl PaymentMethod {
    /// Human-readable label for receipts.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Card => "Credit Card",
            Self::Zelle => "Zelle",
        }
    }

    /// Check if card processing fees apply to this method.
    #[must_use]
    pub fn has_processing_fee(&self) -> bool {
        matches!(self, Self::Card)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Zelle => write!(f, "zelle"),
        }
    }
}

/// Card processing fee: a percentage of the subtotal plus a fixed amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    /// Percentage part, in basis points.
    pub percent_bps: u32,
    /// Fixed part added to every charge.
    pub fixed: Money,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            percent_bps: 290,
            fixed: Money::from_cents(30),
        }
    }
}

impl FeeSchedule {
    /// The fee charged on `subtotal`.
    ///
    /// The percentage part is rounded half-up to the cent before the fixed
    /// part is added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmountOverflow`] if the fee does not fit in a [`Money`].
    pub fn fee_for(&self, subtotal: Money) -> Result<Money> {
        subtotal
            .percent_bps(self.percent_bps)
            .and_then(|fee| fee.checked_add(self.fixed))
            .ok_or(Error::AmountOverflow)
    }
}

/// Derived amounts for the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    /// Sum of all line item amounts.
    pub subtotal: Money,
    /// Fee offset added by the donor, or zero.
    pub processing_fee: Money,
    /// `subtotal + processing_fee`.
    pub total: Money,
}

/// In-memory store for one donor session.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<DonationItem>,
    cover_fees: bool,
    donation_for: DonationFor,
    employer_match: EmployerMatch,
    payment_method: PaymentMethod,
    fees: FeeSchedule,
}

impl CartStore {
    /// Create an empty store with the default fee schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with a custom fee schedule.
    #[must_use]
    pub fn with_fees(fees: FeeSchedule) -> Self {
        Self {
            fees,
            ..Self::default()
        }
    }

    /// Append an item. Duplicate ids are allowed.
    pub fn add_item(&mut self, item: DonationItem) {
        debug!(id = %item.id, kind = %item.kind, amount = %item.amount, "Adding donation");
        self.items.push(item);
    }

    /// Remove the first item with the given id.
    ///
    /// Returns the removed item, or `None` if no item matched.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<DonationItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        debug!(%id, "Removing donation");
        Some(self.items.remove(index))
    }

    /// Remove every item. Preferences are kept.
    pub fn clear(&mut self) {
        debug!(count = self.items.len(), "Clearing cart");
        self.items.clear();
    }

    /// Restore every field except the fee schedule to its initial value.
    pub fn reset(&mut self) {
        debug!("Resetting donor session");
        *self = Self::with_fees(self.fees);
    }

    /// Set whether the donor covers the processing fee.
    pub fn set_cover_fees(&mut self, cover_fees: bool) {
        debug!(cover_fees, "Setting fee coverage");
        self.cover_fees = cover_fees;
    }

    /// Set who the donation is attributed to.
    pub fn set_donation_for(&mut self, donation_for: DonationFor) {
        debug!(?donation_for, "Setting attribution");
        self.donation_for = donation_for;
    }

    /// Set the employer match details.
    pub fn set_employer_match(&mut self, employer_match: EmployerMatch) {
        debug!(enabled = employer_match.enabled, "Setting employer match");
        self.employer_match = employer_match;
    }

    /// Set the payment method.
    pub fn set_payment_method(&mut self, payment_method: PaymentMethod) {
        debug!(%payment_method, "Setting payment method");
        self.payment_method = payment_method;
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[DonationItem] {
        &self.items
    }

    /// Number of items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the donor covers the processing fee.
    #[must_use]
    pub fn cover_fees(&self) -> bool {
        self.cover_fees
    }

    /// Who the donation is attributed to.
    #[must_use]
    pub fn donation_for(&self) -> &DonationFor {
        &self.donation_for
    }

    /// Employer match details.
    #[must_use]
    pub fn employer_match(&self) -> &EmployerMatch {
        &self.employer_match
    }

    /// The selected payment method.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The fee schedule this store was created with.
    #[must_use]
    pub fn fees(&self) -> FeeSchedule {
        self.fees
    }

    /// Sum of all item amounts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmountOverflow`] if the sum does not fit in a [`Money`].
    pub fn subtotal(&self) -> Result<Money> {
        Money::checked_sum(self.items.iter().map(DonationItem::amount)).ok_or(Error::AmountOverflow)
    }

    /// The fee the donor would add by opting in, whether or not they have.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmountOverflow`] if the subtotal or fee does not fit.
    pub fn fee_offer(&self) -> Result<Money> {
        self.fees.fee_for(self.subtotal()?)
    }

    /// Derive subtotal, processing fee and total from the current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmountOverflow`] if any derived amount does not fit,
    /// so `total == subtotal + processing_fee` always holds for a returned value.
    pub fn calculate_totals(&self) -> Result<Totals> {
        let subtotal = self.subtotal()?;
        let processing_fee = if self.cover_fees && self.payment_method.has_processing_fee() {
            self.fees.fee_for(subtotal)?
        } else {
            Money::ZERO
        };
        let total = subtotal
            .checked_add(processing_fee)
            .ok_or(Error::AmountOverflow)?;
        Ok(Totals {
            subtotal,
            processing_fee,
            total,
        })
    }
}
