//! Donor session files.
//!
//! A session file is a JSON snapshot of a cart: its line items and the
//! donor's preferences. The `dcart` binary reads one to build a
//! [`CartStore`]; nothing is ever written back.
//!
//! ```json
//! {
//!   "items": [
//!     { "id": "water-well", "type": "one-time", "amount": "50" },
//!     { "id": "orphan-care", "type": "monthly", "amount": 25 }
//!   ],
//!   "cover_fees": true,
//!   "payment_method": "card",
//!   "donation_for": { "type": "memory", "name": "Jane Doe" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::{CartStore, DonationFor, DonationItem, EmployerMatch, FeeSchedule, PaymentMethod};
use crate::error::{Error, Result};

/// Serialized form of a donor session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Line items, in display order.
    pub items: Vec<DonationItem>,
    /// Whether the donor covers the processing fee.
    pub cover_fees: bool,
    /// Who the donation is attributed to.
    pub donation_for: DonationFor,
    /// Employer match details.
    pub employer_match: EmployerMatch,
    /// Payment method.
    pub payment_method: PaymentMethod,
}

impl Session {
    /// Read a session from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid session.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading session from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| Error::SessionLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse a session from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid session.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build a store holding this session, using the given fee schedule.
    #[must_use]
    pub fn into_store(self, fees: FeeSchedule) -> CartStore {
        let mut store = CartStore::with_fees(fees);
        for item in self.items {
            store.add_item(item);
        }
        store.set_cover_fees(self.cover_fees);
        store.set_donation_for(self.donation_for);
        store.set_employer_match(self.employer_match);
        store.set_payment_method(self.payment_method);
        store
    }
}
