//! The checkout flow.
//!
//! A [`Checkout`] borrows the [`CartStore`] mutably for its whole lifetime, so
//! nothing else can change the cart while a donation is being submitted.
//!
//! ```text
//! Empty                      (cart had no items on entry; terminal)
//! Idle ──submit──▶ Submitting ──▶ Completed
//!   ▲                  │
//!   └── invalid form ──┘ (never leaves Idle)
//! ```

use std::fmt;

use regex::Regex;
use tracing::{info, warn};

use crate::cart::{CartStore, EmployerMatch, Totals};
use crate::config::CheckoutConfig;
use crate::confirmation::{
    Confirmation, ConfirmationIssuer, ConfirmationNumber, Donor, RandomIssuer,
};
use crate::error::{Error, Field, Result, ValidationError};

/// Where a checkout is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// The cart was empty when checkout began; there is nothing to submit.
    Empty,
    /// Waiting for the donor to submit the form.
    Idle,
    /// A submission is being applied.
    Submitting,
    /// The donation was submitted and the cart cleared.
    Completed,
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Rules applied to the donor form at submission.
#[derive(Debug, Clone)]
pub struct CheckoutPolicy {
    email_pattern: Option<Regex>,
    require_honoree_name: bool,
    require_employer_name: bool,
    confirmation_prefix: String,
    confirmation_max: u32,
}

impl CheckoutPolicy {
    /// Build a policy from checkout settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the email pattern is not a valid regex.
    pub fn from_config(config: &CheckoutConfig) -> Result<Self> {
        let email_pattern = config
            .email_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| Error::ConfigValidation {
                message: format!("invalid email_pattern: {e}"),
            })?;

        Ok(Self::build(config, email_pattern))
    }

    /// A policy that only checks the donor name and email are present.
    ///
    /// Confirmation numbering follows the default checkout settings.
    #[must_use]
    pub fn permissive() -> Self {
        let config = CheckoutConfig {
            email_pattern: None,
            require_honoree_name: false,
            require_employer_name: false,
            ..CheckoutConfig::default()
        };
        Self::build(&config, None)
    }

    fn build(config: &CheckoutConfig, email_pattern: Option<Regex>) -> Self {
        Self {
            email_pattern,
            require_honoree_name: config.require_honoree_name,
            require_employer_name: config.require_employer_name,
            confirmation_prefix: config.confirmation_prefix.clone(),
            confirmation_max: config.confirmation_max,
        }
    }

    fn check_email(&self, field: Field, email: &str) -> std::result::Result<(), ValidationError> {
        match &self.email_pattern {
            Some(pattern) if !pattern.is_match(email) => Err(ValidationError::malformed(
                field,
                format!("'{email}' is not a valid email address"),
            )),
            _ => Ok(()),
        }
    }
}

/// Free text the donor entered on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonorForm {
    /// Donor's name (required).
    pub donor_name: String,
    /// Donor's email (required).
    pub donor_email: String,
    /// Honoree name for in-honor or in-memory donations.
    pub honoree_name: Option<String>,
    /// Matching employer's name.
    pub employer_name: Option<String>,
    /// Matching employer's contact email.
    pub employer_email: Option<String>,
}

impl DonorForm {
    /// A form with just the donor's identity filled in.
    #[must_use]
    pub fn new(donor_name: impl Into<String>, donor_email: impl Into<String>) -> Self {
        Self {
            donor_name: donor_name.into(),
            donor_email: donor_email.into(),
            ..Self::default()
        }
    }

    /// Set the honoree name.
    #[must_use]
    pub fn with_honoree(mut self, name: impl Into<String>) -> Self {
        self.honoree_name = Some(name.into());
        self
    }

    /// Set the matching employer's details.
    #[must_use]
    pub fn with_employer(mut self, company: impl Into<String>, email: Option<String>) -> Self {
        self.employer_name = Some(company.into());
        self.employer_email = email;
        self
    }
}

/// Trimmed, non-empty text, or `None`.
fn entered(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// A checkout session over a donor's cart.
#[derive(Debug)]
pub struct Checkout<'a> {
    store: &'a mut CartStore,
    policy: &'a CheckoutPolicy,
    state: CheckoutState,
}

impl<'a> Checkout<'a> {
    /// Begin checkout. An empty cart yields a checkout in the `Empty` state.
    pub fn begin(store: &'a mut CartStore, policy: &'a CheckoutPolicy) -> Self {
        let state = if store.is_empty() {
            CheckoutState::Empty
        } else {
            CheckoutState::Idle
        };
        Self {
            store,
            policy,
            state,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// The cart being checked out.
    #[must_use]
    pub fn store(&self) -> &CartStore {
        self.store
    }

    /// Totals to display next to the form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmountOverflow`] if the cart's totals do not fit.
    pub fn totals(&self) -> Result<Totals> {
        self.store.calculate_totals()
    }

    /// Submit the donor form, drawing the confirmation number at random.
    ///
    /// # Errors
    ///
    /// See [`Checkout::submit_with`].
    pub fn submit(&mut self, form: &DonorForm) -> Result<Confirmation> {
        self.submit_with(form, &mut RandomIssuer)
    }

    /// Submit the donor form.
    ///
    /// On success the honoree and employer details are merged into the store,
    /// the cart is cleared and the checkout is `Completed`. On failure nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCart`] if the checkout began with an empty cart.
    /// - [`Error::AlreadySubmitted`] if this checkout was already submitted.
    /// - [`Error::Validation`] naming the first field that failed.
    /// - [`Error::AmountOverflow`] if the cart's totals do not fit.
    pub fn submit_with(
        &mut self,
        form: &DonorForm,
        issuer: &mut impl ConfirmationIssuer,
    ) -> Result<Confirmation> {
        match self.state {
            CheckoutState::Idle => {}
            CheckoutState::Empty => return Err(Error::EmptyCart),
            CheckoutState::Submitting | CheckoutState::Completed => {
                warn!(state = %self.state, "Rejecting duplicate submission");
                return Err(Error::AlreadySubmitted);
            }
        }

        let donor = self.validate(form).map_err(|err| {
            warn!(field = %err.field, reason = %err.reason, "Donor form rejected");
            Error::Validation(err)
        })?;
        let totals = self.store.calculate_totals()?;

        self.state = CheckoutState::Submitting;

        let mut donation_for = self.store.donation_for().clone();
        if donation_for.needs_name() {
            if let Some(name) = entered(form.honoree_name.as_ref()) {
                donation_for = donation_for.with_name(name);
                self.store.set_donation_for(donation_for.clone());
            }
        }

        let mut employer_match = self.store.employer_match().clone();
        if employer_match.enabled {
            if let Some(company) = entered(form.employer_name.as_ref()) {
                employer_match = EmployerMatch::for_company(
                    company,
                    entered(form.employer_email.as_ref()).map(str::to_string),
                );
                self.store.set_employer_match(employer_match.clone());
            }
        }

        let items = self.store.items().to_vec();
        self.store.clear();

        let number = ConfirmationNumber::new(
            self.policy.confirmation_prefix.clone(),
            issuer.next_number(self.policy.confirmation_max),
        );
        self.state = CheckoutState::Completed;

        info!(
            confirmation = %number,
            total = %totals.total,
            items = items.len(),
            "Donation submitted"
        );

        Ok(Confirmation {
            number,
            date: Confirmation::today(),
            payment_method: self.store.payment_method(),
            donor,
            donation_for,
            employer_match,
            items,
            totals,
        })
    }

    fn validate(&self, form: &DonorForm) -> std::result::Result<Donor, ValidationError> {
        let name = form.donor_name.trim();
        if name.is_empty() {
            return Err(ValidationError::missing(Field::DonorName));
        }
        let email = form.donor_email.trim();
        if email.is_empty() {
            return Err(ValidationError::missing(Field::DonorEmail));
        }
        self.policy.check_email(Field::DonorEmail, email)?;

        let donation_for = self.store.donation_for();
        if self.policy.require_honoree_name && donation_for.needs_name() {
            let has_name = entered(form.honoree_name.as_ref()).is_some()
                || donation_for.name().is_some_and(|n| !n.trim().is_empty());
            if !has_name {
                return Err(ValidationError::missing(Field::HonoreeName));
            }
        }

        let employer_match = self.store.employer_match();
        if employer_match.enabled {
            if self.policy.require_employer_name {
                let has_company = entered(form.employer_name.as_ref()).is_some()
                    || employer_match
                        .company
                        .as_deref()
                        .is_some_and(|c| !c.trim().is_empty());
                if !has_company {
                    return Err(ValidationError::missing(Field::EmployerName));
                }
            }
            if let Some(employer_email) = entered(form.employer_email.as_ref()) {
                self.policy
                    .check_email(Field::EmployerEmail, employer_email)?;
            }
        }

        Ok(Donor {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}
