//! Delivery details and the form used to submit them.
//!
//! [`DeliveryDetailsForm`] holds raw user input. [`DeliveryDetailsForm::validate`]
//! is the only way to obtain a [`DeliveryDetails`] from it, and
//! `DeliveryDetailsForm::from(&DeliveryDetails)` prefills a form from a stored
//! record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Postal delivery record attached to a transaction.
///
/// The submitting party replaces the whole record; there are no partial
/// updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// Form field names, as posted and as reported in [`FormErrors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeliveryField {
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    Country,
}

impl DeliveryField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddressLine1 => "addressLine1",
            Self::AddressLine2 => "addressLine2",
            Self::City => "city",
            Self::State => "state",
            Self::PostalCode => "postalCode",
            Self::Country => "country",
        }
    }
}

/// Per-field validation messages keyed by wire field name.
pub type FormErrors = BTreeMap<&'static str, String>;

/// Raw delivery form input.
///
/// Every field defaults to empty so a partially posted form still decodes and
/// can be redisplayed with errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeliveryDetailsForm {
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl DeliveryDetailsForm {
    /// Validate the input and produce the record to submit.
    ///
    /// Values are kept as entered so a prefilled form resubmits the stored
    /// record unchanged. Address line 2 may be empty; every other field is
    /// required, and whitespace alone does not count as a value.
    ///
    /// # Examples
    /// ```
    /// use web_gateway::domain::DeliveryDetailsForm;
    ///
    /// let form = DeliveryDetailsForm {
    ///     address_line1: " 1 Main St ".into(),
    ///     city: "Springfield".into(),
    ///     state: "IL".into(),
    ///     postal_code: "62701".into(),
    ///     country: "US".into(),
    ///     ..DeliveryDetailsForm::default()
    /// };
    /// let details = form.validate().expect("complete form");
    /// assert_eq!(details.address_line1, " 1 Main St ");
    ///
    /// let errors = DeliveryDetailsForm::default().validate().expect_err("empty form");
    /// assert_eq!(errors.len(), 5);
    /// ```
    pub fn validate(&self) -> Result<DeliveryDetails, FormErrors> {
        use DeliveryField as F;

        let mut errors = FormErrors::new();
        let address_line1 = check(&mut errors, F::AddressLine1, &self.address_line1, true);
        let address_line2 = check(&mut errors, F::AddressLine2, &self.address_line2, false);
        let city = check(&mut errors, F::City, &self.city, true);
        let state = check(&mut errors, F::State, &self.state, true);
        let postal_code = check(&mut errors, F::PostalCode, &self.postal_code, true);
        let country = check(&mut errors, F::Country, &self.country, true);

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(DeliveryDetails {
            address_line1,
            address_line2,
            city,
            state,
            postal_code,
            country,
        })
    }
}

fn check(errors: &mut FormErrors, field: DeliveryField, raw: &str, required: bool) -> String {
    if required && raw.trim().is_empty() {
        errors.insert(field.as_str(), "This field is required".to_owned());
    }
    raw.to_owned()
}

impl From<&DeliveryDetails> for DeliveryDetailsForm {
    fn from(details: &DeliveryDetails) -> Self {
        Self {
            address_line1: details.address_line1.clone(),
            address_line2: details.address_line2.clone(),
            city: details.city.clone(),
            state: details.state.clone(),
            postal_code: details.postal_code.clone(),
            country: details.country.clone(),
        }
    }
}
