//! Create/edit form state and submit-time validation.
//!
//! # Invariants
//! - Numeric fields are checked before the name, matching the order in
//!   which users are alerted.
//! - Submitted names are trimmed.

use crate::model::property::{Property, PropertyDraft, PropertyPatch};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Latitude, longitude or price is not a finite number.
    InvalidNumber,
    EmptyName,
    NegativePrice,
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::InvalidNumber => "Please enter valid numbers for coordinates and price",
            Self::EmptyName => "Please enter a property name",
            Self::NegativePrice => "Please enter a price of zero or more",
        };
        f.write_str(message)
    }
}

impl Error for FormError {}

/// Raw, uncommitted form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyForm {
    pub name: String,
    pub lat: String,
    pub lng: String,
    pub price: String,
}

impl PropertyForm {
    /// Prefills an edit form from a stored property.
    pub fn from_property(property: &Property) -> Self {
        Self {
            name: property.name.clone(),
            lat: property.lat.to_string(),
            lng: property.lng.to_string(),
            price: property.price.to_string(),
        }
    }

    /// Validates input and converts it into a create draft.
    pub fn validate(&self) -> Result<PropertyDraft, FormError> {
        let (Some(lat), Some(lng), Some(price)) = (
            parse_number(&self.lat),
            parse_number(&self.lng),
            parse_number(&self.price),
        ) else {
            return Err(FormError::InvalidNumber);
        };

        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::EmptyName);
        }
        if price < 0.0 {
            return Err(FormError::NegativePrice);
        }

        Ok(PropertyDraft::new(name, lat, lng, price))
    }

    /// Validates input and converts it into a full-replacement patch.
    pub fn to_patch(&self) -> Result<PropertyPatch, FormError> {
        self.validate().map(PropertyPatch::from)
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
