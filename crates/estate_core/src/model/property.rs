//! Property domain model.
//!
//! # Responsibility
//! - Define the listing record rendered by the map, table and form views.
//! - Provide validation and partial-update (patch) helpers.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `name` is non-empty after trimming.
//! - `lat`/`lng` are finite; `price` is finite and `>= 0`.

use crate::map::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque, store-assigned identifier of a property.
pub type PropertyId = Uuid;

/// Field-level validation failures for property records.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValidationError {
    EmptyName,
    NonFiniteCoordinate { field: &'static str, value: f64 },
    InvalidPrice(f64),
}

impl Display for PropertyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "property name cannot be empty"),
            Self::NonFiniteCoordinate { field, value } => {
                write!(f, "property {field} must be a finite number, got {value}")
            }
            Self::InvalidPrice(value) => {
                write!(f, "property price must be a finite number >= 0, got {value}")
            }
        }
    }
}

impl Error for PropertyValidationError {}

/// A real-estate listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub price: f64,
}

/// Create input: every property field except the store-assigned `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub price: f64,
}

/// Partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub price: Option<f64>,
}

impl Property {
    /// Materializes a draft under a freshly generated id.
    pub fn from_draft(draft: PropertyDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Materializes a draft under a caller-provided id.
    ///
    /// Used by read paths where identity already exists in storage.
    pub fn with_id(id: PropertyId, draft: PropertyDraft) -> Self {
        Self {
            id,
            name: draft.name,
            lat: draft.lat,
            lng: draft.lng,
            price: draft.price,
        }
    }

    /// Validates field invariants.
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        validate_fields(&self.name, self.lat, self.lng, self.price)
    }

    /// Merges `patch` into this record. `id` is never touched.
    pub fn apply_patch(&mut self, patch: &PropertyPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(lat) = patch.lat {
            self.lat = lat;
        }
        if let Some(lng) = patch.lng {
            self.lng = lng;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }

    /// Geographic position used for marker placement.
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

impl PropertyDraft {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64, price: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            price,
        }
    }

    /// Validates field invariants before the draft reaches storage.
    pub fn validate(&self) -> Result<(), PropertyValidationError> {
        validate_fields(&self.name, self.lat, self.lng, self.price)
    }
}

impl PropertyPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.lat.is_none() && self.lng.is_none() && self.price.is_none()
    }
}

impl From<PropertyDraft> for PropertyPatch {
    fn from(draft: PropertyDraft) -> Self {
        Self {
            name: Some(draft.name),
            lat: Some(draft.lat),
            lng: Some(draft.lng),
            price: Some(draft.price),
        }
    }
}

fn validate_fields(name: &str, lat: f64, lng: f64, price: f64) -> Result<(), PropertyValidationError> {
    if name.trim().is_empty() {
        return Err(PropertyValidationError::EmptyName);
    }
    if !lat.is_finite() {
        return Err(PropertyValidationError::NonFiniteCoordinate {
            field: "lat",
            value: lat,
        });
    }
    if !lng.is_finite() {
        return Err(PropertyValidationError::NonFiniteCoordinate {
            field: "lng",
            value: lng,
        });
    }
    if !price.is_finite() || price < 0.0 {
        return Err(PropertyValidationError::InvalidPrice(price));
    }
    Ok(())
}
