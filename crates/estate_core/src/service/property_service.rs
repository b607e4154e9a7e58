//! Property use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for views and hosts.
//! - Log every mutation with a stable `event=` name.
//! - Offer explicit sample-data seeding and portfolio totals.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Seeding only happens on request; empty stores stay empty otherwise.

use crate::model::property::{Property, PropertyDraft, PropertyId, PropertyPatch};
use crate::repo::property_repo::{PropertyRepository, RepoResult};
use log::{error, info};

/// Listings inserted by `seed_sample_data`.
pub fn sample_properties() -> Vec<PropertyDraft> {
    vec![
        PropertyDraft::new("Luxury Downtown Condo", 37.7849, -122.4094, 1_200_000.0),
        PropertyDraft::new("Cozy Mission District House", 37.7599, -122.4148, 950_000.0),
        PropertyDraft::new("Modern SOMA Apartment", 40.7749, -121.4194, 850_000.0),
    ]
}

/// Use-case service over a property repository.
pub struct PropertyService<R: PropertyRepository> {
    repo: R,
}

impl<R: PropertyRepository> PropertyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every property in insertion order.
    pub fn list(&self) -> RepoResult<Vec<Property>> {
        self.repo.get_all().inspect_err(|err| {
            error!("event=property_list module=service status=error error={err}");
        })
    }

    pub fn get(&self, id: PropertyId) -> RepoResult<Option<Property>> {
        self.repo.get_by_id(id).inspect_err(|err| {
            error!("event=property_get module=service status=error property_id={id} error={err}");
        })
    }

    /// Creates a property and returns it with its assigned id.
    pub fn create(&self, draft: &PropertyDraft) -> RepoResult<Property> {
        match self.repo.create(draft) {
            Ok(property) => {
                info!(
                    "event=property_create module=service status=ok property_id={}",
                    property.id
                );
                Ok(property)
            }
            Err(err) => {
                error!("event=property_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    /// Applies a partial update. `Ok(None)` when the property does not exist.
    pub fn update(&self, id: PropertyId, patch: &PropertyPatch) -> RepoResult<Option<Property>> {
        match self.repo.update(id, patch) {
            Ok(updated) => {
                info!(
                    "event=property_update module=service status=ok property_id={id} found={}",
                    updated.is_some()
                );
                Ok(updated)
            }
            Err(err) => {
                error!(
                    "event=property_update module=service status=error property_id={id} error={err}"
                );
                Err(err)
            }
        }
    }

    /// Deletes a property. `Ok(false)` when it did not exist.
    pub fn delete(&self, id: PropertyId) -> RepoResult<bool> {
        match self.repo.delete(id) {
            Ok(removed) => {
                info!(
                    "event=property_delete module=service status=ok property_id={id} removed={removed}"
                );
                Ok(removed)
            }
            Err(err) => {
                error!(
                    "event=property_delete module=service status=error property_id={id} error={err}"
                );
                Err(err)
            }
        }
    }

    /// Removes every property.
    pub fn clear(&self) -> RepoResult<()> {
        self.repo.clear()?;
        info!("event=property_clear module=service status=ok");
        Ok(())
    }

    /// Sum of all prices.
    pub fn portfolio_value(&self) -> RepoResult<f64> {
        Ok(portfolio_value(&self.list()?))
    }

    /// Inserts the sample listings and returns them as created.
    ///
    /// Running it twice inserts the samples twice.
    pub fn seed_sample_data(&self) -> RepoResult<Vec<Property>> {
        let created = sample_properties()
            .iter()
            .map(|draft| self.repo.create(draft))
            .collect::<RepoResult<Vec<_>>>()?;
        info!(
            "event=property_seed module=service status=ok count={}",
            created.len()
        );
        Ok(created)
    }
}

/// Sum of prices over `properties`.
pub fn portfolio_value(properties: &[Property]) -> f64 {
    properties.iter().map(|property| property.price).sum()
}
