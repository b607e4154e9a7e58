//! Route-level page loading and form submission.
//!
//! # Responsibility
//! - Turn a resolved `Route` into the data its view renders.
//! - Run create/edit/delete flows and report where to navigate next.
//! - Convert every failure into a `Notice` after it has been logged.
//!
//! # Invariants
//! - No flow retries; a failed step leaves the store unchanged by that step.
//! - Missing properties surface as "Property not found", storage failures as
//!   the flow-specific "Failed to ..." message.

use crate::model::property::{Property, PropertyId};
use crate::notice::{
    Notice, FAILED_TO_CREATE_PROPERTY, FAILED_TO_DELETE_PROPERTY, FAILED_TO_LOAD_PROPERTIES,
    FAILED_TO_LOAD_PROPERTY, FAILED_TO_UPDATE_PROPERTY, PROPERTY_NOT_FOUND,
};
use crate::repo::property_repo::PropertyRepository;
use crate::route::Route;
use crate::service::property_service::PropertyService;
use crate::view::form::PropertyForm;
use log::warn;

/// Data backing one rendered view.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Map {
        properties: Vec<Property>,
        focus: Option<PropertyId>,
    },
    List {
        properties: Vec<Property>,
    },
    New {
        form: PropertyForm,
    },
    Detail {
        property: Property,
    },
    Edit {
        property: Property,
        form: PropertyForm,
    },
}

/// Loads the page for `route`, following the root redirect.
pub fn load_page<R: PropertyRepository>(
    service: &PropertyService<R>,
    route: Route,
) -> Result<Page, Notice> {
    match route {
        Route::Root => load_page(service, route.resolve()),
        Route::Map { focus } => Ok(Page::Map {
            properties: load_all(service)?,
            focus,
        }),
        Route::PropertyList => Ok(Page::List {
            properties: load_all(service)?,
        }),
        Route::NewProperty => Ok(Page::New {
            form: PropertyForm::default(),
        }),
        Route::PropertyDetail(id) => Ok(Page::Detail {
            property: load_one(service, id)?,
        }),
        Route::EditProperty(id) => {
            let property = load_one(service, id)?;
            let form = PropertyForm::from_property(&property);
            Ok(Page::Edit { property, form })
        }
    }
}

/// Validates and stores a new property. Navigates to its detail view.
pub fn submit_create<R: PropertyRepository>(
    service: &PropertyService<R>,
    form: &PropertyForm,
) -> Result<Route, Notice> {
    let draft = form.validate().map_err(|err| Notice::alert(err.to_string()))?;
    let created = service
        .create(&draft)
        .map_err(|_| Notice::alert(FAILED_TO_CREATE_PROPERTY))?;
    Ok(Route::PropertyDetail(created.id))
}

/// Validates and applies an edit. Navigates back to the detail view.
pub fn submit_edit<R: PropertyRepository>(
    service: &PropertyService<R>,
    id: PropertyId,
    form: &PropertyForm,
) -> Result<Route, Notice> {
    let patch = form.to_patch().map_err(|err| Notice::alert(err.to_string()))?;
    match service.update(id, &patch) {
        Ok(Some(updated)) => Ok(Route::PropertyDetail(updated.id)),
        Ok(None) => {
            warn!("event=property_update module=view status=not_found property_id={id}");
            Err(Notice::alert(PROPERTY_NOT_FOUND))
        }
        Err(_) => Err(Notice::alert(FAILED_TO_UPDATE_PROPERTY)),
    }
}

/// Deletes a confirmed property. Navigates to the list view.
pub fn submit_delete<R: PropertyRepository>(
    service: &PropertyService<R>,
    id: PropertyId,
) -> Result<Route, Notice> {
    match service.delete(id) {
        Ok(true) => Ok(Route::PropertyList),
        Ok(false) => Err(Notice::alert(PROPERTY_NOT_FOUND)),
        Err(_) => Err(Notice::alert(FAILED_TO_DELETE_PROPERTY)),
    }
}

/// Confirmation question shown before deleting `property`.
pub fn delete_prompt(property: &Property) -> String {
    format!("Are you sure you want to delete \"{}\"?", property.name)
}

fn load_all<R: PropertyRepository>(service: &PropertyService<R>) -> Result<Vec<Property>, Notice> {
    service
        .list()
        .map_err(|_| Notice::panel(FAILED_TO_LOAD_PROPERTIES))
}

fn load_one<R: PropertyRepository>(
    service: &PropertyService<R>,
    id: PropertyId,
) -> Result<Property, Notice> {
    match service.get(id) {
        Ok(Some(property)) => Ok(property),
        Ok(None) => Err(Notice::panel(PROPERTY_NOT_FOUND)),
        Err(_) => Err(Notice::panel(FAILED_TO_LOAD_PROPERTY)),
    }
}
