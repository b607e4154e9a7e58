//! URL-to-view routing.
//!
//! # Responsibility
//! - Parse application paths into typed routes.
//! - Render routes back into canonical paths for links and redirects.
//!
//! # Invariants
//! - `Route::parse(route.path())` yields `route` again.
//! - `/` is a redirect, never a destination.

use crate::model::property::PropertyId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const FOCUS_QUERY_KEY: &str = "propertyId";

static PROPERTY_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/properties/(?P<id>[^/]+)(?P<edit>/edit)?$").expect("valid property path regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    UnknownPath(String),
    InvalidPropertyId(String),
}

impl Display for RouteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPath(path) => write!(f, "no view for path `{path}`"),
            Self::InvalidPropertyId(value) => write!(f, "invalid property id `{value}`"),
        }
    }
}

impl Error for RouteError {}

/// Application views addressable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`; redirects to the map.
    Root,
    /// `/map`, optionally `?propertyId=<id>`.
    Map { focus: Option<PropertyId> },
    /// `/properties`
    PropertyList,
    /// `/properties/new`
    NewProperty,
    /// `/properties/:id`
    PropertyDetail(PropertyId),
    /// `/properties/:id/edit`
    EditProperty(PropertyId),
}

impl Route {
    /// Parses a path with optional query string.
    ///
    /// Trailing slashes are ignored, as are unknown query parameters.
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let input = input.trim();
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Ok(Self::Root),
            "/map" => {
                let focus = query
                    .and_then(|query| query_value(query, FOCUS_QUERY_KEY))
                    .map(parse_property_id)
                    .transpose()?;
                Ok(Self::Map { focus })
            }
            "/properties" => Ok(Self::PropertyList),
            "/properties/new" => Ok(Self::NewProperty),
            _ => {
                let captures = PROPERTY_PATH_RE
                    .captures(path)
                    .ok_or_else(|| RouteError::UnknownPath(input.to_string()))?;
                let id = parse_property_id(&captures["id"])?;
                if captures.name("edit").is_some() {
                    Ok(Self::EditProperty(id))
                } else {
                    Ok(Self::PropertyDetail(id))
                }
            }
        }
    }

    /// Canonical path of this route.
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Map { focus: None } => "/map".to_string(),
            Self::Map { focus: Some(id) } => format!("/map?{FOCUS_QUERY_KEY}={id}"),
            Self::PropertyList => "/properties".to_string(),
            Self::NewProperty => "/properties/new".to_string(),
            Self::PropertyDetail(id) => format!("/properties/{id}"),
            Self::EditProperty(id) => format!("/properties/{id}/edit"),
        }
    }

    /// Destination after following redirects.
    pub fn resolve(self) -> Self {
        match self {
            Self::Root => Self::Map { focus: None },
            other => other,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

fn query_value<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

fn parse_property_id(value: &str) -> Result<PropertyId, RouteError> {
    Uuid::parse_str(value).map_err(|_| RouteError::InvalidPropertyId(value.to_string()))
}
