//! Core domain logic for the property portfolio manager.
//! This crate owns persistence, map reconciliation, views and routing;
//! hosts only wire them to a terminal or a browser.

pub mod config;
pub mod db;
pub mod format;
pub mod logging;
pub mod map;
pub mod model;
pub mod notice;
pub mod repo;
pub mod route;
pub mod service;
pub mod view;

pub use config::{AppConfig, ConfigError, MapConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use map::geo::{LatLng, LatLngBounds};
pub use map::loader::{load_map_widget, try_load_map_widget, MapLoadError};
pub use map::popup::PopupContent;
pub use map::reconciler::{PlacedMarker, ReconcilerState, FOCUSED_ZOOM, SINGLE_PROPERTY_ZOOM};
pub use map::scene::{CameraCall, SceneMapWidget};
pub use map::widget::{
    MapWidget, MarkerHandle, MarkerSpec, MarkerStyle, MarkerSymbol, PopupHandle,
};
pub use model::property::{
    Property, PropertyDraft, PropertyId, PropertyPatch, PropertyValidationError,
};
pub use notice::{Notice, NoticeKind};
pub use repo::property_repo::{PropertyRepository, RepoError, RepoResult, SqlitePropertyRepository};
pub use route::{Route, RouteError};
pub use service::property_service::{sample_properties, PropertyService};
pub use view::form::{FormError, PropertyForm};
pub use view::page::{load_page, Page};
pub use view::table::{SortDirection, SortField, TableSort};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
