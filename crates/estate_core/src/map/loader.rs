//! Map widget loading.
//!
//! Loading stands in for fetching and authenticating a hosted map script:
//! without an API key the widget cannot come up, and callers continue with
//! no widget at all.

use crate::config::MapConfig;
use crate::map::geo::LatLng;
use crate::map::scene::SceneMapWidget;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Camera center before the first reconcile (San Francisco).
pub const INITIAL_CENTER: LatLng = LatLng::new(37.7749, -122.4194);
/// Camera zoom before the first reconcile.
pub const INITIAL_ZOOM: u8 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapLoadError {
    MissingApiKey,
}

impl Display for MapLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "map API key is not configured"),
        }
    }
}

impl Error for MapLoadError {}

/// Loads the map widget described by `config`.
///
/// # Errors
/// - `MissingApiKey` when no non-blank key is configured.
pub fn load_map_widget(config: &MapConfig) -> Result<SceneMapWidget, MapLoadError> {
    let has_key = config
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty());
    if !has_key {
        error!("event=map_load module=map status=error error_code=missing_api_key");
        return Err(MapLoadError::MissingApiKey);
    }

    info!("event=map_load module=map status=ok");
    Ok(SceneMapWidget::new(INITIAL_CENTER, INITIAL_ZOOM))
}

/// Loads the map widget, logging and swallowing failures.
///
/// The returned `None` makes every reconciler operation a no-op.
pub fn try_load_map_widget(config: &MapConfig) -> Option<SceneMapWidget> {
    load_map_widget(config).ok()
}
