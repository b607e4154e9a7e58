//! Map widget contract consumed by the marker reconciler.
//!
//! # Responsibility
//! - Describe the operations a map backend must offer: markers, popups,
//!   camera control and click subscription.
//!
//! # Invariants
//! - Handles are only meaningful to the widget instance that issued them.
//! - Opening an already-open popup and closing a closed one are no-ops.

use crate::map::geo::{LatLng, LatLngBounds};
use crate::map::popup::PopupContent;

/// Opaque marker handle issued by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

/// Opaque popup handle issued by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupHandle(pub u64);

/// Visual style of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerStyle {
    /// Backend default pin.
    #[default]
    Default,
    /// Highlighted pin for the focused property.
    Focused,
}

impl MarkerStyle {
    /// Stacking order; focused markers always draw above the rest.
    pub fn z_index(self) -> i32 {
        match self {
            Self::Default => 1,
            Self::Focused => 1000,
        }
    }

    /// Custom circle symbol, or `None` for the backend default pin.
    pub fn symbol(self) -> Option<MarkerSymbol> {
        match self {
            Self::Default => None,
            Self::Focused => Some(MarkerSymbol {
                scale: 12.0,
                fill_color: "#ef4444",
                fill_opacity: 1.0,
                stroke_color: "#ffffff",
                stroke_weight: 3.0,
            }),
        }
    }
}

/// Circle symbol parameters for custom marker icons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSymbol {
    pub scale: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub stroke_color: &'static str,
    pub stroke_weight: f64,
}

/// Marker creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    /// Hover title (the property name).
    pub title: String,
    pub style: MarkerStyle,
}

/// Operations a map backend exposes to the reconciler.
pub trait MapWidget {
    /// Places a marker on the map.
    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle;
    /// Removes a marker from the map. Unknown handles are ignored.
    fn remove_marker(&mut self, marker: MarkerHandle);
    /// Creates a closed popup.
    fn add_popup(&mut self, content: &PopupContent) -> PopupHandle;
    /// Opens `popup` anchored at `anchor`.
    fn open_popup(&mut self, popup: PopupHandle, anchor: MarkerHandle);
    /// Closes `popup`.
    fn close_popup(&mut self, popup: PopupHandle);
    /// Releases a closed popup that will never be reopened.
    ///
    /// Backends whose popups are reclaimed once unreferenced keep the
    /// default no-op.
    fn release_popup(&mut self, _popup: PopupHandle) {}
    /// Subscribes to click events on `marker`.
    ///
    /// The host delivers clicks back through
    /// `ReconcilerState::handle_marker_click`.
    fn listen_marker_click(&mut self, marker: MarkerHandle);
    fn set_center(&mut self, center: LatLng);
    fn set_zoom(&mut self, zoom: u8);
    /// Moves the camera so every point in `bounds` is visible.
    fn fit_bounds(&mut self, bounds: &LatLngBounds);
}
