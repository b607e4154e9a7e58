//! Marker reconciliation between a property list and a map widget.
//!
//! # Responsibility
//! - Rebuild markers and popups so the widget mirrors the current property
//!   list and focused property.
//! - Auto-open the focused property's popup once per focus change.
//! - Apply the camera policy after every rebuild.
//!
//! # Invariants
//! - Every reconcile fully tears down what the previous one created, so no
//!   marker or popup outlives the render that produced it.
//! - At most one marker is styled `Focused`, and only when the focused id is
//!   present in the list.
//! - The focused popup auto-opens at most once while focus stays unchanged.
//! - The auto-open runs only after marker placement has completed.
//! - A missing widget turns every operation into a no-op.

use crate::map::geo::LatLngBounds;
use crate::map::popup::PopupContent;
use crate::map::widget::{MapWidget, MarkerHandle, MarkerSpec, MarkerStyle, PopupHandle};
use crate::model::property::{Property, PropertyId};
use log::{debug, info};

/// Camera zoom when a focused property is shown.
pub const FOCUSED_ZOOM: u8 = 16;
/// Camera zoom when the list holds exactly one property.
pub const SINGLE_PROPERTY_ZOOM: u8 = 15;

/// One property's marker and popup as placed on the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedMarker {
    pub property_id: PropertyId,
    pub marker: MarkerHandle,
    pub popup: PopupHandle,
    pub focused: bool,
}

/// Auto-open scheduled by `reconcile` and executed by `on_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAutoOpen {
    property_id: PropertyId,
    marker: MarkerHandle,
    popup: PopupHandle,
}

/// Caller-owned reconciliation state, kept across renders.
#[derive(Debug, Default)]
pub struct ReconcilerState {
    placed: Vec<PlacedMarker>,
    last_auto_opened: Option<PropertyId>,
    pending_auto_open: Option<PendingAutoOpen>,
}

impl ReconcilerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers and popups created by the latest reconcile, in list order.
    pub fn placed(&self) -> &[PlacedMarker] {
        &self.placed
    }

    /// The placed entry rendered in focused style, if any.
    pub fn focused(&self) -> Option<&PlacedMarker> {
        self.placed.iter().find(|placed| placed.focused)
    }

    /// Property whose popup was auto-opened in the current focus session.
    pub fn last_auto_opened(&self) -> Option<PropertyId> {
        self.last_auto_opened
    }

    /// Whether an auto-open is waiting for the next `on_frame`.
    pub fn has_pending_auto_open(&self) -> bool {
        self.pending_auto_open.is_some()
    }

    /// Rebuilds markers, popups and camera for `properties`.
    ///
    /// The focused popup is not opened here; call `on_frame` once the host
    /// has let the widget settle (or use `reconcile_now`).
    pub fn reconcile<W: MapWidget + ?Sized>(
        &mut self,
        widget: Option<&mut W>,
        properties: &[Property],
        focused_id: Option<PropertyId>,
    ) {
        let Some(widget) = widget else {
            debug!("event=map_reconcile module=map status=skipped reason=widget_unavailable");
            return;
        };

        self.teardown(widget);

        if self.last_auto_opened != focused_id {
            self.last_auto_opened = None;
        }

        for property in properties {
            let is_focused = focused_id == Some(property.id);
            let style = if is_focused {
                MarkerStyle::Focused
            } else {
                MarkerStyle::Default
            };

            let marker = widget.add_marker(&MarkerSpec {
                position: property.position(),
                title: property.name.clone(),
                style,
            });
            let popup = widget.add_popup(&PopupContent::for_property(property, is_focused));
            widget.listen_marker_click(marker);

            self.placed.push(PlacedMarker {
                property_id: property.id,
                marker,
                popup,
                focused: is_focused,
            });
        }

        if let Some(focused) = self.focused().copied() {
            if self.last_auto_opened != Some(focused.property_id) {
                self.pending_auto_open = Some(PendingAutoOpen {
                    property_id: focused.property_id,
                    marker: focused.marker,
                    popup: focused.popup,
                });
            }
        }

        let focused_property =
            focused_id.and_then(|id| properties.iter().find(|property| property.id == id));
        apply_camera_policy(widget, properties, focused_property);

        info!(
            "event=map_reconcile module=map status=ok markers={} focused={} auto_open_pending={}",
            self.placed.len(),
            focused_property.is_some(),
            self.pending_auto_open.is_some()
        );
    }

    /// Runs the deferred auto-open scheduled by the latest `reconcile`.
    ///
    /// Closes every popup, then opens only the focused one. The guard is
    /// re-checked here so a focus that was already auto-opened is never
    /// opened twice.
    pub fn on_frame<W: MapWidget + ?Sized>(&mut self, widget: Option<&mut W>) {
        let Some(widget) = widget else {
            return;
        };
        let Some(pending) = self.pending_auto_open.take() else {
            return;
        };
        if self.last_auto_opened == Some(pending.property_id) {
            return;
        }

        self.close_popups(widget);
        widget.open_popup(pending.popup, pending.marker);
        self.last_auto_opened = Some(pending.property_id);
        debug!(
            "event=map_auto_open module=map status=ok property_id={}",
            pending.property_id
        );
    }

    /// `reconcile` followed immediately by `on_frame`, for hosts without a
    /// frame scheduler.
    pub fn reconcile_now<W: MapWidget + ?Sized>(
        &mut self,
        mut widget: Option<&mut W>,
        properties: &[Property],
        focused_id: Option<PropertyId>,
    ) {
        self.reconcile(widget.as_deref_mut(), properties, focused_id);
        self.on_frame(widget);
    }

    /// Handles a click on `marker`: closes every popup, then opens the one
    /// belonging to the clicked marker.
    ///
    /// Returns `false` when the marker was not created by this state.
    pub fn handle_marker_click<W: MapWidget + ?Sized>(
        &self,
        widget: Option<&mut W>,
        marker: MarkerHandle,
    ) -> bool {
        let Some(widget) = widget else {
            return false;
        };
        let Some(clicked) = self.placed.iter().find(|placed| placed.marker == marker) else {
            return false;
        };

        self.close_popups(widget);
        widget.open_popup(clicked.popup, clicked.marker);
        true
    }

    /// Opens every popup. Leaves the camera untouched.
    pub fn open_all_popups<W: MapWidget + ?Sized>(&self, widget: Option<&mut W>) {
        let Some(widget) = widget else {
            return;
        };
        for placed in &self.placed {
            widget.open_popup(placed.popup, placed.marker);
        }
    }

    /// Closes every popup. Leaves the camera untouched.
    pub fn close_all_popups<W: MapWidget + ?Sized>(&self, widget: Option<&mut W>) {
        if let Some(widget) = widget {
            self.close_popups(widget);
        }
    }

    fn close_popups<W: MapWidget + ?Sized>(&self, widget: &mut W) {
        for placed in &self.placed {
            widget.close_popup(placed.popup);
        }
    }

    fn teardown<W: MapWidget + ?Sized>(&mut self, widget: &mut W) {
        // Handles from the previous render are stale after this point.
        self.pending_auto_open = None;
        for placed in self.placed.drain(..) {
            widget.remove_marker(placed.marker);
            widget.close_popup(placed.popup);
            widget.release_popup(placed.popup);
        }
    }
}

fn apply_camera_policy<W: MapWidget + ?Sized>(
    widget: &mut W,
    properties: &[Property],
    focused: Option<&Property>,
) {
    if let Some(property) = focused {
        widget.set_center(property.position());
        widget.set_zoom(FOCUSED_ZOOM);
        return;
    }

    match properties {
        [] => {}
        [only] => {
            widget.set_center(only.position());
            widget.set_zoom(SINGLE_PROPERTY_ZOOM);
        }
        many => {
            if let Some(bounds) = LatLngBounds::from_points(many.iter().map(Property::position)) {
                widget.fit_bounds(&bounds);
            }
        }
    }
}
