//! In-memory map widget.
//!
//! # Responsibility
//! - Implement `MapWidget` as inspectable state: live markers, popups with
//!   their open/closed state, and the current camera.
//! - Record every camera call so hosts and tests can audit camera policy.
//!
//! # Invariants
//! - Handles are never reused within one widget instance.
//! - Removing a marker closes any popup anchored to it.

use crate::map::geo::{LatLng, LatLngBounds};
use crate::map::popup::PopupContent;
use crate::map::widget::{MapWidget, MarkerHandle, MarkerSpec, PopupHandle};
use std::collections::BTreeMap;

/// One camera mutation, in call order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCall {
    Center(LatLng),
    Zoom(u8),
    FitBounds(LatLngBounds),
}

/// Current camera of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: u8,
    /// Last fitted bounds; cleared by any explicit center/zoom.
    pub fitted: Option<LatLngBounds>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneMarker {
    pub spec: MarkerSpec,
    pub clickable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenePopup {
    pub content: PopupContent,
    /// Anchor marker while open; `None` while closed.
    pub open_at: Option<MarkerHandle>,
}

/// `MapWidget` backed by plain collections.
#[derive(Debug, Clone)]
pub struct SceneMapWidget {
    next_handle: u64,
    markers: BTreeMap<MarkerHandle, SceneMarker>,
    popups: BTreeMap<PopupHandle, ScenePopup>,
    camera: Camera,
    camera_calls: Vec<CameraCall>,
}

impl SceneMapWidget {
    /// Creates an empty scene with an initial camera. The initial camera is
    /// not recorded as a camera call.
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            next_handle: 1,
            markers: BTreeMap::new(),
            popups: BTreeMap::new(),
            camera: Camera {
                center,
                zoom,
                fitted: None,
            },
            camera_calls: Vec::new(),
        }
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &SceneMarker)> {
        self.markers.iter().map(|(handle, marker)| (*handle, marker))
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&SceneMarker> {
        self.markers.get(&handle)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn popup(&self, handle: PopupHandle) -> Option<&ScenePopup> {
        self.popups.get(&handle)
    }

    /// Popups created and not yet released.
    pub fn popup_count(&self) -> usize {
        self.popups.len()
    }

    /// Currently open popups, ordered by handle.
    pub fn open_popups(&self) -> impl Iterator<Item = (PopupHandle, &ScenePopup)> {
        self.popups
            .iter()
            .filter(|(_, popup)| popup.open_at.is_some())
            .map(|(handle, popup)| (*handle, popup))
    }

    pub fn open_popup_count(&self) -> usize {
        self.open_popups().count()
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn camera_calls(&self) -> &[CameraCall] {
        &self.camera_calls
    }

    /// Drains recorded camera calls.
    pub fn take_camera_calls(&mut self) -> Vec<CameraCall> {
        std::mem::take(&mut self.camera_calls)
    }

    /// Whether a click on `marker` would reach a listener.
    pub fn is_clickable(&self, marker: MarkerHandle) -> bool {
        self.markers
            .get(&marker)
            .is_some_and(|marker| marker.clickable)
    }

    fn issue_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl MapWidget for SceneMapWidget {
    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle {
        let handle = MarkerHandle(self.issue_handle());
        self.markers.insert(
            handle,
            SceneMarker {
                spec: spec.clone(),
                clickable: false,
            },
        );
        handle
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if self.markers.remove(&marker).is_none() {
            return;
        }
        for popup in self.popups.values_mut() {
            if popup.open_at == Some(marker) {
                popup.open_at = None;
            }
        }
    }

    fn add_popup(&mut self, content: &PopupContent) -> PopupHandle {
        let handle = PopupHandle(self.issue_handle());
        self.popups.insert(
            handle,
            ScenePopup {
                content: content.clone(),
                open_at: None,
            },
        );
        handle
    }

    fn open_popup(&mut self, popup: PopupHandle, anchor: MarkerHandle) {
        if !self.markers.contains_key(&anchor) {
            return;
        }
        if let Some(popup) = self.popups.get_mut(&popup) {
            popup.open_at = Some(anchor);
        }
    }

    fn close_popup(&mut self, popup: PopupHandle) {
        if let Some(popup) = self.popups.get_mut(&popup) {
            popup.open_at = None;
        }
    }

    fn release_popup(&mut self, popup: PopupHandle) {
        self.popups.remove(&popup);
    }

    fn listen_marker_click(&mut self, marker: MarkerHandle) {
        if let Some(marker) = self.markers.get_mut(&marker) {
            marker.clickable = true;
        }
    }

    fn set_center(&mut self, center: LatLng) {
        self.camera.center = center;
        self.camera.fitted = None;
        self.camera_calls.push(CameraCall::Center(center));
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.camera.zoom = zoom;
        self.camera.fitted = None;
        self.camera_calls.push(CameraCall::Zoom(zoom));
    }

    fn fit_bounds(&mut self, bounds: &LatLngBounds) {
        self.camera.center = bounds.center();
        self.camera.fitted = Some(*bounds);
        self.camera_calls.push(CameraCall::FitBounds(*bounds));
    }
}
