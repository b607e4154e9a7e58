use estate_core::map::loader::{INITIAL_CENTER, INITIAL_ZOOM};
use estate_core::{
    CameraCall, LatLng, LatLngBounds, MapWidget, MarkerHandle, MarkerSpec, MarkerStyle,
    PopupContent, PopupHandle, Property, PropertyDraft, ReconcilerState, SceneMapWidget,
    FOCUSED_ZOOM, SINGLE_PROPERTY_ZOOM,
};
use uuid::Uuid;

fn property(name: &str, lat: f64, lng: f64) -> Property {
    Property::from_draft(PropertyDraft::new(name, lat, lng, 100_000.0))
}

fn listings() -> Vec<Property> {
    vec![
        property("Condo", 37.7849, -122.4094),
        property("House", 37.7599, -122.4148),
        property("Apartment", 40.7749, -121.4194),
    ]
}

fn scene() -> SceneMapWidget {
    SceneMapWidget::new(INITIAL_CENTER, INITIAL_ZOOM)
}

/// Scene widget that also counts popup opens per popup title.
struct CountingWidget {
    scene: SceneMapWidget,
    opens: Vec<String>,
}

impl CountingWidget {
    fn new() -> Self {
        Self {
            scene: scene(),
            opens: Vec::new(),
        }
    }

    fn opens_of(&self, title: &str) -> usize {
        self.opens.iter().filter(|opened| *opened == title).count()
    }
}

impl MapWidget for CountingWidget {
    fn add_marker(&mut self, spec: &MarkerSpec) -> MarkerHandle {
        self.scene.add_marker(spec)
    }
    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.scene.remove_marker(marker);
    }
    fn add_popup(&mut self, content: &PopupContent) -> PopupHandle {
        self.scene.add_popup(content)
    }
    fn open_popup(&mut self, popup: PopupHandle, anchor: MarkerHandle) {
        if let Some(existing) = self.scene.popup(popup) {
            self.opens.push(existing.content.title.clone());
        }
        self.scene.open_popup(popup, anchor);
    }
    fn close_popup(&mut self, popup: PopupHandle) {
        self.scene.close_popup(popup);
    }
    fn release_popup(&mut self, popup: PopupHandle) {
        self.scene.release_popup(popup);
    }
    fn listen_marker_click(&mut self, marker: MarkerHandle) {
        self.scene.listen_marker_click(marker);
    }
    fn set_center(&mut self, center: LatLng) {
        self.scene.set_center(center);
    }
    fn set_zoom(&mut self, zoom: u8) {
        self.scene.set_zoom(zoom);
    }
    fn fit_bounds(&mut self, bounds: &LatLngBounds) {
        self.scene.fit_bounds(bounds);
    }
}

fn focused_markers(widget: &SceneMapWidget) -> usize {
    widget
        .markers()
        .filter(|(_, marker)| marker.spec.style == MarkerStyle::Focused)
        .count()
}

fn open_titles(widget: &SceneMapWidget) -> Vec<String> {
    widget
        .open_popups()
        .map(|(_, popup)| popup.content.title.clone())
        .collect()
}

#[test]
fn one_marker_per_property_with_click_listeners() {
    let properties = listings();
    let mut widget = scene();
    let mut state = ReconcilerState::new();

    state.reconcile(Some(&mut widget), &properties, None);

    assert_eq!(widget.marker_count(), 3);
    assert_eq!(widget.popup_count(), 3);
    assert_eq!(widget.open_popup_count(), 0);
    assert!(state
        .placed()
        .iter()
        .all(|placed| widget.is_clickable(placed.marker)));
    assert!(state.focused().is_none());
    assert!(!state.has_pending_auto_open());
}

#[test]
fn exactly_one_focused_marker_iff_focused_id_is_present() {
    let properties = listings();
    let mut widget = scene();
    let mut state = ReconcilerState::new();

    state.reconcile(Some(&mut widget), &properties, Some(properties[1].id));
    assert_eq!(focused_markers(&widget), 1);
    let focused = state.focused().unwrap();
    assert_eq!(focused.property_id, properties[1].id);
    let marker = widget.marker(focused.marker).unwrap();
    assert_eq!(marker.spec.style.z_index(), 1000);
    let symbol = marker.spec.style.symbol().unwrap();
    assert_eq!((symbol.scale, symbol.fill_color), (12.0, "#ef4444"));
    assert_eq!(marker.spec.title, "House");
    let unfocused = state.placed().iter().find(|placed| !placed.focused).unwrap();
    assert_eq!(widget.marker(unfocused.marker).unwrap().spec.style.symbol(), None);

    state.reconcile(Some(&mut widget), &properties, Some(Uuid::new_v4()));
    assert_eq!(focused_markers(&widget), 0);

    state.reconcile(Some(&mut widget), &properties, None);
    assert_eq!(focused_markers(&widget), 0);
}

#[test]
fn repeated_identical_reconcile_does_not_leak() {
    let properties = listings();
    let mut widget = scene();
    let mut state = ReconcilerState::new();

    state.reconcile_now(Some(&mut widget), &properties, Some(properties[0].id));
    let markers_once = widget.marker_count();
    let popups_once = widget.popup_count();

    state.reconcile_now(Some(&mut widget), &properties, Some(properties[0].id));
    state.reconcile_now(Some(&mut widget), &properties, Some(properties[0].id));

    assert_eq!(widget.marker_count(), markers_once);
    assert_eq!(widget.popup_count(), popups_once);
    assert_eq!(state.placed().len(), 3);
}

#[test]
fn auto_open_waits_for_frame_and_opens_only_focused() {
    let properties = listings();
    let mut widget = scene();
    let mut state = ReconcilerState::new();

    state.reconcile(Some(&mut widget), &properties, Some(properties[2].id));
    assert!(state.has_pending_auto_open());
    assert_eq!(widget.open_popup_count(), 0);
    assert_eq!(state.last_auto_opened(), None);

    state.on_frame(Some(&mut widget));
    assert_eq!(open_titles(&widget), ["Apartment"]);
    assert_eq!(state.last_auto_opened(), Some(properties[2].id));
    assert!(!state.has_pending_auto_open());
}

#[test]
fn focus_change_reopens_once_and_not_on_unrelated_rerenders() {
    let properties = listings();
    let (a, b) = (properties[0].id, properties[1].id);
    let mut widget = CountingWidget::new();
    let mut state = ReconcilerState::new();

    state.reconcile_now(Some(&mut widget), &properties, Some(a));
    assert_eq!(widget.opens_of("Condo"), 1);

    state.reconcile_now(Some(&mut widget), &properties, Some(b));
    assert_eq!(open_titles(&widget.scene), ["House"]);
    assert_eq!(widget.opens_of("House"), 1);

    // Unrelated re-renders while focus stays on B.
    let mut renamed = properties.clone();
    renamed[2].name = "Apartment (renovated)".to_string();
    state.reconcile_now(Some(&mut widget), &renamed, Some(b));
    state.reconcile_now(Some(&mut widget), &renamed, Some(b));

    assert_eq!(widget.opens_of("House"), 1);
    assert_eq!(widget.opens_of("Condo"), 1);
    assert_eq!(state.last_auto_opened(), Some(b));
}

#[test]
fn refocusing_after_clearing_focus_opens_again() {
    let properties = listings();
    let a = properties[0].id;
    let mut widget = CountingWidget::new();
    let mut state = ReconcilerState::new();

    state.reconcile_now(Some(&mut widget), &properties, Some(a));
    state.reconcile_now(Some(&mut widget), &properties, None);
    assert_eq!(state.last_auto_opened(), None);

    state.reconcile_now(Some(&mut widget), &properties, Some(a));
    assert_eq!(widget.opens_of("Condo"), 2);
}

#[test]
fn rerender_before_frame_discards_stale_auto_open() {
    let properties = listings();
    let (a, b) = (properties[0].id, properties[1].id);
    let mut widget = CountingWidget::new();
    let mut state = ReconcilerState::new();

    state.reconcile(Some(&mut widget), &properties, Some(a));
    state.reconcile(Some(&mut widget), &properties, Some(b));
    state.on_frame(Some(&mut widget));
    state.on_frame(Some(&mut widget));

    assert_eq!(widget.opens_of("Condo"), 0);
    assert_eq!(widget.opens_of("House"), 1);
    assert_eq!(open_titles(&widget.scene), ["House"]);
}

#[test]
fn camera_policy_follows_list_shape_and_focus() {
    let properties = listings();
    let mut state = ReconcilerState::new();

    let mut widget = scene();
    state.reconcile(Some(&mut widget), &[], None);
    assert!(widget.camera_calls().is_empty());

    let mut widget = scene();
    state.reconcile(Some(&mut widget), &properties[..1], None);
    assert_eq!(
        widget.camera_calls(),
        [
            CameraCall::Center(properties[0].position()),
            CameraCall::Zoom(SINGLE_PROPERTY_ZOOM)
        ]
    );

    let mut widget = scene();
    state.reconcile(Some(&mut widget), &properties, None);
    let expected = LatLngBounds::from_points(properties.iter().map(Property::position)).unwrap();
    assert_eq!(widget.camera_calls(), [CameraCall::FitBounds(expected)]);

    let mut widget = scene();
    state.reconcile(Some(&mut widget), &properties, Some(properties[2].id));
    assert_eq!(
        widget.camera_calls(),
        [
            CameraCall::Center(properties[2].position()),
            CameraCall::Zoom(FOCUSED_ZOOM)
        ]
    );
}

#[test]
fn marker_click_leaves_exactly_one_popup_open() {
    let properties = listings();
    let mut widget = scene();
    let mut state = ReconcilerState::new();
    state.reconcile(Some(&mut widget), &properties, None);

    state.open_all_popups(Some(&mut widget));
    assert_eq!(widget.open_popup_count(), 3);

    let clicked = state.placed()[1].marker;
    assert!(state.handle_marker_click(Some(&mut widget), clicked));
    assert_eq!(open_titles(&widget), ["House"]);

    assert!(!state.handle_marker_click(Some(&mut widget), MarkerHandle(u64::MAX)));
    assert_eq!(open_titles(&widget), ["House"]);
}

#[test]
fn open_and_close_all_are_idempotent_and_keep_camera() {
    let properties = listings();
    let mut widget = scene();
    let mut state = ReconcilerState::new();
    state.reconcile(Some(&mut widget), &properties, None);
    widget.take_camera_calls();

    state.open_all_popups(Some(&mut widget));
    state.open_all_popups(Some(&mut widget));
    assert_eq!(widget.open_popup_count(), 3);

    state.close_all_popups(Some(&mut widget));
    state.close_all_popups(Some(&mut widget));
    assert_eq!(widget.open_popup_count(), 0);

    state.close_all_popups(Some(&mut widget));
    state.open_all_popups(Some(&mut widget));
    assert_eq!(widget.open_popup_count(), 3);

    assert!(widget.camera_calls().is_empty());
}

#[test]
fn missing_widget_makes_every_operation_a_noop() {
    let properties = listings();
    let mut state = ReconcilerState::new();

    state.reconcile(None::<&mut SceneMapWidget>, &properties, Some(properties[0].id));
    state.on_frame(None::<&mut SceneMapWidget>);
    state.open_all_popups(None::<&mut SceneMapWidget>);
    state.close_all_popups(None::<&mut SceneMapWidget>);
    assert!(!state.handle_marker_click(None::<&mut SceneMapWidget>, MarkerHandle(1)));

    assert!(state.placed().is_empty());
    assert_eq!(state.last_auto_opened(), None);
}

#[test]
fn focused_popup_is_marked_and_links_to_detail() {
    let properties = listings();
    let mut widget = scene();
    let mut state = ReconcilerState::new();
    state.reconcile_now(Some(&mut widget), &properties, Some(properties[0].id));

    let (_, popup) = widget.open_popups().next().unwrap();
    assert!(popup.content.focused);
    assert_eq!(
        popup.content.detail_href,
        format!("/properties/{}", properties[0].id)
    );
    assert_eq!(popup.content.price_label, "$100,000");
}
