//! Text rendering of map scenes.

use estate_core::format::{format_coordinate, format_price};
use estate_core::{CameraCall, Property, ReconcilerState, SceneMapWidget};
use std::fmt::Write as _;

/// Renders camera, markers and open popups of `widget` as text.
pub fn render_map(
    widget: &SceneMapWidget,
    state: &ReconcilerState,
    properties: &[Property],
) -> String {
    let mut out = String::new();
    let camera = widget.camera();
    let _ = writeln!(
        out,
        "Camera: {}, {} zoom {}{}",
        format_coordinate(camera.center.lat),
        format_coordinate(camera.center.lng),
        camera.zoom,
        if camera.fitted.is_some() { " (fit to all)" } else { "" }
    );

    if state.placed().is_empty() {
        let _ = writeln!(out, "No properties on the map");
        return out;
    }

    for (index, placed) in state.placed().iter().enumerate() {
        let Some(property) = properties.iter().find(|p| p.id == placed.property_id) else {
            continue;
        };
        let pin = widget
            .marker(placed.marker)
            .and_then(|marker| marker.spec.style.symbol())
            .map(|symbol| format!("* {}", symbol.fill_color))
            .unwrap_or_else(|| "o".to_string());
        let popup = widget
            .popup(placed.popup)
            .filter(|popup| popup.open_at.is_some())
            .map(|popup| format!("\n      {}", popup.content.render_text()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:>2} [{pin}] {}  {}  ({:.4}, {:.4}){popup}",
            index + 1,
            property.name,
            format_price(property.price),
            property.lat,
            property.lng
        );
    }
    out
}

/// One-line summary of the camera moves made while rendering.
pub fn render_camera_calls(calls: &[CameraCall]) -> String {
    calls
        .iter()
        .map(|call| match call {
            CameraCall::Center(at) => format!("center({:.4}, {:.4})", at.lat, at.lng),
            CameraCall::Zoom(zoom) => format!("zoom({zoom})"),
            CameraCall::FitBounds(bounds) => format!(
                "fit_bounds(({:.4}, {:.4}) - ({:.4}, {:.4}))",
                bounds.south_west.lat,
                bounds.south_west.lng,
                bounds.north_east.lat,
                bounds.north_east.lng
            ),
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}
