//! Single-property detail rendering.

use crate::format::{format_coordinate, format_price};
use crate::model::property::Property;
use crate::route::Route;
use std::fmt::Write as _;

/// Renders the detail view with links to the map and edit views.
pub fn render_detail(property: &Property) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", property.name);
    let _ = writeln!(out, "  Price:     {}", format_price(property.price));
    let _ = writeln!(out, "  Latitude:  {}", format_coordinate(property.lat));
    let _ = writeln!(out, "  Longitude: {}", format_coordinate(property.lng));
    let _ = writeln!(out, "  ID:        {}", property.id);
    let _ = writeln!(
        out,
        "  View on map: {}",
        Route::Map {
            focus: Some(property.id)
        }
    );
    let _ = writeln!(out, "  Edit:        {}", Route::EditProperty(property.id));
    out
}

#[cfg(test)]
mod tests {
    use super::render_detail;
    use crate::model::property::{Property, PropertyDraft};

    #[test]
    fn detail_shows_fixed_precision_and_links() {
        let property = Property::from_draft(PropertyDraft::new(
            "Luxury Downtown Condo",
            37.7849,
            -122.4094,
            1_200_000.0,
        ));
        let rendered = render_detail(&property);

        assert!(rendered.starts_with("Luxury Downtown Condo\n"));
        assert!(rendered.contains("$1,200,000"));
        assert!(rendered.contains("37.784900"));
        assert!(rendered.contains("-122.409400"));
        assert!(rendered.contains(&format!("/map?propertyId={}", property.id)));
        assert!(rendered.contains(&format!("/properties/{}/edit", property.id)));
    }
}
