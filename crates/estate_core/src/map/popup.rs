//! Popup (info window) content for property markers.

use crate::format::format_price;
use crate::model::property::{Property, PropertyId};
use crate::route::Route;

/// Content shown when a marker's popup is open.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub property_id: PropertyId,
    pub title: String,
    /// Preformatted price, e.g. `$1,200,000`.
    pub price_label: String,
    /// Whether to show the "Focused Property" badge.
    pub focused: bool,
    /// Link target of the "View Details" action.
    pub detail_href: String,
}

impl PopupContent {
    pub fn for_property(property: &Property, focused: bool) -> Self {
        Self {
            property_id: property.id,
            title: property.name.clone(),
            price_label: format_price(property.price),
            focused,
            detail_href: Route::PropertyDetail(property.id).path(),
        }
    }

    /// Renders the popup body as an HTML fragment for web map backends.
    pub fn render_html(&self) -> String {
        let mut html = String::from(r#"<div class="property-popup">"#);
        html.push_str(&format!("<h3>{}</h3>", escape_html(&self.title)));
        html.push_str(&format!(
            r#"<p class="price">{}</p>"#,
            escape_html(&self.price_label)
        ));
        if self.focused {
            html.push_str(r#"<p class="focused">Focused Property</p>"#);
        }
        html.push_str(&format!(
            r#"<a href="{}">View Details</a>"#,
            escape_html(&self.detail_href)
        ));
        html.push_str("</div>");
        html
    }

    /// Renders the popup body as a single line of plain text.
    pub fn render_text(&self) -> String {
        let badge = if self.focused { " [focused]" } else { "" };
        format!(
            "{} {}{} -> {}",
            self.title, self.price_label, badge, self.detail_href
        )
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
