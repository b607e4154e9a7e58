//! Sortable property table.
//!
//! # Invariants
//! - Default order is name ascending.
//! - Selecting the active field flips direction; selecting another field
//!   resets to ascending.
//! - Sorting is stable: equal keys keep their list order.

use crate::format::format_price;
use crate::model::property::Property;
use crate::service::property_service::portfolio_value;
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use std::fmt::Write as _;

thread_local! {
    /// Root-locale collator; `None` only if the bundled collation data fails to load.
    static NAME_COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl TableSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Applies a header click on `field`.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Returns a sorted copy of `properties`.
    pub fn sort(&self, properties: &[Property]) -> Vec<Property> {
        let mut sorted = properties.to_vec();
        sorted.sort_by(|a, b| {
            let ordering = match self.field {
                SortField::Name => compare_names(&a.name, &b.name),
                SortField::Price => a.price.total_cmp(&b.price),
            };
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        sorted
    }
}

/// Locale-aware name ordering using the Unicode root collation: accents and
/// case only break ties (`Eagle` < `Élan` < `Zephyr`, `a` < `A`).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => fold_case_compare(a, b),
    })
}

fn fold_case_compare(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b).reverse())
}

/// Renders `properties` (already sorted) as a text table with a footer.
pub fn render_table(properties: &[Property], sort: TableSort) -> String {
    if properties.is_empty() {
        return "No properties found\n".to_string();
    }

    let marker = |field: SortField| match (sort.field == field, sort.direction) {
        (false, _) => "",
        (true, SortDirection::Ascending) => " ^",
        (true, SortDirection::Descending) => " v",
    };
    let name_width = properties
        .iter()
        .map(|property| property.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut out = String::new();
    let name_header = format!("Name{}", marker(SortField::Name));
    let price_header = format!("Price{}", marker(SortField::Price));
    let _ = writeln!(
        out,
        "{:<3} {:<name_width$}  {:>14}  {:>23}  ID",
        "#", name_header, price_header, "Location"
    );
    for (index, property) in properties.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<3} {:<name_width$}  {:>14}  {:>23}  {}",
            index + 1,
            property.name,
            format_price(property.price),
            format!("{:.4}, {:.4}", property.lat, property.lng),
            property.id
        );
    }

    let noun = if properties.len() == 1 {
        "property"
    } else {
        "properties"
    };
    let _ = writeln!(
        out,
        "\nShowing {} {noun} | Total portfolio value: {}",
        properties.len(),
        format_price(portfolio_value(properties))
    );
    out
}

#[cfg(test)]
mod tests {
    use super::{compare_names, render_table, SortDirection, SortField, TableSort};
    use crate::model::property::{Property, PropertyDraft};
    use std::cmp::Ordering;

    fn listings() -> Vec<Property> {
        [("B", 10.0), ("A", 30.0), ("C", 20.0)]
            .into_iter()
            .map(|(name, price)| Property::from_draft(PropertyDraft::new(name, 0.0, 0.0, price)))
            .collect()
    }

    fn names(properties: &[Property]) -> Vec<&str> {
        properties.iter().map(|p| p.name.as_str()).collect()
    }

    fn prices(properties: &[Property]) -> Vec<f64> {
        properties.iter().map(|p| p.price).collect()
    }

    #[test]
    fn header_clicks_toggle_and_reset_direction() {
        let listings = listings();
        let mut sort = TableSort::default();
        assert_eq!(names(&sort.sort(&listings)), ["A", "B", "C"]);

        sort.select(SortField::Name);
        assert_eq!(sort.direction, SortDirection::Descending);
        assert_eq!(names(&sort.sort(&listings)), ["C", "B", "A"]);

        sort.select(SortField::Price);
        assert_eq!(sort, TableSort::new(SortField::Price, SortDirection::Ascending));
        assert_eq!(prices(&sort.sort(&listings)), [10.0, 20.0, 30.0]);

        sort.select(SortField::Price);
        assert_eq!(prices(&sort.sort(&listings)), [30.0, 20.0, 10.0]);
    }

    #[test]
    fn name_comparison_ignores_case_first() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zed", "alpha"), Ordering::Greater);
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("same", "same"), Ordering::Equal);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let listings: Vec<Property> = ["Zephyr Lofts", "Élan Tower", "Eagle Court"]
            .into_iter()
            .map(|name| Property::from_draft(PropertyDraft::new(name, 0.0, 0.0, 1.0)))
            .collect();

        let sorted = TableSort::default().sort(&listings);
        assert_eq!(names(&sorted), ["Eagle Court", "Élan Tower", "Zephyr Lofts"]);

        assert_eq!(compare_names("elan", "Élan"), Ordering::Less);
        assert_eq!(compare_names("Ångström", "Zulu"), Ordering::Less);
    }

    #[test]
    fn table_footer_reports_count_and_total() {
        let listings = listings();
        let rendered = render_table(&listings, TableSort::default());
        assert!(rendered.contains("Showing 3 properties"));
        assert!(rendered.contains("Total portfolio value: $60"));
        assert!(rendered.contains("Name ^"));

        assert_eq!(
            render_table(&[], TableSort::default()),
            "No properties found\n"
        );
    }
}
