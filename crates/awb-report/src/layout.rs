//! Column layout of the flight report.

use awb_model::{Category, ClassificationConfig};

pub const DATE_COLUMN: &str = "DATE";
pub const AIRLINE_COLUMN: &str = "AIRLINE";
pub const FLIGHT_NO_COLUMN: &str = "FLIGHT NO";
pub const ROUTE_COLUMN: &str = "ROUTE";
pub const ROUTE_CATEGORY_COLUMN: &str = "R/CATEGORY";
pub const AWB_TOTAL_COLUMN: &str = "AWB TOTAL";
pub const TOTAL_WEIGHT_COLUMN: &str = "TOTAL WEIGHT";

/// Which categories get report columns, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    categories: Vec<Category>,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::core()
    }
}

impl ReportLayout {
    pub fn core() -> Self {
        Self {
            categories: Category::CORE.to_vec(),
        }
    }

    /// Core categories followed by the commodity categories.
    pub fn extended() -> Self {
        Self {
            categories: Category::CORE
                .iter()
                .chain(Category::FINE_GRAINED.iter())
                .copied()
                .collect(),
        }
    }

    pub fn for_classification(config: &ClassificationConfig) -> Self {
        if config.commodities.is_some() {
            Self::extended()
        } else {
            Self::core()
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categories with an AWB-count column; mail has none.
    pub fn counted_categories(&self) -> impl Iterator<Item = (Category, &'static str)> + '_ {
        self.categories
            .iter()
            .filter_map(|category| category.awb_count_label().map(|label| (*category, label)))
    }

    /// Every column header in output order.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut names = vec![
            DATE_COLUMN,
            AIRLINE_COLUMN,
            FLIGHT_NO_COLUMN,
            ROUTE_COLUMN,
            ROUTE_CATEGORY_COLUMN,
        ];
        names.extend(self.categories.iter().map(Category::report_label));
        names.extend(self.counted_categories().map(|(_, label)| label));
        names.push(AWB_TOTAL_COLUMN);
        names.push(TOTAL_WEIGHT_COLUMN);
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_layout_matches_report_columns() {
        assert_eq!(
            ReportLayout::core().column_names(),
            vec![
                "DATE",
                "AIRLINE",
                "FLIGHT NO",
                "ROUTE",
                "R/CATEGORY",
                "GENCARGO",
                "PER/COL",
                "DG",
                "TRANSIT",
                "P.O MAIL",
                "COURIER",
                "GEN(awb)",
                "COL(awb)",
                "DG(awb)",
                "TNST(awb)",
                "COU(awb)",
                "AWB TOTAL",
                "TOTAL WEIGHT",
            ]
        );
    }

    #[test]
    fn extended_layout_adds_commodities() {
        let layout = ReportLayout::for_classification(&ClassificationConfig::extended());
        assert_eq!(layout.categories().len(), 13);
        let names = layout.column_names();
        assert_eq!(names.len(), 5 + 13 + 12 + 2);
        assert!(names.contains(&"CRABS/LOBSTER"));
        assert!(names.contains(&"CRAB(awb)"));
        assert_eq!(
            ReportLayout::for_classification(&ClassificationConfig::default()),
            ReportLayout::core()
        );
    }
}
