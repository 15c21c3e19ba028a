//! Search filter types.

use crate::catalog::{Category, Product};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A single search criterion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Filter by category.
    Category(Category),
    /// Filter by price range, both bounds inclusive.
    PriceRange {
        min: Option<Money>,
        max: Option<Money>,
    },
    /// Only show in-stock items.
    InStock,
    /// Case-insensitive substring of the name or description.
    Text(String),
}

impl Filter {
    /// Create a price range filter.
    pub fn price_range(min: Option<Money>, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Whether the product satisfies this criterion.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(category) => product.category == *category,
            Filter::PriceRange { min, max } => {
                let above_min = min.map_or(true, |min| {
                    min.currency == product.price.currency
                        && product.price.minor_units >= min.minor_units
                });
                let below_max = max.map_or(true, |max| {
                    max.currency == product.price.currency
                        && product.price.minor_units <= max.minor_units
                });
                above_min && below_max
            }
            Filter::InStock => product.in_stock(),
            Filter::Text(query) => {
                let query = query.trim().to_lowercase();
                query.is_empty()
                    || product.name.to_lowercase().contains(&query)
                    || product.description.to_lowercase().contains(&query)
            }
        }
    }
}

/// A conjunction of filters; an empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductFilter {
    pub filters: Vec<Filter>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category. `None` is the "All" tab.
    pub fn category(mut self, category: Option<Category>) -> Self {
        if let Some(category) = category {
            self.filters.push(Filter::Category(category));
        }
        self
    }

    /// Restrict to products whose name or description contains `query`.
    pub fn text(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        if !query.trim().is_empty() {
            self.filters.push(Filter::Text(query));
        }
        self
    }

    /// Restrict to a price range; an unset bound is open.
    pub fn price_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        if min.is_some() || max.is_some() {
            self.filters.push(Filter::price_range(min, max));
        }
        self
    }

    pub fn in_stock(mut self) -> Self {
        self.filters.push(Filter::InStock);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::money::Currency;

    fn names<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let catalog = Catalog::iot_components();
        assert_eq!(catalog.search(&ProductFilter::new()).len(), catalog.len());
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::iot_components();
        let filter = ProductFilter::new().category(Some(Category::Sensors));
        assert_eq!(
            names(&catalog.search(&filter)),
            vec!["DHT22 Temperature & Humidity Sensor", "HC-SR04 Ultrasonic Distance Sensor"]
        );
    }

    #[test]
    fn test_text_filter_searches_description() {
        let catalog = Catalog::iot_components();
        let filter = ProductFilter::new().text("ATMEGA");
        assert_eq!(names(&catalog.search(&filter)), vec!["Arduino Uno R3 Microcontroller"]);
    }

    #[test]
    fn test_price_range_inclusive() {
        let catalog = Catalog::iot_components();
        let inr = |major| Some(Money::from_major(major, Currency::INR));
        let filter = ProductFilter::new().price_range(inr(119), inr(249));
        assert_eq!(
            names(&catalog.search(&filter)),
            vec!["Servo Motor SG90", "RFID Reader Module RC522", "Breadboard 830 Points"]
        );

        let open_max = ProductFilter::new().price_range(inr(1499), None);
        assert_eq!(catalog.search(&open_max).len(), 2);
    }

    #[test]
    fn test_filters_combine() {
        let catalog = Catalog::iot_components();
        let filter = ProductFilter::new()
            .category(Some(Category::Communication))
            .text("wifi")
            .price_range(None, Some(Money::from_major(400, Currency::INR)));
        assert_eq!(names(&catalog.search(&filter)), vec!["NodeMCU ESP8266 WiFi Module"]);
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let filter = ProductFilter::new().text("   ").category(None);
        assert!(filter.is_empty());
    }
}
