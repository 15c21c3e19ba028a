//! Product categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a product is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Microcontrollers,
    Sensors,
    Actuators,
    Communication,
    Accessories,
    Kits,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Microcontrollers,
        Category::Sensors,
        Category::Actuators,
        Category::Communication,
        Category::Accessories,
        Category::Kits,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Microcontrollers => "Microcontrollers",
            Category::Sensors => "Sensors",
            Category::Actuators => "Actuators",
            Category::Communication => "Communication",
            Category::Accessories => "Accessories",
            Category::Kits => "Kits",
        }
    }

    /// Parse a category name, case-insensitively.
    ///
    /// "All" is not a category; callers treat it as "no category filter".
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
