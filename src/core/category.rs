//! Category catalog - the fixed set of spending categories.
//!
//! Categories are identified by the same short ids the mobile client stores
//! (`alojamiento`, `transporte`, ...). The catalog order is the order the budget
//! editor lists them in.

use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the seven fixed spending categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryType {
    /// Hotels, hostels, rentals
    #[serde(rename = "alojamiento")]
    Lodging,
    /// Flights, buses, taxis
    #[serde(rename = "transporte")]
    Transport,
    /// Meals and groceries
    #[serde(rename = "comida")]
    Food,
    /// Tours, shows, nightlife
    #[serde(rename = "entretenimiento")]
    Entertainment,
    /// Travel and medical insurance
    #[serde(rename = "seguros")]
    Insurance,
    /// Unplanned free spending
    #[serde(rename = "libre")]
    FreeSpend,
    /// Anything else
    #[serde(rename = "otro")]
    Other,
}

impl CategoryType {
    /// All categories in catalog order.
    pub const ALL: [Self; 7] = [
        Self::Lodging,
        Self::Transport,
        Self::Food,
        Self::Entertainment,
        Self::Insurance,
        Self::FreeSpend,
        Self::Other,
    ];

    /// Stable id used in storage and serialization.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Lodging => "alojamiento",
            Self::Transport => "transporte",
            Self::Food => "comida",
            Self::Entertainment => "entretenimiento",
            Self::Insurance => "seguros",
            Self::FreeSpend => "libre",
            Self::Other => "otro",
        }
    }

    /// Human-readable name shown next to the icon.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Lodging => "Alojamiento",
            Self::Transport => "Transporte",
            Self::Food => "Comida",
            Self::Entertainment => "Entretenimiento",
            Self::Insurance => "Seguros",
            Self::FreeSpend => "Libre",
            Self::Other => "Otro",
        }
    }

    /// Icon reference for the presentation layer.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Lodging => "home",
            Self::Transport => "car",
            Self::Food => "utensils",
            Self::Entertainment => "party-popper",
            Self::Insurance => "shield",
            Self::FreeSpend => "wallet",
            Self::Other => "more-horizontal",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CategoryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| Error::UnknownCategory { id: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_catalog_has_seven_unique_ids() {
        let mut ids: Vec<_> = CategoryType::ALL.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn test_parse_known_ids() {
        for category in CategoryType::ALL {
            assert_eq!(category.id().parse::<CategoryType>().unwrap(), category);
        }
        assert_eq!("libre".parse::<CategoryType>().unwrap(), CategoryType::FreeSpend);
    }

    #[test]
    fn test_parse_unknown_id() {
        let result = "souvenirs".parse::<CategoryType>();
        assert!(matches!(result, Err(Error::UnknownCategory { id }) if id == "souvenirs"));
    }

    #[test]
    fn test_serde_uses_storage_ids() {
        let value = toml::Value::try_from(CategoryType::Entertainment).unwrap();
        assert_eq!(value.as_str(), Some("entretenimiento"));
    }

    #[test]
    fn test_display_name_and_icon() {
        assert_eq!(CategoryType::Food.display_name(), "Comida");
        assert_eq!(CategoryType::Food.icon(), "utensils");
        assert_eq!(CategoryType::Other.to_string(), "otro");
    }
}
