//! # Waste types and entries
//!
//! | Type | Endpoint | Notes |
//! |------|----------|-------|
//! | [`WasteType`] | `GET /waste-types/` | Read-only reference data. |
//! | [`WasteEntry`] | `GET /waste-entries/` | One logged disposal, as stored by the backend. |
//! | [`NewWasteEntry`] | `POST /waste-entries/` | Request body; checked by [`NewWasteEntry::validate`] before sending. |
//! | [`Unit`] | — | `g`, `kg`, `items`, `l` with a kilogram estimate per unit. |

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A category of waste (plastic, paper, organic...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WasteType {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recyclable: bool,
    /// kg of CO₂ avoided per kg recycled.
    #[serde(default)]
    pub co2_impact: f64,
    #[serde(default)]
    pub icon_name: String,
}

/// Measurement unit of a waste entry.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    G,
    #[default]
    Kg,
    Items,
    L,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::G, Unit::Kg, Unit::Items, Unit::L];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Items => "items",
            Unit::L => "l",
        }
    }

    /// Parse a wire value.
    pub fn parse(s: &str) -> Option<Self> {
        Unit::ALL.into_iter().find(|u| u.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Unit::G => "Grams",
            Unit::Kg => "Kilograms",
            Unit::Items => "Items",
            Unit::L => "Liters",
        }
    }

    /// Rough weight in kilograms of `quantity` of this unit.
    ///
    /// An item counts as 100 g and a liter as 1 kg.
    pub fn to_kg(&self, quantity: f64) -> f64 {
        match self {
            Unit::G => quantity / 1000.0,
            Unit::Kg => quantity,
            Unit::Items => quantity * 0.1,
            Unit::L => quantity,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logged waste entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WasteEntry {
    pub id: i64,
    pub waste_type: i64,
    #[serde(default)]
    pub waste_type_name: String,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl WasteEntry {
    /// "2.5 kg"
    pub fn quantity_label(&self) -> String {
        format!("{} {}", self.quantity, self.unit)
    }

    /// Description, or "-" when empty.
    pub fn description_or_dash(&self) -> &str {
        if self.description.trim().is_empty() {
            "-"
        } else {
            &self.description
        }
    }
}

/// Body of `POST /waste-entries/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewWasteEntry {
    pub waste_type: i64,
    pub quantity: f64,
    pub unit: Unit,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

impl NewWasteEntry {
    /// Presence and positivity checks done before any request is sent.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.waste_type <= 0 {
            return Err(ApiError::Validation("Please select a waste type".to_string()));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(ApiError::Validation(
                "Quantity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(quantity: f64) -> NewWasteEntry {
        NewWasteEntry {
            waste_type: 1,
            quantity,
            unit: Unit::Kg,
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
    }

    #[test]
    fn test_unit_wire_values() {
        assert_eq!(serde_json::to_string(&Unit::Items).unwrap(), "\"items\"");
        assert_eq!(serde_json::from_str::<Unit>("\"l\"").unwrap(), Unit::L);
        assert_eq!(Unit::parse("g"), Some(Unit::G));
        assert_eq!(Unit::parse("lbs"), None);
    }

    #[test]
    fn test_unit_to_kg() {
        assert_eq!(Unit::G.to_kg(500.0), 0.5);
        assert_eq!(Unit::Kg.to_kg(2.0), 2.0);
        assert!((Unit::Items.to_kg(3.0) - 0.3).abs() < 1e-9);
        assert_eq!(Unit::L.to_kg(4.0), 4.0);
    }

    #[test]
    fn test_validate_rejects_non_positive_quantity() {
        assert!(entry(1.5).validate().is_ok());
        assert!(matches!(entry(0.0).validate(), Err(ApiError::Validation(_))));
        assert!(matches!(entry(-2.0).validate(), Err(ApiError::Validation(_))));
        assert!(entry(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_requires_waste_type() {
        let mut e = entry(1.0);
        e.waste_type = 0;
        assert_eq!(
            e.validate(),
            Err(ApiError::Validation("Please select a waste type".into()))
        );
    }

    #[test]
    fn test_deserialize_backend_entry() {
        let json = r#"{
            "id": 3, "user": 1, "user_username": "alice",
            "waste_type": 2, "waste_type_name": "Plastic",
            "quantity": 250.0, "unit": "g", "description": "",
            "date": "2024-05-01", "created_at": "2024-05-01T10:00:00Z"
        }"#;
        let e: WasteEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.waste_type_name, "Plastic");
        assert_eq!(e.unit, Unit::G);
        assert_eq!(e.quantity_label(), "250 g");
        assert_eq!(e.description_or_dash(), "-");
        assert_eq!(e.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_new_entry_serializes_date_as_iso() {
        let body = serde_json::to_value(entry(2.0)).unwrap();
        assert_eq!(body["date"], "2024-05-01");
        assert_eq!(body["unit"], "kg");
    }

    #[test]
    fn test_waste_type_optional_fields_default() {
        let t: WasteType = serde_json::from_str(r#"{"id": 1, "name": "Glass"}"#).unwrap();
        assert!(!t.recyclable);
        assert_eq!(t.co2_impact, 0.0);
    }
}
