//! Analytics summary returned by `GET /analytics/?period=...`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reporting window of the analytics endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Week, Period::Month];

    /// Query value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Period::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Last Week",
            Period::Month => "Last Month",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate of one waste type within the period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeTotal {
    #[serde(rename = "waste_type__name", default)]
    pub name: Option<String>,
    /// Sum of raw quantities (mixed units, as the backend reports it).
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub count: u64,
}

impl TypeTotal {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    pub fn amount(&self) -> f64 {
        self.total.unwrap_or(0.0)
    }
}

/// Server-side statistics for one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_waste_kg: f64,
    #[serde(default)]
    pub total_entries: u64,
    #[serde(default)]
    pub waste_by_type: Vec<TypeTotal>,
    #[serde(default)]
    pub co2_saved_kg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_summary() {
        let json = r#"{
            "period": "month",
            "start_date": "2024-04-01",
            "end_date": "2024-05-01",
            "total_waste_kg": 12.75,
            "total_entries": 9,
            "waste_by_type": [
                {"waste_type__name": "Plastic", "total": 3.5, "count": 4},
                {"waste_type__name": null, "total": null, "count": 1}
            ],
            "co2_saved_kg": 4.2
        }"#;
        let summary: AnalyticsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.period, Period::Month);
        assert_eq!(summary.total_entries, 9);
        assert_eq!(summary.waste_by_type[0].label(), "Plastic");
        assert_eq!(summary.waste_by_type[1].label(), "Unknown");
        assert_eq!(summary.waste_by_type[1].amount(), 0.0);
    }

    #[test]
    fn test_empty_summary_defaults() {
        let summary: AnalyticsSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary, AnalyticsSummary::default());
        assert_eq!(summary.period, Period::Week);
    }

    #[test]
    fn test_period_query_values() {
        assert_eq!(Period::Week.as_str(), "week");
        assert_eq!(Period::parse("month"), Some(Period::Month));
        assert_eq!(Period::parse("year"), None);
        assert_eq!(Period::Month.to_string(), "month");
    }
}
