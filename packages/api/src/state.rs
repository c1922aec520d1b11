//! # View state
//!
//! Framework-free state transitions behind the views: the waste log form, the
//! dashboard aggregates, the analytics period selector and local list edits.
//! The Dioxus components in `ui` hold these in signals and call the gateway;
//! everything here is plain data so it is unit tested without a renderer.

use chrono::NaiveDate;

use crate::error::ApiError;
use crate::models::{AnalyticsSummary, NewWasteEntry, Period, Unit, WasteEntry};

/// Entries kept for the dashboard's "recent" panel.
pub const RECENT_ENTRIES: usize = 5;
/// Entries of the recent panel actually rendered.
pub const RECENT_ENTRIES_SHOWN: usize = 3;

/// Remove the entry with `id` from a displayed list. Returns whether a row
/// was removed.
pub fn remove_entry(entries: &mut Vec<WasteEntry>, id: i64) -> bool {
    let before = entries.len();
    entries.retain(|e| e.id != id);
    entries.len() != before
}

/// The last `n` entries of the list, newest first.
pub fn recent_entries(entries: &[WasteEntry], n: usize) -> Vec<WasteEntry> {
    entries.iter().rev().take(n).cloned().collect()
}

/// Percentage of `goal_kg` reached, clamped to 0..=100.
pub fn goal_progress(total_kg: f64, goal_kg: f64) -> f64 {
    if goal_kg <= 0.0 || !total_kg.is_finite() {
        return 0.0;
    }
    (total_kg / goal_kg * 100.0).clamp(0.0, 100.0)
}

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub total_waste_kg: f64,
    /// Size of the entry list, not the analytics count.
    pub total_entries: usize,
    pub co2_saved_kg: f64,
    pub goal_progress: f64,
    pub recent: Vec<WasteEntry>,
}

impl DashboardStats {
    /// Combine the two dashboard fetches. Either may have failed.
    pub fn from_parts(analytics: Option<&AnalyticsSummary>, entries: &[WasteEntry], goal_kg: f64) -> Self {
        let total_waste_kg = analytics.map_or(0.0, |a| a.total_waste_kg);
        Self {
            total_waste_kg,
            total_entries: entries.len(),
            co2_saved_kg: analytics.map_or(0.0, |a| a.co2_saved_kg),
            goal_progress: goal_progress(total_waste_kg, goal_kg),
            recent: recent_entries(entries, RECENT_ENTRIES),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries == 0 && self.total_waste_kg == 0.0
    }
}

/// Selected analytics period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodSelection {
    current: Period,
}

impl PeriodSelection {
    pub fn new(period: Period) -> Self {
        Self { current: period }
    }

    pub fn current(&self) -> Period {
        self.current
    }

    /// Select `period`. Returns true when the selection changed, i.e. when the
    /// view has to fetch again.
    pub fn select(&mut self, period: Period) -> bool {
        if self.current == period {
            return false;
        }
        self.current = period;
        true
    }

    /// [`Self::select`] for the raw value of the period `<select>`. Unknown
    /// values change nothing.
    pub fn select_value(&mut self, value: &str) -> bool {
        Period::parse(value).is_some_and(|period| self.select(period))
    }
}

/// Raw inputs of the waste log form.
#[derive(Debug, Clone, PartialEq)]
pub struct WasteEntryForm {
    /// Selected waste type id, empty when none.
    pub waste_type: String,
    pub quantity: String,
    pub unit: String,
    pub description: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub date: String,
}

impl WasteEntryForm {
    /// An empty form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            waste_type: String::new(),
            quantity: String::new(),
            unit: Unit::default().as_str().to_string(),
            description: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Parse and check the inputs.
    pub fn to_new_entry(&self) -> Result<NewWasteEntry, ApiError> {
        let waste_type = self
            .waste_type
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid("Please select a waste type"))?;
        let quantity = self.quantity.trim();
        if quantity.is_empty() {
            return Err(invalid("Quantity is required"));
        }
        let quantity = quantity
            .parse::<f64>()
            .map_err(|_| invalid("Quantity must be a number"))?;
        let unit = Unit::parse(&self.unit).ok_or_else(|| invalid("Please select a unit"))?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| invalid("Please enter a valid date"))?;

        let entry = NewWasteEntry {
            waste_type,
            quantity,
            unit,
            description: self.description.trim().to_string(),
            date,
        };
        entry.validate()?;
        Ok(entry)
    }
}

fn invalid(message: &str) -> ApiError {
    ApiError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::testing::{MockTransport, BASE_URL};
    use crate::transport::Method;
    use store::{AuthMode, MemoryStore};

    fn entry(id: i64) -> WasteEntry {
        WasteEntry {
            id,
            waste_type: 1,
            waste_type_name: "Plastic".into(),
            quantity: 1.0,
            unit: Unit::Kg,
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 5, id as u32).unwrap(),
            created_at: None,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn test_remove_entry_only_touches_matching_row() {
        let mut entries = vec![entry(1), entry(2), entry(3)];
        assert!(remove_entry(&mut entries, 2));
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(!remove_entry(&mut entries, 9));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_recent_entries_newest_first() {
        let entries: Vec<_> = (1..=7).map(entry).collect();
        let recent = recent_entries(&entries, RECENT_ENTRIES);
        assert_eq!(recent.iter().map(|e| e.id).collect::<Vec<_>>(), vec![7, 6, 5, 4, 3]);
        assert_eq!(recent_entries(&entries[..2], RECENT_ENTRIES).len(), 2);
    }

    #[test]
    fn test_goal_progress_is_clamped() {
        assert_eq!(goal_progress(5.0, 20.0), 25.0);
        assert_eq!(goal_progress(45.0, 20.0), 100.0);
        assert_eq!(goal_progress(0.0, 20.0), 0.0);
        assert_eq!(goal_progress(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_dashboard_stats_from_parts() {
        let summary = AnalyticsSummary {
            total_waste_kg: 10.0,
            total_entries: 99,
            co2_saved_kg: 1.5,
            ..Default::default()
        };
        let entries = vec![entry(1), entry(2)];
        let stats = DashboardStats::from_parts(Some(&summary), &entries, 20.0);
        assert_eq!(stats.total_waste_kg, 10.0);
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.co2_saved_kg, 1.5);
        assert_eq!(stats.goal_progress, 50.0);
        assert_eq!(stats.recent[0].id, 2);

        let empty = DashboardStats::from_parts(None, &[], 20.0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_period_selection_reports_changes_only() {
        let mut selection = PeriodSelection::default();
        assert_eq!(selection.current(), Period::Week);
        assert!(!selection.select(Period::Week));
        assert!(selection.select(Period::Month));
        assert!(!selection.select(Period::Month));
        assert_eq!(selection.current(), Period::Month);
    }

    #[test]
    fn test_select_value_ignores_repeats_and_unknown_values() {
        let mut selection = PeriodSelection::default();
        let writes: Vec<bool> = ["week", "month", "month", "year", "week"]
            .iter()
            .map(|value| selection.select_value(value))
            .collect();
        assert_eq!(writes, vec![false, true, false, false, true]);
        assert_eq!(selection.current(), Period::Week);
    }

    #[tokio::test]
    async fn test_delete_removes_row_without_refetching() {
        let mock = MockTransport::new();
        let body = serde_json::to_string(&[entry(1), entry(2), entry(3)]).unwrap();
        mock.respond(Method::Get, "/waste-entries/", 200, &body);
        mock.respond(Method::Delete, "/waste-entries/2/", 204, "");
        let client = ApiClient::new(BASE_URL, AuthMode::Bearer, mock.clone(), MemoryStore::new());
        client.tokens().set_tokens("acc", "ref");

        let mut entries = client.waste_entries().await.unwrap();
        client.delete_waste_entry(2).await.unwrap();
        assert!(remove_entry(&mut entries, 2));

        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
        let methods: Vec<Method> = mock.requests().iter().map(|r| r.method).collect();
        assert_eq!(methods, vec![Method::Get, Method::Delete]);
    }

    #[test]
    fn test_form_defaults() {
        let form = WasteEntryForm::new(day());
        assert_eq!(form.date, "2024-05-01");
        assert_eq!(form.unit, "kg");
        assert!(form.quantity.is_empty());
    }

    #[test]
    fn test_form_to_new_entry() {
        let mut form = WasteEntryForm::new(day());
        form.waste_type = "3".into();
        form.quantity = " 2.5 ".into();
        form.unit = "items".into();
        form.description = "  jars ".into();

        let entry = form.to_new_entry().unwrap();
        assert_eq!(entry.waste_type, 3);
        assert_eq!(entry.quantity, 2.5);
        assert_eq!(entry.unit, Unit::Items);
        assert_eq!(entry.description, "jars");
        assert_eq!(entry.date, day());
    }

    #[test]
    fn test_form_rejections() {
        let message = |form: &WasteEntryForm| form.to_new_entry().unwrap_err().user_message();
        let mut form = WasteEntryForm::new(day());
        form.quantity = "1".into();
        assert_eq!(message(&form), "Please select a waste type");

        form.waste_type = "1".into();
        form.quantity.clear();
        assert_eq!(message(&form), "Quantity is required");

        form.quantity = "abc".into();
        assert_eq!(message(&form), "Quantity must be a number");

        form.quantity = "0".into();
        assert_eq!(message(&form), "Quantity must be greater than zero");

        form.quantity = "-3".into();
        assert_eq!(message(&form), "Quantity must be greater than zero");

        form.quantity = "1".into();
        form.date = "yesterday".into();
        assert_eq!(message(&form), "Please enter a valid date");
    }
}
