mod analytics;
pub use analytics::AnalyticsView;

mod dashboard;
pub use dashboard::DashboardView;

mod waste_list;
pub use waste_list::WasteListView;

mod waste_log;
pub use waste_log::WasteLogView;
