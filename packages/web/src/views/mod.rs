mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod dashboard;
pub use dashboard::Dashboard;

mod log_waste;
pub use log_waste::LogWaste;

mod waste_list;
pub use waste_list::WasteList;

mod analytics;
pub use analytics::Analytics;
