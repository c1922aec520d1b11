//! Wire models of the WasteWise backend.

mod analytics;
mod auth;
mod user;
mod waste;

pub use analytics::{AnalyticsSummary, Period, TypeTotal};
pub use auth::{AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, Registration, TokenPair};
pub use user::User;
pub use waste::{NewWasteEntry, Unit, WasteEntry, WasteType};
