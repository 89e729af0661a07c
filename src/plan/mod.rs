mod layout;
mod store;
mod types;

pub use layout::{layout_week, week_listing, DayListing, WeekGrid};
pub use store::{PlanStore, StoreError};
pub use types::{format_hhmm, parse_hhmm, PlanError, TimeSpan, WeekId, WeekPlan, Weekday};
