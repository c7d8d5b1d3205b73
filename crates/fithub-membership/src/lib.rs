pub mod datetime;
pub mod display;
pub mod lifecycle;
pub mod metrics;
pub mod payments;
pub mod search;
pub mod working_set;

pub use lifecycle::{derive_end_date, ChangeSubscription};
pub use working_set::MemberList;
