//! Weekday aggregation of a user's presence and the reports built on top of it.

pub mod grouping;
pub mod report;
