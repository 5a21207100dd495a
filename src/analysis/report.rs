use serde::Serialize;
use tracing::debug;

use crate::{
    storage::entities::{Dataset, UserId, UserPresence},
    utils::{
        stats::{mean, total},
        time::WEEKDAY_ABBREVIATIONS,
    },
};

use super::grouping::{group_by_weekday, group_start_end_by_weekday};

pub const PRESENCE_HEADER: (&str, &str) = ("Weekday", "Presence (s)");

/// Entry of the user listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserListing {
    pub user_id: UserId,
    pub name: String,
}

/// Mean presence in seconds for a weekday. Serialized as `[abbreviation, mean]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayMean(pub &'static str, pub f64);

/// Row of the total presence report. The first row of a report is a header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PresenceRow {
    Header(&'static str, &'static str),
    Weekday(&'static str, i64),
}

/// Mean start and end moments of a weekday, in seconds since midnight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayStartEnd(pub &'static str, pub f64, pub f64);

/// Lists every user present in the dataset.
pub fn users(dataset: &Dataset) -> Vec<UserListing> {
    dataset
        .users()
        .map(|(user_id, _)| UserListing {
            user_id,
            name: format!("User {user_id}"),
        })
        .collect()
}

/// Mean presence time of a user grouped by weekday. Unknown users get an empty report.
pub fn mean_time_weekday(dataset: &Dataset, user_id: UserId) -> Vec<WeekdayMean> {
    let Some(presence) = find_user(dataset, user_id) else {
        return vec![];
    };

    group_by_weekday(presence)
        .iter()
        .map(|(weekday, intervals)| WeekdayMean(WEEKDAY_ABBREVIATIONS[weekday], mean(intervals)))
        .collect()
}

/// Total presence time of a user grouped by weekday, preceded by [PRESENCE_HEADER].
pub fn presence_weekday(dataset: &Dataset, user_id: UserId) -> Vec<PresenceRow> {
    let Some(presence) = find_user(dataset, user_id) else {
        return vec![];
    };

    let (label, unit) = PRESENCE_HEADER;
    std::iter::once(PresenceRow::Header(label, unit))
        .chain(
            group_by_weekday(presence)
                .iter()
                .map(|(weekday, intervals)| {
                    PresenceRow::Weekday(WEEKDAY_ABBREVIATIONS[weekday], total(intervals))
                }),
        )
        .collect()
}

/// Mean start and end of work of a user grouped by weekday.
pub fn presence_start_end(dataset: &Dataset, user_id: UserId) -> Vec<WeekdayStartEnd> {
    let Some(presence) = find_user(dataset, user_id) else {
        return vec![];
    };

    group_start_end_by_weekday(presence)
        .iter()
        .map(|(weekday, seconds)| {
            WeekdayStartEnd(
                WEEKDAY_ABBREVIATIONS[weekday],
                mean(&seconds.start),
                mean(&seconds.end),
            )
        })
        .collect()
}

fn find_user(dataset: &Dataset, user_id: UserId) -> Option<&UserPresence> {
    let presence = dataset.user(user_id);
    if presence.is_none() {
        debug!("User {user_id} not found!");
    }
    presence
}
