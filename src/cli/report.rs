use std::fmt::Display;

use ansi_term::Style;
use clap::ValueEnum;

use crate::{
    analysis::report::{
        mean_time_weekday, presence_start_end, presence_weekday, users, PresenceRow, WeekdayMean,
        WeekdayStartEnd,
    },
    storage::entities::{Dataset, UserId},
};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ReportKind {
    /// Mean presence time per weekday.
    MeanTime,
    /// Total presence time per weekday.
    Presence,
    /// Mean start and end of work per weekday.
    StartEnd,
}

impl Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::MeanTime => write!(f, "mean-time"),
            ReportKind::Presence => write!(f, "presence"),
            ReportKind::StartEnd => write!(f, "start-end"),
        }
    }
}

/// Renders a report as tab separated lines. Unknown users produce no lines at all, same as the
/// API produces an empty array.
pub fn render_report(dataset: &Dataset, kind: ReportKind, user_id: UserId) -> Vec<String> {
    let header = Style::new().bold();
    match kind {
        ReportKind::MeanTime => mean_time_weekday(dataset, user_id)
            .into_iter()
            .map(|WeekdayMean(weekday, mean)| {
                format!("{weekday}\t{}", format_seconds(mean as i64))
            })
            .collect(),
        ReportKind::Presence => presence_weekday(dataset, user_id)
            .into_iter()
            .map(|row| match row {
                PresenceRow::Header(label, unit) => {
                    header.paint(format!("{label}\t{unit}")).to_string()
                }
                PresenceRow::Weekday(weekday, seconds) => format!("{weekday}\t{seconds}"),
            })
            .collect(),
        ReportKind::StartEnd => presence_start_end(dataset, user_id)
            .into_iter()
            .map(|WeekdayStartEnd(weekday, start, end)| {
                format!(
                    "{weekday}\t{}\t{}",
                    format_clock(start as i64),
                    format_clock(end as i64)
                )
            })
            .collect(),
    }
}

pub fn render_users(dataset: &Dataset) -> Vec<String> {
    users(dataset)
        .into_iter()
        .map(|v| format!("{}\t{}", v.user_id, v.name))
        .collect()
}

/// Duration in the `1h2m3s` style. Negative values keep their sign.
fn format_seconds(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let v = seconds.abs();
    if v >= 3600 {
        format!("{sign}{}h{}m{}s", v / 3600, v / 60 % 60, v % 60)
    } else if v >= 60 {
        format!("{sign}{}m{}s", v / 60, v % 60)
    } else {
        format!("{sign}{}s", v)
    }
}

/// Seconds since midnight as a `HH:MM:SS` wall clock.
fn format_clock(seconds: i64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}
