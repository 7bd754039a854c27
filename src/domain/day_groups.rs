//! Calendar-day grouping for a conversation's messages.
//!
//! Labels are relative to the "now" passed in and are never stored, so a
//! conversation left open across midnight relabels on the next render.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone};

use super::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Today,
    Yesterday,
    Date(NaiveDate),
}

impl DayLabel {
    fn relative_to(date: NaiveDate, today: NaiveDate) -> Self {
        if date == today {
            Self::Today
        } else if today.pred_opt() == Some(date) {
            Self::Yesterday
        } else {
            Self::Date(date)
        }
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("Today"),
            Self::Yesterday => f.write_str("Yesterday"),
            // "14 Feb 2026"
            Self::Date(date) => write!(f, "{}", date.format("%-d %b %Y")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub label: DayLabel,
    pub messages: Vec<&'a Message>,
}

/// Splits `messages` into runs of consecutive messages sharing a calendar day.
///
/// The result is a partition: concatenating the groups in order yields the
/// input sequence unchanged.
pub fn group_by_day<'a, Tz: TimeZone>(
    messages: &'a [Message],
    now: &DateTime<Tz>,
) -> Vec<DayGroup<'a>> {
    let timezone = now.timezone();
    let today = now.date_naive();

    let mut groups: Vec<DayGroup<'a>> = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for message in messages {
        let date = message.timestamp().with_timezone(&timezone).date_naive();

        match groups.last_mut() {
            Some(group) if current_date == Some(date) => group.messages.push(message),
            _ => groups.push(DayGroup {
                label: DayLabel::relative_to(date, today),
                messages: vec![message],
            }),
        }

        current_date = Some(date);
    }

    groups
}
