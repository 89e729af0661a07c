//! Core data types for the weekly planner

use std::fmt;

use chrono::{Datelike, NaiveTime};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("start time {start} must be before end time {end}")]
    EmptyRange { start: String, end: String },
    #[error("task label must not be empty")]
    EmptyLabel,
    #[error("invalid time {0:?}, expected HH:MM")]
    BadTime(String),
    #[error("no task at index {index} on {day} ({len} stored)")]
    BadIndex {
        day: Weekday,
        index: usize,
        len: usize,
    },
}

/// Parse a zero-padded 24-hour "HH:MM" string
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, PlanError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| PlanError::BadTime(value.to_string()))
}

/// Format a time of day as "HH:MM"
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Inverse of [`Weekday::name`], used when decoding the plan file
    pub fn from_name(name: &str) -> Option<Weekday> {
        Weekday::ALL.into_iter().find(|day| day.name() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A labeled interval within one day. `start < end` and a non-empty label
/// are enforced at construction; a span is never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSpan {
    start: NaiveTime,
    end: NaiveTime,
    label: String,
}

impl TimeSpan {
    pub fn new(start: NaiveTime, end: NaiveTime, label: &str) -> Result<Self, PlanError> {
        if start >= end {
            return Err(PlanError::EmptyRange {
                start: format_hhmm(start),
                end: format_hhmm(end),
            });
        }
        let label = label.trim();
        if label.is_empty() {
            return Err(PlanError::EmptyLabel);
        }
        Ok(Self {
            start,
            end,
            label: label.to_string(),
        })
    }

    // Load path only: spans already on disk are not re-validated
    pub(crate) fn from_stored(start: NaiveTime, end: NaiveTime, label: String) -> Self {
        Self { start, end, label }
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start_hhmm(&self) -> String {
        format_hhmm(self.start)
    }

    pub fn end_hhmm(&self) -> String {
        format_hhmm(self.end)
    }
}

/// One week of tasks, always covering all seven weekdays. Days keep their
/// tasks in insertion order; that order is what delete indices refer to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekPlan {
    days: [Vec<TimeSpan>; 7],
}

impl WeekPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks for one day in stored (insertion) order
    pub fn day(&self, day: Weekday) -> &[TimeSpan] {
        &self.days[day.index()]
    }

    pub fn add(&mut self, day: Weekday, span: TimeSpan) {
        self.days[day.index()].push(span);
    }

    /// Removes the task at `index` in stored order and returns it
    pub fn remove_at(&mut self, day: Weekday, index: usize) -> Result<TimeSpan, PlanError> {
        let tasks = &mut self.days[day.index()];
        if index >= tasks.len() {
            return Err(PlanError::BadIndex {
                day,
                index,
                len: tasks.len(),
            });
        }
        Ok(tasks.remove(index))
    }

    /// Tasks for one day ordered by start time. The sort is stable, so tasks
    /// sharing a start time keep their insertion order.
    pub fn sorted(&self, day: Weekday) -> impl Iterator<Item = &TimeSpan> {
        let mut tasks: Vec<&TimeSpan> = self.day(day).iter().collect();
        tasks.sort_by_key(|span| span.start());
        tasks.into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|tasks| tasks.is_empty())
    }
}

/// Year plus ISO calendar week, the lookup key for a [`WeekPlan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekId {
    pub year: i32,
    pub week: u32,
}

impl WeekId {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    pub fn current() -> Self {
        let iso = chrono::Local::now().date_naive().iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-KW{:02}", self.year, self.week)
    }
}
