//! Lecture schedule expansion.
//!
//! Turns a Monday..Friday date range and a set of lecture days into the
//! concrete, chronologically ordered list of lecture sessions.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use crate::course::{CourseRecord, LectureDay};

/// The lecture date range violates its weekday or ordering invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidRangeError {
    /// The first day of the range is not a Monday.
    #[error("starting date {date} is a {weekday}, expected a Monday")]
    StartNotMonday { date: NaiveDate, weekday: Weekday },

    /// The last day of the range is not a Friday.
    #[error("ending date {date} is a {weekday}, expected a Friday")]
    EndNotFriday { date: NaiveDate, weekday: Weekday },

    /// The range ends before it starts.
    #[error("starting Monday {start} falls after ending Friday {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
}

/// One concrete class meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LectureSession {
    pub date: NaiveDate,
    pub day: LectureDay,
}

impl LectureSession {
    /// ISO week (year, week number) the session falls in.
    pub fn week(&self) -> (i32, u32) {
        let week = self.date.iso_week();
        (week.year(), week.week())
    }
}

/// Check that `start..=end` is a valid Monday..Friday lecture range.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), InvalidRangeError> {
    if start.weekday() != Weekday::Mon {
        return Err(InvalidRangeError::StartNotMonday {
            date: start,
            weekday: start.weekday(),
        });
    }
    if end.weekday() != Weekday::Fri {
        return Err(InvalidRangeError::EndNotFriday {
            date: end,
            weekday: end.weekday(),
        });
    }
    if start > end {
        return Err(InvalidRangeError::Reversed { start, end });
    }
    Ok(())
}

/// Expand a lecture range into every session that falls on a lecture day.
///
/// The range is validated even when `lecture_days` is empty, in which case
/// the result is empty. Sessions are returned in ascending date order.
pub fn expand(
    starting_monday: NaiveDate,
    ending_friday: NaiveDate,
    lecture_days: &BTreeSet<LectureDay>,
) -> Result<Vec<LectureSession>, InvalidRangeError> {
    validate_range(starting_monday, ending_friday)?;

    if lecture_days.is_empty() {
        return Ok(Vec::new());
    }

    let sessions = starting_monday
        .iter_days()
        .take_while(|date| *date <= ending_friday)
        .filter_map(|date| {
            LectureDay::from_weekday(date.weekday())
                .filter(|day| lecture_days.contains(day))
                .map(|day| LectureSession { date, day })
        })
        .collect();

    Ok(sessions)
}

/// Expand the lecture schedule stored in a course record.
pub fn expand_record(record: &CourseRecord) -> Result<Vec<LectureSession>, InvalidRangeError> {
    expand(
        record.starting_monday,
        record.ending_friday,
        &record.lecture_days,
    )
}

/// Group consecutive sessions by ISO week, preserving order.
pub fn group_by_week(sessions: &[LectureSession]) -> Vec<&[LectureSession]> {
    sessions
        .chunk_by(|a, b| a.week() == b.week())
        .collect()
}
