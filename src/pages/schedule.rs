//! Weekly class schedule.

use crate::models::{DaySchedule, WeekSummary};
use chrono::{Datelike, Days, Duration, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Week offset {week_offset} is outside the supported calendar range")]
    DateOutOfRange { week_offset: i64 },
}

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn most_recent_or_current_monday(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
}

/// Holds only the offset. The dated week is derived from the `today` passed
/// to each query, so it follows the wall clock.
#[derive(Debug, Clone)]
pub struct ScheduleController {
    template: Vec<DaySchedule>,
    week_offset: i64,
}

impl ScheduleController {
    pub fn new(template: Vec<DaySchedule>) -> Self {
        Self {
            template,
            week_offset: 0,
        }
    }

    pub fn week_offset(&self) -> i64 {
        self.week_offset
    }

    pub fn set_week_offset(&mut self, week_offset: i64) {
        self.week_offset = week_offset;
    }

    pub fn shift_week(&mut self, delta: i64) {
        self.week_offset = self.week_offset.saturating_add(delta);
    }

    pub fn next_week(&mut self) {
        self.shift_week(1);
    }

    pub fn previous_week(&mut self) {
        self.shift_week(-1);
    }

    pub fn reset_to_current_week(&mut self) {
        self.week_offset = 0;
    }

    pub fn week_start(&self, today: NaiveDate) -> Result<NaiveDate, ScheduleError> {
        let out_of_range = ScheduleError::DateOutOfRange {
            week_offset: self.week_offset,
        };
        let shift = Duration::try_weeks(self.week_offset).ok_or_else(|| out_of_range.clone())?;
        most_recent_or_current_monday(today)
            .checked_add_signed(shift)
            .ok_or(out_of_range)
    }

    /// The template with each day dated relative to [`Self::week_start`].
    pub fn week(&self, today: NaiveDate) -> Result<Vec<DaySchedule>, ScheduleError> {
        let start = self.week_start(today)?;
        self.template
            .iter()
            .enumerate()
            .map(|(index, day)| {
                let date = start
                    .checked_add_days(Days::new(index as u64))
                    .ok_or(ScheduleError::DateOutOfRange {
                        week_offset: self.week_offset,
                    })?;
                Ok(DaySchedule {
                    date,
                    ..day.clone()
                })
            })
            .collect()
    }

    /// Session content is the same every week, so the totals come from the template.
    pub fn summary(&self) -> WeekSummary {
        WeekSummary::from_days(&self.template)
    }

    /// "Week of January 15, 2024"
    pub fn heading(&self, today: NaiveDate) -> Result<String, ScheduleError> {
        Ok(format!("Week of {}", self.week_start(today)?.format("%B %-d, %Y")))
    }
}
