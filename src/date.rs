use chrono::{Datelike, Local, NaiveDate};

/// A calendar date with any of its components left open. Open components
/// are filled from the current date when the value is resolved, so
/// `PartialDate::day(6)` means "the 6th of this month".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl PartialDate {
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }

    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn month(month: u32) -> Self {
        Self {
            month: Some(month),
            ..Self::default()
        }
    }

    pub fn day(day: u32) -> Self {
        Self {
            day: Some(day),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }

    /// Resolve against a reference date. A fully open value resolves to no
    /// date at all, not to the reference date. Component combinations that
    /// name no real day (Feb 30) also resolve to no date.
    pub fn resolve_from(&self, reference: NaiveDate) -> Option<NaiveDate> {
        if self.is_empty() {
            return None;
        }
        NaiveDate::from_ymd_opt(
            self.year.unwrap_or(reference.year()),
            self.month.unwrap_or(reference.month()),
            self.day.unwrap_or(reference.day()),
        )
    }

    /// Resolve against the current local date.
    pub fn resolve(&self) -> Option<NaiveDate> {
        self.resolve_from(today())
    }
}

impl From<NaiveDate> for PartialDate {
    fn from(date: NaiveDate) -> Self {
        Self::ymd(date.year(), date.month(), date.day())
    }
}

/// Current calendar date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
