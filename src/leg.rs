use std::fmt;

use chrono::NaiveDate;

use crate::date::PartialDate;
use crate::error::SearchError;

/// Collapse airport codes into an order-preserving set: first occurrence
/// wins, later duplicates are dropped. The flights page echoes codes back
/// in the order the fragment lists them, so input order must survive.
pub(crate) fn airport_set<I, S>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut set: Vec<String> = Vec::new();
    for code in codes {
        let code = code.into();
        if !set.contains(&code) {
            set.push(code);
        }
    }
    set
}

/// One directional segment of an itinerary: where it leaves from, where it
/// lands, and optionally when. Every mutator returns a new value; a `Leg`
/// is never changed in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leg {
    departing: Vec<String>,
    arriving: Vec<String>,
    date: Option<NaiveDate>,
}

impl Leg {
    /// Replace the departure airports and date. An all-open `PartialDate`
    /// clears any previously set date rather than keeping it.
    pub fn departing<I, S>(&self, airports: I, on: PartialDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            departing: airport_set(airports),
            arriving: self.arriving.clone(),
            date: on.resolve(),
        }
    }

    /// Replace the arrival airports; departure and date are unchanged.
    pub fn arriving<I, S>(&self, airports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            departing: self.departing.clone(),
            arriving: airport_set(airports),
            date: self.date,
        }
    }

    /// A leg is complete once it knows both of its ends.
    pub fn complete(&self) -> bool {
        !self.departing.is_empty() && !self.arriving.is_empty()
    }

    /// The `departing_arriving_date` form used inside the `iti` parameter.
    /// Arrival and date may still be open and serialize as empty fields,
    /// but a leg must at least know where it departs from.
    pub fn segment(&self) -> Result<String, SearchError> {
        if self.departing.is_empty() {
            return Err(SearchError::incomplete(
                self.clone(),
                "needs a departing airport",
            ));
        }
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        Ok(format!(
            "{}_{}_{}",
            self.departing.join(","),
            self.arriving.join(","),
            date
        ))
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let departing = if self.departing.is_empty() {
            "?".to_string()
        } else {
            self.departing.join(",")
        };
        let arriving = if self.arriving.is_empty() {
            "?".to_string()
        } else {
            self.arriving.join(",")
        };
        write!(f, "leg {departing} -> {arriving}")?;
        if let Some(date) = self.date {
            write!(f, " on {}", date.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}
