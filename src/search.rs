use chrono::NaiveDate;

use crate::date::PartialDate;
use crate::error::SearchError;
use crate::leg::{airport_set, Leg};
use crate::url;

/// Start an empty round-trip search.
pub fn roundtrip() -> RoundtripSearch {
    RoundtripSearch::default()
}

/// Start an itinerary search with one open leg.
pub fn itinerary() -> ItinerarySearch {
    ItinerarySearch::default()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Two-direction search: departure airports and return airports, each with
/// an optional date. `departing` and `returning` may be called in either
/// order, and a missing field simply contributes no parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundtripSearch {
    departing: Vec<String>,
    departing_on: Option<NaiveDate>,
    returning: Vec<String>,
    returning_on: Option<NaiveDate>,
}

impl RoundtripSearch {
    pub fn departing<I, S>(&self, airports: I, on: PartialDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            departing: airport_set(airports),
            departing_on: on.resolve(),
            returning: self.returning.clone(),
            returning_on: self.returning_on,
        }
    }

    pub fn returning<I, S>(&self, airports: I, on: PartialDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            departing: self.departing.clone(),
            departing_on: self.departing_on,
            returning: airport_set(airports),
            returning_on: on.resolve(),
        }
    }

    fn parameters(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("f".to_string(), self.departing.join(",")),
            ("t".to_string(), self.returning.join(",")),
        ];
        if let Some(date) = self.departing_on {
            params.push(("d".to_string(), format_date(date)));
        }
        if let Some(date) = self.returning_on {
            params.push(("r".to_string(), format_date(date)));
        }
        params
    }

    /// Deep-link URL for this search. Absent airports serialize as empty
    /// values and absent dates are omitted outright, so this never fails.
    pub fn url(&self) -> String {
        url::assemble(&self.parameters())
    }

    /// The same search reshaped as a two-leg itinerary: an outbound leg,
    /// then a return leg with the airports mirrored. Dates carry over,
    /// absent ones stay absent.
    pub fn itinerary(&self) -> ItinerarySearch {
        let outbound = self.departing_on.map(PartialDate::from).unwrap_or_default();
        let inbound = self.returning_on.map(PartialDate::from).unwrap_or_default();
        itinerary()
            .departing(self.departing.iter().cloned(), outbound)
            .arriving(self.returning.iter().cloned())
            .departing(self.returning.iter().cloned(), inbound)
            .arriving(self.departing.iter().cloned())
    }
}

/// Multi-leg search. Legs accumulate in order; at most the trailing leg is
/// still open, every leg before it is complete. That invariant holds by
/// construction: a leg only stops being last once a later `departing` call
/// finds it complete and opens the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItinerarySearch {
    legs: Vec<Leg>,
}

impl Default for ItinerarySearch {
    fn default() -> Self {
        Self {
            legs: vec![Leg::default()],
        }
    }
}

impl ItinerarySearch {
    /// Set the departure on the leg still being filled in, or open a new
    /// leg first if the current one is already complete.
    pub fn departing<I, S>(&self, airports: I, on: PartialDate) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut legs = self.legs.clone();
        match legs.pop() {
            Some(last) if !last.complete() => legs.push(last.departing(airports, on)),
            Some(last) => {
                legs.push(last);
                legs.push(Leg::default().departing(airports, on));
            }
            None => legs.push(Leg::default().departing(airports, on)),
        }
        Self { legs }
    }

    /// Arrival always lands on the current last leg, even one whose arrival
    /// is already set. It never opens a new leg.
    pub fn arriving<I, S>(&self, airports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut legs = self.legs.clone();
        match legs.pop() {
            Some(last) => legs.push(last.arriving(airports)),
            None => legs.push(Leg::default().arriving(airports)),
        }
        Self { legs }
    }

    /// The legs gathered so far, oldest first.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    fn parameters(&self) -> Result<Vec<(String, String)>, SearchError> {
        let segments: Vec<String> = self
            .legs
            .iter()
            .map(Leg::segment)
            .collect::<Result<_, _>>()?;
        Ok(vec![
            ("iti".to_string(), segments.join("*")),
            // tt=m is what the site itself puts on multi-leg searches.
            ("tt".to_string(), "m".to_string()),
        ])
    }

    /// Deep-link URL for this search. Fails if any leg, typically the
    /// still-open last one, has no departure airport yet.
    pub fn url(&self) -> Result<String, SearchError> {
        Ok(url::assemble(&self.parameters()?))
    }
}
