use std::fmt;

use crate::leg::Leg;

#[derive(Debug, Clone)]
pub enum SearchError {
    Incomplete { leg: Leg, message: &'static str },
    InvalidDate(String),
    InvalidLeg(String),
}

impl SearchError {
    pub(crate) fn incomplete(leg: Leg, message: &'static str) -> Self {
        Self::Incomplete { leg, message }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete { leg, message } => write!(f, "{leg}: {message}"),
            Self::InvalidDate(date) => write!(
                f,
                "invalid date \"{date}\" — must be YYYY-MM-DD format (e.g. 2026-03-01)"
            ),
            Self::InvalidLeg(spec) => write!(
                f,
                "invalid leg \"{spec}\" — must be \"FROM\", \"FROM TO\" or \
                 \"FROM TO YYYY-MM-DD\" with comma-separated airport codes"
            ),
        }
    }
}

impl std::error::Error for SearchError {}
