pub mod date;
pub mod error;
pub mod leg;
pub mod mcp;
pub mod search;
pub mod url;

pub use date::PartialDate;
pub use error::SearchError;
pub use leg::Leg;
pub use search::{itinerary, roundtrip, ItinerarySearch, RoundtripSearch};
