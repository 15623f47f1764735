//! Release-year resolution.
//!
//! A year is taken from the first strategy that yields an in-range value:
//! the container's tag schema, then the file name, then the parent folders.
//! Every candidate is checked against a [`YearRange`] so catalogue numbers,
//! track counts and similar 4-digit noise are never accepted.

mod parse;
mod range;
mod resolver;
mod schema;

pub use parse::{find_year, parse_copyright_year, parse_date_year};
pub use range::YearRange;
pub use resolver::{YearResolution, YearResolver, YearSource};
pub use schema::{Candidate, ParseRule, TagSchema};
