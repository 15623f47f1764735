use chrono::{Datelike, Local};

use crate::config::ResolverSettings;

/// Inclusive range of acceptable years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub const EARLIEST: i32 = 1900;

    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// `[1900, current_year + 1]`, the next year allowing for pre-release tags.
    pub fn current() -> Self {
        Self::new(Self::EARLIEST, Local::now().year() + 1)
    }

    pub fn from_settings(settings: &ResolverSettings) -> Self {
        let max = settings
            .max_year
            .unwrap_or_else(|| Local::now().year() + 1);
        Self::new(settings.min_year, max)
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::current()
    }
}
