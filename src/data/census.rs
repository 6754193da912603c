//! Literal U.S. decennial census population series.
//!
//! Values are resident population in millions. The recent subset is supplied as
//! its own literal (not sliced from the full history) and is checked against
//! the full series in tests.

use crate::domain::Series;
use crate::error::AppError;

/// Census interval in years.
pub const DECADE: f64 = 10.0;

/// 1790–1990, 21 observations.
pub const FULL_HISTORY: [(f64, f64); 21] = [
    (1790.0, 3.9),
    (1800.0, 5.3),
    (1810.0, 7.2),
    (1820.0, 9.6),
    (1830.0, 12.9),
    (1840.0, 17.1),
    (1850.0, 23.1),
    (1860.0, 31.4),
    (1870.0, 38.6),
    (1880.0, 50.2),
    (1890.0, 62.9),
    (1900.0, 76.0),
    (1910.0, 92.0),
    (1920.0, 105.7),
    (1930.0, 122.8),
    (1940.0, 131.7),
    (1950.0, 150.7),
    (1960.0, 179.0),
    (1970.0, 205.0),
    (1980.0, 226.5),
    (1990.0, 248.7),
];

/// 1950–1990, 5 observations.
pub const RECENT_DECADES: [(f64, f64); 5] = [
    (1950.0, 150.7),
    (1960.0, 179.0),
    (1970.0, 205.0),
    (1980.0, 226.5),
    (1990.0, 248.7),
];

/// The full 1790–1990 history as a validated series.
pub fn full_series() -> Result<Series, AppError> {
    Series::from_pairs(&FULL_HISTORY)
}

/// The 1950–1990 subset as a validated series.
pub fn recent_series() -> Result<Series, AppError> {
    Series::from_pairs(&RECENT_DECADES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_series_are_valid_and_decennial() {
        let full = full_series().unwrap();
        let recent = recent_series().unwrap();
        assert_eq!(full.len(), 21);
        assert_eq!(recent.len(), 5);
        assert!((full.step().unwrap() - DECADE).abs() < 1e-12);
        assert!((recent.step().unwrap() - DECADE).abs() < 1e-12);
        assert!((full.max_value().unwrap() - 248.7).abs() < 1e-12);
    }

    #[test]
    fn recent_subset_matches_tail_of_history() {
        assert_eq!(&FULL_HISTORY[16..], &RECENT_DECADES[..]);
    }
}
