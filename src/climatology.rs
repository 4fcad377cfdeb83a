use std::collections::BTreeMap;

use tracing::debug;

use crate::error::EnsoError;

/// Year -> inclusive 30-year reference window.
pub type ClimatologyMap = BTreeMap<i32, (i32, i32)>;

// 30-year window anchored on the nearest multiple of 5.
fn climatology_window(year: i32) -> (i32, i32) {
    let rounded = year.div_euclid(5) * 5;
    (rounded - 14, rounded + 15)
}

/// Generate the climatology window for every year of the analysis range.
///
/// Years within 15 of either end of the range reuse the window computed at
/// the boundary year (`start + 15` / `end - 15`) rather than their own, so a
/// range of at least 31 years is required.
pub fn climatology_periods(start_year: i32, end_year: i32) -> Result<ClimatologyMap, EnsoError> {
    let span = i64::from(end_year) - i64::from(start_year) + 1;
    if span < 31 {
        return Err(EnsoError::InsufficientRange {
            start: start_year,
            end: end_year,
            span,
        });
    }

    let fixed_start = climatology_window(start_year + 15);
    let fixed_end = climatology_window(end_year - 15);

    let mut map = ClimatologyMap::new();
    for year in start_year..=end_year {
        let window = if year < start_year + 15 {
            fixed_start
        } else if year > end_year - 15 {
            fixed_end
        } else {
            climatology_window(year)
        };
        map.insert(year, window);
    }
    debug!(start_year, end_year, n = map.len(), "climatology windows generated");
    Ok(map)
}
