use chrono::Datelike;
use tracing::debug;

use crate::climatology::ClimatologyMap;
use crate::data_structures::TimeSeries;
use crate::utils::nan_mean;

/// Oceanic Niño Index: the smoothed regional series minus, per month, the
/// mean of all same-calendar-month samples whose year falls inside that
/// year's climatology window. No window or no reference samples gives NaN
/// at the timestamp, never an error.
pub fn compute_oni(regional: &TimeSeries, climatology: &ClimatologyMap) -> TimeSeries {
    let values: Vec<f64> = regional
        .iter()
        .map(|(time, value)| {
            let Some(&(win_start, win_end)) = climatology.get(&time.year()) else {
                return f64::NAN;
            };
            let clim = nan_mean(regional.iter().filter_map(|(t, v)| {
                (t.month() == time.month() && (win_start..=win_end).contains(&t.year()))
                    .then_some(v)
            }));
            value - clim
        })
        .collect();

    let missing = values.iter().filter(|v| !v.is_finite()).count();
    debug!(n = values.len(), missing, "ONI computed");
    TimeSeries::new(regional.times.clone(), values)
}
