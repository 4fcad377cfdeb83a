use std::collections::BTreeMap;

use chrono::Datelike;
use ndarray::{Array2, Array3, Axis};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::data_structures::{month_start, Category, Composite, IndexRecord, LonField, Phase};
use crate::utils::nan_mean;

/// Months in a composite window: January of the onset year through December
/// of the following year.
pub const COMPOSITE_MONTHS: usize = 24;

// ------------------------ transition years ------------------------

/// Onset years for one category: a record qualifies when its phase and
/// intensity match and the previous month's phase is Neutral or the
/// opposite phase, i.e. the record is the first month of a fresh episode.
/// The very first record has no predecessor and never qualifies.
fn transition_years(records: &[IndexRecord], category: Category) -> Vec<i32> {
    records
        .windows(2)
        .filter(|pair| {
            let (prev, rec) = (&pair[0], &pair[1]);
            rec.phase == category.phase
                && rec.intensity == Some(category.intensity)
                && (prev.phase == Phase::Neutral || prev.phase == category.phase.opposite())
        })
        .map(|pair| pair[1].time.year())
        .collect()
}

/// Onset years for all 8 categories, keyed by the fixed category strings.
/// Categories without onsets keep an empty list here; they drop out at the
/// composite step.
pub fn identify_transitions(records: &[IndexRecord]) -> BTreeMap<String, Vec<i32>> {
    let map: BTreeMap<String, Vec<i32>> = Category::all()
        .into_iter()
        .map(|cat| (cat.key(), transition_years(records, cat)))
        .collect();
    for (key, years) in &map {
        debug!(category = %key, n = years.len(), "transition years");
    }
    map
}

// ------------------------ composites ------------------------

/// 24-month anomaly stack for one category, shape (year, 24, lon). Years
/// whose window has no overlap with the record are dropped; short tails are
/// NaN-padded. Returns None when no year survives.
fn stack_24_months(anomalies: &LonField, years: &[i32]) -> Option<(Vec<i32>, Array3<f64>)> {
    let n_lon = anomalies.lons.len();
    let mut valid_years = Vec::new();
    let mut slices: Vec<Array2<f64>> = Vec::new();

    for &year in years {
        let window_start = month_start(year, 1);
        let window_end = month_start(year + 1, 12);
        let rows: Vec<usize> = anomalies
            .times
            .iter()
            .enumerate()
            .filter(|(_, t)| window_start <= **t && **t <= window_end)
            .map(|(i, _)| i)
            .collect();
        if rows.is_empty() {
            continue;
        }
        let mut slice = Array2::from_elem((COMPOSITE_MONTHS, n_lon), f64::NAN);
        for (m, &row) in rows.iter().take(COMPOSITE_MONTHS).enumerate() {
            slice.row_mut(m).assign(&anomalies.data.row(row));
        }
        valid_years.push(year);
        slices.push(slice);
    }

    if valid_years.is_empty() {
        return None;
    }
    let mut stack = Array3::from_elem((valid_years.len(), COMPOSITE_MONTHS, n_lon), f64::NAN);
    for (k, slice) in slices.iter().enumerate() {
        stack.index_axis_mut(Axis(0), k).assign(slice);
    }
    Some((valid_years, stack))
}

fn composite_mean(years: Vec<i32>, stack: Array3<f64>, lons: Vec<f64>) -> Composite {
    let (n_years, n_months, n_lon) = stack.dim();
    let mut data = Array2::from_elem((n_months, n_lon), f64::NAN);
    for m in 0..n_months {
        for j in 0..n_lon {
            data[(m, j)] = nan_mean((0..n_years).map(|k| stack[(k, m, j)]));
        }
    }
    Composite { years, lons, data }
}

/// Composite anomaly fields for every category with at least one surviving
/// onset year. The categories are independent, so they map in parallel.
pub fn build_composites(
    anomalies: &LonField,
    transitions: &BTreeMap<String, Vec<i32>>,
) -> BTreeMap<String, Composite> {
    let composites: BTreeMap<String, Composite> = transitions
        .par_iter()
        .filter_map(|(key, years)| {
            let (valid_years, stack) = stack_24_months(anomalies, years)?;
            let composite = composite_mean(valid_years, stack, anomalies.lons.clone());
            Some((key.clone(), composite))
        })
        .collect();
    info!(n = composites.len(), "composites built");
    composites
}
