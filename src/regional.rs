use chrono::Datelike;
use tracing::debug;

use crate::data_structures::{month_start, SstField, TimeSeries};
use crate::utils::{in_bounds, nan_mean};

/// Niño 3.4 box: 5°S–5°N, 170°W–120°W.
pub const NINO34_LAT: (f64, f64) = (5.0, -5.0);
pub const NINO34_LON: (f64, f64) = (-170.0, -120.0);

/// Collapse the gridded field to one scalar per time step by averaging the
/// cells inside the given lat/lon box (finite cells only).
pub fn spatial_box_mean(
    field: &SstField,
    lat_bounds: (f64, f64),
    lon_bounds: (f64, f64),
) -> TimeSeries {
    let lat_idx: Vec<usize> = field
        .lats
        .iter()
        .enumerate()
        .filter(|(_, &v)| in_bounds(v, lat_bounds.0, lat_bounds.1))
        .map(|(i, _)| i)
        .collect();
    let lon_idx: Vec<usize> = field
        .lons
        .iter()
        .enumerate()
        .filter(|(_, &v)| in_bounds(v, lon_bounds.0, lon_bounds.1))
        .map(|(i, _)| i)
        .collect();
    debug!(
        n_lat = lat_idx.len(),
        n_lon = lon_idx.len(),
        "spatial box selection"
    );

    let values: Vec<f64> = (0..field.times.len())
        .map(|t| {
            nan_mean(
                lat_idx
                    .iter()
                    .flat_map(|&i| lon_idx.iter().map(move |&j| (i, j)))
                    .map(|(i, j)| field.data[(t, i, j)]),
            )
        })
        .collect();

    TimeSeries::new(field.times.clone(), values)
}

/// Resample a series to monthly means labelled at month start. Input at
/// monthly cadence passes through unchanged (aside from relabelling to the
/// first of the month); finer cadences are averaged per calendar month.
pub fn monthly_means(series: &TimeSeries) -> TimeSeries {
    let mut times = Vec::new();
    let mut values = Vec::new();
    let mut current: Option<(i32, u32)> = None;
    let mut bucket: Vec<f64> = Vec::new();

    for (time, value) in series.iter() {
        let ym = (time.year(), time.month());
        if current != Some(ym) {
            if let Some((y, m)) = current {
                times.push(month_start(y, m));
                values.push(nan_mean(bucket.drain(..)));
            }
            current = Some(ym);
        }
        bucket.push(value);
    }
    if let Some((y, m)) = current {
        times.push(month_start(y, m));
        values.push(nan_mean(bucket));
    }
    TimeSeries::new(times, values)
}

/// Centered 3-month moving average. A position survives only if all three
/// samples of its window exist and are finite, so the two end months (and
/// any month adjacent to a gap) drop out.
pub fn rolling3_centered(series: &TimeSeries) -> TimeSeries {
    let n = series.len();
    let mut times = Vec::new();
    let mut values = Vec::new();
    for i in 1..n.saturating_sub(1) {
        let window = [series.values[i - 1], series.values[i], series.values[i + 1]];
        if window.iter().all(|v| v.is_finite()) {
            times.push(series.times[i]);
            values.push(window.iter().sum::<f64>() / 3.0);
        }
    }
    TimeSeries::new(times, values)
}

/// Full regional pipeline: box mean, monthly resample, 3-month smoothing.
pub fn nino34_series(field: &SstField) -> TimeSeries {
    let boxed = spatial_box_mean(field, NINO34_LAT, NINO34_LON);
    let monthly = monthly_means(&boxed);
    rolling3_centered(&monthly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ndarray::Array3;

    fn flat_field(values: &[f64]) -> SstField {
        let n = values.len();
        let mut data = Array3::zeros((n, 2, 2));
        for (t, &v) in values.iter().enumerate() {
            data.slice_mut(ndarray::s![t, .., ..]).fill(v);
        }
        let times = (0..n)
            .map(|i| month_start(2000 + (i as i32) / 12, (i as u32) % 12 + 1))
            .collect();
        SstField {
            times,
            lats: vec![-2.0, 2.0],
            lons: vec![-160.0, -140.0],
            data,
        }
    }

    #[test]
    fn box_mean_ignores_cells_outside_bounds() {
        let mut field = flat_field(&[1.0, 2.0]);
        // push one latitude row outside the box; its values must not matter
        field.lats[1] = 40.0;
        field.data.slice_mut(ndarray::s![.., 1, ..]).fill(100.0);
        let ts = spatial_box_mean(&field, NINO34_LAT, NINO34_LON);
        assert_eq!(ts.values, vec![1.0, 2.0]);
    }

    #[test]
    fn monthly_means_collapse_finer_cadence() {
        let times = vec![
            NaiveDate::from_ymd_opt(2000, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 20).unwrap(),
            NaiveDate::from_ymd_opt(2000, 2, 10).unwrap(),
        ];
        let ts = monthly_means(&TimeSeries::new(times, vec![1.0, 3.0, 5.0]));
        assert_eq!(ts.times, vec![month_start(2000, 1), month_start(2000, 2)]);
        assert!((ts.values[0] - 2.0).abs() < 1e-12);
        assert!((ts.values[1] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rolling_mean_drops_both_ends() {
        let ts = nino34_series(&flat_field(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.times[0], month_start(2000, 2));
        assert!((ts.values[0] - 2.0).abs() < 1e-12);
        assert!((ts.values[2] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn rolling_mean_drops_windows_touching_a_gap() {
        let mut ts = flat_field(&[1.0, 1.0, 1.0, 1.0, 1.0]);
        ts.data.slice_mut(ndarray::s![2, .., ..]).fill(f64::NAN);
        let smoothed = nino34_series(&ts);
        // months 2..4 all touch the NaN at index 2
        assert_eq!(smoothed.len(), 0);
    }
}
