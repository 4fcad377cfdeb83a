use chrono::Datelike;
use ndarray::{Array2, Axis};
use tracing::debug;

use crate::climatology::ClimatologyMap;
use crate::data_structures::{month_start, LonField, SstField};
use crate::utils::nan_mean;

/// Collapse latitude, keeping a (time, lon) field. Finite cells only.
pub fn meridional_mean(field: &SstField) -> LonField {
    let (n_time, _, n_lon) = field.data.dim();
    let mut data = Array2::from_elem((n_time, n_lon), f64::NAN);
    for t in 0..n_time {
        for j in 0..n_lon {
            data[(t, j)] = nan_mean(field.data.index_axis(Axis(0), t).column(j).iter().copied());
        }
    }
    LonField {
        times: field.times.clone(),
        lons: field.lons.clone(),
        data,
    }
}

/// Group a (time, lon) field to monthly means labelled at month start.
pub fn monthly_lon_field(field: &LonField) -> LonField {
    let n_lon = field.lons.len();
    let mut times = Vec::new();
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut current: Option<(i32, u32)> = None;
    for (t, time) in field.times.iter().enumerate() {
        let ym = (time.year(), time.month());
        if current != Some(ym) {
            times.push(month_start(ym.0, ym.1));
            rows.push(Vec::new());
            current = Some(ym);
        }
        rows.last_mut().expect("bucket exists").push(t);
    }

    let mut data = Array2::from_elem((times.len(), n_lon), f64::NAN);
    for (out_row, members) in rows.iter().enumerate() {
        for j in 0..n_lon {
            data[(out_row, j)] = nan_mean(members.iter().map(|&t| field.data[(t, j)]));
        }
    }
    LonField {
        times,
        lons: field.lons.clone(),
        data,
    }
}

/// Per-cell anomaly of a monthly (time, lon) field against the climatology:
/// for month (y, m), subtract the mean of all same-calendar-month rows whose
/// year lies inside ClimatologyMap[y]. A year without a window, or a window
/// without matching rows, leaves the whole row NaN.
pub fn monthly_anomalies(monthly: &LonField, climatology: &ClimatologyMap) -> LonField {
    let (n_time, n_lon) = monthly.data.dim();
    let mut data = Array2::from_elem((n_time, n_lon), f64::NAN);

    for t in 0..n_time {
        let time = monthly.times[t];
        let Some(&(win_start, win_end)) = climatology.get(&time.year()) else {
            continue;
        };
        let member_rows: Vec<usize> = monthly
            .times
            .iter()
            .enumerate()
            .filter(|(_, ts)| {
                ts.month() == time.month() && (win_start..=win_end).contains(&ts.year())
            })
            .map(|(i, _)| i)
            .collect();
        if member_rows.is_empty() {
            continue;
        }
        for j in 0..n_lon {
            let clim = nan_mean(member_rows.iter().map(|&i| monthly.data[(i, j)]));
            data[(t, j)] = monthly.data[(t, j)] - clim;
        }
    }
    debug!(rows = n_time, lons = n_lon, "monthly anomalies computed");
    LonField {
        times: monthly.times.clone(),
        lons: monthly.lons.clone(),
        data,
    }
}

/// Full anomaly pipeline for the transition analysis: latitude collapse,
/// monthly grouping, climatological anomaly.
pub fn anomaly_field(field: &SstField, climatology: &ClimatologyMap) -> LonField {
    let monthly = monthly_lon_field(&meridional_mean(field));
    monthly_anomalies(&monthly, climatology)
}
