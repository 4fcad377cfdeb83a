use chrono::Datelike;
use ndarray::Array3;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::data_structures::{month_start, SstField};

/// Synthetic monthly SST field with an annual cycle, a multi-year
/// ENSO-like oscillation localized around the central-east equatorial
/// Pacific, and white noise. Deterministic apart from the seeded rng, so
/// examples and tests can run the full pipeline without real data.
pub fn synthetic_sst_field(rng: &mut StdRng, start_year: i32, end_year: i32) -> SstField {
    // 2.5° latitude band around the equator, 5° longitude around the globe
    let lats: Vec<f64> = (0..9).map(|i| -10.0 + 2.5 * i as f64).collect();
    let lons: Vec<f64> = (0..72).map(|i| -180.0 + 5.0 * i as f64).collect();

    let n_months = ((end_year - start_year + 1) * 12) as usize;
    let times: Vec<_> = (0..n_months)
        .map(|i| month_start(start_year + (i as i32) / 12, (i as u32) % 12 + 1))
        .collect();

    let noise = Normal::new(0.0, 0.15).unwrap();
    let mut data = Array3::zeros((n_months, lats.len(), lons.len()));
    for (t, time) in times.iter().enumerate() {
        let month_angle = 2.0 * std::f64::consts::PI * (time.month0() as f64) / 12.0;
        let osc = enso_oscillation(t as f64);
        for (i, &lat) in lats.iter().enumerate() {
            let annual = 1.5 * month_angle.cos() * (lat / 10.0);
            let lat_taper = (-0.5 * (lat / 7.5).powi(2)).exp();
            for (j, &lon) in lons.iter().enumerate() {
                let pattern = lat_taper * lon_taper(lon);
                data[(t, i, j)] =
                    26.0 + annual + osc * pattern + noise.sample(rng);
            }
        }
    }

    SstField {
        times,
        lats,
        lons,
        data,
    }
}

// Slow irregular oscillation in °C; peaks past ±2 now and then so every
// intensity tier shows up over a long run.
fn enso_oscillation(t_months: f64) -> f64 {
    let y = t_months / 12.0;
    1.4 * (2.0 * std::f64::consts::PI * y / 3.7).sin()
        + 0.9 * (2.0 * std::f64::consts::PI * y / 5.3 + 1.0).sin()
}

// Anomaly pattern peaked near 145°W, fading toward the basin edges. The
// dateline discontinuity in geographic longitude is handled by distance on
// the circle.
fn lon_taper(lon: f64) -> f64 {
    let center = -145.0;
    let mut d = (lon - center).abs() % 360.0;
    if d > 180.0 {
        d = 360.0 - d;
    }
    (-0.5 * (d / 45.0).powi(2)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn field_dimensions_match_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = synthetic_sst_field(&mut rng, 1990, 2024);
        assert_eq!(field.times.len(), 35 * 12);
        assert_eq!(field.data.dim(), (35 * 12, 9, 72));
        assert_eq!(field.times[0], month_start(1990, 1));
        assert_eq!(*field.times.last().unwrap(), month_start(2024, 12));
    }

    #[test]
    fn oscillation_reaches_both_extremes() {
        let values: Vec<f64> = (0..(40 * 12)).map(|t| enso_oscillation(t as f64)).collect();
        assert!(values.iter().cloned().fold(f64::MIN, f64::max) > 2.0);
        assert!(values.iter().cloned().fold(f64::MAX, f64::min) < -2.0);
    }

    #[test]
    fn pattern_peaks_in_the_nino34_box() {
        assert!(lon_taper(-145.0) > lon_taper(-60.0));
        assert!(lon_taper(-145.0) > lon_taper(130.0));
        // circle distance: 170 is 45° from -145, not 315°
        assert!(lon_taper(170.0) > lon_taper(60.0));
    }
}
