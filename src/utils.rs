use chrono::{Months, NaiveDate};

// ------------------------ helpers ------------------------

/// Mean of the finite entries; NaN when none are finite.
pub fn nan_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        if v.is_finite() {
            sum += v;
            n += 1;
        }
    }
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

/// True when `value` lies inside [lo, hi] regardless of the order the
/// bounds were given in (grid axes may run in either direction).
pub fn in_bounds(value: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    lo <= value && value <= hi
}

/// `date` advanced by one calendar month.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date + Months::new(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_mean_skips_missing() {
        let m = nan_mean([1.0, f64::NAN, 3.0]);
        assert!((m - 2.0).abs() < 1e-12);
        assert!(nan_mean([f64::NAN, f64::NAN]).is_nan());
    }

    #[test]
    fn bounds_accept_either_order() {
        assert!(in_bounds(-3.0, 5.0, -5.0));
        assert!(in_bounds(-3.0, -5.0, 5.0));
        assert!(!in_bounds(7.0, -5.0, 5.0));
    }

    #[test]
    fn next_month_rolls_over_year() {
        let d = NaiveDate::from_ymd_opt(2015, 12, 1).unwrap();
        assert_eq!(next_month(d), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap());
    }
}
