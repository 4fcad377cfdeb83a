use std::collections::BTreeMap;

use ndarray::Array2;

use crate::data_structures::{BasinComposite, Composite};
use crate::utils::in_bounds;

/// Western sub-range of the Pacific basin, geographic degrees east.
pub const WEST_PACIFIC_LON: (f64, f64) = (120.0, 180.0);
/// Eastern sub-range, west of the dateline in negative degrees.
pub const EAST_PACIFIC_LON: (f64, f64) = (-180.0, -80.0);

/// Reindex one composite onto a contiguous basin axis: the 120°E–180°
/// columns followed by the 180°–80°W columns, in that order. A geographic
/// longitude axis cannot represent this dateline-crossing span contiguously,
/// so both the time axis and the new longitude axis are re-tagged with plain
/// integer indices. Values are copied untouched.
pub fn reindex_basin(composite: &Composite) -> BasinComposite {
    let mut columns: Vec<usize> = Vec::new();
    for bounds in [WEST_PACIFIC_LON, EAST_PACIFIC_LON] {
        columns.extend(
            composite
                .lons
                .iter()
                .enumerate()
                .filter(|(_, &lon)| in_bounds(lon, bounds.0, bounds.1))
                .map(|(j, _)| j),
        );
    }

    let n_months = composite.data.nrows();
    let mut data = Array2::from_elem((n_months, columns.len()), f64::NAN);
    for (out_col, &j) in columns.iter().enumerate() {
        data.column_mut(out_col).assign(&composite.data.column(j));
    }

    BasinComposite {
        rolling_time: (0..n_months as i64).collect(),
        number: (0..columns.len() as i64).collect(),
        data,
    }
}

/// Basin-relative view of every composited category.
pub fn reindex_all(composites: &BTreeMap<String, Composite>) -> BTreeMap<String, BasinComposite> {
    composites
        .iter()
        .map(|(key, c)| (key.clone(), reindex_basin(c)))
        .collect()
}
