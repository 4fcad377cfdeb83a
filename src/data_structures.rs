use chrono::NaiveDate;
use ndarray::{Array2, Array3};

/// ENSO phase of a single month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Warm,    // El Niño
    Cool,    // La Niña
    Neutral,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Warm => "El Nino",
            Phase::Cool => "La Nina",
            Phase::Neutral => "Neutral",
        }
    }

    pub fn opposite(&self) -> Phase {
        match self {
            Phase::Warm => Phase::Cool,
            Phase::Cool => Phase::Warm,
            Phase::Neutral => Phase::Neutral,
        }
    }
}

/// Event severity tiers with their ONI thresholds (°C).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intensity {
    VeryStrong, // |ONI| >= 2.0 for 3 consecutive months
    Strong,     // >= 1.5
    Moderate,   // >= 1.0
    Weak,       // >= 0.5
}

pub const INTENSITIES_DESC: [Intensity; 4] = [
    Intensity::VeryStrong,
    Intensity::Strong,
    Intensity::Moderate,
    Intensity::Weak,
];

impl Intensity {
    pub fn threshold(&self) -> f64 {
        match self {
            Intensity::VeryStrong => 2.0,
            Intensity::Strong => 1.5,
            Intensity::Moderate => 1.0,
            Intensity::Weak => 0.5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intensity::VeryStrong => "Very Strong",
            Intensity::Strong => "Strong",
            Intensity::Moderate => "Moderate",
            Intensity::Weak => "Weak",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Intensity::VeryStrong => "very_strong",
            Intensity::Strong => "strong",
            Intensity::Moderate => "moderate",
            Intensity::Weak => "weak",
        }
    }
}

/// One of the 8 transition categories (2 phases x 4 intensities).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Category {
    pub phase: Phase,
    pub intensity: Intensity,
}

impl Category {
    /// All 8 categories in the fixed output order.
    pub fn all() -> Vec<Category> {
        let mut out = Vec::with_capacity(8);
        for phase in [Phase::Warm, Phase::Cool] {
            for intensity in INTENSITIES_DESC {
                out.push(Category { phase, intensity });
            }
        }
        out
    }

    /// Fixed key string, e.g. `very_strong_warm`.
    pub fn key(&self) -> String {
        let phase = match self.phase {
            Phase::Warm => "warm",
            Phase::Cool => "cool",
            Phase::Neutral => "neutral",
        };
        format!("{}_{}", self.intensity.slug(), phase)
    }
}

/// Monthly scalar series; NaN marks a missing value.
#[derive(Clone, Debug, Default)]
pub struct TimeSeries {
    pub times: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(times: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        assert_eq!(times.len(), values.len(), "times/values length mismatch");
        Self { times, values }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }
}

/// One row of the index table: timestamp, ONI, phase, per-category event ids,
/// and the episode intensity (None for Neutral).
#[derive(Clone, Debug, PartialEq)]
pub struct IndexRecord {
    pub time: NaiveDate,
    pub oni: f64,
    pub phase: Phase,
    pub warm_event: Option<u32>,
    pub cool_event: Option<u32>,
    pub neutral_event: Option<u32>,
    pub intensity: Option<Intensity>,
}

/// Maximal run of consecutive months sharing phase and intensity.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub phase: Phase,
    pub intensity: Intensity,
}

/// Gridded SST, shape (time, lat, lon). Cadence monthly or finer.
#[derive(Clone, Debug)]
pub struct SstField {
    pub times: Vec<NaiveDate>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub data: Array3<f64>,
}

/// Latitude-collapsed field, shape (time, lon).
#[derive(Clone, Debug)]
pub struct LonField {
    pub times: Vec<NaiveDate>,
    pub lons: Vec<f64>,
    pub data: Array2<f64>,
}

/// Composite anomaly for one transition category, shape (24, lon).
/// `years` holds the onset years actually composited.
#[derive(Clone, Debug)]
pub struct Composite {
    pub years: Vec<i32>,
    pub lons: Vec<f64>,
    pub data: Array2<f64>,
}

/// Composite reindexed onto the dateline-crossing Pacific axis.
/// Axes carry plain integer tags; values are untouched.
#[derive(Clone, Debug)]
pub struct BasinComposite {
    pub rolling_time: Vec<i64>,
    pub number: Vec<i64>,
    pub data: Array2<f64>,
}

/// First day of the month containing (year, month).
pub fn month_start(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid year/month")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_cover_all_eight() {
        let keys: Vec<String> = Category::all().iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec![
                "very_strong_warm",
                "strong_warm",
                "moderate_warm",
                "weak_warm",
                "very_strong_cool",
                "strong_cool",
                "moderate_cool",
                "weak_cool",
            ]
        );
    }

    #[test]
    fn intensity_thresholds_descend() {
        let thr: Vec<f64> = INTENSITIES_DESC.iter().map(|i| i.threshold()).collect();
        assert_eq!(thr, vec![2.0, 1.5, 1.0, 0.5]);
    }
}
