use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::data_structures::{
    Episode, IndexRecord, Intensity, Phase, TimeSeries, INTENSITIES_DESC,
};
use crate::utils::next_month;

/// Months of consecutive threshold exceedance required to enter a phase.
const PHASE_RUN: usize = 5;
/// Months of consecutive exceedance required to claim an intensity tier.
const INTENSITY_RUN: usize = 3;
/// Phase entry threshold (°C).
const PHASE_THRESHOLD: f64 = 0.5;

// ------------------------ phase detection ------------------------

/// Label every month Warm/Cool/Neutral: any 5-month window entirely at or
/// beyond ±0.5 labels all 5 of its months. NaN fails both comparisons, so
/// missing index values stay Neutral. Overlapping qualifying windows agree
/// by construction, so window order is irrelevant.
pub fn identify_phases(oni: &TimeSeries) -> Vec<Phase> {
    let n = oni.len();
    let mut phases = vec![Phase::Neutral; n];
    if n < PHASE_RUN {
        return phases;
    }
    for i in 0..=n - PHASE_RUN {
        let window = &oni.values[i..i + PHASE_RUN];
        if window.iter().all(|&v| v >= PHASE_THRESHOLD) {
            phases[i..i + PHASE_RUN].fill(Phase::Warm);
        } else if window.iter().all(|&v| v <= -PHASE_THRESHOLD) {
            phases[i..i + PHASE_RUN].fill(Phase::Cool);
        }
    }
    phases
}

// ------------------------ event numbering ------------------------

/// Per-month event ids, one running counter per phase category. A counter
/// increments every time its phase freshly begins; every month of a run
/// shares the run's id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventIds {
    pub warm: Vec<Option<u32>>,
    pub cool: Vec<Option<u32>>,
    pub neutral: Vec<Option<u32>>,
}

pub fn number_events(phases: &[Phase]) -> EventIds {
    let n = phases.len();
    let mut ids = EventIds {
        warm: vec![None; n],
        cool: vec![None; n],
        neutral: vec![None; n],
    };
    let mut counters: [u32; 3] = [0, 0, 0];
    let mut current: Option<Phase> = None;

    for (i, &phase) in phases.iter().enumerate() {
        let slot = match phase {
            Phase::Warm => 0,
            Phase::Cool => 1,
            Phase::Neutral => 2,
        };
        if current != Some(phase) {
            counters[slot] += 1;
            current = Some(phase);
        }
        let id = Some(counters[slot]);
        match phase {
            Phase::Warm => ids.warm[i] = id,
            Phase::Cool => ids.cool[i] = id,
            Phase::Neutral => ids.neutral[i] = id,
        }
    }
    ids
}

// ------------------------ intensity classification ------------------------

// Highest tier for which the episode holds 3 consecutive qualifying months.
// Every non-Neutral month already clears 0.5, so Weak always applies.
fn episode_intensity(values: &[f64], phase: Phase) -> Intensity {
    for tier in INTENSITIES_DESC {
        let tau = tier.threshold();
        let mut run = 0usize;
        for &v in values {
            let hit = match phase {
                Phase::Warm => v >= tau,
                Phase::Cool => v <= -tau,
                Phase::Neutral => false,
            };
            run = if hit { run + 1 } else { 0 };
            if run >= INTENSITY_RUN {
                return tier;
            }
        }
    }
    Intensity::Weak
}

/// Assemble the full index table: phases, per-category event ids, and the
/// intensity shared by every month of each non-Neutral episode.
pub fn build_records(oni: &TimeSeries, phases: &[Phase], ids: &EventIds) -> Vec<IndexRecord> {
    assert_eq!(oni.len(), phases.len());

    // gather each warm/cool event's values, classify once, then fan out
    let mut warm_values: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    let mut cool_values: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for i in 0..oni.len() {
        if let Some(id) = ids.warm[i] {
            warm_values.entry(id).or_default().push(oni.values[i]);
        }
        if let Some(id) = ids.cool[i] {
            cool_values.entry(id).or_default().push(oni.values[i]);
        }
    }
    let warm_tiers: BTreeMap<u32, Intensity> = warm_values
        .iter()
        .map(|(&id, vals)| (id, episode_intensity(vals, Phase::Warm)))
        .collect();
    let cool_tiers: BTreeMap<u32, Intensity> = cool_values
        .iter()
        .map(|(&id, vals)| (id, episode_intensity(vals, Phase::Cool)))
        .collect();
    debug!(
        warm_events = warm_tiers.len(),
        cool_events = cool_tiers.len(),
        "episodes classified"
    );

    (0..oni.len())
        .map(|i| {
            let intensity = match phases[i] {
                Phase::Warm => ids.warm[i].map(|id| warm_tiers[&id]),
                Phase::Cool => ids.cool[i].map(|id| cool_tiers[&id]),
                Phase::Neutral => None,
            };
            IndexRecord {
                time: oni.times[i],
                oni: oni.values[i],
                phase: phases[i],
                warm_event: ids.warm[i],
                cool_event: ids.cool[i],
                neutral_event: ids.neutral[i],
                intensity,
            }
        })
        .collect()
}

// ------------------------ episode summary ------------------------

/// Merge consecutive non-Neutral months with equal phase and intensity into
/// episode records. A month extends the open episode only when it lands
/// exactly one month after its end; any gap closes the episode.
pub fn summarize_events(records: &[IndexRecord]) -> Vec<Episode> {
    let mut episodes = Vec::new();
    let mut current: Option<Episode> = None;

    for rec in records.iter().filter(|r| r.phase != Phase::Neutral) {
        let Some(intensity) = rec.intensity else {
            continue;
        };
        match current.as_mut() {
            Some(ep)
                if rec.time == next_month(ep.end)
                    && rec.phase == ep.phase
                    && intensity == ep.intensity =>
            {
                ep.end = rec.time;
            }
            _ => {
                if let Some(done) = current.take() {
                    episodes.push(done);
                }
                current = Some(Episode {
                    start: rec.time,
                    end: rec.time,
                    phase: rec.phase,
                    intensity,
                });
            }
        }
    }
    if let Some(done) = current {
        episodes.push(done);
    }
    info!(n = episodes.len(), "event summary built");
    episodes
}
