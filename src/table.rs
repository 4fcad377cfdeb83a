use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::data_structures::{Episode, IndexRecord};
use crate::error::EnsoError;

fn fmt_id(id: Option<u32>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

/// Write the index table: one row per month with the ONI value, phase,
/// per-category event ids and episode intensity. Absent ids and Neutral
/// intensities are empty cells.
pub fn write_index_table(path: &Path, records: &[IndexRecord]) -> Result<(), EnsoError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(
        out,
        "valid_time,ONI,Phase,ElNino_event,LaNina_event,Neutral_event,Intensity"
    )?;
    for rec in records {
        writeln!(
            out,
            "{},{:.4},{},{},{},{},{}",
            rec.time.format("%Y-%m-%d"),
            rec.oni,
            rec.phase.label(),
            fmt_id(rec.warm_event),
            fmt_id(rec.cool_event),
            fmt_id(rec.neutral_event),
            rec.intensity.map(|i| i.label()).unwrap_or(""),
        )?;
    }
    out.flush()?;
    info!(path = %path.display(), rows = records.len(), "index table written");
    Ok(())
}

/// Write the canonical event table: `(start, end)` period plus phase and
/// intensity per episode.
pub fn write_event_table(path: &Path, episodes: &[Episode]) -> Result<(), EnsoError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "Period,Phase,Intensity")?;
    for ep in episodes {
        writeln!(
            out,
            "\"({}, {})\",{},{}",
            ep.start.format("%Y-%m-%d"),
            ep.end.format("%Y-%m-%d"),
            ep.phase.label(),
            ep.intensity.label(),
        )?;
    }
    out.flush()?;
    info!(path = %path.display(), rows = episodes.len(), "event table written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::{month_start, Intensity, Phase};

    #[test]
    fn index_table_rows_format() {
        let records = vec![
            IndexRecord {
                time: month_start(2015, 6),
                oni: 0.8123,
                phase: Phase::Warm,
                warm_event: Some(3),
                cool_event: None,
                neutral_event: None,
                intensity: Some(Intensity::Weak),
            },
            IndexRecord {
                time: month_start(2015, 7),
                oni: -0.05,
                phase: Phase::Neutral,
                warm_event: None,
                cool_event: None,
                neutral_event: Some(7),
                intensity: None,
            },
        ];
        let dir = std::env::temp_dir().join("enso_oni_table_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("oni_data.csv");
        write_index_table(&path, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "valid_time,ONI,Phase,ElNino_event,LaNina_event,Neutral_event,Intensity"
        );
        assert_eq!(lines[1], "2015-06-01,0.8123,El Nino,3,,,Weak");
        assert_eq!(lines[2], "2015-07-01,-0.0500,Neutral,,,7,");
    }

    #[test]
    fn event_table_rows_format() {
        let episodes = vec![Episode {
            start: month_start(2015, 6),
            end: month_start(2016, 4),
            phase: Phase::Warm,
            intensity: Intensity::VeryStrong,
        }];
        let dir = std::env::temp_dir().join("enso_oni_table_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("oni_events.csv");
        write_event_table(&path, &episodes).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.lines().nth(1).unwrap(),
            "\"(2015-06-01, 2016-04-01)\",El Nino,Very Strong"
        );
    }
}
