use chrono::{DateTime, Timelike, Utc};

use crate::core::{SubplotGrid, SubplotSpacing};
use crate::error::{PlotError, PlotResult};
use crate::render::{TimeCursorLabel, TimeCursorLine};

/// Formats a UTC millisecond timestamp as the shortest exact ISO-8601 form.
///
/// Midnight collapses to the date, zero seconds and milliseconds are dropped.
pub fn compact_iso_string(timestamp_utc_ms: i64) -> PlotResult<String> {
    let time = DateTime::<Utc>::from_timestamp_millis(timestamp_utc_ms).ok_or_else(|| {
        PlotError::InvalidData(format!("timestamp {timestamp_utc_ms} ms is out of range"))
    })?;

    let millis = time.timestamp_subsec_millis();
    let format = match (time.hour(), time.minute(), time.second(), millis) {
        (0, 0, 0, 0) => "%Y-%m-%d",
        (_, _, 0, 0) => "%Y-%m-%dT%H:%MZ",
        (_, _, _, 0) => "%Y-%m-%dT%H:%M:%SZ",
        _ => "%Y-%m-%dT%H:%M:%S%.3fZ",
    };
    Ok(time.format(format).to_string())
}

/// Time cursor for every planned subplot, including ones without data.
pub fn assemble_time_cursors(
    grid: &SubplotGrid,
    spacing: SubplotSpacing,
    timestamps_utc_ms: &[i64],
    color: &str,
    label_offset: f64,
) -> PlotResult<(Vec<TimeCursorLine>, Vec<TimeCursorLabel>)> {
    let positions = grid.positions()?;
    let mut lines = Vec::with_capacity(positions.len() * timestamps_utc_ms.len());
    let mut labels = Vec::with_capacity(lines.capacity());

    for &timestamp_utc_ms in timestamps_utc_ms {
        let text = compact_iso_string(timestamp_utc_ms)?;
        for &subplot in &positions {
            let domain = grid.cell_domain(subplot, spacing)?;
            lines.push(TimeCursorLine::spanning(
                subplot,
                timestamp_utc_ms,
                domain,
                color,
            ));
            labels.push(TimeCursorLabel {
                subplot,
                timestamp_utc_ms,
                text: text.clone(),
                y: domain.y0 - label_offset,
            });
        }
    }
    Ok((lines, labels))
}

#[cfg(test)]
mod tests {
    use super::{assemble_time_cursors, compact_iso_string};
    use crate::core::{SubplotGrid, SubplotLimitDirection, SubplotSpacing};

    #[test]
    fn compact_iso_drops_zero_components() {
        assert_eq!(compact_iso_string(1_577_836_800_000).expect("date"), "2020-01-01");
        assert_eq!(
            compact_iso_string(1_577_836_800_000 + 90 * 60_000).expect("minutes"),
            "2020-01-01T01:30Z"
        );
        assert_eq!(
            compact_iso_string(1_577_836_800_000 + 5_000).expect("seconds"),
            "2020-01-01T00:00:05Z"
        );
        assert_eq!(
            compact_iso_string(1_577_836_800_000 + 5_250).expect("millis"),
            "2020-01-01T00:00:05.250Z"
        );
    }

    #[test]
    fn every_subplot_gets_a_cursor() {
        let grid = SubplotGrid::plan(5, SubplotLimitDirection::Rows, 2);
        let (lines, labels) = assemble_time_cursors(
            &grid,
            SubplotSpacing::default(),
            &[1_577_836_800_000],
            "#505050",
            0.03,
        )
        .expect("cursors");
        assert_eq!(lines.len(), 5);
        assert_eq!(labels.len(), 5);
        assert!(labels.iter().all(|label| label.text == "2020-01-01"));
        for (line, label) in lines.iter().zip(&labels) {
            assert!(line.y1 > line.y0);
            assert!(label.y < line.y0);
        }
    }

    #[test]
    fn no_timestamp_means_no_cursor() {
        let grid = SubplotGrid::plan(3, SubplotLimitDirection::None, 0);
        let (lines, labels) =
            assemble_time_cursors(&grid, SubplotSpacing::default(), &[], "#000000", 0.03)
                .expect("cursors");
        assert!(lines.is_empty());
        assert!(labels.is_empty());
    }
}
