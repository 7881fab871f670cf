//! Tabular export of journey records.
//!
//! Records are written as CSV (header `date,from,to,is_train`) or as a
//! pretty-printed JSON array with the same field names. Dates are ISO
//! `YYYY-MM-DD`.

use std::io::Write;
use std::path::Path;

use crate::domain::JourneyRecord;

/// Errors writing exported records.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Writing to the destination failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialisation failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Pick a format from a file extension: `.json` is JSON, anything else
    /// is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Csv,
        }
    }
}

/// Sort records most recent day first.
///
/// The sort is stable, so legs of the same day keep their statement order.
pub fn sort_by_date_desc(records: &mut [JourneyRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Write records as CSV with a header row.
pub fn write_csv<W: Write>(records: &[JourneyRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_json<W: Write>(records: &[JourneyRecord], mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

/// Write records in the given format.
pub fn write_records<W: Write>(
    records: &[JourneyRecord],
    format: OutputFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Csv => write_csv(records, writer),
        OutputFormat::Json => write_json(records, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2016, 1, d).unwrap()
    }

    fn records() -> Vec<JourneyRecord> {
        vec![
            JourneyRecord::train(date(8), "Kentish Town", "Leicester Square"),
            JourneyRecord::train(date(9), "Kentish Town", "Bank"),
            JourneyRecord::single(date(30), "Bus Journey, Route 46"),
            JourneyRecord::train(date(9), "Monument", "Kent House"),
        ]
    }

    #[test]
    fn sort_most_recent_first_and_stable() {
        let mut records = records();
        sort_by_date_desc(&mut records);

        let order: Vec<(u32, &str)> = records
            .iter()
            .map(|r| (chrono::Datelike::day(&r.date), r.from.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (30, "Bus Journey, Route 46"),
                (9, "Kentish Town"),
                (9, "Monument"),
                (8, "Kentish Town"),
            ]
        );
    }

    #[test]
    fn csv_output() {
        let mut out = Vec::new();
        write_csv(&records()[1..3], &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "date,from,to,is_train\n\
             2016-01-09,Kentish Town,Bank,true\n\
             2016-01-30,\"Bus Journey, Route 46\",,false\n"
        );
    }

    #[test]
    fn json_output() {
        let mut out = Vec::new();
        write_json(&records()[2..3], &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "date": "2016-01-30",
                "from": "Bus Journey, Route 46",
                "to": "",
                "is_train": false,
            }])
        );
    }

    #[test]
    fn empty_json_is_empty_array() {
        let mut out = Vec::new();
        write_records(&[], OutputFormat::Json, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journeys.csv");
        let file = std::fs::File::create(&path).unwrap();

        write_records(&records(), OutputFormat::from_path(&path), file).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 5);
        assert!(contents.starts_with("date,from,to,is_train"));
    }

    #[test]
    fn format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.json")),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.JSON")),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.csv")),
            OutputFormat::Csv
        );
        assert_eq!(OutputFormat::from_path(Path::new("-")), OutputFormat::Csv);
    }
}
