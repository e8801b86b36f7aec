use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use super::error::LoadError;
use super::model::{
    Dataset, Record, COL_ACTIVE, COL_EMPLOYED, COL_REGION, COL_UNEMPLOYED, COL_YEAR,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the labor-statistics table from a CSV file.
///
/// Nationwide `계` rows are dropped and the unemployment rate is derived
/// for every remaining row. This always reads the file; go through
/// [`super::registry`] to get the memoized dataset.
pub fn load(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_from_reader(file)?;
    log::info!(
        "Loaded {} regional rows from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV content with the five source columns.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns = Columns::locate(reader.headers()?)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        let record = columns.parse(&row, line)?;
        if record.is_aggregate() {
            dropped += 1;
            continue;
        }
        records.push(record);
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} aggregate rows");
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Header handling
// ---------------------------------------------------------------------------

/// Positions of the source columns within a row.
struct Columns {
    year: usize,
    region: usize,
    active: usize,
    employed: usize,
    unemployed: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, LoadError> {
        let map: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header(name), idx))
            .collect();

        let find = |column: &'static str| {
            map.get(column)
                .copied()
                .ok_or(LoadError::MissingColumn { column })
        };

        Ok(Columns {
            year: find(COL_YEAR)?,
            region: find(COL_REGION)?,
            active: find(COL_ACTIVE)?,
            employed: find(COL_EMPLOYED)?,
            unemployed: find(COL_UNEMPLOYED)?,
        })
    }

    fn parse(&self, row: &StringRecord, line: usize) -> Result<Record, LoadError> {
        let year = parse_year(field(row, self.year), line)?;
        let region = field(row, self.region).trim();
        let active = parse_count(field(row, self.active), line, COL_ACTIVE)?;
        let employed = parse_count(field(row, self.employed), line, COL_EMPLOYED)?;
        let unemployed = parse_count(field(row, self.unemployed), line, COL_UNEMPLOYED)?;

        Ok(Record::new(year, region, active, employed, unemployed))
    }
}

/// Spreadsheet tools may prefix the first header with a UTF-8 BOM.
fn normalize_header(name: &str) -> &str {
    name.trim_start_matches('\u{feff}').trim()
}

fn field(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

fn parse_year(raw: &str, line: usize) -> Result<i32, LoadError> {
    raw.trim().parse::<i32>().map_err(|_| LoadError::InvalidValue {
        row: line,
        column: COL_YEAR,
        value: raw.to_string(),
    })
}

/// Counts are thousands of persons: finite and non-negative.
fn parse_count(raw: &str, line: usize, column: &'static str) -> Result<f64, LoadError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(LoadError::InvalidValue {
            row: line,
            column,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "년도,지역,경제활동인구 (천명),취업자 (천명),실업자 (천명)\n";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn drops_aggregate_rows_and_derives_rate() {
        let file = write_csv("2023,서울특별시,6000,5700,300\n2023,계,30000,28500,1500\n");
        let ds = load(file.path()).unwrap();

        assert_eq!(ds.len(), 1);
        let r = &ds.records[0];
        assert_eq!(r.region, "서울특별시");
        assert!((r.unemployment_rate - 5.0).abs() < 1e-9);
        assert!(ds.records.iter().all(|r| !r.is_aggregate()));
        assert!(!ds.regions.contains("계"));
    }

    #[test]
    fn zero_denominator_does_not_fail() {
        let file = write_csv("2022,세종특별자치시,0,0,4\n");
        let ds = load(file.path()).unwrap();
        assert_eq!(ds.records[0].unemployment_rate, 0.0);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn tolerates_bom_and_column_order() {
        let text = "\u{feff}지역,실업자 (천명),년도,취업자 (천명),경제활동인구 (천명),비고\n\
                    경기도,200,2021,7000,7200,x\n";
        let ds = load_from_reader(text.as_bytes()).unwrap();
        let r = &ds.records[0];
        assert_eq!((r.year, r.region.as_str()), (2021, "경기도"));
        assert_eq!(r.economically_active, 7200.0);
        assert_eq!(r.unemployed, 200.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let text = "년도,지역,취업자 (천명),실업자 (천명)\n2021,경기도,1,1\n";
        let err = load_from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn { column } if column == COL_ACTIVE
        ));
    }

    #[test]
    fn malformed_number_is_a_load_failure() {
        let text = format!("{HEADER}2021,경기도,abc,1,1\n");
        match load_from_reader(text.as_bytes()).unwrap_err() {
            LoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, COL_ACTIVE);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn negative_count_is_rejected() {
        let text = format!("{HEADER}2021,경기도,10,12,-2\n");
        assert!(matches!(
            load_from_reader(text.as_bytes()),
            Err(LoadError::InvalidValue { column, .. }) if column == COL_UNEMPLOYED
        ));
    }

    #[test]
    fn fractional_year_is_rejected() {
        let text = format!("{HEADER}2021.5,경기도,10,9,1\n");
        assert!(matches!(
            load_from_reader(text.as_bytes()),
            Err(LoadError::InvalidValue { column, .. }) if column == COL_YEAR
        ));
    }
}
