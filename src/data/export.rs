use super::model::{
    Record, COL_ACTIVE, COL_EMPLOYED, COL_RATE, COL_REGION, COL_UNEMPLOYED, COL_YEAR,
};

/// Suggested name for the downloaded file.
pub const EXPORT_FILE_NAME: &str = "filtered_economic_data.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// Lets spreadsheet tools detect UTF-8 and show Hangul region names.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serialize the working subset as BOM-prefixed UTF-8 CSV.
///
/// All source columns are written followed by the derived rate, which is
/// rendered as a percentage with two decimals (`5.00%`).
pub fn export(subset: &[Record]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record([
        COL_YEAR,
        COL_REGION,
        COL_ACTIVE,
        COL_EMPLOYED,
        COL_UNEMPLOYED,
        COL_RATE,
    ])?;

    for r in subset {
        writer.write_record([
            r.year.to_string(),
            r.region.clone(),
            format_count(r.economically_active),
            format_count(r.employed),
            format_count(r.unemployed),
            format_rate(r.unemployment_rate),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Whole counts print without a fractional part.
fn format_count(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

pub fn format_rate(rate: f64) -> String {
    format!("{rate:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;

    fn subset() -> Vec<Record> {
        vec![
            Record::new(2023, "서울특별시", 6000.0, 5700.0, 300.0),
            Record::new(2023, "경상북도", 1500.5, 1450.25, 50.25),
            Record::new(2022, "세종특별자치시", 0.0, 0.0, 0.0),
        ]
    }

    /// Rate column of an export, in row order.
    fn rate_column(bytes: &[u8]) -> Vec<String> {
        let mut reader = csv::Reader::from_reader(bytes);
        let idx = reader
            .headers()
            .unwrap()
            .iter()
            .position(|h| h == COL_RATE)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap()[idx].to_string())
            .collect()
    }

    #[test]
    fn starts_with_bom_and_header() {
        let bytes = export(&subset()).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("년도,지역,경제활동인구 (천명),취업자 (천명),실업자 (천명),실업률 (%)")
        );
        assert_eq!(lines.next(), Some("2023,서울특별시,6000,5700,300,5.00%"));
    }

    #[test]
    fn rate_is_two_decimal_percentage() {
        let rates = rate_column(&export(&subset()).unwrap());
        assert_eq!(rates, vec!["5.00%", "3.35%", "0.00%"]);
    }

    #[test]
    fn export_reads_back_with_same_values() {
        let original = subset();
        let bytes = export(&original).unwrap();
        let parsed = load_from_reader(bytes.as_slice()).unwrap();

        assert_eq!(parsed.len(), original.len());
        for (a, b) in original.iter().zip(&parsed.records) {
            assert_eq!((a.year, &a.region), (b.year, &b.region));
            assert_eq!(a.economically_active, b.economically_active);
            assert_eq!(a.employed, b.employed);
            assert_eq!(a.unemployed, b.unemployed);
        }

        for (r, text) in original.iter().zip(rate_column(&bytes)) {
            let shown: f64 = text.trim_end_matches('%').parse().unwrap();
            assert!((shown - r.unemployment_rate).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn empty_subset_exports_header_only() {
        let bytes = export(&[]).unwrap();
        assert!(rate_column(&bytes).is_empty());
    }

    #[test]
    fn counts_keep_fractions_only_when_present() {
        assert_eq!(format_count(5700.0), "5700");
        assert_eq!(format_count(1450.25), "1450.25");
        assert_eq!(format_rate(33.333), "33.33%");
    }
}
