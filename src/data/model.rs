use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Column labels of the source table
// ---------------------------------------------------------------------------

pub const COL_YEAR: &str = "년도";
pub const COL_REGION: &str = "지역";
pub const COL_ACTIVE: &str = "경제활동인구 (천명)";
pub const COL_EMPLOYED: &str = "취업자 (천명)";
pub const COL_UNEMPLOYED: &str = "실업자 (천명)";
/// Derived column, only present in exported files.
pub const COL_RATE: &str = "실업률 (%)";

/// Region value of the nationwide "total" rows.
pub const AGGREGATE_REGION: &str = "계";

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One (year, region) observation. Counts are in thousands of persons.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: i32,
    pub region: String,
    pub economically_active: f64,
    pub employed: f64,
    pub unemployed: f64,
    /// Derived at load time, see [`unemployment_rate`].
    pub unemployment_rate: f64,
}

impl Record {
    /// Build a record and derive its unemployment rate.
    pub fn new(
        year: i32,
        region: impl Into<String>,
        economically_active: f64,
        employed: f64,
        unemployed: f64,
    ) -> Self {
        Record {
            year,
            region: region.into(),
            economically_active,
            employed,
            unemployed,
            unemployment_rate: unemployment_rate(unemployed, economically_active),
        }
    }

    /// Whether this is a nationwide total row rather than a region.
    pub fn is_aggregate(&self) -> bool {
        self.region == AGGREGATE_REGION
    }
}

/// `unemployed / active * 100`, or `0` when nobody is economically active.
pub fn unemployment_rate(unemployed: f64, economically_active: f64) -> f64 {
    if economically_active > 0.0 {
        unemployed / economically_active * 100.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table with pre-computed option lists for the sidebar.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Distinct years, ascending.
    pub years: BTreeSet<i32>,
    /// Distinct regions, sorted.
    pub regions: BTreeSet<String>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let years = records.iter().map(|r| r.year).collect();
        let regions = records.iter().map(|r| r.region.clone()).collect();
        Dataset {
            records,
            years,
            regions,
        }
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rate_is_percentage_of_active() {
        let r = Record::new(2023, "서울특별시", 6000.0, 5700.0, 300.0);
        assert!((r.unemployment_rate - 5.0).abs() < 1e-9);
    }

    #[test]
    fn zero_active_gives_zero_rate() {
        assert_eq!(unemployment_rate(12.0, 0.0), 0.0);
        assert_eq!(unemployment_rate(0.0, 0.0), 0.0);
    }

    #[test]
    fn dataset_indexes_years_and_regions() {
        let ds = Dataset::from_records(vec![
            Record::new(2021, "경기도", 10.0, 9.0, 1.0),
            Record::new(2023, "부산광역시", 10.0, 9.0, 1.0),
            Record::new(2022, "경기도", 10.0, 9.0, 1.0),
        ]);
        assert_eq!(ds.years.iter().copied().collect::<Vec<_>>(), vec![2021, 2022, 2023]);
        assert_eq!(ds.regions.len(), 2);
        assert_eq!(ds.latest_year(), Some(2023));
        assert_eq!(Dataset::default().latest_year(), None);
    }

    proptest! {
        #[test]
        fn rate_bounded_for_consistent_rows(
            employed in 0u32..100_000,
            unemployed in 0u32..100_000,
            slack in 0u32..1_000,
        ) {
            let active = (employed + unemployed + slack) as f64;
            let rate = unemployment_rate(unemployed as f64, active);
            prop_assert!((0.0..=100.0).contains(&rate));
            prop_assert_eq!(rate == 0.0, active == 0.0 || unemployed == 0);
        }

        #[test]
        fn zero_active_always_zero(unemployed in 0.0f64..1e6) {
            prop_assert_eq!(unemployment_rate(unemployed, 0.0), 0.0);
        }
    }
}
