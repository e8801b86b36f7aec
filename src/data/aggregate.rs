use std::collections::{BTreeMap, BTreeSet};

use super::error::ViewError;
use super::model::Record;

// ---------------------------------------------------------------------------
// Pivots
// ---------------------------------------------------------------------------

/// Employed persons summed per (year, region).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearRegionPivot {
    pub years: BTreeSet<i32>,
    pub regions: BTreeSet<String>,
    cells: BTreeMap<(i32, String), f64>,
}

impl YearRegionPivot {
    fn from_records(records: &[Record]) -> Self {
        let mut pivot = YearRegionPivot::default();
        for r in records {
            pivot.years.insert(r.year);
            pivot.regions.insert(r.region.clone());
            *pivot
                .cells
                .entry((r.year, r.region.clone()))
                .or_insert(0.0) += r.employed;
        }
        pivot
    }

    /// `None` when no record exists for that pair.
    pub fn get(&self, year: i32, region: &str) -> Option<f64> {
        self.cells.get(&(year, region.to_string())).copied()
    }

    /// One column of the pivot: `(year, value)` points for a region.
    pub fn series(&self, region: &str) -> Vec<(i32, f64)> {
        self.years
            .iter()
            .filter_map(|&y| self.get(y, region).map(|v| (y, v)))
            .collect()
    }
}

/// Totals for the employed/unemployed bar chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmploymentRatio {
    pub employed: f64,
    pub unemployed: f64,
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_employed: f64,
    pub total_unemployed: f64,
    /// Plain mean of the per-record rates, not weighted by population.
    pub avg_unemployment_rate: f64,
    pub by_year_region: YearRegionPivot,
    pub employment_ratio: EmploymentRatio,
    /// Mean rate per region over all selected years.
    pub by_region_rate: BTreeMap<String, f64>,
}

/// Compute metrics and chart data for a working subset.
pub fn summarize(subset: &[Record]) -> Result<Summary, ViewError> {
    if subset.is_empty() {
        return Err(ViewError::EmptyResult);
    }

    let total_employed: f64 = subset.iter().map(|r| r.employed).sum();
    let total_unemployed: f64 = subset.iter().map(|r| r.unemployed).sum();
    let avg_unemployment_rate =
        subset.iter().map(|r| r.unemployment_rate).sum::<f64>() / subset.len() as f64;

    Ok(Summary {
        total_employed,
        total_unemployed,
        avg_unemployment_rate,
        by_year_region: YearRegionPivot::from_records(subset),
        employment_ratio: EmploymentRatio {
            employed: total_employed,
            unemployed: total_unemployed,
        },
        by_region_rate: mean_rate_by_region(subset),
    })
}

fn mean_rate_by_region(records: &[Record]) -> BTreeMap<String, f64> {
    let mut acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let (sum, n) = acc.entry(r.region.as_str()).or_insert((0.0, 0));
        *sum += r.unemployment_rate;
        *n += 1;
    }
    acc.into_iter()
        .map(|(region, (sum, n))| (region.to_string(), sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_subset_is_empty_result() {
        assert_eq!(summarize(&[]), Err(ViewError::EmptyResult));
    }

    #[test]
    fn mean_rate_is_unweighted() {
        // 10% of 1000 and 50% of 400: weighted would be 300/1400.
        let subset = vec![
            Record::new(2023, "경기도", 1000.0, 100.0, 100.0),
            Record::new(2023, "세종특별자치시", 400.0, 200.0, 200.0),
        ];
        let s = summarize(&subset).unwrap();

        assert!(close(s.total_employed, 300.0));
        assert!(close(s.total_unemployed, 300.0));
        assert!(close(s.avg_unemployment_rate, 30.0));
        assert!(!close(s.avg_unemployment_rate, 300.0 / 1400.0 * 100.0));
        assert_eq!(
            s.employment_ratio,
            EmploymentRatio {
                employed: 300.0,
                unemployed: 300.0
            }
        );
    }

    #[test]
    fn year_region_pivot_sums_duplicates() {
        let subset = vec![
            Record::new(2022, "서울특별시", 10.0, 5.0, 1.0),
            Record::new(2022, "서울특별시", 10.0, 7.0, 1.0),
            Record::new(2023, "서울특별시", 10.0, 9.0, 1.0),
            Record::new(2023, "경기도", 10.0, 4.0, 1.0),
        ];
        let pivot = summarize(&subset).unwrap().by_year_region;

        assert_eq!(pivot.get(2022, "서울특별시"), Some(12.0));
        assert_eq!(pivot.get(2022, "경기도"), None);
        assert_eq!(pivot.series("서울특별시"), vec![(2022, 12.0), (2023, 9.0)]);
        assert_eq!(pivot.series("경기도"), vec![(2023, 4.0)]);
        assert_eq!(pivot.years.len(), 2);
        assert_eq!(pivot.regions.len(), 2);
    }

    #[test]
    fn region_rate_averages_across_years() {
        let subset = vec![
            Record::new(2022, "부산광역시", 100.0, 96.0, 4.0),
            Record::new(2023, "부산광역시", 100.0, 94.0, 6.0),
            Record::new(2023, "인천광역시", 200.0, 190.0, 10.0),
        ];
        let rates = summarize(&subset).unwrap().by_region_rate;

        assert!(close(rates["부산광역시"], 5.0));
        assert!(close(rates["인천광역시"], 5.0));
        assert_eq!(rates.len(), 2);
    }

    #[test]
    fn zero_active_rows_do_not_produce_nan() {
        let subset = vec![Record::new(2023, "경기도", 0.0, 0.0, 0.0)];
        let s = summarize(&subset).unwrap();
        assert_eq!(s.avg_unemployment_rate, 0.0);
        assert!(s.by_region_rate.values().all(|v| v.is_finite()));
    }
}
