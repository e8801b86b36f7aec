use std::collections::BTreeSet;

use super::error::ViewError;
use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Selection: which years and regions the sidebar has ticked
// ---------------------------------------------------------------------------

/// Regions selected when the dashboard opens.
pub const DEFAULT_REGIONS: [&str; 4] = ["서울특별시", "경기도", "부산광역시", "인천광역시"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub regions: BTreeSet<String>,
}

impl Selection {
    pub fn new(
        years: impl IntoIterator<Item = i32>,
        regions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Selection {
            years: years.into_iter().collect(),
            regions: regions.into_iter().map(Into::into).collect(),
        }
    }

    /// Most recent year plus whichever preset regions the dataset has.
    pub fn defaults<S: AsRef<str>>(dataset: &Dataset, preset_regions: &[S]) -> Self {
        Selection {
            years: dataset.latest_year().into_iter().collect(),
            regions: preset_regions
                .iter()
                .filter_map(|r| {
                    let r: &str = r.as_ref();
                    dataset.regions.contains(r).then(|| r.to_string())
                })
                .collect(),
        }
    }

    /// An empty year or region set means nothing is selected.
    pub fn ensure_non_empty(&self) -> Result<(), ViewError> {
        if self.years.is_empty() || self.regions.is_empty() {
            return Err(ViewError::EmptySelection);
        }
        Ok(())
    }

    /// Trend charts need at least two selected years.
    pub fn spans_multiple_years(&self) -> bool {
        self.years.len() > 1
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Records whose year and region are both selected, in dataset order.
pub fn filter(records: &[Record], years: &BTreeSet<i32>, regions: &BTreeSet<String>) -> Vec<Record> {
    records
        .iter()
        .filter(|r| years.contains(&r.year) && regions.contains(&r.region))
        .cloned()
        .collect()
}

/// [`filter`] over a whole dataset with a [`Selection`].
pub fn apply(dataset: &Dataset, selection: &Selection) -> Vec<Record> {
    filter(&dataset.records, &selection.years, &selection.regions)
}
