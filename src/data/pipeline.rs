use super::aggregate::{summarize, Summary, YearRegionPivot};
use super::error::ViewError;
use super::filter::{self, Selection};
use super::model::{Dataset, Record};

/// What the trend slot should show.
#[derive(Debug, Clone, PartialEq)]
pub enum Trend {
    Series(YearRegionPivot),
    /// A single selected year has no trend to draw.
    NeedsMultipleYears,
}

/// Everything the dashboard renders for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub subset: Vec<Record>,
    pub summary: Summary,
    pub trend: Trend,
}

/// Run filter and aggregation for the current selection.
///
/// An empty selection stops before filtering; a selection that matches
/// nothing stops before aggregation results are produced.
pub fn build_view(dataset: &Dataset, selection: &Selection) -> Result<DashboardView, ViewError> {
    selection.ensure_non_empty()?;

    let subset = filter::apply(dataset, selection);
    let summary = summarize(&subset)?;

    let trend = if selection.spans_multiple_years() {
        Trend::Series(summary.by_year_region.clone())
    } else {
        Trend::NeedsMultipleYears
    };

    log::debug!(
        "View rebuilt: {} years, {} regions, {} rows",
        selection.years.len(),
        selection.regions.len(),
        subset.len()
    );

    Ok(DashboardView {
        subset,
        summary,
        trend,
    })
}
