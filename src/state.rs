use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::error::ViewError;
use crate::data::export::export;
use crate::data::filter::Selection;
use crate::data::model::Dataset;
use crate::data::pipeline::{build_view, DashboardView};
use crate::data::registry::{load_cached, registry};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None when loading failed).
    pub dataset: Option<Arc<Dataset>>,

    /// Years and regions ticked in the sidebar.
    pub selection: Selection,

    /// Result of the last pipeline run for `selection`.
    pub view: Option<Result<DashboardView, ViewError>>,

    /// Colour per region.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the configured source file and build the initial view.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = Self {
            config,
            dataset: None,
            selection: Selection::default(),
            view: None,
            color_map: None,
            status_message: None,
        };

        match load_cached(&state.config.source_path) {
            Ok(dataset) => {
                log::debug!("{} dataset(s) cached", registry().len());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load data: {e}");
                state.status_message = Some(e.to_string());
            }
        }
        state
    }

    /// Ingest a dataset, apply the default selection and colours.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = Selection::defaults(&dataset, &self.config.preset_regions);
        self.color_map = Some(ColorMap::new(&dataset.regions));
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute the view after a selection change.
    pub fn refresh(&mut self) {
        self.view = self
            .dataset
            .as_deref()
            .map(|ds| build_view(ds, &self.selection));
    }

    pub fn toggle_year(&mut self, year: i32) {
        if !self.selection.years.remove(&year) {
            self.selection.years.insert(year);
        }
        self.refresh();
    }

    pub fn toggle_region(&mut self, region: &str) {
        if !self.selection.regions.remove(region) {
            self.selection.regions.insert(region.to_string());
        }
        self.refresh();
    }

    pub fn select_all_years(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.years = ds.years.clone();
            self.refresh();
        }
    }

    pub fn select_all_regions(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.regions = ds.regions.clone();
            self.refresh();
        }
    }

    pub fn clear_years(&mut self) {
        self.selection.years.clear();
        self.refresh();
    }

    pub fn clear_regions(&mut self) {
        self.selection.regions.clear();
        self.refresh();
    }

    /// The current view when the pipeline produced one.
    pub fn current_view(&self) -> Option<&DashboardView> {
        self.view.as_ref()?.as_ref().ok()
    }

    /// Write the exported working subset to `path`.
    pub fn save_export(&self, path: &Path) -> Result<usize> {
        let view = self
            .current_view()
            .context("nothing to export for the current selection")?;
        let bytes = export(&view.subset).context("serializing filtered rows")?;
        std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported {} rows to {}", view.subset.len(), path.display());
        Ok(view.subset.len())
    }
}
