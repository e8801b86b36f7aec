use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| dashboard(ui, &mut self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("🚀 경제활동인구 동향 대시보드").size(28.0));
    ui.label("사이드바에서 년도와 지역을 선택하여 데이터를 실시간으로 탐색하세요.");
    ui.add_space(8.0);

    let view = match &state.view {
        Some(Ok(view)) => view,
        Some(Err(e)) => {
            ui.label(RichText::new(format!("⚠ {e}")).color(Color32::from_rgb(230, 160, 30)));
            return;
        }
        // Load failed; the top bar already shows why.
        None => return,
    };

    panels::metrics(ui, &view.summary);
    ui.separator();

    let colors = state.color_map.as_ref();
    ui.columns(2, |cols: &mut [Ui]| {
        plot::trend_chart(&mut cols[0], &view.trend, colors);
        plot::ratio_chart(&mut cols[1], &view.summary.employment_ratio);
    });

    let years_label = state
        .selection
        .years
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    plot::region_rate_chart(ui, &view.summary.by_region_rate, &years_label, colors);

    ui.add_space(8.0);
    if panels::detail_table(ui, &view.subset) {
        panels::save_file_dialog(state);
    }
}
