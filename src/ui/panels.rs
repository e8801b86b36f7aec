use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::Summary;
use crate::data::export::{format_rate, EXPORT_FILE_NAME, EXPORT_MIME};
use crate::data::model::{
    Record, COL_ACTIVE, COL_EMPLOYED, COL_RATE, COL_REGION, COL_UNEMPLOYED, COL_YEAR,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔎 데이터 필터");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds.clone(),
        None => {
            ui.label("데이터가 없습니다.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Years, most recent first ----
            let header = format!(
                "년도 선택  ({}/{})",
                state.selection.years.len(),
                dataset.years.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("years")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("전체").clicked() {
                            state.select_all_years();
                        }
                        if ui.small_button("해제").clicked() {
                            state.clear_years();
                        }
                    });
                    for &year in dataset.years.iter().rev() {
                        let mut checked = state.selection.years.contains(&year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(year);
                        }
                    }
                });

            ui.separator();

            // ---- Regions ----
            let header = format!(
                "지역 선택  ({}/{})",
                state.selection.regions.len(),
                dataset.regions.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("regions")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("전체").clicked() {
                            state.select_all_regions();
                        }
                        if ui.small_button("해제").clicked() {
                            state.clear_regions();
                        }
                    });
                    for region in &dataset.regions {
                        let mut checked = state.selection.regions.contains(region);
                        let mut text = RichText::new(region);
                        if let Some(cm) = &state.color_map {
                            text = text.color(cm.color_for(region));
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_region(region);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("파일", |ui: &mut Ui| {
            let enabled = state.current_view().is_some();
            if ui
                .add_enabled(enabled, egui::Button::new("📥 CSV로 다운로드…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state.current_view().map_or(0, |v| v.subset.len());
            ui.label(format!("{} rows loaded, {} selected", ds.len(), visible));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// The three headline numbers.
pub fn metrics(ui: &mut Ui, summary: &Summary) {
    ui.heading("📌 요약 (선택된 기간 및 지역)");
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "총 취업자 (천명)", format_thousands(summary.total_employed));
        metric(&mut cols[1], "총 실업자 (천명)", format_thousands(summary.total_unemployed));
        metric(
            &mut cols[2],
            "평균 실업률 (%)",
            format_rate(summary.avg_unemployment_rate),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).size(26.0).strong());
    });
}

/// `1234567.4` → `1,234,567`.
pub fn format_thousands(v: f64) -> String {
    let rounded = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if v < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}

// ---------------------------------------------------------------------------
// Detail table with download
// ---------------------------------------------------------------------------

/// Collapsible table of the working subset. Returns true when the user
/// asked to download it.
pub fn detail_table(ui: &mut Ui, subset: &[Record]) -> bool {
    let mut download = false;

    egui::CollapsingHeader::new("📄 상세 데이터 보기")
        .id_salt("detail_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.button("📥 CSV로 다운로드").clicked() {
                download = true;
            }
            ui.add_space(4.0);

            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .column(Column::auto())
                .column(Column::auto().at_least(120.0))
                .columns(Column::remainder(), 4)
                .header(20.0, |mut header| {
                    for title in [COL_YEAR, COL_REGION, COL_ACTIVE, COL_EMPLOYED, COL_UNEMPLOYED, COL_RATE] {
                        header.col(|ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, subset.len(), |mut row| {
                        let r = &subset[row.index()];
                        row.col(|ui| {
                            ui.label(r.year.to_string());
                        });
                        row.col(|ui| {
                            ui.label(&r.region);
                        });
                        for value in [r.economically_active, r.employed, r.unemployed] {
                            row.col(|ui| {
                                ui.label(format_thousands(value));
                            });
                        }
                        row.col(|ui| {
                            ui.label(format_rate(r.unemployment_rate));
                        });
                    });
                });
        });

    download
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("필터링된 데이터 저장")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        log::debug!("Saving {EXPORT_MIME} export to {}", path.display());
        match state.save_export(&path) {
            Ok(rows) => {
                state.status_message = None;
                log::info!("Saved {rows} rows");
            }
            Err(e) => {
                log::error!("Failed to save export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::format_thousands;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(28_512_345.6), "28,512,346");
        assert_eq!(format_thousands(-1234.0), "-1,234");
    }
}
