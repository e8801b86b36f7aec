use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::ColorMap;
use crate::data::aggregate::EmploymentRatio;
use crate::data::pipeline::Trend;

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Employed persons per year, one line per region
// ---------------------------------------------------------------------------

pub fn trend_chart(ui: &mut Ui, trend: &Trend, color_map: Option<&ColorMap>) {
    ui.heading("📈 연도별 취업자 수 추이");

    let pivot = match trend {
        Trend::Series(pivot) => pivot,
        Trend::NeedsMultipleYears => {
            ui.label("추이 비교를 위해 2개 이상의 연도를 선택하세요.");
            return;
        }
    };

    Plot::new("trend_plot")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("년도")
        .y_axis_label("취업자 (천명)")
        .x_axis_formatter(|mark, _range| year_label(mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for region in &pivot.regions {
                let points: PlotPoints = pivot
                    .series(region)
                    .into_iter()
                    .map(|(year, employed)| [year as f64, employed])
                    .collect();

                let color = color_map
                    .map(|cm| cm.color_for(region))
                    .unwrap_or(Color32::LIGHT_BLUE);

                plot_ui.line(Line::new(points).name(region).color(color).width(2.0));
            }
        });
}

/// Only whole years get a tick label.
fn year_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// Employed vs unemployed totals
// ---------------------------------------------------------------------------

pub fn ratio_chart(ui: &mut Ui, ratio: &EmploymentRatio) {
    ui.heading("📊 취업/실업 비율 (전체 합산)");

    let bars = vec![
        Bar::new(0.0, ratio.employed)
            .name("취업자")
            .fill(Color32::from_rgb(70, 130, 200))
            .width(0.6),
        Bar::new(1.0, ratio.unemployed)
            .name("실업자")
            .fill(Color32::from_rgb(220, 90, 80))
            .width(0.6),
    ];

    Plot::new("ratio_plot")
        .height(CHART_HEIGHT)
        .x_axis_formatter(|mark, _range| category_label(mark.value, &["취업자", "실업자"]))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Mean unemployment rate per region
// ---------------------------------------------------------------------------

pub fn region_rate_chart(
    ui: &mut Ui,
    by_region_rate: &BTreeMap<String, f64>,
    years_label: &str,
    color_map: Option<&ColorMap>,
) {
    ui.heading(format!("🏢 지역별 실업률 비교 ({years_label}년)"));

    let labels: Vec<&str> = by_region_rate.keys().map(String::as_str).collect();
    let bars: Vec<Bar> = by_region_rate
        .iter()
        .enumerate()
        .map(|(i, (region, rate))| {
            let fill = color_map
                .map(|cm| cm.color_for(region))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *rate)
                .name(format!("{region} {rate:.2}%"))
                .fill(fill)
                .width(0.7)
        })
        .collect();

    Plot::new("region_rate_plot")
        .height(CHART_HEIGHT)
        .y_axis_label("실업률 (%)")
        .x_axis_formatter(move |mark, _range| category_label(mark.value, &labels))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Tick label for a bar placed at an integer position.
fn category_label(value: f64, labels: &[&str]) -> String {
    if value < 0.0 || value.fract() != 0.0 {
        return String::new();
    }
    labels
        .get(value as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_bar_positions() {
        let labels = ["경기도", "서울특별시"];
        assert_eq!(category_label(1.0, &labels), "서울특별시");
        assert_eq!(category_label(0.5, &labels), "");
        assert_eq!(category_label(-1.0, &labels), "");
        assert_eq!(category_label(5.0, &labels), "");
    }

    #[test]
    fn year_ticks_are_whole_years() {
        assert_eq!(year_label(2023.0), "2023");
        assert_eq!(year_label(2022.5), "");
    }
}
