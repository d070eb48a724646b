use crate::domain::forecast::{HistogramBin, LocationType, ResultStore};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::forecast_view_model::{ForecastViewModel, LocationShare};
use eframe::egui;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

/// Style of the per-region totals chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

impl ChartKind {
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
        }
    }
}

pub fn location_color(location: LocationType) -> egui::Color32 {
    match location {
        LocationType::Urban => DesignSystem::URBAN,
        LocationType::Suburban => DesignSystem::SUBURBAN,
        LocationType::Rural => DesignSystem::RURAL,
    }
}

/// Total cash per region as bars or a line
pub fn render_totals_chart(ui: &mut egui::Ui, store: &ResultStore, kind: ChartKind) {
    let points = ForecastViewModel::total_points(store);
    let names: Vec<&str> = store.regions().collect();

    Plot::new("totals_plot")
        .height(220.0)
        .show_grid([false, true])
        .allow_scroll(false)
        .show(ui, |plot_ui| match kind {
            ChartKind::Bar => {
                let bars = points
                    .iter()
                    .zip(&names)
                    .map(|(p, name)| Bar::new(p[0], p[1]).name(*name).width(0.6))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new("ATM Total Cash by State", bars).color(DesignSystem::TOTALS_BAR),
                );
            }
            ChartKind::Line => {
                plot_ui.line(
                    Line::new("ATM Total Cash by State", PlotPoints::from(points.clone()))
                        .color(DesignSystem::TOTALS_LINE)
                        .width(2.0),
                );
            }
        });
}

/// Renders the location split as a segmented donut with a legend
pub fn render_location_donut(ui: &mut egui::Ui, shares: &[LocationShare], size: f32) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
        let center = rect.center();
        let radius = size / 2.0 - 6.0;

        // Background track
        ui.painter().circle_stroke(
            center,
            radius,
            egui::Stroke::new(10.0, DesignSystem::BORDER_SUBTLE),
        );

        use egui::epaint::{PathShape, Stroke};
        use std::f32::consts::PI;

        let mut start_angle = -PI / 2.0; // Top
        for share in shares.iter().filter(|s| s.fraction > 0.0) {
            let sweep_angle = 2.0 * PI * share.fraction;
            let steps = ((64.0 * share.fraction).ceil() as usize).max(2);

            let points: Vec<egui::Pos2> = (0..=steps)
                .map(|i| {
                    let angle = start_angle + (i as f32 / steps as f32) * sweep_angle;
                    egui::pos2(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    )
                })
                .collect();

            ui.painter().add(PathShape::line(
                points,
                Stroke::new(10.0, location_color(share.location)),
            ));
            start_angle += sweep_angle;
        }

        ui.vertical(|ui| {
            for share in shares {
                ui.label(
                    egui::RichText::new(format!(
                        "● {}  {} ({:.1}%)",
                        share.location,
                        share.count,
                        share.fraction * 100.0
                    ))
                    .color(location_color(share.location)),
                );
            }
        });
    });
}

/// Distribution of all raw predictions
pub fn render_histogram(ui: &mut egui::Ui, bins: &[HistogramBin]) {
    if bins.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("No data to show")
                    .size(14.0)
                    .italics()
                    .color(DesignSystem::TEXT_MUTED),
            );
        });
        return;
    }

    let bars = bins
        .iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width(b.width()))
        .collect();

    Plot::new("prediction_histogram")
        .height(220.0)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new("Cash to Load (INR)", bars).color(DesignSystem::HISTOGRAM),
            );
        });
}
