use crate::application::forecast::{ForecastPipeline, ForecastRequest, parse_atm_count};
use crate::domain::errors::ForecastError;
use crate::domain::forecast::{LocationFilter, REGIONS, ResultStore};
use crate::infrastructure::export::{CsvExporter, default_export_file_name};
use crate::interfaces::components::charts::{
    ChartKind, render_histogram, render_location_donut, render_totals_chart,
};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::ForecastViewModel;
use chrono::Utc;
use crossbeam_channel::Receiver;
use eframe::egui;
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::warn;

const MAX_LOG_LINES: usize = 200;
const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Banner shown above the results
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Warning(String),
    Error(String),
}

impl StatusMessage {
    fn color(&self) -> egui::Color32 {
        match self {
            StatusMessage::Info(_) => DesignSystem::INFO,
            StatusMessage::Warning(_) => DesignSystem::WARNING,
            StatusMessage::Error(_) => DesignSystem::DANGER,
        }
    }

    fn text(&self) -> &str {
        match self {
            StatusMessage::Info(t) | StatusMessage::Warning(t) | StatusMessage::Error(t) => {
                t.as_str()
            }
        }
    }
}

pub struct ForecastDashboard {
    pipeline: ForecastPipeline,
    store: ResultStore,
    exporter: CsvExporter,
    export_dir: PathBuf,

    // Form state
    pub selected_regions: Vec<bool>,
    pub atm_count_text: String,
    pub day_of_week: u8,
    pub is_holiday: bool,
    pub location_filter: LocationFilter,
    pub chart_kind: ChartKind,

    pub status: Option<StatusMessage>,
    log_rx: Option<Receiver<String>>,
    logs: VecDeque<String>,
}

impl ForecastDashboard {
    pub fn new(pipeline: ForecastPipeline, default_atm_count: usize, export_dir: PathBuf) -> Self {
        Self {
            pipeline,
            store: ResultStore::new(),
            exporter: CsvExporter::new(),
            export_dir,
            selected_regions: vec![false; REGIONS.len()],
            atm_count_text: default_atm_count.to_string(),
            day_of_week: 0,
            is_holiday: false,
            location_filter: LocationFilter::All,
            chart_kind: ChartKind::Bar,
            status: None,
            log_rx: None,
            logs: VecDeque::new(),
        }
    }

    pub fn with_log_receiver(mut self, log_rx: Receiver<String>) -> Self {
        self.log_rx = Some(log_rx);
        self
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn select_region(&mut self, name: &str, selected: bool) {
        if let Some(i) = REGIONS.iter().position(|r| *r == name) {
            self.selected_regions[i] = selected;
        }
    }

    fn selected_region_names(&self) -> Vec<String> {
        REGIONS
            .iter()
            .zip(&self.selected_regions)
            .filter(|(_, selected)| **selected)
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Predict button handler
    pub fn on_predict(&mut self) {
        let regions = self.selected_region_names();
        if regions.is_empty() {
            self.status = Some(StatusMessage::Warning(
                "No state selected: please select one or more states.".to_string(),
            ));
            return;
        }

        let count = match parse_atm_count(&self.atm_count_text) {
            Ok(n) => n,
            Err(_) => {
                self.status = Some(StatusMessage::Error(
                    "Invalid input: please enter a positive integer for ATMs per state."
                        .to_string(),
                ));
                return;
            }
        };

        let request = ForecastRequest::new(regions, count)
            .with_day(self.day_of_week)
            .with_holiday(self.is_holiday)
            .with_location_filter(self.location_filter);

        self.status = match self.pipeline.run(&request, &mut self.store) {
            Ok(_) => None,
            Err(e) => Some(StatusMessage::Error(e.to_string())),
        };
    }

    /// Export button handler; returns the written path on success
    pub fn on_export(&mut self) -> Option<PathBuf> {
        let path = self.export_dir.join(default_export_file_name(Utc::now()));
        match self.exporter.export_to_path(&self.store, &path) {
            Ok(()) => {
                self.status = Some(StatusMessage::Info(format!(
                    "Data exported to: {}",
                    path.display()
                )));
                Some(path)
            }
            Err(ForecastError::EmptyStore) => {
                self.status = Some(StatusMessage::Info(
                    "No data to export. Please run prediction first.".to_string(),
                ));
                None
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.status = Some(StatusMessage::Error(e.to_string()));
                None
            }
        }
    }

    fn drain_logs(&mut self) {
        if let Some(rx) = &self.log_rx {
            for line in rx.try_iter() {
                self.logs.push_back(line.trim_end().to_string());
            }
            while self.logs.len() > MAX_LOG_LINES {
                self.logs.pop_front();
            }
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Forecast Inputs");
        ui.add_space(DesignSystem::SPACING_SMALL);

        ui.label("Select States:");
        egui::ScrollArea::vertical()
            .id_salt("regions_scroll")
            .max_height(220.0)
            .show(ui, |ui| {
                for (name, selected) in REGIONS.iter().zip(self.selected_regions.iter_mut()) {
                    ui.checkbox(selected, *name);
                }
            });

        ui.add_space(DesignSystem::SPACING_SMALL);
        egui::Grid::new("controls_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("ATMs per State:");
                ui.add(egui::TextEdit::singleline(&mut self.atm_count_text).desired_width(70.0));
                ui.end_row();

                ui.label("Day of Week:");
                egui::ComboBox::from_id_salt("day_combo")
                    .selected_text(format!(
                        "{} ({})",
                        self.day_of_week, DAY_NAMES[self.day_of_week as usize % 7]
                    ))
                    .show_ui(ui, |ui| {
                        for (day, name) in DAY_NAMES.iter().enumerate() {
                            ui.selectable_value(
                                &mut self.day_of_week,
                                day as u8,
                                format!("{} ({})", day, name),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Holiday:");
                ui.checkbox(&mut self.is_holiday, "");
                ui.end_row();

                ui.label("Location Type:");
                egui::ComboBox::from_id_salt("location_combo")
                    .selected_text(self.location_filter.to_string())
                    .show_ui(ui, |ui| {
                        for filter in LocationFilter::CHOICES {
                            ui.selectable_value(
                                &mut self.location_filter,
                                filter,
                                filter.to_string(),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Chart Type:");
                egui::ComboBox::from_id_salt("chart_combo")
                    .selected_text(self.chart_kind.label())
                    .show_ui(ui, |ui| {
                        for kind in [ChartKind::Bar, ChartKind::Line] {
                            ui.selectable_value(&mut self.chart_kind, kind, kind.label());
                        }
                    });
                ui.end_row();
            });

        ui.add_space(DesignSystem::SPACING_MEDIUM);
        ui.horizontal(|ui| {
            if ui
                .add(egui::Button::new("Predict").fill(DesignSystem::ACCENT_PRIMARY))
                .clicked()
            {
                self.on_predict();
            }
            if ui
                .add(egui::Button::new("Export to CSV").fill(DesignSystem::BG_CARD_HOVER))
                .clicked()
            {
                self.on_export();
            }
        });
    }

    fn render_results(&self, ui: &mut egui::Ui) {
        if let Some(status) = &self.status {
            ui.label(egui::RichText::new(status.text()).color(status.color()).strong());
            ui.add_space(DesignSystem::SPACING_SMALL);
        }

        DesignSystem::card_frame().show(ui, |ui| {
            egui::Grid::new("results_grid")
                .striped(true)
                .min_col_width(110.0)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    for header in ["State", "Total", "Avg/ATM", "Max", "Min", "Std Dev"] {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for row in ForecastViewModel::result_rows(&self.store) {
                        ui.label(row.region);
                        ui.label(row.total);
                        ui.label(row.avg);
                        ui.label(row.max);
                        ui.label(row.min);
                        ui.label(row.std);
                        ui.end_row();
                    }
                });
        });

        if let Some(line) = ForecastViewModel::summary_line(&self.store) {
            ui.add_space(DesignSystem::SPACING_SMALL);
            ui.label(
                egui::RichText::new(line)
                    .size(15.0)
                    .strong()
                    .color(DesignSystem::TEXT_PRIMARY),
            );
        }

        ui.add_space(DesignSystem::SPACING_LARGE);
        ui.columns(2, |cols| {
            cols[0].label(egui::RichText::new("ATM Total Cash by State").strong());
            render_totals_chart(&mut cols[0], &self.store, self.chart_kind);

            cols[1].label(egui::RichText::new("ATM Location Distribution").strong());
            let shares = ForecastViewModel::location_shares(&self.store.location_totals());
            render_location_donut(&mut cols[1], &shares, 160.0);
        });

        ui.add_space(DesignSystem::SPACING_MEDIUM);
        ui.label(egui::RichText::new("Prediction Distribution").strong());
        render_histogram(ui, &ForecastViewModel::prediction_histogram(&self.store));
    }
}

impl eframe::App for ForecastDashboard {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_logs();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Indian State-wise ATM Cash Forecast");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("Model: {}", self.pipeline.predictor().name()))
                            .color(DesignSystem::TEXT_SECONDARY)
                            .small(),
                    );
                });
            });
        });

        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(110.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("log_scroll")
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in &self.logs {
                            let color = if line.contains("ERROR") {
                                DesignSystem::DANGER
                            } else if line.contains("WARN") {
                                DesignSystem::WARNING
                            } else {
                                DesignSystem::TEXT_MUTED
                            };
                            ui.label(egui::RichText::new(line).monospace().color(color));
                        }
                    });
            });

        egui::SidePanel::left("controls_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| self.render_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("results_scroll")
                .show(ui, |ui| self.render_results(ui));
        });

        // Keep the log panel fresh while idle
        ctx.request_repaint_after(std::time::Duration::from_millis(500));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ml::FallbackPredictor;
    use std::sync::Arc;

    fn dashboard(export_dir: PathBuf) -> ForecastDashboard {
        let predictor = Arc::new(FallbackPredictor::new(Some(3)).unwrap());
        let pipeline = ForecastPipeline::new(predictor).with_seed(Some(3));
        ForecastDashboard::new(pipeline, 5, export_dir)
    }

    #[test]
    fn test_predict_without_selection_warns() {
        let mut dash = dashboard(PathBuf::from("unused"));
        dash.on_predict();

        assert!(matches!(dash.status, Some(StatusMessage::Warning(_))));
        assert!(dash.store().is_empty());
    }

    #[test]
    fn test_predict_rejects_non_numeric_count() {
        let mut dash = dashboard(PathBuf::from("unused"));
        dash.select_region("Delhi", true);
        dash.atm_count_text = "abc".to_string();
        dash.on_predict();

        assert!(matches!(dash.status, Some(StatusMessage::Error(_))));
        assert!(dash.store().is_empty());
    }

    #[test]
    fn test_predict_then_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut dash = dashboard(dir.path().to_path_buf());

        assert!(dash.on_export().is_none());
        assert!(matches!(dash.status, Some(StatusMessage::Info(_))));

        dash.select_region("Delhi", true);
        dash.select_region("Bihar", true);
        dash.on_predict();
        assert!(dash.status.is_none());
        assert_eq!(dash.store().len(), 2);

        let path = dash.on_export().unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
