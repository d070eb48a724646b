use cashcast::application::forecast::ForecastPipeline;
use cashcast::application::ml::load_predictor;
use cashcast::config::{Config, log_filter_from_env};
use cashcast::interfaces::ForecastDashboard;
use cashcast::interfaces::design_system::DesignSystem;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::prelude::*;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

// Cloneable wrapper for MakeWriter
#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Create Log Channel
    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    // 2. Setup Logging (Stdout + UI)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false) // No color codes for UI text
        .with_target(false);

    tracing_subscriber::registry()
        .with(log_filter_from_env())
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Initializing ATM cash dashboard...");

    // 3. Config + model (loaded once, shared read-only for the process lifetime)
    let config = Config::from_env().context("Failed to load config")?;
    let predictor = load_predictor(&config.model, config.forecast.seed)
        .context("Cannot start without a model")?;
    let pipeline = ForecastPipeline::from_config(predictor, &config.forecast);

    let dashboard = ForecastDashboard::new(
        pipeline,
        config.forecast.default_atm_count,
        config.forecast.export_dir.clone(),
    )
    .with_log_receiver(log_rx);

    // 4. Run UI (Blocks Main Thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_title("ATM Cash Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "ATM Cash Dashboard",
        native_options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(DesignSystem::theme());
            Ok(Box::new(dashboard))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}
