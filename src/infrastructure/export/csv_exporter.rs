use crate::domain::errors::{ForecastError, ForecastResult};
use crate::domain::forecast::ResultStore;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Export columns, in file order
pub const EXPORT_HEADERS: [&str; 9] = [
    "State",
    "Total Cash",
    "Avg/ATM",
    "Max",
    "Min",
    "Std Dev",
    "Urban ATMs",
    "Suburban ATMs",
    "Rural ATMs",
];

/// Serializes the result store as CSV, one row per region in processing order.
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }

    /// Writes header plus data rows to `sink`. An empty store is refused
    /// with `EmptyStore` before anything is written; `dest` names the sink in
    /// `IoFailure` errors.
    pub fn write_to<W: Write>(
        &self,
        store: &ResultStore,
        sink: W,
        dest: &Path,
    ) -> ForecastResult<()> {
        if store.is_empty() {
            return Err(ForecastError::EmptyStore);
        }

        let io_failure = |e: csv::Error| ForecastError::IoFailure {
            path: dest.to_path_buf(),
            source: csv_to_io(e),
        };
        let mut wtr = csv::Writer::from_writer(sink);

        wtr.write_record(EXPORT_HEADERS).map_err(io_failure)?;

        for (region, s) in store.all() {
            let dist = &s.location_distribution;
            wtr.write_record([
                region.clone(),
                s.total.to_string(),
                s.avg.to_string(),
                s.max.to_string(),
                s.min.to_string(),
                s.std.to_string(),
                dist.urban.to_string(),
                dist.suburban.to_string(),
                dist.rural.to_string(),
            ])
            .map_err(io_failure)?;
        }

        wtr.flush().map_err(|source| ForecastError::IoFailure {
            path: dest.to_path_buf(),
            source,
        })
    }

    pub fn export_to_string(&self, store: &ResultStore) -> ForecastResult<String> {
        let memory = Path::new("<memory>");
        let mut buf = Vec::new();
        self.write_to(store, &mut buf, memory)?;
        String::from_utf8(buf).map_err(|e| ForecastError::IoFailure {
            path: memory.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }

    /// Writes the export to `path` atomically: temp file then rename.
    pub fn export_to_path(&self, store: &ResultStore, path: &Path) -> ForecastResult<()> {
        // Refused before any directory or temp file is created
        if store.is_empty() {
            return Err(ForecastError::EmptyStore);
        }

        let io_failure = |source: std::io::Error| ForecastError::IoFailure {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_failure)?;
        }

        let temp_path = path.with_extension("csv.tmp");
        let file = fs::File::create(&temp_path).map_err(io_failure)?;
        if let Err(e) = self.write_to(store, file, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(io_failure(e));
        }

        info!("Exported {} region(s) to {:?}", store.len(), path);
        Ok(())
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamped export file name, e.g. `atm_forecast_20240101_120000.csv`
pub fn default_export_file_name(now: DateTime<Utc>) -> String {
    format!("atm_forecast_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn csv_to_io(err: csv::Error) -> std::io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => std::io::Error::other(format!("{:?}", other)),
    }
}
