pub mod csv_exporter;

pub use csv_exporter::{CsvExporter, EXPORT_HEADERS, default_export_file_name};
