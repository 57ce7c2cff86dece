//! Export sink adapters.

mod local_export_sink;

pub use local_export_sink::LocalExportSink;
