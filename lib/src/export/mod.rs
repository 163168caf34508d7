// lib/src/export/mod.rs

pub mod bundle;
pub mod csv_report;
pub mod gexf;

pub use bundle::{read_bundle, write_bundle, ResultsBundle};
pub use gexf::{export_gexf, write_gexf};
