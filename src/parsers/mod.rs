pub mod csv_observations;
pub mod error;
pub mod field_tables;
pub mod html_summary;
pub mod node_path;
