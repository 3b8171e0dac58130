// CSV generation and the three organization export formats.

pub mod csv;
pub mod export;

pub use export::ExportFormat;
