//! Summary exports for rendered charts

pub mod csv_export;
pub mod excel;
pub mod json_export;

pub use csv_export::CsvExporter;
pub use excel::ExcelExporter;
pub use json_export::JsonExporter;
