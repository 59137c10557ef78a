//! Export core modules shared by the CLI and tests.

pub mod excel_core;

pub use excel_core::{generate_rates_workbook_buffer, sanitize_sheet_name};
