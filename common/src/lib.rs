//! Rate Sheets Common Library
//!
//! 料金レコードの型、分割・ピボット変換、Excelブック生成

pub mod types;
pub mod error;
pub mod partition;
pub mod pivot;
pub mod sheet;
#[cfg(feature = "excel")]
pub mod export;

pub use types::{
    columns_for_zones, ColumnDef, ColumnKey, Locale, PivotRow, RateRecord, RawRateRecord,
    ShippingSpeed, Zone,
};
pub use error::{Error, Result};
pub use partition::{distinct_sorted_zones, partition_by_locale, partition_by_speed, Group};
pub use pivot::build_rows;
pub use sheet::{plan_sheets, RateSheet, SheetOutcome};
