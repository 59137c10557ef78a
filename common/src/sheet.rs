//! シート構成
//!
//! 配送スピードごとに1シート。列は配送範囲全体のゾーン一覧で固定し、
//! グループごとには計算し直さない。

use crate::partition::{distinct_sorted_zones, partition_by_locale, partition_by_speed, Group};
use crate::types::{columns_for_zones, ColumnDef, Locale, PivotRow, RateRecord, ShippingSpeed, Zone};
use rayon::prelude::*;

/// 出力可能なシート
#[derive(Debug, Clone, PartialEq)]
pub struct RateSheet {
    pub speed: ShippingSpeed,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<PivotRow>,
}

impl RateSheet {
    pub fn title(&self) -> &'static str {
        self.speed.sheet_title()
    }
}

/// シートごとの結果
#[derive(Debug, Clone, PartialEq)]
pub enum SheetOutcome {
    Ready(RateSheet),
    /// レコードが無いためシートを作らない
    Skipped(ShippingSpeed),
}

impl SheetOutcome {
    pub fn speed(&self) -> ShippingSpeed {
        match self {
            SheetOutcome::Ready(sheet) => sheet.speed,
            SheetOutcome::Skipped(speed) => *speed,
        }
    }
}

struct LocalePartition<'a> {
    locale: Locale,
    records: Vec<&'a RateRecord>,
    zones: Vec<Zone>,
}

/// 全レコードから、`ShippingSpeed::ALL` の順でシート構成を作る
pub fn plan_sheets(records: &[RateRecord]) -> Vec<SheetOutcome> {
    let locales: Vec<LocalePartition> = Locale::ALL
        .into_iter()
        .map(|locale| {
            let records = partition_by_locale(records, locale);
            let zones = distinct_sorted_zones(&records);
            LocalePartition {
                locale,
                records,
                zones,
            }
        })
        .collect();

    ShippingSpeed::ALL
        .par_iter()
        .map(|&speed| {
            let Some(partition) = locales.iter().find(|p| p.locale == speed.locale()) else {
                return SheetOutcome::Skipped(speed);
            };
            let group = Group::from_records(partition_by_speed(&partition.records, speed));
            match group.build_rows() {
                None => SheetOutcome::Skipped(speed),
                Some(rows) => SheetOutcome::Ready(RateSheet {
                    speed,
                    columns: columns_for_zones(&partition.zones),
                    rows,
                }),
            }
        })
        .collect()
}
