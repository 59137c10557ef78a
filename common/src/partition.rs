//! レコード分割
//!
//! 料金レコードを配送範囲・配送スピードごとに振り分け、
//! 配送範囲ごとのゾーン一覧（列の並び）を求める。

use crate::pivot::build_rows;
use crate::types::{Locale, PivotRow, RateRecord, ShippingSpeed, Zone};
use std::collections::BTreeSet;

/// 配送範囲で絞り込み（入力順を保持）
pub fn partition_by_locale(records: &[RateRecord], locale: Locale) -> Vec<&RateRecord> {
    records.iter().filter(|r| r.locale == locale).collect()
}

/// 配送スピードで絞り込み（入力順を保持）
pub fn partition_by_speed<'a>(
    records: &[&'a RateRecord],
    speed: ShippingSpeed,
) -> Vec<&'a RateRecord> {
    records
        .iter()
        .copied()
        .filter(|r| r.shipping_speed == speed)
        .collect()
}

/// 重複なし・昇順のゾーン一覧
pub fn distinct_sorted_zones(records: &[&RateRecord]) -> Vec<Zone> {
    records
        .iter()
        .map(|r| r.zone.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 配送範囲 × 配送スピードのグループ
#[derive(Debug, Clone, PartialEq)]
pub enum Group<'a> {
    Empty,
    NonEmpty(Vec<&'a RateRecord>),
}

impl<'a> Group<'a> {
    pub fn from_records(records: Vec<&'a RateRecord>) -> Self {
        if records.is_empty() {
            Group::Empty
        } else {
            Group::NonEmpty(records)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Group::Empty)
    }

    /// 空グループは `None`（シートを作らない）
    pub fn build_rows(&self) -> Option<Vec<PivotRow>> {
        match self {
            Group::Empty => None,
            Group::NonEmpty(records) => Some(build_rows(records)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(locale: Locale, speed: ShippingSpeed, zone: &str, start: f64) -> RateRecord {
        RateRecord {
            client_id: 1240,
            locale,
            shipping_speed: speed,
            zone: Zone::new(zone),
            start_weight: start,
            end_weight: start + 1.0,
            rate: 1.0,
        }
    }

    fn sample() -> Vec<RateRecord> {
        vec![
            record(Locale::Domestic, ShippingSpeed::Standard, "2", 0.0),
            record(Locale::International, ShippingSpeed::IntlEconomy, "A", 0.0),
            record(Locale::Domestic, ShippingSpeed::Expedited, "1", 1.0),
            record(Locale::Domestic, ShippingSpeed::Standard, "8", 2.0),
        ]
    }

    #[test]
    fn test_partition_by_locale_preserves_order() {
        let records = sample();
        let domestic = partition_by_locale(&records, Locale::Domestic);
        let zones: Vec<&str> = domestic.iter().map(|r| r.zone.as_str()).collect();
        assert_eq!(zones, vec!["2", "1", "8"]);
    }

    #[test]
    fn test_partition_by_speed() {
        let records = sample();
        let domestic = partition_by_locale(&records, Locale::Domestic);
        let standard = partition_by_speed(&domestic, ShippingSpeed::Standard);
        assert_eq!(standard.len(), 2);
        assert!(standard.iter().all(|r| r.shipping_speed == ShippingSpeed::Standard));

        let next_day = partition_by_speed(&domestic, ShippingSpeed::NextDay);
        assert!(next_day.is_empty());
    }

    #[test]
    fn test_distinct_sorted_zones() {
        let records = sample();
        let domestic = partition_by_locale(&records, Locale::Domestic);
        let zones = distinct_sorted_zones(&domestic);
        assert_eq!(zones, vec![Zone::new("1"), Zone::new("2"), Zone::new("8")]);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<RateRecord> = vec![];
        let domestic = partition_by_locale(&records, Locale::Domestic);
        assert!(domestic.is_empty());
        assert!(partition_by_speed(&domestic, ShippingSpeed::Standard).is_empty());
        assert!(distinct_sorted_zones(&domestic).is_empty());
    }

    #[test]
    fn test_group_empty_skips_rows() {
        let group = Group::from_records(vec![]);
        assert!(group.is_empty());
        assert_eq!(group.build_rows(), None);
    }

    #[test]
    fn test_group_non_empty_builds_rows() {
        let records = sample();
        let domestic = partition_by_locale(&records, Locale::Domestic);
        let group = Group::from_records(partition_by_speed(&domestic, ShippingSpeed::Standard));

        let rows = group.build_rows().expect("空でないグループ");
        assert_eq!(rows.len(), 2);
    }
}
