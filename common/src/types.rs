//! 料金レコードの型定義
//!
//! ソース（DB/JSON）から読み込むレコードと、シート出力用の型:
//! - RawRateRecord: ソースから読んだままの行（locale/shipping_speedは文字列）
//! - RateRecord: 型付きの料金レコード
//! - PivotRow: ピボット後の1行（重量帯 × ゾーン）

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 配送範囲（国内/国際）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Locale {
    Domestic,
    International,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Domestic, Locale::International];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Domestic => "domestic",
            Locale::International => "international",
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "domestic" => Ok(Locale::Domestic),
            "international" => Ok(Locale::International),
            _ => Err(Error::InvalidRecord(format!("unknown locale: {}", s))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 配送スピード（シート1枚に対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShippingSpeed {
    Standard,
    Expedited,
    NextDay,
    IntlEconomy,
    IntlExpedited,
}

impl ShippingSpeed {
    /// シートの出力順
    pub const ALL: [ShippingSpeed; 5] = [
        ShippingSpeed::Standard,
        ShippingSpeed::Expedited,
        ShippingSpeed::NextDay,
        ShippingSpeed::IntlEconomy,
        ShippingSpeed::IntlExpedited,
    ];

    /// このスピードが属する配送範囲
    pub fn locale(&self) -> Locale {
        match self {
            ShippingSpeed::Standard | ShippingSpeed::Expedited | ShippingSpeed::NextDay => {
                Locale::Domestic
            }
            ShippingSpeed::IntlEconomy | ShippingSpeed::IntlExpedited => Locale::International,
        }
    }

    pub fn sheet_title(&self) -> &'static str {
        match self {
            ShippingSpeed::Standard => "Domestic Standard Rates",
            ShippingSpeed::Expedited => "Domestic Expedited Rates",
            ShippingSpeed::NextDay => "Domestic Next Day Rates",
            ShippingSpeed::IntlEconomy => "International Economy Rates",
            ShippingSpeed::IntlExpedited => "International Expedited Rates",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingSpeed::Standard => "standard",
            ShippingSpeed::Expedited => "expedited",
            ShippingSpeed::NextDay => "nextDay",
            ShippingSpeed::IntlEconomy => "intlEconomy",
            ShippingSpeed::IntlExpedited => "intlExpedited",
        }
    }
}

impl FromStr for ShippingSpeed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ShippingSpeed::ALL
            .into_iter()
            .find(|speed| speed.as_str() == s)
            .ok_or_else(|| Error::InvalidRecord(format!("unknown shipping speed: {}", s)))
    }
}

impl fmt::Display for ShippingSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ゾーン識別子
///
/// 数値として読めるゾーン同士は数値順、それ以外は文字列順。
/// 数値ゾーンは文字列ゾーンより前に並ぶ。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zone(String);

impl Zone {
    pub fn new(id: impl Into<String>) -> Self {
        Zone(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

impl Ord for Zone {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            // "8" と "08" のような同値は元の文字列で決める
            (Some(a), Some(b)) => a.total_cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Zone {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// JSON上のゾーンは文字列・数値のどちらでも受け付ける
#[derive(Deserialize)]
#[serde(untagged)]
enum ZoneRepr {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match ZoneRepr::deserialize(deserializer)? {
            ZoneRepr::Text(s) => Zone(s),
            ZoneRepr::Integer(n) => Zone(n.to_string()),
            ZoneRepr::Float(n) => Zone(n.to_string()),
        })
    }
}

/// ソースから読み込んだままの料金行（`rates`テーブルの列名）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRateRecord {
    pub client_id: i64,
    pub locale: String,
    pub shipping_speed: String,
    pub zone: Zone,
    pub start_weight: f64,
    pub end_weight: f64,
    pub rate: f64,
}

impl RawRateRecord {
    /// JSON配列から読み込み
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        let records: Vec<Self> = serde_json::from_str(json)?;
        Ok(records)
    }

    /// JSONファイルから読み込み
    pub fn list_from_file(path: &std::path::Path) -> Result<Vec<Self>> {
        let content = std::fs::read_to_string(path)?;
        Self::list_from_json(&content)
    }
}

/// 料金レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub client_id: i64,
    pub locale: Locale,
    pub shipping_speed: ShippingSpeed,
    pub zone: Zone,
    pub start_weight: f64,
    pub end_weight: f64,
    pub rate: f64,
}

impl TryFrom<RawRateRecord> for RateRecord {
    type Error = Error;

    fn try_from(raw: RawRateRecord) -> Result<Self> {
        Ok(RateRecord {
            client_id: raw.client_id,
            locale: raw.locale.parse()?,
            shipping_speed: raw.shipping_speed.parse()?,
            zone: raw.zone,
            start_weight: raw.start_weight,
            end_weight: raw.end_weight,
            rate: raw.rate,
        })
    }
}

/// 列のキー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKey {
    StartWeight,
    EndWeight,
    Zone(Zone),
}

/// 列定義（見出し + キー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub header: String,
    pub key: ColumnKey,
}

/// 固定の2列（Start Weight / End Weight）+ ゾーンごとの列
pub fn columns_for_zones(zones: &[Zone]) -> Vec<ColumnDef> {
    let mut columns = vec![
        ColumnDef {
            header: "Start Weight".to_string(),
            key: ColumnKey::StartWeight,
        },
        ColumnDef {
            header: "End Weight".to_string(),
            key: ColumnKey::EndWeight,
        },
    ];
    columns.extend(zones.iter().map(|zone| ColumnDef {
        header: format!("Zone {}", zone),
        key: ColumnKey::Zone(zone.clone()),
    }));
    columns
}

/// ピボット後の1行
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub start_weight: f64,
    pub end_weight: f64,
    /// ゾーン → 料金（その重量帯に存在するゾーンのみ）
    pub rates: BTreeMap<Zone, f64>,
}

impl PivotRow {
    pub fn new(start_weight: f64, end_weight: f64) -> Self {
        Self {
            start_weight,
            end_weight,
            rates: BTreeMap::new(),
        }
    }

    pub fn rate(&self, zone: &Zone) -> Option<f64> {
        self.rates.get(zone).copied()
    }

    /// 列キーに対応するセル値。料金が無いゾーンは `None`
    pub fn value(&self, key: &ColumnKey) -> Option<f64> {
        match key {
            ColumnKey::StartWeight => Some(self.start_weight),
            ColumnKey::EndWeight => Some(self.end_weight),
            ColumnKey::Zone(zone) => self.rate(zone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_speed_locale() {
        assert_eq!(ShippingSpeed::Standard.locale(), Locale::Domestic);
        assert_eq!(ShippingSpeed::NextDay.locale(), Locale::Domestic);
        assert_eq!(ShippingSpeed::IntlEconomy.locale(), Locale::International);
        assert_eq!(ShippingSpeed::IntlExpedited.locale(), Locale::International);
    }

    #[test]
    fn test_shipping_speed_parse() {
        assert_eq!("nextDay".parse::<ShippingSpeed>().unwrap(), ShippingSpeed::NextDay);
        assert_eq!(
            "intlEconomy".parse::<ShippingSpeed>().unwrap(),
            ShippingSpeed::IntlEconomy
        );
        assert!("next_day".parse::<ShippingSpeed>().is_err());
        assert!("Standard".parse::<ShippingSpeed>().is_err());
    }

    #[test]
    fn test_sheet_titles() {
        assert_eq!(ShippingSpeed::Standard.sheet_title(), "Domestic Standard Rates");
        assert_eq!(ShippingSpeed::NextDay.sheet_title(), "Domestic Next Day Rates");
        assert_eq!(
            ShippingSpeed::IntlExpedited.sheet_title(),
            "International Expedited Rates"
        );
    }

    #[test]
    fn test_zone_order_numeric() {
        let mut zones = vec![Zone::new("10"), Zone::new("2"), Zone::new("1")];
        zones.sort();
        let ids: Vec<&str> = zones.iter().map(Zone::as_str).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_zone_order_mixed() {
        let mut zones = vec![Zone::new("B"), Zone::new("3"), Zone::new("A")];
        zones.sort();
        let ids: Vec<&str> = zones.iter().map(Zone::as_str).collect();
        assert_eq!(ids, vec!["3", "A", "B"]);
    }

    #[test]
    fn test_zone_equal_numeric_value_distinct_text() {
        assert_ne!(Zone::new("8"), Zone::new("08"));
        assert_ne!(Zone::new("8").cmp(&Zone::new("08")), Ordering::Equal);
    }

    #[test]
    fn test_zone_deserialize_number_or_string() {
        let zones: Vec<Zone> = serde_json::from_str(r#"[5, "A", "07"]"#).unwrap();
        assert_eq!(zones, vec![Zone::new("5"), Zone::new("A"), Zone::new("07")]);
    }

    #[test]
    fn test_raw_record_conversion() {
        let raw: RawRateRecord = serde_json::from_str(
            r#"{
                "client_id": 1240,
                "locale": "international",
                "shipping_speed": "intlExpedited",
                "zone": 3,
                "start_weight": 0.5,
                "end_weight": 1.0,
                "rate": 12.75
            }"#,
        )
        .unwrap();

        let record = RateRecord::try_from(raw).unwrap();
        assert_eq!(record.locale, Locale::International);
        assert_eq!(record.shipping_speed, ShippingSpeed::IntlExpedited);
        assert_eq!(record.zone, Zone::new("3"));
    }

    #[test]
    fn test_raw_record_unknown_locale() {
        let raw = RawRateRecord {
            client_id: 1,
            locale: "galactic".to_string(),
            shipping_speed: "standard".to_string(),
            zone: Zone::new("1"),
            start_weight: 0.0,
            end_weight: 1.0,
            rate: 1.0,
        };
        let err = RateRecord::try_from(raw).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
        assert!(err.to_string().contains("galactic"));
    }

    #[test]
    fn test_columns_for_zones() {
        let columns = columns_for_zones(&[Zone::new("A"), Zone::new("B")]);
        let headers: Vec<&str> = columns.iter().map(|c| c.header.as_str()).collect();
        assert_eq!(headers, vec!["Start Weight", "End Weight", "Zone A", "Zone B"]);
        assert_eq!(columns[2].key, ColumnKey::Zone(Zone::new("A")));
    }

    #[test]
    fn test_pivot_row_value() {
        let mut row = PivotRow::new(1.0, 2.0);
        row.rates.insert(Zone::new("A"), 7.25);

        assert_eq!(row.value(&ColumnKey::StartWeight), Some(1.0));
        assert_eq!(row.value(&ColumnKey::EndWeight), Some(2.0));
        assert_eq!(row.value(&ColumnKey::Zone(Zone::new("A"))), Some(7.25));
        assert_eq!(row.value(&ColumnKey::Zone(Zone::new("B"))), None);
    }
}
