//! ピボット変換
//!
//! 1グループ分の料金レコードを「行 = 重量帯、列 = ゾーン」の表に組み替える。
//!
//! - 行は開始重量（start_weight）ごとに1行、昇順
//! - 終了重量はその重量帯で最初に現れたレコードの値
//! - 同じ重量帯・同じゾーンのレコードが複数あれば後勝ち（警告なしで上書き）

use crate::types::{PivotRow, RateRecord};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 開始重量のキー（全順序で比較、-0.0 は 0.0 に寄せる）
#[derive(Debug, Clone, Copy)]
struct WeightKey(f64);

impl WeightKey {
    fn new(weight: f64) -> Self {
        if weight == 0.0 {
            WeightKey(0.0)
        } else {
            WeightKey(weight)
        }
    }
}

impl PartialEq for WeightKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeightKey {}

impl PartialOrd for WeightKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// グループのレコードから行を組み立てる
///
/// 入力の順序は任意。空の入力には空の行列を返す。
pub fn build_rows(records: &[&RateRecord]) -> Vec<PivotRow> {
    let mut brackets: BTreeMap<WeightKey, PivotRow> = BTreeMap::new();

    for record in records {
        let row = brackets
            .entry(WeightKey::new(record.start_weight))
            .or_insert_with(|| PivotRow::new(record.start_weight, record.end_weight));
        row.rates.insert(record.zone.clone(), record.rate);
    }

    brackets.into_values().collect()
}
