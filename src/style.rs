//! Style Table Module
//!
//! 正規化済み色コードから決定的なスタイルIDを導出し、
//! 重複を除いたスタイル表を構築するモジュール。

use std::collections::HashSet;

use crate::api::ColorRow;

/// 正規化済み色コードからスタイルIDを導出
///
/// `cf_` + 16進数字6桁（大文字）の固定変換です。同じ色は常に同じIDになり
/// （決定性）、異なる色が同じIDになることはなく（単射性）、IDは
/// `[A-Za-z0-9_]`のみで構成されるため、XML属性値としてエスケープなしで
/// 埋め込めます。
///
/// # 引数
///
/// * `hex` - 正規化済みの色コード（`#RRGGBB`）
pub(crate) fn style_id(hex: &str) -> String {
    format!("cf_{}", hex.trim_start_matches('#'))
}

/// 重複を除いたスタイル表
///
/// シート内に出現した正規化済み色コードの集合を、初出順で保持します。
/// 順序はシリアライズ結果のバイト単位の決定性のために固定です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StyleTable {
    entries: Vec<String>,
}

impl StyleTable {
    /// プレビュー行リストからスタイル表を構築
    pub fn build(rows: &[ColorRow]) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for row in rows {
            if seen.insert(row.hex.clone()) {
                entries.push(row.hex.clone());
            }
        }

        Self { entries }
    }

    /// 登録された色コードを初出順で走査
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// エントリ数を取得
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_row(row: u32, hex: &str) -> ColorRow {
        ColorRow {
            row,
            name: format!("Row {}", row),
            hex: hex.to_string(),
            preview: hex.to_string(),
        }
    }

    #[test]
    fn test_style_id_format() {
        assert_eq!(style_id("#FF0000"), "cf_FF0000");
        assert_eq!(style_id("#112233"), "cf_112233");
    }

    #[test]
    fn test_style_id_attribute_safe() {
        let id = style_id("#ABCDEF");
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn test_build_deduplicates_preserving_first_occurrence() {
        let rows = vec![
            color_row(2, "#FF0000"),
            color_row(3, "#0000FF"),
            color_row(4, "#FF0000"),
        ];
        let table = StyleTable::build(&rows);

        assert_eq!(table.len(), 2);
        let entries: Vec<&str> = table.iter().collect();
        assert_eq!(entries, vec!["#FF0000", "#0000FF"]);
    }

    #[test]
    fn test_build_empty() {
        let table = StyleTable::build(&[]);
        assert_eq!(table.len(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_build_is_deterministic() {
        let rows = vec![
            color_row(2, "#AA0000"),
            color_row(3, "#00BB00"),
            color_row(4, "#0000CC"),
        ];
        let a: Vec<String> = StyleTable::build(&rows).iter().map(style_id).collect();
        let b: Vec<String> = StyleTable::build(&rows).iter().map(style_id).collect();
        assert_eq!(a, b);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// 異なる正規化済み色コードは必ず異なるスタイルIDになる（単射性）
            #[test]
            fn test_style_id_injective(a in "[0-9A-F]{6}", b in "[0-9A-F]{6}") {
                prop_assume!(a != b);
                prop_assert_ne!(style_id(&format!("#{}", a)), style_id(&format!("#{}", b)));
            }
        }
    }
}
