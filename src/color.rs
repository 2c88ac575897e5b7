//! Color Extraction Module
//!
//! 色コード列から16進色コードを抽出・正規化するモジュール。
//! パターンに一致しない行は黙ってスキップされ、1件も一致しなかった
//! 場合のみ`NoColorsFound`エラーになります。

use crate::api::ColorRow;
use crate::builder::ProcessorConfig;
use crate::error::ColorSheetError;
use crate::types::Sheet;

/// セル値を正規化済みの16進色コードに変換
///
/// 受理するパターンは、任意の`0x`/`0X`/`#`プレフィックス1つ +
/// 16進数字ちょうど6桁（大文字小文字不問）です。前後に余分な文字が
/// ある場合は不一致とします。トリムは行いません（上流の挙動に合わせる）。
///
/// # 戻り値
///
/// * `Some(String)` - `#RRGGBB`形式（大文字）に正規化した色コード
/// * `None` - パターンに一致しない場合
///
/// # 例
///
/// `"#ff0000"`, `"0xFF0000"`, `"FF0000"` はいずれも `"#FF0000"` になります。
pub(crate) fn normalize_hex(raw: &str) -> Option<String> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .or_else(|| raw.strip_prefix('#'))
        .unwrap_or(raw);

    if digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        Some(format!("#{}", digits.to_ascii_uppercase()))
    } else {
        None
    }
}

/// シートからプレビュー用の色行リストを抽出
///
/// 行0（ヘッダー行）はスキップし、行1以降について色コード列を
/// 検査します。セルが存在しない場合は空文字列として扱います。
///
/// # 引数
///
/// * `sheet` - 取り込み済みのシート
/// * `config` - 列インデックスを含む処理設定
///
/// # 戻り値
///
/// * `Ok(Vec<ColorRow>)` - 元の行順のプレビューリスト（1件以上）
/// * `Err(ColorSheetError::NoColorsFound)` - 有効な色コードが1件もない場合
pub(crate) fn extract_colors(
    sheet: &Sheet,
    config: &ProcessorConfig,
) -> Result<Vec<ColorRow>, ColorSheetError> {
    let mut rows = Vec::new();

    for index in 1..sheet.row_count() {
        let raw = sheet.cell_or_empty(index, config.color_column);
        let Some(hex) = normalize_hex(raw) else {
            continue;
        };

        let display_row = (index + 1) as u32;
        let name = match sheet.cell_or_empty(index, config.name_column) {
            "" => format!("Row {}", display_row),
            value => value.to_string(),
        };

        rows.push(ColorRow {
            row: display_row,
            name,
            preview: hex.clone(),
            hex,
        });
    }

    if rows.is_empty() {
        return Err(ColorSheetError::NoColorsFound);
    }

    Ok(rows)
}
