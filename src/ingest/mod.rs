//! Ingest Module
//!
//! 入力バイト列を先頭シートの文字列格子（`Sheet`）へ変換するモジュール。
//! コンテナ形式の判別を行い、XLS/XLSX/ODSはcalamineへ、SpreadsheetML
//! （本クレート自身の出力形式）は自前のXMLリーダーへ振り分けます。

mod spreadsheetml;

use calamine::{open_workbook_auto_from_rs, Data, Reader as _};
use std::io::Cursor;

use crate::error::ColorSheetError;
use crate::security::SecurityConfig;
use crate::types::Sheet;

/// 入力バイト列を先頭シートの格子として取り込む
///
/// # 引数
///
/// * `bytes` - 入力ファイルの生バイト列
/// * `security` - リソース制限設定
///
/// # 戻り値
///
/// * `Ok(Sheet)` - 先頭シートの内容（行順・列順を保持、値は文字列化済み）
/// * `Err(ColorSheetError::Decode)` - 認識できない形式、またはシートが存在しない場合
/// * `Err(ColorSheetError::SecurityViolation)` - 入力サイズが上限を超える場合
pub(crate) fn ingest(bytes: &[u8], security: &SecurityConfig) -> Result<Sheet, ColorSheetError> {
    if bytes.len() as u64 > security.max_input_file_size {
        return Err(ColorSheetError::SecurityViolation(format!(
            "Input file size exceeds maximum: {} bytes (max: {} bytes)",
            bytes.len(),
            security.max_input_file_size
        )));
    }

    if bytes.is_empty() {
        return Err(ColorSheetError::Decode("input file is empty".to_string()));
    }

    if looks_like_xml(bytes) {
        spreadsheetml::parse(bytes, security)
    } else {
        parse_container(bytes)
    }
}

/// 先頭バイトからXML文書かどうかを判別
///
/// BOMと空白を読み飛ばした最初のバイトが`<`ならXMLとみなします。
/// XLSX（ZIP）は`PK`、XLS（OLE2）は`0xD0 0xCF`で始まるため衝突しません。
fn looks_like_xml(bytes: &[u8]) -> bool {
    let rest = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    rest.iter()
        .find(|byte| !byte.is_ascii_whitespace())
        .copied()
        == Some(b'<')
}

/// calamine経由でバイナリ/ZIPコンテナを解析
///
/// 先頭シートのみを取り込みます。calamineの`Range`は使用範囲の左上から
/// 始まるため、行・列のオフセットを空値で埋めてシート上の絶対位置を
/// 維持します。行末尾の空セルは`Range`が補完した密な値のため取り除き、
/// 行長を実際の使用範囲に合わせます。
fn parse_container(bytes: &[u8]) -> Result<Sheet, ColorSheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(ColorSheetError::Parse)?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ColorSheetError::Decode("workbook contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(ColorSheetError::Parse)?;

    let (row_offset, col_offset) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => (0, 0),
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(cell_to_string));

        // 末尾の空セルを除去（Rangeによる密な補完値）
        while cells.last().is_some_and(String::is_empty) {
            cells.pop();
        }

        rows.push(cells);
    }

    Ok(Sheet::new(rows))
}

/// calamineのセル値を文字列へ変換
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("{:?}", e),
        other => other.to_string(),
    }
}
