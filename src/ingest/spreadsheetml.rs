//! SpreadsheetML Reader Module
//!
//! Excel 2003 XML（SpreadsheetML）文書を先頭シートの格子として読み込む
//! モジュール。本クレート自身の出力をそのまま再入力できるようにするための
//! リーダーで、セルのテキスト内容のみを取り込みます。スタイル参照
//! （`ss:StyleID`）は読み込み時には無視されます。

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ColorSheetError;
use crate::security::SecurityConfig;
use crate::types::Sheet;

/// SpreadsheetML文書を解析して先頭シートの格子を返す
///
/// 対象は `Workbook/Worksheet[0]/Table/Row/Cell/Data` のテキストのみです。
/// 2枚目以降の`Worksheet`は無視されます。要素名はプレフィックスを除いて
/// 照合するため、`ss:`付きの文書も受理します。
///
/// # 戻り値
///
/// * `Ok(Sheet)` - 先頭シートの内容（行の長さは元文書のまま不揃いを許容）
/// * `Err(ColorSheetError::Decode)` - `Workbook`要素がない、`Worksheet`が
///   1つもない、またはXMLとして不正な場合
pub(crate) fn parse(bytes: &[u8], security: &SecurityConfig) -> Result<Sheet, ColorSheetError> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();

    let mut saw_workbook = false;
    let mut saw_worksheet = false;
    let mut in_first_worksheet = false;
    let mut worksheet_done = false;
    let mut in_table = false;
    let mut in_data = false;

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut current_row: Option<Vec<String>> = None;
    let mut current_cell: Option<String> = None;
    let mut cell_count: usize = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Workbook" => saw_workbook = true,
                b"Worksheet" if saw_workbook && !worksheet_done && !in_first_worksheet => {
                    saw_worksheet = true;
                    in_first_worksheet = true;
                }
                b"Table" if in_first_worksheet => in_table = true,
                b"Row" if in_table => current_row = Some(Vec::new()),
                b"Cell" => {
                    if let Some(row) = current_row.as_mut() {
                        apply_cell_index(&e, row)?;
                        current_cell = Some(String::new());
                    }
                }
                b"Data" if current_cell.is_some() => in_data = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                // 自己終了タグ: <Data ss:Type="String"/> は空文字列のセル内容
                b"Data" => {}
                b"Cell" => {
                    if let Some(row) = current_row.as_mut() {
                        apply_cell_index(&e, row)?;
                        push_cell(row, String::new(), &mut cell_count, security)?;
                    }
                }
                b"Row" if in_table => rows.push(Vec::new()),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_data {
                    if let Some(cell) = current_cell.as_mut() {
                        let text = e.unescape().map_err(|err| {
                            ColorSheetError::Decode(format!(
                                "Invalid SpreadsheetML document: {}",
                                err
                            ))
                        })?;
                        cell.push_str(&text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_data {
                    if let Some(cell) = current_cell.as_mut() {
                        cell.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"Data" => in_data = false,
                b"Cell" => {
                    if let (Some(row), Some(cell)) = (current_row.as_mut(), current_cell.take()) {
                        push_cell(row, cell, &mut cell_count, security)?;
                    }
                }
                b"Row" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                b"Table" => in_table = false,
                b"Worksheet" => {
                    if in_first_worksheet {
                        in_first_worksheet = false;
                        worksheet_done = true;
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ColorSheetError::Decode(format!(
                    "Invalid SpreadsheetML document: {}",
                    e
                )))
            }
        }
        buf.clear();
    }

    if !saw_workbook {
        return Err(ColorSheetError::Decode(
            "not a SpreadsheetML workbook".to_string(),
        ));
    }
    if !saw_worksheet {
        return Err(ColorSheetError::Decode(
            "workbook contains no sheets".to_string(),
        ));
    }

    Ok(Sheet::new(rows))
}

/// `ss:Index`属性（1始まりの列位置）を反映して行を空セルで埋める
///
/// 本クレート自身の出力には現れませんが、Excelが書き出す疎なRowを
/// 正しい列位置で取り込むために対応します。
fn apply_cell_index(cell: &BytesStart<'_>, row: &mut Vec<String>) -> Result<(), ColorSheetError> {
    for attr in cell.attributes() {
        let attr = attr.map_err(|e| {
            ColorSheetError::Decode(format!("Invalid SpreadsheetML document: {}", e))
        })?;
        if attr.key.local_name().as_ref() == b"Index" {
            // ss:Indexは素の整数のみなので、デコードを介さず生の値を読む
            let value = String::from_utf8_lossy(&attr.value);
            let index: usize = value.parse().map_err(|_| {
                ColorSheetError::Decode(format!("Invalid cell index: '{}'", value))
            })?;
            while row.len() + 1 < index {
                row.push(String::new());
            }
        }
    }
    Ok(())
}

/// セルを行へ追加し、セル数の上限を検査
fn push_cell(
    row: &mut Vec<String>,
    cell: String,
    cell_count: &mut usize,
    security: &SecurityConfig,
) -> Result<(), ColorSheetError> {
    *cell_count += 1;
    if *cell_count > security.max_cell_count {
        return Err(ColorSheetError::SecurityViolation(format!(
            "Document cell count exceeds maximum: {} cells",
            security.max_cell_count
        )));
    }
    row.push(cell);
    Ok(())
}
