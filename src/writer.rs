//! SpreadsheetML Writer Module
//!
//! シートとスタイル表からExcel 2003 XML（SpreadsheetML）文書を生成する
//! モジュール。同一の入力に対して常にバイト単位で同一の出力を生成します
//! （タイムスタンプや乱数IDは含まれません）。

use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

use crate::builder::ProcessorConfig;
use crate::color::normalize_hex;
use crate::error::ColorSheetError;
use crate::style::{style_id, StyleTable};
use crate::types::Sheet;

/// Workbook要素の名前空間宣言（レガシー方言の固定セット）
const NAMESPACES: [(&str, &str); 5] = [
    ("xmlns", "urn:schemas-microsoft-com:office:spreadsheet"),
    ("xmlns:o", "urn:schemas-microsoft-com:office:office"),
    ("xmlns:x", "urn:schemas-microsoft-com:office:excel"),
    ("xmlns:ss", "urn:schemas-microsoft-com:office:spreadsheet"),
    ("xmlns:html", "http://www.w3.org/TR/REC-html40"),
];

/// シートとスタイル表からSpreadsheetML文書を生成
///
/// 文書の構成:
/// - `<Styles>`: 既定スタイル（`Default`/`Normal`）+ スタイル表の各色に
///   対応する塗りつぶしスタイル
/// - `<Table>`: 入力シートを行・セル単位でそのまま再出力。ヘッダー行以外で
///   色コード列が有効な行は、スタイル列のセルに`ss:StyleID`参照を付与。
///   スタイル列までの長さがない行は空セルで埋めた上で、スタイル参照付きの
///   空セルを追加します。スタイル列まで既に長さがある行のセル内容は
///   変更しません。
///
/// # 戻り値
///
/// * `Ok(Vec<u8>)` - UTF-8のSpreadsheetML文書
pub(crate) fn serialize(
    sheet: &Sheet,
    styles: &StyleTable,
    config: &ProcessorConfig,
) -> Result<Vec<u8>, ColorSheetError> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"<?xml version=\"1.0\"?>\n");
    buf.extend_from_slice(b"<?mso-application progid=\"Excel.Sheet\"?>\n");

    let mut writer = Writer::new_with_indent(&mut buf, b' ', 1);

    let mut workbook = BytesStart::new("Workbook");
    for (key, value) in NAMESPACES {
        workbook.push_attribute((key, value));
    }
    writer.write_event(Event::Start(workbook))?;

    write_styles(&mut writer, styles)?;
    write_worksheet(&mut writer, sheet, config)?;

    writer.write_event(Event::End(BytesEnd::new("Workbook")))?;

    Ok(buf)
}

/// `<Styles>`ブロックを出力
fn write_styles<W: Write>(
    writer: &mut Writer<W>,
    styles: &StyleTable,
) -> Result<(), ColorSheetError> {
    writer.write_event(Event::Start(BytesStart::new("Styles")))?;

    // 既定スタイル
    let mut default_style = BytesStart::new("Style");
    default_style.push_attribute(("ss:ID", "Default"));
    default_style.push_attribute(("ss:Name", "Normal"));
    writer.write_event(Event::Start(default_style))?;

    let mut alignment = BytesStart::new("Alignment");
    alignment.push_attribute(("ss:Vertical", "Bottom"));
    writer.write_event(Event::Empty(alignment))?;

    writer.write_event(Event::End(BytesEnd::new("Style")))?;

    // 色ごとの塗りつぶしスタイル（スタイル表の初出順）
    for hex in styles.iter() {
        let mut style = BytesStart::new("Style");
        style.push_attribute(("ss:ID", style_id(hex).as_str()));
        writer.write_event(Event::Start(style))?;

        let mut alignment = BytesStart::new("Alignment");
        alignment.push_attribute(("ss:Horizontal", "Center"));
        alignment.push_attribute(("ss:Vertical", "Center"));
        writer.write_event(Event::Empty(alignment))?;

        let mut interior = BytesStart::new("Interior");
        interior.push_attribute(("ss:Color", hex));
        interior.push_attribute(("ss:Pattern", "Solid"));
        writer.write_event(Event::Empty(interior))?;

        writer.write_event(Event::End(BytesEnd::new("Style")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("Styles")))?;
    Ok(())
}

/// `<Worksheet>`と`<Table>`ブロックを出力
fn write_worksheet<W: Write>(
    writer: &mut Writer<W>,
    sheet: &Sheet,
    config: &ProcessorConfig,
) -> Result<(), ColorSheetError> {
    let mut worksheet = BytesStart::new("Worksheet");
    worksheet.push_attribute(("ss:Name", config.sheet_name.as_str()));
    writer.write_event(Event::Start(worksheet))?;
    writer.write_event(Event::Start(BytesStart::new("Table")))?;

    for (row_index, row) in sheet.rows().iter().enumerate() {
        write_row(writer, row, row_index, config)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Table")))?;
    writer.write_event(Event::End(BytesEnd::new("Worksheet")))?;
    Ok(())
}

/// 1行分の`<Row>`を出力
fn write_row<W: Write>(
    writer: &mut Writer<W>,
    row: &[String],
    row_index: usize,
    config: &ProcessorConfig,
) -> Result<(), ColorSheetError> {
    // ヘッダー行にはスタイル参照を付与しない
    let row_hex = if row_index > 0 {
        row.get(config.color_column)
            .and_then(|raw| normalize_hex(raw))
    } else {
        None
    };

    if row.is_empty() && row_hex.is_none() {
        writer.write_event(Event::Empty(BytesStart::new("Row")))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new("Row")))?;

    let mut cells = String::new();
    for (col_index, value) in row.iter().enumerate() {
        let style = if col_index == config.style_column {
            row_hex.as_deref().map(style_id)
        } else {
            None
        };
        render_cell(&mut cells, value, style.as_deref());
    }

    // スタイル列まで届かない行は、有効な色コードを持つ場合のみ空セルで
    // 埋めてスタイル参照付きの空セルを追加する。スタイル列まで既に長さが
    // ある行はそのまま（意図的な非対称、上流の挙動に合わせる）。
    if row.len() <= config.style_column {
        if let Some(hex) = row_hex.as_deref() {
            for _ in row.len()..config.style_column {
                render_cell(&mut cells, "", None);
            }
            render_cell(&mut cells, "", Some(&style_id(hex)));
        }
    }

    writer.write_event(Event::Text(BytesText::from_escaped(cells.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("Row")))?;
    Ok(())
}

/// 1セル分の`<Cell><Data ss:Type="String">..</Data></Cell>`を組み立て
///
/// セルは`<Row>`と同じ行へ連続して出力するため、インデント付きWriterを
/// 介さずエスケープ済みの文字列として組み立て、行単位でまとめて書き出し
/// ます。空の値は自己終了の`<Data/>`になります。
fn render_cell(out: &mut String, value: &str, style: Option<&str>) {
    match style {
        Some(id) => {
            out.push_str("<Cell ss:StyleID=\"");
            out.push_str(id);
            out.push_str("\">");
        }
        None => out.push_str("<Cell>"),
    }

    if value.is_empty() {
        out.push_str("<Data ss:Type=\"String\"/>");
    } else {
        out.push_str("<Data ss:Type=\"String\">");
        out.push_str(&escape(value));
        out.push_str("</Data>");
    }

    out.push_str("</Cell>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ColorRow;

    fn sheet(rows: &[&[&str]]) -> Sheet {
        Sheet::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
    }

    fn color_row(row: u32, hex: &str) -> ColorRow {
        ColorRow {
            row,
            name: format!("Row {}", row),
            hex: hex.to_string(),
            preview: hex.to_string(),
        }
    }

    fn serialize_str(sheet: &Sheet, styles: &StyleTable) -> String {
        let config = ProcessorConfig::default();
        String::from_utf8(serialize(sheet, styles, &config).unwrap()).unwrap()
    }

    #[test]
    fn test_document_prolog_and_namespaces() {
        let sheet = sheet(&[&["Name", "Color"], &["Red", "#FF0000"]]);
        let styles = StyleTable::build(&[color_row(2, "#FF0000")]);
        let xml = serialize_str(&sheet, &styles);

        assert!(xml.starts_with("<?xml version=\"1.0\"?>\n<?mso-application progid=\"Excel.Sheet\"?>\n"));
        assert!(xml.contains("xmlns=\"urn:schemas-microsoft-com:office:spreadsheet\""));
        assert!(xml.contains("xmlns:ss=\"urn:schemas-microsoft-com:office:spreadsheet\""));
    }

    #[test]
    fn test_styles_block() {
        let sheet = sheet(&[&["Name", "Color"], &["Red", "#FF0000"]]);
        let styles = StyleTable::build(&[color_row(2, "#FF0000")]);
        let xml = serialize_str(&sheet, &styles);

        assert!(xml.contains("<Style ss:ID=\"Default\" ss:Name=\"Normal\">"));
        assert!(xml.contains("<Alignment ss:Vertical=\"Bottom\"/>"));
        assert!(xml.contains("<Style ss:ID=\"cf_FF0000\">"));
        assert!(xml.contains("<Interior ss:Color=\"#FF0000\" ss:Pattern=\"Solid\"/>"));
    }

    #[test]
    fn test_style_reference_on_style_column() {
        // 4列ある行: D列のセルに参照が付き、内容はそのまま
        let sheet = sheet(&[
            &["Name", "Color", "C", "D"],
            &["Red", "#FF0000", "keep", "also keep"],
        ]);
        let styles = StyleTable::build(&[color_row(2, "#FF0000")]);
        let xml = serialize_str(&sheet, &styles);

        assert!(xml.contains("<Cell ss:StyleID=\"cf_FF0000\"><Data ss:Type=\"String\">also keep</Data></Cell>"));
    }

    #[test]
    fn test_header_row_never_styled() {
        // ヘッダー行のB列が色コードでもスタイル参照は付かない
        let sheet = sheet(&[&["Name", "#FF0000", "c", "d"], &["Red", "#FF0000", "c", "d"]]);
        let styles = StyleTable::build(&[color_row(2, "#FF0000")]);
        let xml = serialize_str(&sheet, &styles);

        let first_row_end = xml.find("</Row>").unwrap();
        assert!(!xml[..first_row_end].contains("ss:StyleID"));
    }

    #[test]
    fn test_short_row_padded_to_style_column() {
        // 長さ2の行はC列の空セルで埋められ、スタイル付きの
        // 空のD列セルが追加される
        let sheet = sheet(&[&["Name", "Color"], &["Item", "#112233"]]);
        let styles = StyleTable::build(&[color_row(2, "#112233")]);
        let xml = serialize_str(&sheet, &styles);

        let data_row = &xml[xml.find("<Row>").unwrap()..];
        let data_row = &data_row[data_row[1..].find("<Row>").unwrap() + 1..];

        // セル数: Name, Color, 空のC, スタイル付きの空のD
        assert_eq!(data_row.matches("<Cell").count(), 4);
        assert!(data_row.contains("<Cell ss:StyleID=\"cf_112233\"><Data ss:Type=\"String\"/></Cell>"));
    }

    #[test]
    fn test_short_row_without_color_not_padded() {
        let sheet = sheet(&[&["Name", "Color"], &["Item", "nothex"]]);
        let styles = StyleTable::build(&[color_row(2, "#112233")]);
        let xml = serialize_str(&sheet, &styles);

        assert!(!xml.contains("ss:StyleID=\"cf_"));
    }

    #[test]
    fn test_long_row_with_invalid_color_untouched() {
        // スタイル列まで長さのある行は、色コードが無効ならそのまま
        let sheet = sheet(&[
            &["Name", "Color", "C", "D"],
            &["Item", "nothex", "c", "original"],
        ]);
        let styles = StyleTable::build(&[color_row(2, "#112233")]);
        let xml = serialize_str(&sheet, &styles);

        assert!(xml.contains("<Data ss:Type=\"String\">original</Data>"));
        assert!(!xml.contains("ss:StyleID=\"cf_"));
    }

    #[test]
    fn test_row_cells_rendered_inline() {
        // セルはRowと同じ行に連続して出力され、Cell/Dataの間に改行や
        // インデントが入らない
        let sheet = sheet(&[&["Name", "Color"], &["Red", "#FF0000"]]);
        let styles = StyleTable::build(&[color_row(2, "#FF0000")]);
        let xml = serialize_str(&sheet, &styles);

        assert!(xml.contains(
            "<Row><Cell><Data ss:Type=\"String\">Name</Data></Cell><Cell><Data ss:Type=\"String\">Color</Data></Cell></Row>"
        ));
        assert!(xml.contains(
            "<Cell ss:StyleID=\"cf_FF0000\"><Data ss:Type=\"String\"/></Cell></Row>"
        ));
        assert!(!xml.contains("<Cell>\n"));
        assert!(!xml.contains("<Cell ss:StyleID=\"cf_FF0000\">\n"));
    }

    #[test]
    fn test_values_are_escaped() {
        let sheet = sheet(&[&["Name", "Color"], &["a<b>&\"c\"", "#FF0000"]]);
        let styles = StyleTable::build(&[color_row(2, "#FF0000")]);
        let xml = serialize_str(&sheet, &styles);

        assert!(xml.contains("a&lt;b&gt;&amp;"));
        assert!(!xml.contains("<Data ss:Type=\"String\">a<b>"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let sheet = sheet(&[
            &["Name", "Color"],
            &["Red", "#FF0000"],
            &["Blue", "0x0000FF"],
        ]);
        let rows = vec![color_row(2, "#FF0000"), color_row(3, "#0000FF")];
        let styles = StyleTable::build(&rows);
        let config = ProcessorConfig::default();

        let first = serialize(&sheet, &styles, &config).unwrap();
        let second = serialize(&sheet, &styles, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_sheet_name() {
        let mut config = ProcessorConfig::default();
        config.sheet_name = "Palette".to_string();

        let sheet = sheet(&[&["Name", "Color"], &["Red", "#FF0000"]]);
        let styles = StyleTable::build(&[color_row(2, "#FF0000")]);
        let xml = String::from_utf8(serialize(&sheet, &styles, &config).unwrap()).unwrap();

        assert!(xml.contains("<Worksheet ss:Name=\"Palette\">"));
    }
}
