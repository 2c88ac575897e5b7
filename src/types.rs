//! Types Module
//!
//! クレート内部で使用する共通データ型を定義するモジュール。

/// 入力ファイルの先頭シートをセル値の格子として保持する型
///
/// 行0はヘッダー行です。各行の長さは不揃いの場合があります
/// （使用範囲より短い行はそのまま保持されます）。
/// すべてのセル値は文字列に変換済みです。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// 行のベクターからシートを生成
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// すべての行を取得
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 指定座標のセル値を取得
    ///
    /// 行または列が範囲外の場合は`None`を返します。
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// 指定座標のセル値を文字列として取得（範囲外は空文字列）
    ///
    /// 抽出処理では「セルが存在しない」と「空セル」を区別しないため、
    /// どちらも空文字列として扱います。
    pub fn cell_or_empty(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).unwrap_or("")
    }
}
