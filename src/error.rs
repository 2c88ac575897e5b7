//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// colorsheetクレート全体で使用するエラー型
///
/// このエラー型は、スプレッドシートの読み込み、色コードの抽出、
/// SpreadsheetML文書の生成処理中に発生するすべてのエラーを統一的に扱うために
/// 使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Parse`: コンテナ形式の解析中に発生したエラー（calamine由来）
/// - `Xml`: SpreadsheetMLの読み書き中に発生したエラー（quick-xml由来）
/// - `Decode`: 入力バイト列が認識可能なスプレッドシート形式でない、
///   またはシートを1つも含まない場合のエラー
/// - `NoColorsFound`: 解析には成功したが、色コード列に有効な16進色コードが
///   1件も存在しなかった場合のエラー
/// - `Config`: ビルダー設定の検証に失敗したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use colorsheet::ColorSheetError;
/// use std::fs::File;
///
/// fn read_spreadsheet(path: &str) -> Result<(), ColorSheetError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ColorSheetError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// コンテナ形式の解析中に発生したエラー
    ///
    /// calamineクレートがXLS/XLSXコンテナを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイルなどが原因となります。
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to parse spreadsheet container: {0}")]
    Parse(#[from] calamine::Error),

    /// SpreadsheetMLの読み書き中に発生したエラー
    ///
    /// quick-xmlクレートがXMLを解析または生成する際に発生したエラーです。
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// 入力バイト列をスプレッドシートとして解釈できなかったエラー
    ///
    /// 認識できないコンテナ形式、空の入力、シートを1つも含まない
    /// ワークブックなどが原因となります。メッセージはそのまま
    /// ユーザーに提示されます。
    #[error("{0}")]
    Decode(String),

    /// 色コード列に有効な16進色コードが1件も見つからなかったエラー
    ///
    /// 解析自体には成功しているため、パイプライン全体で唯一の
    /// 入力内容に対する検証エラーです。メッセージは利用側UIの
    /// ロケールに合わせた固定文言です。
    #[error("在B列中没有检测到有效的十六进制色码。")]
    NoColorsFound,

    /// 設定の検証に失敗したエラー
    ///
    /// `ProcessorBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、シート名が31文字を超える場合や、
    /// 色コード列とスタイル列が同一の場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use colorsheet::{ProcessorBuilder, ColorSheetError};
    ///
    /// let result = ProcessorBuilder::new()
    ///     .with_sheet_name("")  // 無効なシート名
    ///     .build();
    ///
    /// match result {
    ///     Err(ColorSheetError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// リソース制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限超過、XML文書内のセル数上限超過などの
    /// 制限に違反した場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
