//! Builder Module
//!
//! Fluent Builder APIを提供し、`Processor`インスタンスを段階的に構築する。
//! `Processor::process()`がパイプライン全体（取り込み → 色抽出 →
//! スタイル表 → シリアライズ）を統括するエントリーポイントです。

use std::io::Read;

use crate::api::{ColorRow, ProcessResult};
use crate::color;
use crate::error::ColorSheetError;
use crate::ingest;
use crate::security::SecurityConfig;
use crate::style::StyleTable;
use crate::writer;

/// Excelの列数上限（XFD列）
const MAX_COLUMN_INDEX: usize = 16_384;

/// Excelのシート名の最大文字数
const MAX_SHEET_NAME_LEN: usize = 31;

/// シート名に使用できない文字
const FORBIDDEN_SHEET_NAME_CHARS: [char; 7] = ['\\', '/', '?', '*', '[', ']', ':'];

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ProcessorConfig {
    /// ラベルを読む列のインデックス（0始まり。デフォルト: 0 = A列）
    pub name_column: usize,

    /// 色コードを読む列のインデックス（デフォルト: 1 = B列）
    pub color_column: usize,

    /// スタイル参照を付与する列のインデックス（デフォルト: 3 = D列）
    pub style_column: usize,

    /// 出力するワークシート名
    pub sheet_name: String,

    /// リソース制限
    pub security: SecurityConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            name_column: 0,
            color_column: 1,
            style_column: 3,
            sheet_name: "ColoredSheet".to_string(),
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Processor`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use colorsheet::ProcessorBuilder;
///
/// # fn main() -> Result<(), colorsheet::ColorSheetError> {
/// let processor = ProcessorBuilder::new()
///     .with_sheet_name("Palette")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ProcessorBuilder {
    /// 内部設定（構築中）
    config: ProcessorConfig,
}

impl Default for ProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - ラベル列: A列（インデックス0）
    /// - 色コード列: B列（インデックス1）
    /// - スタイル列: D列（インデックス3）
    /// - ワークシート名: `ColoredSheet`
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
        }
    }

    /// ラベルを読む列を指定する（0始まり）
    pub fn with_name_column(mut self, column: usize) -> Self {
        self.config.name_column = column;
        self
    }

    /// 色コードを読む列を指定する（0始まり）
    pub fn with_color_column(mut self, column: usize) -> Self {
        self.config.color_column = column;
        self
    }

    /// スタイル参照を付与する列を指定する（0始まり）
    pub fn with_style_column(mut self, column: usize) -> Self {
        self.config.style_column = column;
        self
    }

    /// 出力するワークシート名を指定する
    ///
    /// # 制約
    ///
    /// * 空文字列でないこと
    /// * 31文字以内であること
    /// * `\ / ? * [ ] :` を含まないこと
    ///
    /// 制約違反の場合、`build()`時に`ColorSheetError::Config`を返します。
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.config.sheet_name = name.into();
        self
    }

    /// 入力ファイルサイズの上限を指定する（バイト）
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// SpreadsheetML文書1件あたりのセル数上限を指定する
    pub fn with_max_cell_count(mut self, cells: usize) -> Self {
        self.config.security.max_cell_count = cells;
        self
    }

    /// 設定を検証し、`Processor`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `ColorSheetError::Config(String)`: 設定の検証に失敗した場合
    ///   * シート名が空、31文字超過、または使用できない文字を含む
    ///   * 列インデックスがExcelの列数上限を超える
    ///   * 色コード列とスタイル列が同一
    pub fn build(self) -> Result<Processor, ColorSheetError> {
        // 1. シート名の検証
        let name = &self.config.sheet_name;
        if name.is_empty() {
            return Err(ColorSheetError::Config(
                "Sheet name must not be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(ColorSheetError::Config(format!(
                "Sheet name exceeds {} characters: '{}'",
                MAX_SHEET_NAME_LEN, name
            )));
        }
        if let Some(bad) = name.chars().find(|c| FORBIDDEN_SHEET_NAME_CHARS.contains(c)) {
            return Err(ColorSheetError::Config(format!(
                "Sheet name contains forbidden character '{}': '{}'",
                bad, name
            )));
        }

        // 2. 列インデックスの検証
        for (label, column) in [
            ("name", self.config.name_column),
            ("color", self.config.color_column),
            ("style", self.config.style_column),
        ] {
            if column >= MAX_COLUMN_INDEX {
                return Err(ColorSheetError::Config(format!(
                    "{} column index {} is out of range (max: {})",
                    label,
                    column,
                    MAX_COLUMN_INDEX - 1
                )));
            }
        }

        if self.config.color_column == self.config.style_column {
            return Err(ColorSheetError::Config(
                "color column and style column must differ".to_string(),
            ));
        }

        // 3. Processorインスタンス生成
        Ok(Processor::new(self.config))
    }
}

/// 変換処理のファサード
///
/// スプレッドシートのバイト列を、プレビュー行リストと塗りつぶしスタイル付き
/// SpreadsheetML文書へ変換するためのメインエントリーポイントです。
/// 内部に可変状態を持たず、すべての呼び出しは入力バイト列の純関数です。
/// 同時アップロードの調整（再入の抑止、最終結果のみの表示など）は
/// 呼び出し側の責務です。
///
/// # 使用例
///
/// ```rust,no_run
/// use colorsheet::ProcessorBuilder;
/// use std::fs;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let processor = ProcessorBuilder::new().build()?;
/// let bytes = fs::read("colors.xlsx")?;
/// let result = processor.process(&bytes, "colors.xlsx");
///
/// if result.is_success() {
///     fs::write(
///         result.output_file_name.as_deref().unwrap(),
///         result.document().unwrap(),
///     )?;
/// } else {
///     eprintln!("{}", result.message);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Processor {
    /// 変換設定
    config: ProcessorConfig,
}

impl Processor {
    pub(crate) fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// スプレッドシートのバイト列を変換する
    ///
    /// この関数は決してパニックせず、`Err`も返しません。パイプライン内部の
    /// すべての失敗はここで`{success: false, message}`の形に正規化されます。
    /// リトライは行いません。失敗したアップロードはそのアップロードに
    /// ついて終了であり、呼び出し側が新しいファイルで再度呼び出します。
    ///
    /// # 処理フロー
    ///
    /// 1. 取り込み: バイト列 → 先頭シートの格子
    /// 2. 色抽出: ヘッダー行を除く各行の色コード列を検証・正規化
    /// 3. スタイル表の構築: 色コードの重複を除去
    /// 4. シリアライズ: SpreadsheetML文書の生成
    /// 5. 出力ファイル名の導出: 元の拡張子を除去して`_preview.xml`を付加
    ///
    /// # 引数
    ///
    /// * `bytes` - 入力ファイルの生バイト列
    /// * `original_file_name` - 元のファイル名（出力ファイル名の導出に使用）
    pub fn process(&self, bytes: &[u8], original_file_name: &str) -> ProcessResult {
        match self.run(bytes, original_file_name) {
            Ok(result) => result,
            Err(e) => ProcessResult::failure(e.to_string()),
        }
    }

    /// リーダーから読み込んで変換する
    ///
    /// ファイルバイト列の読み込みはパイプライン先頭の唯一のブロッキング
    /// 境界です。読み込み完了後の処理はすべて同期的な純計算です。
    pub fn process_reader<R: Read>(&self, mut input: R, original_file_name: &str) -> ProcessResult {
        let mut buffer = Vec::new();
        if let Err(e) = input.read_to_end(&mut buffer) {
            return ProcessResult::failure(ColorSheetError::Io(e).to_string());
        }
        self.process(&buffer, original_file_name)
    }

    /// プレビュー行リストのみを抽出する
    ///
    /// UI描画用の読み取り専用アクセサです。文書の生成は行いません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<ColorRow>)` - 元の行順のプレビューリスト
    /// * `Err(ColorSheetError)` - 取り込みまたは抽出に失敗した場合
    pub fn preview(&self, bytes: &[u8]) -> Result<Vec<ColorRow>, ColorSheetError> {
        let sheet = ingest::ingest(bytes, &self.config.security)?;
        color::extract_colors(&sheet, &self.config)
    }

    /// パイプライン本体（失敗はエラーとして伝播し、`process`で正規化する）
    fn run(
        &self,
        bytes: &[u8],
        original_file_name: &str,
    ) -> Result<ProcessResult, ColorSheetError> {
        let sheet = ingest::ingest(bytes, &self.config.security)?;
        let rows = color::extract_colors(&sheet, &self.config)?;
        let styles = StyleTable::build(&rows);
        let document = writer::serialize(&sheet, &styles, &self.config)?;
        let output_file_name = output_file_name(original_file_name);

        Ok(ProcessResult::completed(rows, document, output_file_name))
    }
}

/// 出力ファイル名を導出する
///
/// 最後のドット以降が空でなくスラッシュを含まない場合のみ拡張子とみなして
/// 除去し、`_preview.xml`を付加します。
fn output_file_name(original: &str) -> String {
    let stem = match original.rfind('.') {
        Some(index) if index + 1 < original.len() && !original[index + 1..].contains('/') => {
            &original[..index]
        }
        _ => original,
    };
    format!("{}_preview.xml", stem)
}
