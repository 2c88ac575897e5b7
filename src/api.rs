//! Public API Types
//!
//! 公開APIで使用する結果型を定義するモジュール。
//! フィールド名は利用側UI（JavaScript）の契約に合わせ、
//! シリアライズ時にcamelCaseへ変換されます。

use serde::Serialize;

/// 生成される文書バイト列のMIMEタイプ
///
/// ダウンロードリンクのBlob生成などで使用します。
pub const OUTPUT_MIME_TYPE: &str = "application/vnd.ms-excel";

/// プレビュー1行分の色情報
///
/// 入力シートのうち、色コード列が有効な16進色コードだった行ごとに
/// 1件生成されます。`hex`は常に`#RRGGBB`（大文字6桁）へ正規化されています。
///
/// # 使用例
///
/// ```rust
/// use colorsheet::ColorRow;
///
/// let row = ColorRow {
///     row: 2,
///     name: "Red".to_string(),
///     hex: "#FF0000".to_string(),
///     preview: "#FF0000".to_string(),
/// };
/// assert_eq!(row.hex, row.preview);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorRow {
    /// 表示用の行番号（1始まり。シート上の行インデックス + 1）
    pub row: u32,

    /// ラベル（名前列の値。空の場合は `"Row {N}"` の形式）
    pub name: String,

    /// 正規化済みの16進色コード（`#RRGGBB`、大文字）
    pub hex: String,

    /// プレビュー表示用の色トークン（`hex`と同値。CSSのfill値として使用可能）
    pub preview: String,
}

/// 1回の変換処理の結果
///
/// `Processor::process()`が常にこの型を返します。失敗時は`success`と
/// `message`のみが設定され、他のフィールドは`None`になります。
/// アップロードごとに1つ生成される不変の値で、次のアップロード時に
/// 破棄される前提です。
///
/// 部分的な成功はありません。有効な文書とプレビューリストの両方が
/// 生成されるか、どちらも生成されないかのいずれかです。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    /// 変換が成功したかどうか
    pub success: bool,

    /// ユーザー向けメッセージ（成功時は`"Success"`、失敗時はエラー内容）
    pub message: String,

    /// 有効な色コードが検出された行数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,

    /// プレビュー用の行リスト（シート上の出現順）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<ColorRow>>,

    /// 生成されたSpreadsheetML文書のバイト列
    ///
    /// JSONシリアライズの対象外です。バイナリが必要な場合は
    /// `document()`アクセサを使用してください。
    #[serde(skip)]
    pub document: Option<Vec<u8>>,

    /// ダウンロード用のファイル名（元のファイル名 + `_preview.xml`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file_name: Option<String>,
}

impl ProcessResult {
    /// 成功結果を生成
    pub(crate) fn completed(
        preview: Vec<ColorRow>,
        document: Vec<u8>,
        output_file_name: String,
    ) -> Self {
        Self {
            success: true,
            message: "Success".to_string(),
            row_count: Some(preview.len()),
            preview: Some(preview),
            document: Some(document),
            output_file_name: Some(output_file_name),
        }
    }

    /// 失敗結果を生成
    ///
    /// `success`と`message`以外のフィールドはすべて`None`になります。
    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            row_count: None,
            preview: None,
            document: None,
            output_file_name: None,
        }
    }

    /// 変換が成功したかどうかを取得
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// プレビュー行のスライスを取得（失敗時は空スライス）
    ///
    /// UI描画用の読み取り専用アクセサです。
    pub fn preview_rows(&self) -> &[ColorRow] {
        self.preview.as_deref().unwrap_or(&[])
    }

    /// 生成された文書バイト列を取得（失敗時は`None`）
    pub fn document(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }
}
