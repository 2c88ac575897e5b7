//! Security Module
//!
//! リソース制限を定義するモジュール。
//! シート全体をメモリに展開する設計のため、入力サイズとセル数に
//! 上限を設けて過大な入力を早期に拒否します。

/// セキュリティ設定
///
/// ファイル処理時のリソース制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 1GB (1_073_741_824 bytes)
    pub max_input_file_size: u64,
    /// SpreadsheetML文書1件あたりの最大セル数
    /// デフォルト: 10_000_000
    pub max_cell_count: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 1_073_741_824, // 1GB
            max_cell_count: 10_000_000,
        }
    }
}
