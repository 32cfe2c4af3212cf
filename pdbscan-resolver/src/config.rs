//! リゾルバ設定
//!
//! 一致位置からレコード先頭までの距離（バックオフセット）を保持します。
//! 既定値は対象ファイル形式のレイアウトに合わせてあります。

/// フィールドレコードの既定バックオフセット
pub const DEFAULT_FIELD_BACK_OFFSET: usize = 0x06;

/// メソッドレコードの既定バックオフセット
pub const DEFAULT_METHOD_BACK_OFFSET: usize = 0x07;

/// リゾルバ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// フィールド名の一致位置からフィールドレコード先頭までのバイト数
    pub field_back_offset: usize,
    /// メソッド名の一致位置からメソッドレコード先頭までのバイト数
    pub method_back_offset: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            field_back_offset: DEFAULT_FIELD_BACK_OFFSET,
            method_back_offset: DEFAULT_METHOD_BACK_OFFSET,
        }
    }
}

impl ResolverConfig {
    pub fn with_field_back_offset(mut self, back_offset: usize) -> Self {
        self.field_back_offset = back_offset;
        self
    }

    pub fn with_method_back_offset(mut self, back_offset: usize) -> Self {
        self.method_back_offset = back_offset;
        self
    }
}
