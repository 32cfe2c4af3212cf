//! マングル名の構築
//!
//! フィールドのマングル名は宣言型を埋め込み（`?name@Type@`）、
//! メソッドのマングル名はNUL終端されます（`name\0`）。

use std::fmt;

/// 検索キーとなるマングル名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MangledKey {
    text: String,
}

impl MangledKey {
    /// フィールドのキー `?<field>@<declaring_type>@` を構築する
    pub fn field(field_name: &str, declaring_type: &str) -> Self {
        Self {
            text: format!("?{}@{}@", field_name, declaring_type),
        }
    }

    /// 連結済みの `field@declaring_type` からフィールドのキーを構築する
    pub fn field_compound(compound: &str) -> Self {
        Self {
            text: format!("?{}@", compound),
        }
    }

    /// メソッドのキー `<method>\0` を構築する
    pub fn method(method_name: &str) -> Self {
        Self {
            text: format!("{}\0", method_name),
        }
    }

    /// 検索に使うUTF-8バイト列
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for MangledKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // NULはそのまま出力すると見えないのでエスケープする
        write!(f, "{}", self.text.replace('\0', "\\0"))
    }
}

/// 連結済みの `field@declaring_type` を最初の `@` で分割する
pub(crate) fn split_compound(compound: &str) -> (&str, Option<&str>) {
    match compound.split_once('@') {
        Some((name, declaring_type)) => (name, Some(declaring_type)),
        None => (compound, None),
    }
}
