//! シンボル解決のエラー型

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 解決対象のシンボルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// フィールド（`?name@Type@`）
    Field,
    /// メソッド（`name\0`）
    Method,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Field => write!(f, "field"),
            SymbolKind::Method => write!(f, "method"),
        }
    }
}

/// シンボル解決のエラー
///
/// 解決は常に完全なレコードを返すか、以下のいずれか一つで失敗します。
/// どのエラーも自動的なリトライは行いません。
#[derive(Error, Debug)]
pub enum PdbError {
    /// マングル名がバッファ内に一度も出現しない
    ///
    /// マングル前の名前（と宣言型）を保持します。
    #[error("{kind} symbol not found: {}", display_name(.name, .declaring_type.as_deref()))]
    SymbolNotFound {
        kind: SymbolKind,
        name: String,
        declaring_type: Option<String>,
    },

    /// 一致は見つかったが、その直前のレコードがバッファに収まらない
    ///
    /// 一致位置がファイル先頭に近すぎる（レコード開始位置が負になる）か、
    /// レコードがバッファ末尾を越える場合です。入力ファイルの破損、
    /// またはファイル形式とレコードレイアウトの不一致を示します。
    #[error(
        "malformed buffer: match of {key:?} at {match_index} leaves no room for a \
         {record_size}-byte record {back_offset} bytes before it (buffer length {buffer_len})"
    )]
    MalformedBuffer {
        key: String,
        match_index: usize,
        back_offset: usize,
        record_size: usize,
        buffer_len: usize,
    },

    /// 破棄済みのリゾルバで解決を試みた
    #[error("resolver used after its buffer was disposed")]
    UseAfterDispose,

    /// シンボルファイルの読み込みに失敗した
    #[error("failed to read symbol file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_name(name: &str, declaring_type: Option<&str>) -> String {
    match declaring_type {
        Some(ty) => format!("{}::{}", ty, name),
        None => name.to_string(),
    }
}
