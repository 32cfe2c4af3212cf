//! 解決結果のレコード
//!
//! マングル名の一致位置の手前に置かれた固定長レコードです。
//! バッファからコピーして返すため、リゾルバ破棄後も参照切れになりません。

use crate::buffer::SymbolBuffer;
use crate::SymbolKind;

/// 固定レイアウトのレコード
pub trait SymbolRecord: Sized {
    /// レコードの有効バイト数
    const SIZE: usize;
    /// このレコードを持つシンボルの種類
    const KIND: SymbolKind;

    /// `start` からレコードを読み取る
    ///
    /// レコードがバッファに収まらない場合は `None` を返します。
    fn decode(buffer: &SymbolBuffer, start: usize) -> Option<Self>;
}

/// フィールドレコード（オフセット u32 + セグメント u16、6バイト）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRecord {
    /// バッファ内でのレコード先頭位置
    pub record_start: usize,
    /// セグメント内オフセット
    pub segment_offset: u32,
    /// セグメント番号
    pub segment: u16,
}

impl SymbolRecord for FieldRecord {
    const SIZE: usize = 6;
    const KIND: SymbolKind = SymbolKind::Field;

    fn decode(buffer: &SymbolBuffer, start: usize) -> Option<Self> {
        // 先に全体の範囲を確認し、部分的な読み取りを避ける
        buffer.slice(start, Self::SIZE)?;
        Some(Self {
            record_start: start,
            segment_offset: buffer.read_le(start)?,
            segment: buffer.read_le(start + 4)?,
        })
    }
}

/// メソッドレコード（ヘッダオフセット u32、4バイト）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodRecord {
    /// バッファ内でのレコード先頭位置
    pub record_start: usize,
    pub header_offset: u32,
}

impl SymbolRecord for MethodRecord {
    const SIZE: usize = 4;
    const KIND: SymbolKind = SymbolKind::Method;

    fn decode(buffer: &SymbolBuffer, start: usize) -> Option<Self> {
        Some(Self {
            record_start: start,
            header_offset: buffer.read_le(start)?,
        })
    }
}
