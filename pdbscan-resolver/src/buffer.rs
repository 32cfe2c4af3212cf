//! シンボルバッファ
//!
//! 読み込んだシンボルファイルのバイト列を所有し、部分列検索と
//! 境界チェック付きのリトルエンディアン読み取りを提供します。

use crate::{PdbError, Result};
use memchr::memmem;
use std::fmt;
use std::fs;
use std::path::Path;

/// バッファから読み取り可能な型
pub trait LeReadable: Sized {
    /// 型のサイズ（バイト数）
    const SIZE: usize;

    /// リトルエンディアンのバイト列から値を構築
    ///
    /// `bytes` の長さが `SIZE` と異なる場合は `None` を返します。
    fn from_le_slice(bytes: &[u8]) -> Option<Self>;
}

impl LeReadable for u32 {
    const SIZE: usize = 4;

    fn from_le_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; 4] = bytes.try_into().ok()?;
        Some(u32::from_le_bytes(array))
    }
}

impl LeReadable for u16 {
    const SIZE: usize = 2;

    fn from_le_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; 2] = bytes.try_into().ok()?;
        Some(u16::from_le_bytes(array))
    }
}

impl LeReadable for u8 {
    const SIZE: usize = 1;

    fn from_le_slice(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b] => Some(*b),
            _ => None,
        }
    }
}

/// シンボルファイルのバイト列
///
/// 構築後は変更されません。すべての読み取りは長さに対して境界チェックされます。
#[derive(Clone)]
pub struct SymbolBuffer {
    data: Box<[u8]>,
}

impl fmt::Debug for SymbolBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolBuffer")
            .field("len", &self.data.len())
            .finish()
    }
}

impl SymbolBuffer {
    /// バイト列の所有権を受け取ってバッファを作成する
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// ファイル全体を読み込んでバッファを作成する
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| PdbError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// `needle` の最初の出現位置を検索する
    ///
    /// 空の `needle` は一致しません。
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        memmem::find(&self.data, needle)
    }

    /// `pos` から `len` バイトの範囲を取得する（範囲外なら `None`）
    pub fn slice(&self, pos: usize, len: usize) -> Option<&[u8]> {
        let end = pos.checked_add(len)?;
        self.data.get(pos..end)
    }

    /// `pos` から型付き値を読み取る（リトルエンディアン）
    pub fn read_le<T: LeReadable>(&self, pos: usize) -> Option<T> {
        T::from_le_slice(self.slice(pos, T::SIZE)?)
    }
}

impl From<Vec<u8>> for SymbolBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}
