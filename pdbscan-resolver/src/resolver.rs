//! シンボル解決機能

use crate::buffer::SymbolBuffer;
use crate::mangle::{split_compound, MangledKey};
use crate::record::{FieldRecord, MethodRecord, SymbolRecord};
use crate::{PdbError, ResolverConfig, Result, SymbolKind};
use std::path::Path;
use tracing::{debug, trace};

/// PDBシンボルリゾルバ
///
/// シンボルファイルのバイト列を所有し、マングル名の検索によって
/// フィールドとメソッドのレコードを解決します。
/// バッファは `dispose` またはスコープ終了時に一度だけ解放されます。
#[derive(Debug)]
pub struct PdbResolver {
    /// シンボルファイルのバイト列（破棄後は `None`）
    buffer: Option<SymbolBuffer>,
    config: ResolverConfig,
}

impl PdbResolver {
    /// バイト列からリゾルバを作成する
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        debug!("PdbResolver created from {} bytes", bytes.len());
        Self {
            buffer: Some(SymbolBuffer::new(bytes)),
            config: ResolverConfig::default(),
        }
    }

    /// シンボルファイルを読み込んでリゾルバを作成する
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let buffer = SymbolBuffer::read_file(path)?;
        debug!("PdbResolver loaded {:?} ({} bytes)", path, buffer.len());
        Ok(Self {
            buffer: Some(buffer),
            config: ResolverConfig::default(),
        })
    }

    /// レコードレイアウトの設定を差し替える
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// バッファ長（破棄後は0）
    pub fn len(&self) -> usize {
        self.buffer.as_ref().map_or(0, SymbolBuffer::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// フィールド `declaring_type::field_name` のレコードを解決する
    pub fn resolve_field(&self, field_name: &str, declaring_type: &str) -> Result<FieldRecord> {
        let key = MangledKey::field(field_name, declaring_type);
        self.resolve_record(&key, self.config.field_back_offset, || {
            PdbError::SymbolNotFound {
                kind: SymbolKind::Field,
                name: field_name.to_string(),
                declaring_type: Some(declaring_type.to_string()),
            }
        })
    }

    /// 連結済みの `field@declaring_type` からフィールドのレコードを解決する
    pub fn resolve_field_compound(&self, compound: &str) -> Result<FieldRecord> {
        let key = MangledKey::field_compound(compound);
        self.resolve_record(&key, self.config.field_back_offset, || {
            let (name, declaring_type) = split_compound(compound);
            PdbError::SymbolNotFound {
                kind: SymbolKind::Field,
                name: name.to_string(),
                declaring_type: declaring_type.map(str::to_string),
            }
        })
    }

    /// メソッド `method_name` のレコードを解決する
    pub fn resolve_method(&self, method_name: &str) -> Result<MethodRecord> {
        let key = MangledKey::method(method_name);
        self.resolve_record(&key, self.config.method_back_offset, || {
            PdbError::SymbolNotFound {
                kind: SymbolKind::Method,
                name: method_name.to_string(),
                declaring_type: None,
            }
        })
    }

    /// キーを検索し、一致位置の `back_offset` バイト手前のレコードを読み取る
    fn resolve_record<R, F>(&self, key: &MangledKey, back_offset: usize, not_found: F) -> Result<R>
    where
        R: SymbolRecord,
        F: FnOnce() -> PdbError,
    {
        let buffer = self.buffer.as_ref().ok_or(PdbError::UseAfterDispose)?;

        trace!("Searching {} key '{}'", R::KIND, key);
        let Some(match_index) = buffer.find(key.as_bytes()) else {
            debug!("{} key '{}' not found", R::KIND, key);
            return Err(not_found());
        };

        let malformed = || PdbError::MalformedBuffer {
            key: key.to_string(),
            match_index,
            back_offset,
            record_size: R::SIZE,
            buffer_len: buffer.len(),
        };

        let record_start = match_index.checked_sub(back_offset).ok_or_else(malformed)?;
        let record = R::decode(buffer, record_start).ok_or_else(malformed)?;

        debug!(
            "Resolved {} key '{}': match={:#x}, record_start={:#x}",
            R::KIND, key, match_index, record_start
        );
        Ok(record)
    }

    /// バッファを解放する
    ///
    /// 二度目以降の呼び出しは何もしません。解放後の解決は
    /// `PdbError::UseAfterDispose` で失敗します。
    pub fn dispose(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            debug!("PdbResolver disposed ({} bytes released)", buffer.len());
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.buffer.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `prefix` の後にレコードとキーを並べたバッファを作る
    fn buffer_with(prefix: &[u8], record: &[u8], key: &[u8]) -> Vec<u8> {
        let mut bytes = prefix.to_vec();
        bytes.extend_from_slice(record);
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(b"trailing");
        bytes
    }

    #[test]
    fn test_resolve_field() {
        let bytes = buffer_with(&[0xaa; 6], &[0x10, 0x00, 0x00, 0x00, 0x02, 0x00], b"?Foo@Bar@");
        let resolver = PdbResolver::from_bytes(bytes);

        let record = resolver.resolve_field("Foo", "Bar").unwrap();
        assert_eq!(record.record_start, 6);
        assert_eq!(record.segment_offset, 0x10);
        assert_eq!(record.segment, 0x02);
    }

    #[test]
    fn test_resolve_field_compound() {
        let bytes = buffer_with(&[0; 3], &[0x20, 0x01, 0x00, 0x00, 0x01, 0x00], b"?m_health@Player@");
        let resolver = PdbResolver::from_bytes(bytes);

        let compound = resolver.resolve_field_compound("m_health@Player").unwrap();
        let split = resolver.resolve_field("m_health", "Player").unwrap();
        assert_eq!(compound, split);
        assert_eq!(compound.segment_offset, 0x120);
    }

    #[test]
    fn test_resolve_method() {
        let bytes = buffer_with(&[0; 2], &[0x00, 0x30, 0x00, 0x00, 0xee, 0xee, 0xee], b"Update\0");
        let resolver = PdbResolver::from_bytes(bytes);

        let record = resolver.resolve_method("Update").unwrap();
        assert_eq!(record.record_start, 2);
        assert_eq!(record.header_offset, 0x3000);
    }

    #[test]
    fn test_method_key_requires_terminator() {
        // "Update" の後にNULがないので一致しない
        let resolver = PdbResolver::from_bytes(b"0123456789UpdateAll\0".to_vec());
        let err = resolver.resolve_method("Update").unwrap_err();
        assert!(matches!(
            err,
            PdbError::SymbolNotFound { kind: SymbolKind::Method, ref name, declaring_type: None }
                if name == "Update"
        ));
    }

    #[test]
    fn test_field_not_found() {
        let resolver = PdbResolver::from_bytes(b"nothing to see here".to_vec());
        match resolver.resolve_field("Foo", "Bar") {
            Err(PdbError::SymbolNotFound { kind, name, declaring_type }) => {
                assert_eq!(kind, SymbolKind::Field);
                assert_eq!(name, "Foo");
                assert_eq!(declaring_type.as_deref(), Some("Bar"));
            }
            other => panic!("Expected SymbolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_compound_not_found_splits_name() {
        let resolver = PdbResolver::from_bytes(Vec::new());
        match resolver.resolve_field_compound("Foo@Bar") {
            Err(PdbError::SymbolNotFound { name, declaring_type, .. }) => {
                assert_eq!(name, "Foo");
                assert_eq!(declaring_type.as_deref(), Some("Bar"));
            }
            other => panic!("Expected SymbolNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_method_too_close_to_start() {
        let resolver = PdbResolver::from_bytes(b"abcUpdate\0".to_vec());
        match resolver.resolve_method("Update") {
            Err(PdbError::MalformedBuffer { match_index, back_offset, .. }) => {
                assert_eq!(match_index, 3);
                assert_eq!(back_offset, 7);
            }
            other => panic!("Expected MalformedBuffer, got {:?}", other),
        }
    }

    #[test]
    fn test_field_too_close_to_start() {
        let resolver = PdbResolver::from_bytes(b"\x01\x02?Foo@Bar@".to_vec());
        assert!(matches!(
            resolver.resolve_field("Foo", "Bar"),
            Err(PdbError::MalformedBuffer { match_index: 2, .. })
        ));
    }

    #[test]
    fn test_record_overrun_with_custom_layout() {
        // バックオフセットがレコード長より短いと、レコードが一致位置を越えて伸びる
        let config = ResolverConfig::default().with_method_back_offset(1);
        let resolver = PdbResolver::from_bytes(b"\0\0\0X\0".to_vec()).with_config(config);
        assert!(matches!(
            resolver.resolve_method("X"),
            Err(PdbError::MalformedBuffer { record_size: 4, buffer_len: 5, .. })
        ));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut bytes = buffer_with(&[0; 6], &[1, 0, 0, 0, 1, 0], b"?Foo@Bar@");
        bytes.extend_from_slice(&buffer_with(&[0; 6], &[2, 0, 0, 0, 2, 0], b"?Foo@Bar@"));
        let resolver = PdbResolver::from_bytes(bytes);

        let record = resolver.resolve_field("Foo", "Bar").unwrap();
        assert_eq!(record.segment_offset, 1);
        assert_eq!(record.segment, 1);
    }

    #[test]
    fn test_empty_buffer() {
        let resolver = PdbResolver::from_bytes(Vec::new());
        assert!(resolver.is_empty());
        assert!(matches!(resolver.resolve_field("Foo", "Bar"), Err(PdbError::SymbolNotFound { .. })));
        assert!(matches!(resolver.resolve_field_compound("Foo@Bar"), Err(PdbError::SymbolNotFound { .. })));
        assert!(matches!(resolver.resolve_method("Update"), Err(PdbError::SymbolNotFound { .. })));
    }

    #[test]
    fn test_use_after_dispose() {
        let bytes = buffer_with(&[0; 7], &[0; 6], b"?Foo@Bar@Update\0");
        let mut resolver = PdbResolver::from_bytes(bytes);
        assert!(resolver.resolve_field("Foo", "Bar").is_ok());

        resolver.dispose();
        assert!(resolver.is_disposed());
        assert_eq!(resolver.len(), 0);
        assert!(matches!(resolver.resolve_field("Foo", "Bar"), Err(PdbError::UseAfterDispose)));
        assert!(matches!(resolver.resolve_field_compound("Foo@Bar"), Err(PdbError::UseAfterDispose)));
        assert!(matches!(resolver.resolve_method("Update"), Err(PdbError::UseAfterDispose)));

        // 二度目の破棄は何もしない
        resolver.dispose();
        assert!(resolver.is_disposed());
    }

    #[test]
    fn test_resolver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PdbResolver>();
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let bytes = buffer_with(&[0x55; 16], &[0xde, 0xad, 0xbe, 0xef, 0x07, 0x00], b"?Foo@Bar@");
        let resolver = PdbResolver::from_bytes(bytes);

        let first = resolver.resolve_field("Foo", "Bar").unwrap();
        let second = resolver.resolve_field("Foo", "Bar").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.segment_offset, 0xefbe_adde);
    }
}
