//! pdbscan PDBシンボル解決
//!
//! このクレートは、デバッグシンボルファイル（PDB）のバイト列からマングル名を検索し、
//! その直前に置かれた固定長レコードを読み取ってフィールドやメソッドのオフセットを解決します。
//! PDBのストリーム構造は解析せず、ファイルを不透明なバイト列として扱います。

pub mod error;
pub mod config;
pub mod buffer;
pub mod mangle;
pub mod record;
pub mod resolver;
pub mod locate;

pub use error::{PdbError, SymbolKind};
pub use config::ResolverConfig;
pub use buffer::{LeReadable, SymbolBuffer};
pub use mangle::MangledKey;
pub use record::{FieldRecord, MethodRecord, SymbolRecord};
pub use resolver::PdbResolver;
pub use locate::{debug_symbols_path, has_debug_symbols};

/// シンボル解決の結果型
pub type Result<T> = std::result::Result<T, PdbError>;
