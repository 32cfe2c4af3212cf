//! 実行ファイルに対応するデバッグシンボルファイルの探索
//!
//! リゾルバ自体はパスかバイト列しか受け取らないため、
//! パスの導出と存在確認はここで別に提供します。

use std::path::{Path, PathBuf};

/// デバッグシンボルファイルの拡張子
pub const DEBUG_SYMBOLS_EXTENSION: &str = "pdb";

/// 実行ファイルと同じディレクトリ・同じベース名の `.pdb` パスを返す
///
/// ```
/// use pdbscan_resolver::debug_symbols_path;
/// use std::path::Path;
///
/// let pdb = debug_symbols_path("bin/game.exe");
/// assert_eq!(pdb, Path::new("bin/game.pdb"));
/// ```
pub fn debug_symbols_path<P: AsRef<Path>>(executable: P) -> PathBuf {
    executable.as_ref().with_extension(DEBUG_SYMBOLS_EXTENSION)
}

/// 実行ファイルの隣にデバッグシンボルファイルが存在するか
pub fn has_debug_symbols<P: AsRef<Path>>(executable: P) -> bool {
    debug_symbols_path(executable).is_file()
}
