use super::output_path::{destination_path, OutputMode};
use super::path_error::PathError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// PNGファイルへのパスを表現し、その妥当性を保証する構造体。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngFilePath(PathBuf);

impl PngFilePath {
    // --- Public Methods ---

    /// 新しい `PngFilePath` インスタンスを生成する。
    ///
    /// パスが存在し、ファイルであり、かつ拡張子が `.png` (大文字小文字は区別しない) であることを検証する。
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // 存在し、かつファイルであることを検証
        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は存在しません。",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' はファイルではありません。",
                path.display()
            )));
        }

        // 拡張子が.pngであることを検証
        if !Self::has_png_extension(path) {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は.pngファイルではありません。",
                path.display()
            )));
        }
        Ok(Self(path.to_path_buf()))
    }

    /// 内部の `Path` への参照を返す。
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// ファイルの中身をバイト列で読み込む。
    pub fn read_bytes(&self) -> Result<Vec<u8>, PathError> {
        fs::read(&self.0).map_err(PathError::IoError)
    }

    /// 出力モードに応じた書き出し先のパスを返す。
    pub fn destination(&self, mode: OutputMode) -> PathBuf {
        destination_path(&self.0, mode)
    }

    // --- Private Helper Methods ---

    fn has_png_extension(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for PngFilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// 候補のパスから変換対象の PNG ファイルだけを順序を保って取り出す。
///
/// 対象外のパスは警告ログを出して読み飛ばす。
pub fn select_png_inputs<I, P>(candidates: I) -> Vec<PngFilePath>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    candidates
        .into_iter()
        .filter_map(|candidate| match PngFilePath::new(candidate.as_ref()) {
            Ok(png) => Some(png),
            Err(e) => {
                warn!("スキップします: {}", e);
                None
            }
        })
        .collect()
}
