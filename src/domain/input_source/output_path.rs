use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 変換結果の書き出し方。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// 元のファイルを上書きする。
    Overwrite,
    /// 同じディレクトリに `<名前>.template.<拡張子>` として書き出す。
    #[default]
    Sibling,
}

impl OutputMode {
    pub fn from_overwrite_flag(overwrite: bool) -> Self {
        if overwrite {
            OutputMode::Overwrite
        } else {
            OutputMode::Sibling
        }
    }
}

/// 入力パスから書き出し先のパスを導出する。
///
/// `Sibling` では最後の拡張子の前に `.template` を挿入する (例: `a/icon.png` -> `a/icon.template.png`)。
/// 拡張子の大文字小文字はそのまま残す。
pub fn destination_path(source: &Path, mode: OutputMode) -> PathBuf {
    match mode {
        OutputMode::Overwrite => source.to_path_buf(),
        OutputMode::Sibling => {
            let mut name: OsString = source.file_stem().unwrap_or_default().to_os_string();
            name.push(".template");
            if let Some(ext) = source.extension() {
                name.push(".");
                name.push(ext);
            }
            source.with_file_name(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_inserts_template_before_extension() {
        assert_eq!(
            destination_path(Path::new("a/icon.png"), OutputMode::Sibling),
            PathBuf::from("a/icon.template.png")
        );
        assert_eq!(
            destination_path(Path::new("icon.png"), OutputMode::Sibling),
            PathBuf::from("icon.template.png")
        );
    }

    #[test]
    fn sibling_keeps_inner_dots_and_extension_case() {
        assert_eq!(
            destination_path(Path::new("/x/y/icon@2x.v1.PNG"), OutputMode::Sibling),
            PathBuf::from("/x/y/icon@2x.v1.template.PNG")
        );
    }

    #[test]
    fn overwrite_returns_source_path() {
        assert_eq!(
            destination_path(Path::new("a/icon.png"), OutputMode::Overwrite),
            PathBuf::from("a/icon.png")
        );
    }

    #[test]
    fn overwrite_flag_maps_to_mode() {
        assert_eq!(OutputMode::from_overwrite_flag(true), OutputMode::Overwrite);
        assert_eq!(OutputMode::from_overwrite_flag(false), OutputMode::Sibling);
        assert_eq!(OutputMode::default(), OutputMode::Sibling);
    }
}
