// --- 依存モジュール ---

use super::raster_image::RasterImage;
use super::template_recolor::RecolorError;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// PNG をディスクへ保存する際のエラー。
#[derive(Debug, Error)]
pub enum SaveError {
    /// 一時ファイルの作成・書き込みに失敗した場合。保存先ディレクトリが無い、権限が無いなど。
    #[error("一時ファイルへの書き込みに失敗しました: {0}")]
    Write(#[source] std::io::Error),
    /// 一時ファイルを保存先へリネームできなかった場合。
    #[error("保存先への置き換えに失敗しました: {0}")]
    Persist(#[source] std::io::Error),
}

/// メモリ上にエンコードされたテンプレート PNG。
///
/// `image` クレートの PNG エンコーダは gAMA チャンクを書き出さないため、
/// ビューア側でのガンマ補正による色ずれは起きません。
#[derive(Debug, Clone)]
pub struct TemplatePng {
    png_data: Vec<u8>,
}

impl TemplatePng {
    /// RGBA 8bit の `RasterImage` を PNG にエンコードします。
    ///
    /// # 戻り値
    /// - `Err(RecolorError::UnsupportedLayout)`: RGBA 8bit 以外のレイアウトの場合。
    /// - `Err(RecolorError::EncodeFailed)`: エンコーダがエラーを返した場合。
    pub fn create(image: &RasterImage) -> Result<Self, RecolorError> {
        if !image.has_rgba8_layout() {
            return Err(RecolorError::unsupported_layout(image));
        }

        let mut png_data: Vec<u8> = Vec::new();
        PngEncoder::new(&mut png_data)
            .write_image(
                image.as_bytes(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| RecolorError::EncodeFailed(e.to_string()))?;

        Ok(Self { png_data })
    }

    pub fn png_data(&self) -> &[u8] {
        &self.png_data
    }

    /// PNG を `path` にアトミックに保存します。
    ///
    /// 同じディレクトリに一時ファイルを書き出してからリネームするので、
    /// 失敗しても既存ファイルが中途半端な状態で残ることはありません。
    ///
    /// パーミッションは既存の保存先のものを引き継ぎ、保存先が無ければ `permissions_from` のものを使う。
    /// `path` がシンボリックリンクの場合はリンク先のファイルを置き換える。
    pub fn save_to_path(&self, path: &Path, permissions_from: &Path) -> Result<(), SaveError> {
        let target = resolve_symlink(path);
        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(SaveError::Write)?;
        tmp.write_all(&self.png_data).map_err(SaveError::Write)?;

        // NamedTempFile は 0600 で作られるため、そのままだとパーミッションが変わってしまう
        let permissions = fs::metadata(&target)
            .or_else(|_| fs::metadata(permissions_from))
            .map(|m| m.permissions());
        if let Ok(permissions) = permissions {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(SaveError::Write)?;
        }

        tmp.as_file().sync_all().map_err(SaveError::Write)?;
        // 失敗時は PersistError が一時ファイルごと破棄される
        tmp.persist(&target)
            .map_err(|e| SaveError::Persist(e.error))?;
        Ok(())
    }
}

/// シンボリックリンクならリンク先の実パスを返す。それ以外はそのまま。
fn resolve_symlink(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rgba_image() -> RasterImage {
        RasterImage::from_raw(2, 1, 32, 8, vec![0, 255, 0, 255, 10, 20, 30, 0]).unwrap()
    }

    #[test]
    fn create_encodes_decodable_png_with_alpha() {
        let image = rgba_image();
        let png = TemplatePng::create(&image).unwrap();

        let decoded = RasterImage::decode(png.png_data()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn create_does_not_write_gamma_chunk() {
        let png = TemplatePng::create(&rgba_image()).unwrap();
        assert!(!png.png_data().windows(4).any(|w| w == b"gAMA"));
    }

    #[test]
    fn create_rejects_rgb_layout() {
        let image = RasterImage::from_raw(1, 1, 24, 8, vec![1, 2, 3]).unwrap();
        let res = TemplatePng::create(&image);
        assert!(matches!(
            res,
            Err(RecolorError::UnsupportedLayout {
                bits_per_pixel: 24,
                bytes_per_pixel: 3
            })
        ));
    }

    #[test]
    fn save_to_path_writes_and_replaces_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("icon.png");
        fs::write(&path, b"old content").unwrap();

        let png = TemplatePng::create(&rgba_image()).unwrap();
        png.save_to_path(&path, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), png.png_data());
        // 一時ファイルが残っていないこと
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_to_path_fails_for_missing_directory() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("missing").join("icon.png");

        let png = TemplatePng::create(&rgba_image()).unwrap();
        let res = png.save_to_path(&path, &path);

        assert!(matches!(res, Err(SaveError::Write(_))));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn save_to_path_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("icon.png");
        fs::write(&path, b"old content").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        let png = TemplatePng::create(&rgba_image()).unwrap();
        png.save_to_path(&path, &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn save_to_path_replaces_symlink_target() {
        let dir = tempdir().expect("Failed to create temp directory");
        let real = dir.path().join("real.png");
        let link = dir.path().join("link.png");
        fs::write(&real, b"old content").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let png = TemplatePng::create(&rgba_image()).unwrap();
        png.save_to_path(&link, &link).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read(&real).unwrap(), png.png_data());
    }
}
