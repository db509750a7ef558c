//! 不透明ピクセルを単色で塗りつぶし、テンプレート画像にするモジュール。
//!
//! アルファが 0 でないピクセルの R, G, B を塗りつぶし色で上書きし、アルファは変更しません。

use super::color::RgbColor;
use super::raster_image::RasterImage;
use thiserror::Error;
use tracing::debug;

/// 1ピクセルのバイト数 (R, G, B, A)。
const PIXEL_STRIDE: usize = 4;
const ALPHA_OFFSET: usize = 3;

/// 画像のデコード・書き換え・エンコードで発生するエラー。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecolorError {
    /// 1バイト×4チャンネルの 32bit ピクセル以外は扱えない。
    #[error(
        "4バイト/32bit のピクセルのみ対応しています (bits_per_pixel={bits_per_pixel}, bytes_per_pixel={bytes_per_pixel})"
    )]
    UnsupportedLayout {
        bits_per_pixel: u16,
        /// `bits_per_pixel / bits_per_sample`
        bytes_per_pixel: u16,
    },

    #[error("ピクセルバッファの長さが不正です (期待値 {expected}, 実際 {actual})")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("画像のデコードに失敗しました: {0}")]
    DecodeFailed(String),

    #[error("PNGのエンコードに失敗しました: {0}")]
    EncodeFailed(String),
}

impl RecolorError {
    pub(crate) fn unsupported_layout(image: &RasterImage) -> Self {
        RecolorError::UnsupportedLayout {
            bits_per_pixel: image.bits_per_pixel(),
            bytes_per_pixel: image.samples_per_pixel(),
        }
    }
}

/// 画像を塗りつぶし色でテンプレート化します。
///
/// レイアウトが RGBA 各 8bit でない場合は `UnsupportedLayout` を返し、バッファには一切触れません。
pub fn recolor(image: &mut RasterImage, fill_color: RgbColor) -> Result<(), RecolorError> {
    if !image.has_rgba8_layout() {
        return Err(RecolorError::unsupported_layout(image));
    }

    let pixel_count = image.pixel_count();
    let [red, green, blue] = fill_color.to_bytes();
    let buffer = image.as_bytes_mut();

    for i in 0..pixel_count {
        let base = i * PIXEL_STRIDE;
        if buffer[base + ALPHA_OFFSET] != 0 {
            buffer[base] = red;
            buffer[base + 1] = green;
            buffer[base + 2] = blue;
        }
    }

    debug!(
        width = image.width(),
        height = image.height(),
        fill = %fill_color,
        "ピクセルを書き換えました"
    );
    Ok(())
}
