// デコード済みビットマップを保持するモジュール。

use super::template_recolor::RecolorError;
use image::{DynamicImage, GenericImageView};

/// メモリ上にデコードされたビットマップ画像。
///
/// ピクセルデータは行優先で、行間のパディングは無いものとして扱います。
/// コンストラクタでバッファ長が `width * height * bytes_per_pixel` と一致することを検証するため、
/// 生成後のインデックス計算が範囲外になることはありません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    bits_per_pixel: u16,
    bits_per_sample: u16,
    data: Vec<u8>,
}

impl RasterImage {
    /// 画像ファイルのバイト列をデコードして `RasterImage` を生成します。
    ///
    /// フォーマットは `image` クレートが推定します。レイアウトの検証はここでは行わず、
    /// 書き換え時 (`recolor`) とエンコード時に行います。
    pub fn decode(bytes: &[u8]) -> Result<Self, RecolorError> {
        let dynimg = image::load_from_memory(bytes)
            .map_err(|e| RecolorError::DecodeFailed(e.to_string()))?;
        Self::from_dynamic_image(dynimg)
    }

    /// `DynamicImage` のカラータイプからビット深度を導出して変換します。
    pub fn from_dynamic_image(dynimg: DynamicImage) -> Result<Self, RecolorError> {
        let color = dynimg.color();
        let bits_per_pixel = color.bits_per_pixel();
        let channels = u16::from(color.channel_count()).max(1);
        let (width, height) = dynimg.dimensions();

        Self::from_raw(
            width,
            height,
            bits_per_pixel,
            bits_per_pixel / channels,
            dynimg.into_bytes(),
        )
    }

    /// 生のピクセルバッファから生成します。
    ///
    /// # 戻り値
    /// * `Err(RecolorError::BufferSizeMismatch)`: バッファ長が寸法とビット深度に合わない場合。
    pub fn from_raw(
        width: u32,
        height: u32,
        bits_per_pixel: u16,
        bits_per_sample: u16,
        data: Vec<u8>,
    ) -> Result<Self, RecolorError> {
        let bytes_per_pixel = usize::from(bits_per_pixel).div_ceil(8);
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(bytes_per_pixel))
            .ok_or(RecolorError::BufferSizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() != expected {
            return Err(RecolorError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            bits_per_pixel,
            bits_per_sample,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// 1ピクセルあたりのサンプル (チャンネル) 数。`bits_per_pixel / bits_per_sample`。
    pub fn samples_per_pixel(&self) -> u16 {
        if self.bits_per_sample == 0 {
            0
        } else {
            self.bits_per_pixel / self.bits_per_sample
        }
    }

    /// 1ピクセルが占めるバイト数 (端数切り上げ)。
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.bits_per_pixel).div_ceil(8)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// 1バイト×4チャンネル (R, G, B, A) の 32bit レイアウトかどうか。
    pub fn has_rgba8_layout(&self) -> bool {
        self.bits_per_pixel == 32 && self.samples_per_pixel() == 4
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
