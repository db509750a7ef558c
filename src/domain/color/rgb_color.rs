use std::fmt;
use std::str::FromStr;

use super::hex_color::{parse_hex_color, ParseError};

/// テンプレート画像の塗りつぶしに使う RGB カラー。
///
/// アルファは持たない。塗りつぶし対象ピクセルのアルファは常に元画像の値が保持される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// 色指定が無い、または解析に失敗した場合に使うデフォルト色。
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// 24bit の値 (0xRRGGBB) から生成する。上位 8bit は無視される。
    pub const fn from_u24(value: u32) -> Self {
        Self {
            red: ((value >> 16) & 0xFF) as u8,
            green: ((value >> 8) & 0xFF) as u8,
            blue: (value & 0xFF) as u8,
        }
    }

    pub fn red(&self) -> u8 {
        self.red
    }
    pub fn green(&self) -> u8 {
        self.green
    }
    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// R, G, B の順のバイト列。ピクセルバッファへの書き込みにそのまま使える。
    pub fn to_bytes(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::BLACK
    }
}

// `#RRGGBB` 形式で表示する
impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for RgbColor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u24_splits_channels() {
        let color = RgbColor::from_u24(0x12AB_EF);
        assert_eq!(color, RgbColor::new(0x12, 0xAB, 0xEF));
        assert_eq!(color.to_bytes(), [0x12, 0xAB, 0xEF]);
    }

    #[test]
    fn default_is_black() {
        assert_eq!(RgbColor::default(), RgbColor::BLACK);
        assert_eq!(RgbColor::BLACK.to_bytes(), [0, 0, 0]);
    }

    #[test]
    fn display_uses_uppercase_hex() {
        assert_eq!(RgbColor::new(0, 255, 10).to_string(), "#00FF0A");
    }

    #[test]
    fn from_str_delegates_to_hex_parser() {
        let color: RgbColor = "0F0".parse().unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));
        assert!("zz".parse::<RgbColor>().is_err());
    }
}
