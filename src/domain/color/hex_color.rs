use std::fmt;

use super::rgb_color::RgbColor;

/// 16進カラー文字列の解析エラー。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// 16進数字以外の文字を含む、または長さが 1, 2, 3, 6 のいずれでもない。
    /// フィールドには解析できなかった入力文字列がそのまま入る。
    InvalidFormat(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidFormat(input) => write!(
                f,
                "無効なカラー指定です: '{}' (16進数字 1, 2, 3, 6 桁のみ有効)",
                input
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// 4bit の値を 8bit に複製する (例: 0xA -> 0xAA)。
#[inline]
fn double_nibble(nibble: u32) -> u32 {
    let n = nibble & 0xF;
    (n << 4) | n
}

/// 16進数字の文字列を `RgbColor` に変換します。
///
/// 短縮表記は桁の複製で 24bit に展開されます。
/// - 1桁 `d`: `dd` を R, G, B すべてに設定 (グレースケール)
/// - 2桁 `bb`: `bb` を R, G, B すべてに設定
/// - 3桁 `rgb`: CSS と同じく各桁を複製して `rrggbb`
/// - 6桁: そのまま `rrggbb`
///
/// 空文字列、16進数字以外を含む文字列 (`#` も含む)、上記以外の長さはすべて
/// `ParseError::InvalidFormat` になります。失敗時のデフォルト色は呼び出し側で決めます。
pub fn parse_hex_color(hex: &str) -> Result<RgbColor, ParseError> {
    let invalid = || ParseError::InvalidFormat(hex.to_string());

    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    // 最大 6 桁なので u32 に収まる
    if hex.len() > 6 {
        return Err(invalid());
    }
    let scanned = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;

    let expanded = match hex.len() {
        1 => double_nibble(scanned) * 0x01_01_01,
        2 => scanned * 0x01_01_01,
        3 => {
            let r = double_nibble(scanned >> 8);
            let g = double_nibble(scanned >> 4);
            let b = double_nibble(scanned);
            (r << 16) | (g << 8) | b
        }
        6 => scanned,
        _ => return Err(invalid()),
    };

    Ok(RgbColor::from_u24(expanded))
}
