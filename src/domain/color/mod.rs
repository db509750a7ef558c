pub mod hex_color;
pub mod rgb_color;

pub use hex_color::{parse_hex_color, ParseError};
pub use rgb_color::RgbColor;
