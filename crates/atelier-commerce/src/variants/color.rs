//! Human-readable names and text contrast for variant colours.

use serde::{Deserialize, Serialize};

/// An sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn distance_sq(&self, other: &Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// YIQ brightness, 0..=255.
    pub fn brightness(&self) -> u32 {
        (self.r as u32 * 299 + self.g as u32 * 587 + self.b as u32 * 114) / 1000
    }
}

/// Text colour to draw on top of a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    Dark,
    Light,
}

const NAMED: &[(&str, Rgb)] = &[
    ("Black", Rgb::new(0x00, 0x00, 0x00)),
    ("White", Rgb::new(0xff, 0xff, 0xff)),
    ("Gray", Rgb::new(0x80, 0x80, 0x80)),
    ("Silver", Rgb::new(0xc0, 0xc0, 0xc0)),
    ("Charcoal", Rgb::new(0x36, 0x45, 0x4f)),
    ("Red", Rgb::new(0xff, 0x00, 0x00)),
    ("Maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("Crimson", Rgb::new(0xdc, 0x14, 0x3c)),
    ("Pink", Rgb::new(0xff, 0xc0, 0xcb)),
    ("Hot Pink", Rgb::new(0xff, 0x69, 0xb4)),
    ("Orange", Rgb::new(0xff, 0xa5, 0x00)),
    ("Coral", Rgb::new(0xff, 0x7f, 0x50)),
    ("Peach", Rgb::new(0xff, 0xe5, 0xb4)),
    ("Yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("Mustard", Rgb::new(0xff, 0xdb, 0x58)),
    ("Gold", Rgb::new(0xff, 0xd7, 0x00)),
    ("Beige", Rgb::new(0xf5, 0xf5, 0xdc)),
    ("Cream", Rgb::new(0xff, 0xfd, 0xd0)),
    ("Khaki", Rgb::new(0xc3, 0xb0, 0x91)),
    ("Brown", Rgb::new(0x96, 0x4b, 0x00)),
    ("Tan", Rgb::new(0xd2, 0xb4, 0x8c)),
    ("Olive", Rgb::new(0x80, 0x80, 0x00)),
    ("Green", Rgb::new(0x00, 0x80, 0x00)),
    ("Lime", Rgb::new(0x00, 0xff, 0x00)),
    ("Mint", Rgb::new(0x98, 0xff, 0x98)),
    ("Bottle Green", Rgb::new(0x00, 0x6a, 0x4e)),
    ("Teal", Rgb::new(0x00, 0x80, 0x80)),
    ("Turquoise", Rgb::new(0x40, 0xe0, 0xd0)),
    ("Sky Blue", Rgb::new(0x87, 0xce, 0xeb)),
    ("Blue", Rgb::new(0x00, 0x00, 0xff)),
    ("Royal Blue", Rgb::new(0x41, 0x69, 0xe1)),
    ("Navy Blue", Rgb::new(0x00, 0x00, 0x80)),
    ("Purple", Rgb::new(0x80, 0x00, 0x80)),
    ("Lavender", Rgb::new(0xe6, 0xe6, 0xfa)),
    ("Magenta", Rgb::new(0xff, 0x00, 0xff)),
    ("Wine", Rgb::new(0x72, 0x2f, 0x37)),
];

/// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
pub fn parse_hex(value: &str) -> Option<Rgb> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut digits = hex.chars().filter_map(|c| c.to_digit(16));
            let mut channel = || digits.next().map(|d| (d * 17) as u8);
            Some(Rgb::new(channel()?, channel()?, channel()?))
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

/// Display label for a variant colour.
///
/// Hex values resolve to the nearest named colour. Anything else, including
/// malformed hex, is returned unchanged.
pub fn color_label(value: &str) -> String {
    let Some(rgb) = parse_hex(value) else {
        return value.to_string();
    };
    NAMED
        .iter()
        .min_by_key(|(_, named)| rgb.distance_sq(named))
        .map(|(name, _)| (*name).to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Dark text on light swatches, light text on dark ones. Unparseable
/// colours get dark text.
pub fn contrast_tone(value: &str) -> TextTone {
    match parse_hex(value) {
        Some(rgb) if rgb.brightness() < 128 => TextTone::Light,
        _ => TextTone::Dark,
    }
}
