//! Color shortening.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! Only colors that are fully opaque and exactly representable are touched.
//! Anything with alpha, or any notation not listed here, is left as written.

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// Parse `#rgb` or `#rrggbb`. Alpha forms return `None`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        match hex.len() {
            // "converted into six-digit form by replicating digits"
            3 => Some(Self {
                r: channel(&hex[0..1].repeat(2))?,
                g: channel(&hex[1..2].repeat(2))?,
                b: channel(&hex[2..3].repeat(2))?,
            }),
            6 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// Only names whose hex form is shorter are listed.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let (r, g, b) = match name.to_ascii_lowercase().as_str() {
            "white" => (255, 255, 255),
            "black" => (0, 0, 0),
            "yellow" => (255, 255, 0),
            "fuchsia" | "magenta" => (255, 0, 255),
            "aqua" | "cyan" => (0, 255, 255),
            _ => return None,
        };
        Some(Self { r, g, b })
    }

    /// Shortest hex notation: `#abc` when every channel repeats a digit,
    /// `#aabbcd` otherwise. Always lower case.
    #[must_use]
    pub fn to_hex(self) -> String {
        let Self { r, g, b } = self;
        if [r, g, b].iter().all(|channel| channel % 17 == 0) {
            format!("#{:x}{:x}{:x}", r / 17, g / 17, b / 17)
        } else {
            format!("#{r:02x}{g:02x}{b:02x}")
        }
    }
}

/// Shorten a hash token used as a color. Unparseable hashes are only lower-cased.
#[must_use]
pub fn shorten_hex(raw: &str) -> String {
    Rgb::from_hex(raw).map_or_else(|| raw.to_ascii_lowercase(), Rgb::to_hex)
}
