//! Web-hex color codec.
//!
//! Colors are encoded as exactly eight lowercase hexadecimal digits in
//! `rrggbbaa` channel order. The negative (contrast) color replaces each
//! color channel by `255 - channel` and preserves alpha; it exists only to
//! pick a readable label color atop a swatch of the original, not as a color
//! value in its own right.
//!
//! # Example
//!
//! ```rust
//! use swatchbook_render::Rgba;
//!
//! let red = Rgba::new(255, 0, 0, 255);
//! assert_eq!(red.to_hex(), "ff0000ff");
//! assert_eq!(red.negative().to_hex(), "00ffffff");
//!
//! let parsed = Rgba::parse_hex("#ff0000ff").unwrap();
//! assert_eq!(parsed, red);
//! ```

/// An 8-bit-per-channel RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque black, the default ink for content outlines and text runs.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    /// Opaque red, used for bounds outlines and border content fills.
    pub const RED: Rgba = Rgba::new(255, 0, 0, 255);

    /// Creates a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Encodes the color as eight lowercase hex digits, `rrggbbaa`.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Encodes only the color channels, `rrggbb`.
    ///
    /// SVG attributes take the alpha separately (as an opacity), so the
    /// canvas needs the six-digit form.
    pub fn to_rgb_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The alpha channel as a CSS/SVG opacity in `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// The perceptually-inverted color: color channels flipped, alpha kept.
    pub fn negative(&self) -> Rgba {
        Rgba::new(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// The channel tuple as text, `r,g,b,a`.
    pub fn tuple(&self) -> String {
        format!("{},{},{},{}", self.r, self.g, self.b, self.a)
    }

    /// Parses a hex color code, with or without a leading `#`.
    ///
    /// Supports:
    /// - 3 digits: `#f80` expands to `#ff8800`, opaque
    /// - 6 digits: `#rrggbb`, opaque
    /// - 8 digits: `#rrggbbaa`
    pub fn parse_hex(hex: &str) -> Result<Self, String> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("Invalid hex: {}", hex))
        };
        match hex.len() {
            3 => {
                let nibble = |range| channel(range).map(|n| n * 17);
                Ok(Rgba::new(nibble(0..1)?, nibble(1..2)?, nibble(2..3)?, 255))
            }
            6 => Ok(Rgba::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Ok(Rgba::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3, 6 or 8 digits)",
                hex
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_to_hex_is_lowercase_and_padded() {
        assert_eq!(Rgba::new(255, 0, 0, 255).to_hex(), "ff0000ff");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_hex(), "01020304");
        assert_eq!(Rgba::new(0, 0, 0, 0).to_hex(), "00000000");
    }

    #[test]
    fn test_negative_preserves_alpha() {
        let c = Rgba::new(10, 200, 30, 128);
        assert_eq!(c.negative(), Rgba::new(245, 55, 225, 128));
    }

    #[test]
    fn test_tuple() {
        assert_eq!(Rgba::new(255, 0, 0, 255).tuple(), "255,0,0,255");
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgba::parse_hex("#f80").unwrap(), Rgba::new(255, 136, 0, 255));
        assert_eq!(
            Rgba::parse_hex("ff6b35").unwrap(),
            Rgba::new(255, 107, 53, 255)
        );
        assert_eq!(
            Rgba::parse_hex("#ff6b3580").unwrap(),
            Rgba::new(255, 107, 53, 128)
        );
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert!(Rgba::parse_hex("#ff").is_err());
        assert!(Rgba::parse_hex("#fffff").is_err());
        assert!(Rgba::parse_hex("#gggggg").is_err());
    }

    proptest! {
        #[test]
        fn negative_matches_channelwise_inversion(
            r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, a in 0u8..=255
        ) {
            let neg = Rgba::new(r, g, b, a).negative();
            prop_assert_eq!(neg.to_hex(), Rgba::new(255 - r, 255 - g, 255 - b, a).to_hex());
        }

        #[test]
        fn hex_roundtrips_channelwise(
            r in 0u8..=255, g in 0u8..=255, b in 0u8..=255, a in 0u8..=255
        ) {
            let color = Rgba::new(r, g, b, a);
            prop_assert_eq!(Rgba::parse_hex(&color.to_hex()).unwrap(), color);
        }
    }
}
