//! CSS color parsing and `rgba()` serialization for burst particles.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

/// An sRGB color with a straight (non-premultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    #[must_use]
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same channels with `alpha` clamped into range.
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { a: alpha.clamp(0.0, 1.0), ..self }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with('#') {
            return parse_hex_rgb(trimmed).map(|(r, g, b)| Self::opaque(r, g, b));
        }
        parse_functional(trimmed)
    }
}

impl fmt::Display for Rgba {
    /// Serializes as `rgba(r, g, b, a)`, the form Canvas2D accepts as a fill style.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alpha = (self.a * 1000.0).round() / 1000.0;
        write!(f, "rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let trimmed = raw.trim();
    let hex = trimmed.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = hex_channel(&hex[0..1].repeat(2))?;
            let g = hex_channel(&hex[1..2].repeat(2))?;
            let b = hex_channel(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => {
            let r = hex_channel(&hex[0..2])?;
            let g = hex_channel(&hex[2..4])?;
            let b = hex_channel(&hex[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn hex_channel(digits: &str) -> Option<u8> {
    u8::from_str_radix(digits, 16).ok()
}

fn parse_functional(raw: &str) -> Option<Rgba> {
    let lower = raw.to_ascii_lowercase();
    let (body, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest, false)
    } else {
        return None;
    };
    let body = body.strip_suffix(')')?;
    let parts = body.split(',').map(str::trim).collect::<Vec<_>>();
    let expected = if has_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }
    let r = decimal_channel(parts[0])?;
    let g = decimal_channel(parts[1])?;
    let b = decimal_channel(parts[2])?;
    let a = if has_alpha { parts[3].parse::<f64>().ok().filter(|a| a.is_finite())? } else { 1.0 };
    Some(Rgba::opaque(r, g, b).with_alpha(a))
}

fn decimal_channel(digits: &str) -> Option<u8> {
    digits.parse::<u8>().ok()
}
