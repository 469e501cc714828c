//! sRGB and OKLab/OKLCH color values and the conversions between them.
//!
//! Matrices are the D65 Oklab transform published by Björn Ottosson
//! (<https://bottosson.github.io/posts/oklab/>).

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_GRADIENT_SAMPLES: usize = 16;

/// Below this chroma a color's hue is meaningless.
const ACHROMATIC_CHROMA: f64 = 1e-5;

/// Gamma-encoded sRGB with straight alpha, every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
        let mut color = Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?);
        if hex.len() == 8 {
            color.a = f64::from(channel(6)?) / 255.0;
        }
        Some(color)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Scales alpha by `opacity` (clamped to `[0, 1]`).
    pub fn multiply_alpha(self, opacity: f64) -> Self {
        self.with_alpha(self.a * opacity.clamp(0.0, 1.0))
    }

    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    pub fn to_oklch(self) -> Oklch {
        Oklab::from_linear_srgb([
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        ])
        .to_oklch()
    }

    /// Largest per-channel difference on the 0..=255 scale.
    pub fn max_channel_delta(self, other: Rgba) -> u8 {
        let left = self.to_rgba8();
        let right = other.to_rgba8();
        left.iter()
            .zip(right.iter())
            .map(|(l, r)| l.abs_diff(*r))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    pub fn from_linear_srgb(rgb: [f64; 3]) -> Self {
        let [r, g, b] = rgb;
        let l = (0.412_221_470_8 * r + 0.536_332_536_3 * g + 0.051_445_992_9 * b).cbrt();
        let m = (0.211_903_498_2 * r + 0.680_699_545_1 * g + 0.107_396_956_6 * b).cbrt();
        let s = (0.088_302_461_9 * r + 0.281_718_837_6 * g + 0.629_978_700_5 * b).cbrt();

        Self {
            l: 0.210_454_255_3 * l + 0.793_617_785_0 * m - 0.004_072_046_8 * s,
            a: 1.977_998_495_1 * l - 2.428_592_205_0 * m + 0.450_593_709_9 * s,
            b: 0.025_904_037_1 * l + 0.782_771_766_2 * m - 0.808_675_766_0 * s,
        }
    }

    /// Unclamped linear sRGB; out-of-gamut colors yield channels outside `[0, 1]`.
    pub fn to_linear_srgb(self) -> [f64; 3] {
        let l_ = self.l + 0.396_337_777_4 * self.a + 0.215_803_757_3 * self.b;
        let m_ = self.l - 0.105_561_345_8 * self.a - 0.063_854_172_8 * self.b;
        let s_ = self.l - 0.089_484_177_5 * self.a - 1.291_485_548_0 * self.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        [
            4.076_741_662_1 * l - 3.307_711_591_3 * m + 0.230_969_929_2 * s,
            -1.268_438_004_6 * l + 2.609_757_401_1 * m - 0.341_319_396_5 * s,
            -0.004_196_086_3 * l - 0.703_418_614_7 * m + 1.707_614_701_0 * s,
        ]
    }

    pub fn to_oklch(self) -> Oklch {
        let c = (self.a * self.a + self.b * self.b).sqrt();
        let h = if c < ACHROMATIC_CHROMA {
            0.0
        } else {
            normalize_hue(self.b.atan2(self.a).to_degrees())
        };
        Oklch {
            l: self.l,
            c,
            h,
            alpha: 1.0,
        }
    }
}

/// Lightness in `[0, 1]`, chroma `>= 0`, hue in degrees `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
    pub alpha: f64,
}

impl Oklch {
    /// Builds a normalized value: lightness and alpha clamped, negative
    /// chroma raised to zero, hue wrapped into `[0, 360)`.
    pub fn new(l: f64, c: f64, h: f64, alpha: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            c: c.max(0.0),
            h: normalize_hue(h),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn to_oklab(self) -> Oklab {
        let radians = self.h.to_radians();
        Oklab {
            l: self.l,
            a: self.c * radians.cos(),
            b: self.c * radians.sin(),
        }
    }

    /// Gamma-encodes into sRGB, clipping out-of-gamut channels.
    pub fn to_srgb(self) -> Rgba {
        let [r, g, b] = self.to_oklab().to_linear_srgb();
        Rgba::new(
            linear_to_srgb(r),
            linear_to_srgb(g),
            linear_to_srgb(b),
            self.alpha,
        )
        .clamped()
    }
}

pub fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// sRGB transfer function, mirrored for negative inputs.
pub fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        12.92 * v
    } else {
        v.signum() * (1.055 * v.abs().powf(1.0 / 2.4) - 0.055)
    }
}

pub fn srgb_to_linear(v: f64) -> f64 {
    if v.abs() <= 0.040_45 {
        v / 12.92
    } else {
        v.signum() * ((v.abs() + 0.055) / 1.055).powf(2.4)
    }
}

/// Interpolates through `stops` in OKLCH, taking the shorter way around the
/// hue circle.
///
/// Every segment contributes `samples_per_segment` points starting at its
/// first stop; the last stop is appended once at the end. Fewer than two
/// stops are returned unchanged.
pub fn interpolate_oklch(stops: &[Rgba], samples_per_segment: usize) -> Vec<Rgba> {
    if stops.len() < 2 {
        return stops.to_vec();
    }
    let samples = samples_per_segment.max(1);
    let mut out = Vec::with_capacity((stops.len() - 1) * samples + 1);

    for pair in stops.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        for step in 0..samples {
            let t = step as f64 / samples as f64;
            out.push(mix_oklch(from, to, t));
        }
    }
    if let Some(last) = stops.last() {
        out.push(*last);
    }
    out
}

/// [`interpolate_oklch`] with [`DEFAULT_GRADIENT_SAMPLES`] per segment.
pub fn gradient_oklch(stops: &[Rgba]) -> Vec<Rgba> {
    interpolate_oklch(stops, DEFAULT_GRADIENT_SAMPLES)
}

pub fn mix_oklch(from: Rgba, to: Rgba, t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let start = from.to_oklch();
    let end = to.to_oklch();

    // An achromatic endpoint borrows the other's hue so grays don't spin.
    let (h1, h2) = if start.c < ACHROMATIC_CHROMA {
        (end.h, end.h)
    } else if end.c < ACHROMATIC_CHROMA {
        (start.h, start.h)
    } else {
        (start.h, end.h)
    };

    let mut dh = h2 - h1;
    if dh > 180.0 {
        dh -= 360.0;
    } else if dh < -180.0 {
        dh += 360.0;
    }

    Oklch::new(
        start.l + (end.l - start.l) * t,
        start.c + (end.c - start.c) * t,
        h1 + dh * t,
        from.a + (to.a - from.a) * t,
    )
    .to_srgb()
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_GRADIENT_SAMPLES, Oklch, Rgba, gradient_oklch, interpolate_oklch, linear_to_srgb,
        mix_oklch, normalize_hue,
    };

    #[test]
    fn parses_hex_literals() {
        let color = Rgba::from_hex("#2B7FFF").expect("hex should parse");
        assert_eq!(color.to_rgba8(), [0x2b, 0x7f, 0xff, 0xff]);
        let translucent = Rgba::from_hex("#00000080").expect("hex should parse");
        assert_eq!(translucent.to_rgba8(), [0, 0, 0, 0x80]);
        assert!(Rgba::from_hex("#fff").is_none());
        assert!(Rgba::from_hex("2b7fff").is_none());
        assert!(Rgba::from_hex("#gggggg").is_none());
        assert!(Rgba::from_hex("#+f+f+f").is_none());
        assert!(Rgba::from_hex("#-1-1-1").is_none());
        assert_eq!(color.to_hex(), "#2b7fff");
    }

    #[test]
    fn converts_reference_colors() {
        let white = Oklch::new(1.0, 0.0, 0.0, 1.0).to_srgb();
        assert_eq!(white.to_rgba8(), [255, 255, 255, 255]);
        let black = Oklch::new(0.0, 0.0, 0.0, 1.0).to_srgb();
        assert_eq!(black.to_rgba8(), [0, 0, 0, 255]);

        // Tailwind's blue-500
        let blue = Oklch::new(0.623, 0.214, 259.815, 1.0).to_srgb();
        let expected = Rgba::from_hex("#2b7fff").expect("hex should parse");
        assert!(blue.max_channel_delta(expected) <= 1);
    }

    #[test]
    fn round_trips_srgb_through_oklch() {
        for hex in ["#fb2c36", "#00c950", "#62748e", "#ffffff", "#000000", "#ff6900"] {
            let color = Rgba::from_hex(hex).expect("hex should parse");
            let lch = color.to_oklch();
            let back = Oklch::new(lch.l, lch.c, lch.h, 1.0).to_srgb();
            assert!(back.max_channel_delta(color) <= 1, "{} drifted", hex);
        }
    }

    #[test]
    fn normalizes_components() {
        let lch = Oklch::new(1.4, -0.2, -30.0, 2.0);
        assert_eq!(lch.l, 1.0);
        assert_eq!(lch.c, 0.0);
        assert!((lch.h - 330.0).abs() < 1e-9);
        assert_eq!(lch.alpha, 1.0);
        assert_eq!(normalize_hue(720.0), 0.0);
        assert_eq!(normalize_hue(f64::NAN), 0.0);
    }

    #[test]
    fn gamma_encodes_with_linear_toe() {
        assert!((linear_to_srgb(0.002) - 0.025_84).abs() < 1e-9);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-9);
        assert!(linear_to_srgb(-0.5) < 0.0);
    }

    #[test]
    fn interpolates_with_fixed_sample_count() {
        let red = Rgba::from_hex("#ff0000").expect("hex should parse");
        let blue = Rgba::from_hex("#0000ff").expect("hex should parse");
        let green = Rgba::from_hex("#00ff00").expect("hex should parse");

        let samples = interpolate_oklch(&[red, blue, green], 16);
        assert_eq!(samples.len(), 33);
        assert!(samples[0].max_channel_delta(red) <= 1);
        assert!(samples[16].max_channel_delta(blue) <= 1);
        assert_eq!(samples[32], green);
        assert_eq!(interpolate_oklch(&[red], 16), vec![red]);
    }

    #[test]
    fn default_gradient_uses_default_sample_count() {
        let white = Rgba::WHITE;
        let black = Rgba::BLACK;
        let samples = gradient_oklch(&[white, black]);
        assert_eq!(samples.len(), DEFAULT_GRADIENT_SAMPLES + 1);
        assert_eq!(samples, interpolate_oklch(&[white, black], DEFAULT_GRADIENT_SAMPLES));
    }

    #[test]
    fn takes_shortest_hue_path() {
        // hue 350 -> 10 passes through 0, not 180
        let from = Oklch::new(0.7, 0.15, 350.0, 1.0).to_srgb();
        let to = Oklch::new(0.7, 0.15, 10.0, 1.0).to_srgb();
        let mid = mix_oklch(from, to, 0.5).to_oklch();
        assert!(mid.h < 20.0 || mid.h > 340.0, "hue {} took the long way", mid.h);
    }

    #[test]
    fn interpolates_alpha_linearly() {
        let from = Rgba::WHITE.with_alpha(0.0);
        let to = Rgba::WHITE;
        let mid = mix_oklch(from, to, 0.5);
        assert!((mid.a - 0.5).abs() < 1e-9);
    }
}
