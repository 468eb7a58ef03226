use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// 8-bit RGB color parsed from `#rgb` or `#rrggbb` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbColor {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn from_hex(hex: &str) -> PlotResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_owned(),
            _ => {
                return Err(PlotError::InvalidData(format!(
                    "color `{hex}` is not in #rgb or #rrggbb form"
                )));
            }
        };

        let channel = |range: std::ops::Range<usize>| {
            expanded
                .get(range)
                .and_then(|part| u8::from_str_radix(part, 16).ok())
                .ok_or_else(|| PlotError::InvalidData(format!("color `{hex}` has non-hex digits")))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    #[must_use]
    pub fn to_rgba_string(self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.red,
            self.green,
            self.blue,
            alpha.clamp(0.0, 1.0)
        )
    }

    #[must_use]
    pub fn to_hsl(self) -> HslColor {
        let r = f64::from(self.red) / 255.0;
        let g = f64::from(self.green) / 255.0;
        let b = f64::from(self.blue) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        let delta = max - min;

        if delta <= f64::EPSILON {
            return HslColor {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let sector = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        let hue = sector * 60.0;

        HslColor {
            hue,
            saturation,
            lightness,
        }
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::new(
            mix(self.red, other.red),
            mix(self.green, other.green),
            mix(self.blue, other.blue),
        )
    }
}

/// Hue in degrees, saturation and lightness in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl HslColor {
    #[must_use]
    pub fn to_rgb(self) -> RgbColor {
        let chroma = (1.0 - (2.0 * self.lightness - 1.0).abs()) * self.saturation;
        let sector = self.hue.rem_euclid(360.0) / 60.0;
        let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = self.lightness - chroma / 2.0;
        let to_u8 = |channel: f64| ((channel + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        RgbColor::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

pub const DEFAULT_MIN_LIGHTNESS_SCALE: f64 = 0.1;
pub const DEFAULT_MAX_LIGHTNESS_SCALE: f64 = 1.5;

/// Scales the HSL lightness of `hex` by `scale`.
///
/// The scale is clamped to `[0.1, 1.5]` and the resulting lightness to 1.0.
/// Unparseable input is returned unchanged.
#[must_use]
pub fn scale_hex_color_lightness(hex: &str, scale: f64) -> String {
    scale_hex_color_lightness_within(
        hex,
        scale,
        DEFAULT_MIN_LIGHTNESS_SCALE,
        DEFAULT_MAX_LIGHTNESS_SCALE,
    )
}

#[must_use]
pub fn scale_hex_color_lightness_within(
    hex: &str,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
) -> String {
    let Ok(rgb) = RgbColor::from_hex(hex) else {
        return hex.to_owned();
    };
    if !scale.is_finite() {
        return hex.to_owned();
    }

    let mut hsl = rgb.to_hsl();
    let scale = scale.max(min_scale).min(max_scale);
    hsl.lightness = (hsl.lightness * scale).min(1.0);
    hsl.to_rgb().to_hex()
}

/// Hex color with an alpha channel, for filled bands.
#[must_use]
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    RgbColor::from_hex(hex).map_or_else(|_| hex.to_owned(), |rgb| rgb.to_rgba_string(alpha))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: RgbColor,
}

/// Piecewise-linear color scale over a value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousColorScale {
    stops: Vec<ColorStop>,
    min: f64,
    max: f64,
}

impl ContinuousColorScale {
    /// Builds a scale from evenly spaced hex colors.
    pub fn from_hex_colors(colors: &[&str], min: f64, max: f64) -> PlotResult<Self> {
        if colors.is_empty() {
            return Err(PlotError::InvalidData(
                "color scale requires at least one color".to_owned(),
            ));
        }
        let last = (colors.len() - 1).max(1) as f64;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(index, hex)| {
                Ok(ColorStop {
                    position: index as f64 / last,
                    color: RgbColor::from_hex(hex)?,
                })
            })
            .collect::<PlotResult<Vec<_>>>()?;
        Self::from_stops(stops, min, max)
    }

    pub fn from_stops(mut stops: Vec<ColorStop>, min: f64, max: f64) -> PlotResult<Self> {
        if stops.is_empty() {
            return Err(PlotError::InvalidData(
                "color scale requires at least one stop".to_owned(),
            ));
        }
        if stops
            .iter()
            .any(|stop| !stop.position.is_finite() || !(0.0..=1.0).contains(&stop.position))
        {
            return Err(PlotError::InvalidData(
                "color stop positions must be finite and in [0, 1]".to_owned(),
            ));
        }
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(PlotError::InvalidData(format!(
                "color scale range must be finite and ordered, got [{min}, {max}]"
            )));
        }
        stops.sort_by_key(|stop| OrderedFloat(stop.position));
        Ok(Self { stops, min, max })
    }

    /// Default sequential scale, dark blue through yellow.
    pub fn viridis(min: f64, max: f64) -> PlotResult<Self> {
        Self::from_hex_colors(
            &["#440154", "#3b528b", "#21918c", "#5ec962", "#fde725"],
            min,
            max,
        )
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Hex color for `value`, clamped into the scale range.
    #[must_use]
    pub fn color_for_value(&self, value: f64) -> String {
        let span = self.max - self.min;
        let t = if span > 0.0 {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.5
        };

        let upper = self.stops.partition_point(|stop| stop.position < t);
        let color = match (upper.checked_sub(1), self.stops.get(upper)) {
            (None, Some(first)) => first.color,
            (Some(lower), None) => self.stops[lower].color,
            (Some(lower), Some(high)) => {
                let low = self.stops[lower];
                let width = high.position - low.position;
                let local = if width > 0.0 {
                    (t - low.position) / width
                } else {
                    0.0
                };
                low.color.lerp(high.color, local)
            }
            (None, None) => RgbColor::new(0, 0, 0),
        };
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{ContinuousColorScale, RgbColor, hex_to_rgba, scale_hex_color_lightness};

    #[test]
    fn hex_round_trips_through_hsl() {
        let rgb = RgbColor::from_hex("#3b528b").expect("parse");
        assert_eq!(rgb.to_hsl().to_rgb(), rgb);
        assert_eq!(RgbColor::from_hex("#fff").expect("short").to_hex(), "#ffffff");
    }

    #[test]
    fn lightness_scaling_brightens_gray() {
        let original = RgbColor::from_hex("#808080").expect("gray").to_hsl();
        let scaled_hex = scale_hex_color_lightness("#808080", 1.3);
        let scaled = RgbColor::from_hex(&scaled_hex).expect("scaled").to_hsl();
        assert!(scaled.lightness > original.lightness);
        assert_relative_eq!(scaled.lightness, original.lightness * 1.3, epsilon = 0.01);
    }

    #[test]
    fn lightness_scale_factor_is_clamped() {
        let doubled = scale_hex_color_lightness("#404040", 2.0);
        let capped = scale_hex_color_lightness("#404040", 1.5);
        assert_eq!(doubled, capped);
    }

    #[test]
    fn invalid_hex_is_returned_unchanged() {
        assert_eq!(scale_hex_color_lightness("not-a-color", 1.3), "not-a-color");
        assert_eq!(hex_to_rgba("red", 0.2), "red");
    }

    #[test]
    fn color_scale_interpolates_between_stops() {
        let scale = ContinuousColorScale::from_hex_colors(&["#000000", "#ffffff"], 0.0, 10.0)
            .expect("scale");
        assert_eq!(scale.color_for_value(0.0), "#000000");
        assert_eq!(scale.color_for_value(10.0), "#ffffff");
        assert_eq!(scale.color_for_value(5.0), "#808080");
        assert_eq!(scale.color_for_value(-4.0), "#000000");
    }

    #[test]
    fn color_scale_rejects_inverted_range() {
        assert!(ContinuousColorScale::viridis(2.0, 1.0).is_err());
    }
}
