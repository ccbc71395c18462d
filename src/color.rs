use palette::{FromColor, Srgb};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::alphabet::Alphabet;
use crate::error::HintError;
use crate::label;

/// Hue, saturation and luminance, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub luminance: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, luminance: f64) -> Self {
        Self {
            hue,
            saturation,
            luminance,
        }
    }

    pub fn from_hex(value: &str) -> Result<Self, HintError> {
        let rgb: Srgb<u8> = value
            .trim()
            .parse()
            .map_err(|_| HintError::InvalidColor {
                value: value.to_string(),
            })?;
        let hsl: palette::Hsl = palette::Hsl::from_color(rgb.into_format::<f32>());
        Ok(Self {
            hue: f64::from(hsl.hue.into_positive_degrees()) / 360.0,
            saturation: f64::from(hsl.saturation),
            luminance: f64::from(hsl.lightness),
        })
    }

    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let hsl: palette::Hsl = palette::Hsl::new(
            (self.hue * 360.0) as f32,
            self.saturation as f32,
            self.luminance as f32,
        );
        let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsl).into_format();
        (rgb.red, rgb.green, rgb.blue)
    }

    pub fn to_hex(&self) -> String {
        let (red, green, blue) = self.to_rgb();
        format!("#{red:02x}{green:02x}{blue:02x}")
    }
}

/// Offsets and random spreads applied to the anchor color per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ColorParams {
    pub hue_base: f64,
    pub hue_coef: f64,
    pub sat_base: f64,
    pub sat_coef: f64,
    pub lum_base: f64,
    pub lum_coef: f64,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            hue_base: 0.0,
            hue_coef: 1.0,
            sat_base: 0.45,
            sat_coef: 0.25,
            lum_base: 0.45,
            lum_coef: 0.15,
        }
    }
}

/// Reproducible value in `[0, 1)` derived from `label ++ seed`.
pub fn seeded_unit(label: &str, seed: &str) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(label);
    hasher.update(seed);
    let digest = hasher.finalize();
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest[..8]);
    // 53 bits fill an f64 mantissa exactly.
    (u64::from_be_bytes(word) >> 11) as f64 / (1u64 << 53) as f64
}

/// Cyclic reduction into `[0, 1)`.
pub fn wrap01(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

pub fn color_for(label: &str, anchor: Hsl, seed: &str, params: &ColorParams) -> Hsl {
    let rand = seeded_unit(label, seed);
    Hsl {
        hue: wrap01(anchor.hue + params.hue_base + rand * params.hue_coef),
        saturation: clamp01(anchor.saturation + params.sat_base + rand * params.sat_coef),
        luminance: clamp01(anchor.luminance + params.lum_base + rand * params.lum_coef),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ColorKey {
    anchor: Hsl,
    seed: String,
    params: ColorParams,
    symbols: Vec<char>,
    capacity: usize,
}

/// One color per possible registry index, seeded by the index's unpadded label so
/// an index keeps its color whatever the current label width is.
#[derive(Debug, Clone)]
pub struct ColorTable {
    key: ColorKey,
    colors: Vec<Hsl>,
}

impl ColorTable {
    pub fn build(
        anchor: Hsl,
        seed: &str,
        params: &ColorParams,
        alphabet: &Alphabet,
        capacity: usize,
    ) -> Self {
        let colors = (0..capacity)
            .map(|index| color_for(&label::encode(index, alphabet), anchor, seed, params))
            .collect();
        Self {
            key: ColorKey {
                anchor,
                seed: seed.to_string(),
                params: *params,
                symbols: alphabet.symbols().to_vec(),
                capacity,
            },
            colors,
        }
    }

    pub fn is_current(
        &self,
        anchor: Hsl,
        seed: &str,
        params: &ColorParams,
        alphabet: &Alphabet,
        capacity: usize,
    ) -> bool {
        self.key.anchor == anchor
            && self.key.seed == seed
            && self.key.params == *params
            && self.key.symbols == alphabet.symbols()
            && self.key.capacity == capacity
    }

    pub fn get(&self, index: usize) -> Option<Hsl> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
