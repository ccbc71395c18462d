//! Bijective conversion between hint indices and labels.
//!
//! A label is the index written as a base-`R` numeral whose digits are the
//! symbols of an [`Alphabet`], most significant digit first.

use crate::alphabet::Alphabet;
use crate::error::HintError;

pub fn encode(index: usize, alphabet: &Alphabet) -> String {
    let radix = alphabet.radix();
    let mut digits = Vec::new();
    let mut rest = index;
    loop {
        digits.push(alphabet.symbol(rest % radix));
        rest /= radix;
        if rest == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

/// Encodes `index` left-padded with the zero symbol to `width` symbols.
///
/// Indices that need more than `width` symbols are returned unpadded.
pub fn encode_padded(index: usize, width: usize, alphabet: &Alphabet) -> String {
    let label = encode(index, alphabet);
    let len = label.chars().count();
    if len >= width {
        return label;
    }
    let mut padded: String = std::iter::repeat_n(alphabet.zero(), width - len).collect();
    padded.push_str(&label);
    padded
}

pub fn decode(label: &str, alphabet: &Alphabet) -> Result<usize, HintError> {
    let radix = alphabet.radix();
    let mut value: usize = 0;
    for symbol in label.chars() {
        let digit = alphabet
            .digit(symbol)
            .ok_or(HintError::InvalidSymbol { symbol })?;
        value = value
            .checked_mul(radix)
            .and_then(|shifted| shifted.checked_add(digit))
            .ok_or_else(|| HintError::LabelOverflow {
                label: label.to_string(),
            })?;
    }
    Ok(value)
}

/// Number of symbols needed so `count` labels are all distinct: `ceil(log_radix(count))`,
/// never less than one.
pub fn label_width(count: usize, radix: usize) -> usize {
    let mut width = 1;
    let mut capacity = radix;
    while capacity < count {
        width += 1;
        capacity = capacity.saturating_mul(radix);
    }
    width
}
