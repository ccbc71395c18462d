use log::debug;
use std::collections::{HashMap, HashSet};

use crate::error::HintError;

/// Ordered hint symbols; a symbol's position is its digit value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    digits: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from `symbols`, keeping the first occurrence of repeated
    /// symbols. Positional labels need at least two symbols.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self, HintError> {
        let mut ordered = Vec::new();
        let mut digits = HashMap::new();
        for symbol in symbols {
            if digits.contains_key(&symbol) {
                continue;
            }
            digits.insert(symbol, ordered.len());
            ordered.push(symbol);
        }
        if ordered.len() < 2 {
            return Err(HintError::NoUsableAlphabet);
        }
        Ok(Self {
            symbols: ordered,
            digits,
        })
    }

    pub fn radix(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbol(&self, digit: usize) -> char {
        self.symbols[digit]
    }

    pub fn zero(&self) -> char {
        self.symbols[0]
    }

    pub fn digit(&self, symbol: char) -> Option<usize> {
        self.digits.get(&symbol).copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

/// Concatenates the candidate rows in priority order and drops every symbol bound
/// to a navigation command, so a typed hint key can never shadow a command.
pub fn build_alphabet<'a>(
    rows: impl IntoIterator<Item = &'a str>,
    reserved: &HashSet<char>,
) -> Result<Alphabet, HintError> {
    let candidates: Vec<char> = rows
        .into_iter()
        .flat_map(|row| row.chars())
        .filter(|symbol| !symbol.is_whitespace())
        .collect();
    let usable: Vec<char> = candidates
        .iter()
        .copied()
        .filter(|symbol| !reserved.contains(symbol))
        .collect();
    debug!(
        "alphabet built (candidates={}, usable={})",
        candidates.len(),
        usable.len()
    );
    Alphabet::new(usable)
}
