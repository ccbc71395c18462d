//! Per-keystroke label resolution.
//!
//! Level `w` consumes the symbol at the `w`-th position from the right of a label.
//! Level 1 resolves to a registry index; every higher level descends to the level
//! below it. Levels are only ever added: a table built for one registry is reused
//! by every later registry that needs the same width.

use log::debug;
use std::collections::HashMap;

use crate::alphabet::Alphabet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Descend { digit: usize, next_level: usize },
    Resolve { digit: usize },
}

#[derive(Debug, Clone)]
pub struct DispatchTable {
    level: usize,
    entries: HashMap<char, Transition>,
}

impl DispatchTable {
    fn build(level: usize, alphabet: &Alphabet) -> Self {
        let entries = alphabet
            .symbols()
            .iter()
            .enumerate()
            .map(|(digit, symbol)| {
                let transition = if level == 1 {
                    Transition::Resolve { digit }
                } else {
                    Transition::Descend {
                        digit,
                        next_level: level - 1,
                    }
                };
                (*symbol, transition)
            })
            .collect();
        Self { level, entries }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn lookup(&self, symbol: char) -> Option<Transition> {
        self.entries.get(&symbol).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Resolved(usize),
    Incomplete,
}

#[derive(Debug, Clone)]
pub struct InputAutomaton {
    alphabet: Alphabet,
    levels: Vec<DispatchTable>,
    width: usize,
}

impl InputAutomaton {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            levels: Vec::new(),
            width: 0,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Adds the missing levels up to `width`, lowest first.
    pub fn ensure_width(&mut self, width: usize) {
        while self.levels.len() < width {
            let level = self.levels.len() + 1;
            self.levels.push(DispatchTable::build(level, &self.alphabet));
            debug!("dispatch level {} built", level);
        }
    }

    /// Makes `width` the label width of the current registry.
    pub fn configure(&mut self, width: usize) {
        let width = width.max(1);
        self.ensure_width(width);
        self.width = width;
    }

    /// Label width of the current registry.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of levels built so far.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn dispatch(&self, level: usize) -> Option<&DispatchTable> {
        level.checked_sub(1).and_then(|slot| self.levels.get(slot))
    }

    /// Resolves a whole key sequence against the configured width.
    pub fn resolve(&self, keys: &[char]) -> Resolution {
        let mut pending = PendingInput::new(self.width);
        for key in keys {
            match pending.feed(self, *key) {
                Step::Advanced { .. } => {}
                Step::Resolved(index) => return Resolution::Resolved(index),
                Step::Rejected => return Resolution::Incomplete,
            }
        }
        Resolution::Incomplete
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advanced { level: usize },
    Resolved(usize),
    Rejected,
}

/// Progress through one label: the level whose table is installed and the value
/// of the symbols typed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingInput {
    top: usize,
    level: usize,
    value: usize,
}

impl PendingInput {
    pub fn new(width: usize) -> Self {
        Self {
            top: width,
            level: width,
            value: 0,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_started(&self) -> bool {
        self.level != self.top
    }

    pub fn reset(&mut self) {
        self.level = self.top;
        self.value = 0;
    }

    /// Consumes one symbol. A rejected or resolved symbol leaves the input reset.
    pub fn feed(&mut self, automaton: &InputAutomaton, symbol: char) -> Step {
        let radix = automaton.alphabet().radix();
        let transition = automaton
            .dispatch(self.level)
            .and_then(|table| table.lookup(symbol));
        match transition {
            Some(Transition::Descend { digit, next_level }) => {
                self.value = self.value * radix + digit;
                self.level = next_level;
                Step::Advanced { level: next_level }
            }
            Some(Transition::Resolve { digit }) => {
                let index = self.value * radix + digit;
                self.reset();
                Step::Resolved(index)
            }
            None => {
                self.reset();
                Step::Rejected
            }
        }
    }
}
