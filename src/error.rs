use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HintError {
    #[error("symbol {symbol:?} is not part of the hint alphabet")]
    InvalidSymbol { symbol: char },

    #[error("label {label:?} is too long to address a hint")]
    LabelOverflow { label: String },

    #[error("no usable hint alphabet: fewer than two hint symbols remain after removing command keys")]
    NoUsableAlphabet,

    #[error("no syntax parser available for this buffer")]
    NoParserAvailable,

    #[error("invalid color {value:?}: expected #rrggbb")]
    InvalidColor { value: String },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load the {language} grammar")]
    Grammar {
        language: &'static str,
        #[source]
        source: tree_sitter::LanguageError,
    },

    #[error("tree-sitter produced no tree for {language} source")]
    Parse { language: &'static str },
}
