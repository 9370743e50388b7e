// Where to find a language's lexicon.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

pub const LANGUAGE_VAR: &str = "TURKIC_LANGUAGE";
pub const DATA_DIR_VAR: &str = "TURKIC_DATA_DIR";
pub const LEXICON_VAR: &str = "TURKIC_LEXICON";

/// Dataset file extensions, in lookup order.
const EXTENSIONS: &[&str] = &["json", "xml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Language code, e.g. "tat" or "bak".
    pub language: String,
    /// Directory holding `lexicon_<language>.{json,xml}` files.
    pub data_dir: PathBuf,
    /// Explicit lexicon file; overrides the data directory lookup.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            language: "tat".to_string(),
            data_dir: PathBuf::from("data"),
            lexicon_path: None,
        }
    }
}

impl AnalyzerConfig {
    /// Defaults overridden by `TURKIC_LANGUAGE`, `TURKIC_DATA_DIR` and
    /// `TURKIC_LEXICON`.
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(language) = var(LANGUAGE_VAR).filter(|v| !v.is_empty()) {
            config.language = language;
        }
        if let Some(dir) = var(DATA_DIR_VAR).filter(|v| !v.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = var(LEXICON_VAR).filter(|v| !v.is_empty()) {
            config.lexicon_path = Some(PathBuf::from(path));
        }
        config
    }

    /// The lexicon file to load: the explicit path if set, else the first
    /// existing `lexicon_<language>.<ext>` in the data directory.
    pub fn resolve_lexicon_path(&self) -> Result<PathBuf, LexiconError> {
        if let Some(path) = &self.lexicon_path {
            return Ok(path.clone());
        }

        EXTENSIONS
            .iter()
            .map(|ext| {
                self.data_dir
                    .join(format!("lexicon_{}.{ext}", self.language))
            })
            .find(|path| path.is_file())
            .ok_or_else(|| LexiconError::NotFound {
                language: self.language.clone(),
                dir: self.data_dir.clone(),
            })
    }
}
