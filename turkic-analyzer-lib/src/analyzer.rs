// Per-language analyser: a loaded lexicon plus its alphabet.

use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, LexiconError};
use crate::lexicon::{Lexicon, MemoryLexicon};
use crate::morphology;
use crate::sentence::{self, SequenceParses};
use crate::types::*;

/// Entry point for analysing text in one language.
///
/// Cheap to clone; clones share the same lexicon.
#[derive(Clone)]
pub struct Analyzer {
    lexicon: Arc<dyn Lexicon>,
    alphabet: Alphabet,
    metadata: LexiconMetadata,
}

impl Analyzer {
    pub fn new(lexicon: Arc<dyn Lexicon>) -> Result<Self, LexiconError> {
        let alphabet = Alphabet::from_lexicon(lexicon.as_ref())?;
        let metadata = lexicon.metadata()?;
        Ok(Self {
            lexicon,
            alphabet,
            metadata,
        })
    }

    /// Load the lexicon named by `config` into memory.
    pub fn open(config: &AnalyzerConfig) -> Result<Self, LexiconError> {
        let path = config.resolve_lexicon_path()?;
        let analyzer = Self::new(Arc::new(MemoryLexicon::load(&path)?))?;
        tracing::info!(
            path = %path.display(),
            language = %analyzer.metadata.language,
            version = analyzer.metadata.version,
            build = analyzer.metadata.build,
            letters = analyzer.alphabet.letters().len(),
            "analyzer ready"
        );
        Ok(analyzer)
    }

    /// Tokenize `text` and analyse it unit by unit.
    pub fn analyze_text(&self, text: &str) -> SequenceParses<'_> {
        self.analyze_words(self.alphabet.tokenize(text))
    }

    /// Analyse pre-split tokens.
    pub fn analyze_words<I>(&self, tokens: I) -> SequenceParses<'_>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        sentence::analyze_sequence(tokens, self.lexicon.as_ref(), &self.alphabet)
    }

    /// Analyse `word` with a known follower, without windowing.
    pub fn analyze_pair(
        &self,
        word: &str,
        next_word: Option<&str>,
    ) -> Result<WordAnalysis, AnalysisError> {
        let word = self.alphabet.lower(word);
        let next_word = next_word.map(|w| self.alphabet.lower(w));
        morphology::analyze_pair(&word, next_word.as_deref(), self.lexicon.as_ref())
    }

    pub fn parse_sentence(&self, text: &str) -> Result<SentenceParse, AnalysisError> {
        sentence::parse_sentence(text, self.lexicon.as_ref(), &self.alphabet)
    }

    pub fn metadata(&self) -> &LexiconMetadata {
        &self.metadata
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn lexicon(&self) -> &Arc<dyn Lexicon> {
        &self.lexicon
    }
}
