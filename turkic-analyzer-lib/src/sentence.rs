// Sentence-level parsing: tokenize, then walk the tokens left to right with
// one token of lookahead. A word that binds its follower absorbs it, and the
// follower is never analysed on its own.

use std::iter::Peekable;
use std::vec::IntoIter;

use crate::alphabet::Alphabet;
use crate::error::AnalysisError;
use crate::lexicon::Lexicon;
use crate::morphology;
use crate::types::*;

/// Lazy word-by-word analysis of a token sequence.
///
/// Yields one item per output unit. A lexicon failure is yielded once as an
/// `Err`, after which the iterator is exhausted.
pub struct SequenceParses<'a> {
    tokens: Peekable<IntoIter<String>>,
    lexicon: &'a dyn Lexicon,
    alphabet: &'a Alphabet,
    failed: bool,
}

impl Iterator for SequenceParses<'_> {
    type Item = Result<WordParse, AnalysisError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let word = self.alphabet.lower(&self.tokens.next()?);
        let next_word = self.tokens.peek().map(|t| self.alphabet.lower(t));

        match morphology::analyze_word(&word, next_word.as_deref(), self.lexicon) {
            Ok(parse) => {
                if parse.consumed_next {
                    self.tokens.next();
                }
                Some(Ok(parse))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Analyse pre-split tokens. Tokens are lower-cased through `alphabet`.
pub fn analyze_sequence<'a, I>(
    tokens: I,
    lexicon: &'a dyn Lexicon,
    alphabet: &'a Alphabet,
) -> SequenceParses<'a>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    SequenceParses {
        tokens: tokens.into_iter().peekable(),
        lexicon,
        alphabet,
        failed: false,
    }
}

/// Tokenize and analyse a whole text.
pub fn parse_sentence(
    input: &str,
    lexicon: &dyn Lexicon,
    alphabet: &Alphabet,
) -> Result<SentenceParse, AnalysisError> {
    let words = analyze_sequence(alphabet.tokenize(input), lexicon, alphabet)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SentenceParse {
        input: input.to_string(),
        words,
    })
}
