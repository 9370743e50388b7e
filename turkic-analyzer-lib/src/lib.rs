pub mod types;
pub mod error;
pub mod alphabet;
pub mod lexicon;
pub mod morphology;
pub mod sentence;
pub mod analyzer;
pub mod config;
pub mod output;

pub use alphabet::Alphabet;
pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, LexiconError};
pub use lexicon::{Lexicon, LexiconData, MemoryLexicon};
pub use morphology::{analyze_pair, analyze_word};
pub use sentence::{analyze_sequence, parse_sentence, SequenceParses};
pub use types::{AnalysisNode, NodeKind, SentenceParse, WordAnalysis, WordParse};
