use serde::{Deserialize, Serialize};

/// Primary key of a lexicon table row.
pub type Id = u32;

/// Grammatical category tag carried by every non-root morpheme (e.g. "PST", "PL").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GramValue {
    pub id: Id,
    pub tag: String,
}

/// Lexical concept referenced by a root, glossed in English and Russian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: Id,
    pub en_name: String,
    pub ru_name: String,
}

impl Concept {
    /// Bilingual gloss in `"en : ru"` form.
    pub fn gloss(&self) -> String {
        format!("{} : {}", self.en_name, self.ru_name)
    }
}

/// Morphonological class of a root. Anchors the root's outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorphonologicalType {
    pub id: Id,
    /// Number of trailing characters dropped from the root before suffixation.
    pub strip: usize,
}

/// A root morpheme as returned by the lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootRecord {
    pub id: Id,
    pub code: String,
    pub value: String,
    pub value_lower: String,
    /// `value_lower` with the type's `strip` trailing characters removed.
    pub value_strip: String,
    /// Part of speech (e.g. "n", "v").
    pub pos: String,
    pub concept: Concept,
    /// None when the row's type id is NULL or does not resolve.
    pub morph_type: Option<MorphonologicalType>,
}

/// An affixal allomorph with its resolved gram value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllomorphRecord {
    pub id: Id,
    pub code: String,
    pub value: String,
    /// True if a chain may end right after this allomorph.
    pub is_final: bool,
    pub gram_value: GramValue,
}

/// An allomorph matched through a type -> allomorph edge, together with the
/// link characters of that edge.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedAllomorph {
    pub link: String,
    pub allomorph: AllomorphRecord,
}

impl LinkedAllomorph {
    /// The surface consumed by this match: link characters followed by the
    /// allomorph's own value.
    pub fn morph(&self) -> String {
        format!("{}{}", self.link, self.allomorph.value)
    }
}

/// A particle allomorph (clitic-like bound word).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleRecord {
    pub id: Id,
    pub code: String,
    pub value: String,
    pub value_lower: String,
    pub gram_value: GramValue,
}

/// A closed-class following word: an adposition or an auxiliary verb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedClassRecord {
    pub id: Id,
    pub code: String,
    pub value: String,
    pub gram_value: GramValue,
}

/// A type -> allomorph transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEdge {
    pub allomorph_id: Id,
    /// Epenthetic characters between the root and the allomorph ("" if none).
    pub link: String,
}

/// One letter of a language alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaLetter {
    pub lower: char,
    pub upper: char,
}

/// Dataset identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconMetadata {
    pub language: String,
    pub version: u32,
    pub build: u32,
    pub size: u64,
}

impl Default for LexiconMetadata {
    fn default() -> Self {
        Self {
            language: "LANGUAGE_NONE".to_string(),
            version: 0,
            build: 0,
            size: 0,
        }
    }
}

/// Kind of an analysis node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Allomorph,
    Particle,
    Adposition,
    AuxiliaryVerb,
}

/// Root node of an analysis tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootNode {
    pub id: Id,
    pub value: String,
    /// The part of the word this root consumed.
    pub surface: String,
    pub pos: String,
    pub concept: Concept,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AnalysisNode>,
}

/// Non-root node: allomorph, particle, adposition or auxiliary verb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphNode {
    pub id: Id,
    pub value: String,
    /// The part of the input this node consumed (link characters included).
    pub surface: String,
    pub gram_value: GramValue,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AnalysisNode>,
}

/// One node of an ambiguous analysis tree. Siblings are alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisNode {
    Root(RootNode),
    Allomorph(MorphNode),
    Particle(MorphNode),
    Adposition(MorphNode),
    AuxiliaryVerb(MorphNode),
}

impl AnalysisNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            AnalysisNode::Root(_) => NodeKind::Root,
            AnalysisNode::Allomorph(_) => NodeKind::Allomorph,
            AnalysisNode::Particle(_) => NodeKind::Particle,
            AnalysisNode::Adposition(_) => NodeKind::Adposition,
            AnalysisNode::AuxiliaryVerb(_) => NodeKind::AuxiliaryVerb,
        }
    }

    pub fn id(&self) -> Id {
        match self {
            AnalysisNode::Root(n) => n.id,
            AnalysisNode::Allomorph(n)
            | AnalysisNode::Particle(n)
            | AnalysisNode::Adposition(n)
            | AnalysisNode::AuxiliaryVerb(n) => n.id,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            AnalysisNode::Root(n) => &n.value,
            AnalysisNode::Allomorph(n)
            | AnalysisNode::Particle(n)
            | AnalysisNode::Adposition(n)
            | AnalysisNode::AuxiliaryVerb(n) => &n.value,
        }
    }

    pub fn surface(&self) -> &str {
        match self {
            AnalysisNode::Root(n) => &n.surface,
            AnalysisNode::Allomorph(n)
            | AnalysisNode::Particle(n)
            | AnalysisNode::Adposition(n)
            | AnalysisNode::AuxiliaryVerb(n) => &n.surface,
        }
    }

    pub fn children(&self) -> &[AnalysisNode] {
        match self {
            AnalysisNode::Root(n) => &n.children,
            AnalysisNode::Allomorph(n)
            | AnalysisNode::Particle(n)
            | AnalysisNode::Adposition(n)
            | AnalysisNode::AuxiliaryVerb(n) => &n.children,
        }
    }

    /// True for nodes that start in the following word.
    pub fn is_next_word(&self) -> bool {
        matches!(
            self,
            AnalysisNode::Particle(_) | AnalysisNode::Adposition(_) | AnalysisNode::AuxiliaryVerb(_)
        )
    }
}

/// Alternative top-level parses of a word, or None if nothing matched.
pub type WordAnalysis = Option<Vec<AnalysisNode>>;

/// Analysis of one output unit: a single word, or a word bound to its follower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordParse {
    /// `word`, or `word + " " + next_word` when the follower was consumed.
    pub word: String,
    pub analysis: WordAnalysis,
    #[serde(skip)]
    pub consumed_next: bool,
}

/// All units of an analysed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceParse {
    pub input: String,
    pub words: Vec<WordParse>,
}

/// Drop `count` trailing characters (not bytes) from `value`.
pub(crate) fn strip_trailing_chars(value: &str, count: usize) -> &str {
    if count == 0 {
        return value;
    }
    match value.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &value[..idx],
        None => "",
    }
}

/// All non-empty prefixes of `word`, shortest first, split on char boundaries.
pub(crate) fn prefixes(word: &str) -> Vec<String> {
    word.char_indices()
        .map(|(idx, c)| word[..idx + c.len_utf8()].to_string())
        .collect()
}
