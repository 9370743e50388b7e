// Segmentation engine: root matching, allomorph chains and next-word binding.
//
// A word is split as root + allomorph chain. Every root whose stripped value
// is a prefix of the word is tried; from the root's morphonological type the
// chain follows type -> allomorph edges, then allomorph -> allomorph edges,
// each step consuming a prefix of what is left. All complete decompositions
// are kept as sibling alternatives.
//
// When a chain ends exactly at the end of the word, the following word may be
// bound to it: as a particle (with its own chain), an adposition or an
// auxiliary verb.

use crate::error::{AnalysisError, LexiconError};
use crate::lexicon::Lexicon;
use crate::types::*;

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// Surviving alternatives of one matching step.
#[derive(Debug, Default)]
struct Branches {
    nodes: Vec<AnalysisNode>,
    /// True if any alternative bound the next word.
    consumed_next: bool,
}

impl Branches {
    fn push(&mut self, node: AnalysisNode, consumed_next: bool) {
        self.nodes.push(node);
        self.consumed_next |= consumed_next;
    }
}

/// What a next-word binding hangs off.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    /// A bare root, keyed by its morphonological type.
    Type(Id),
    /// The final allomorph of a chain.
    Allomorph(Id),
}

/// Outgoing edges of one chain step.
#[derive(Debug, Clone, Copy)]
enum Edges<'a> {
    /// Type -> allomorph edges, each with its link characters.
    Linked(&'a [TypeEdge]),
    /// Allomorph -> allomorph or particle -> allomorph edges.
    Plain(&'a [Id]),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse a lower-cased word, optionally binding the word that follows it.
///
/// The returned `WordParse` covers `word + " " + next_word` when any
/// alternative consumed the follower, and `word` alone otherwise.
pub fn analyze_word(
    word: &str,
    next_word: Option<&str>,
    lexicon: &dyn Lexicon,
) -> Result<WordParse, AnalysisError> {
    if word.is_empty() {
        return Err(AnalysisError::EmptyWord);
    }

    let roots = lexicon.roots_by_values(&prefixes(word))?;
    let mut branches = Branches::default();

    for root in roots {
        let Some(morph_type) = root.morph_type else {
            tracing::warn!(root = root.id, value = %root.value, "root has no morphonological type, skipping");
            continue;
        };

        let morph = if word != root.value_lower {
            strip_trailing_chars(&root.value_lower, morph_type.strip)
        } else {
            root.value_lower.as_str()
        };
        let Some(remainder) = word.strip_prefix(morph).filter(|_| !morph.is_empty()) else {
            tracing::trace!(word, root = root.id, morph, "root form is not a prefix");
            continue;
        };

        if remainder.is_empty() {
            let binding = bind_next_word(Anchor::Type(morph_type.id), next_word, lexicon)?;
            let node = root_node(&root, morph, binding.nodes);
            branches.push(node, binding.consumed_next);
            continue;
        }

        let edges = lexicon.type_allomorph_edges(morph_type.id)?;
        if edges.is_empty() {
            continue;
        }
        let chain = match_allomorph_chain(remainder, Edges::Linked(&edges), next_word, lexicon)?;
        if chain.nodes.is_empty() {
            continue;
        }
        let node = root_node(&root, morph, chain.nodes);
        branches.push(node, chain.consumed_next);
    }

    let consumed_next = branches.consumed_next && next_word.is_some();
    let text = match next_word {
        Some(next) if consumed_next => format!("{word} {next}"),
        _ => word.to_string(),
    };
    tracing::debug!(
        word = %text,
        alternatives = branches.nodes.len(),
        consumed_next,
        "analysed word"
    );

    Ok(WordParse {
        word: text,
        analysis: (!branches.nodes.is_empty()).then_some(branches.nodes),
        consumed_next,
    })
}

/// Analyse a word with a known follower. No windowing takes place.
pub fn analyze_pair(
    word: &str,
    next_word: Option<&str>,
    lexicon: &dyn Lexicon,
) -> Result<WordAnalysis, AnalysisError> {
    Ok(analyze_word(word, next_word, lexicon)?.analysis)
}

// ---------------------------------------------------------------------------
// Allomorph chains
// ---------------------------------------------------------------------------

/// Match allomorphs reachable through `edges` against the front of `remainder`,
/// recursing on whatever each match leaves over.
fn match_allomorph_chain(
    remainder: &str,
    edges: Edges<'_>,
    next_word: Option<&str>,
    lexicon: &dyn Lexicon,
) -> Result<Branches, LexiconError> {
    let candidates = prefixes(remainder);
    let matches: Vec<(String, AllomorphRecord)> = match edges {
        Edges::Linked(edges) => lexicon
            .allomorphs_by_linked_ids_and_values(edges, &candidates)?
            .into_iter()
            .map(|linked| (linked.morph(), linked.allomorph))
            .collect(),
        Edges::Plain(ids) => lexicon
            .allomorphs_by_ids_and_values(ids, &candidates)?
            .into_iter()
            .map(|allomorph| (allomorph.value.clone(), allomorph))
            .collect(),
    };

    let mut branches = Branches::default();
    for (morph, allomorph) in matches {
        // A link is only skipped where it is actually present.
        let Some(rest) = remainder.strip_prefix(morph.as_str()).filter(|_| !morph.is_empty()) else {
            continue;
        };
        tracing::trace!(remainder, allomorph = allomorph.id, morph = %morph, rest, "allomorph matched");

        if rest.is_empty() {
            if !allomorph.is_final {
                continue;
            }
            let binding = bind_next_word(Anchor::Allomorph(allomorph.id), next_word, lexicon)?;
            let node = allomorph_node(allomorph, morph, binding.nodes);
            branches.push(node, binding.consumed_next);
            continue;
        }

        let successors = lexicon.allomorph_successors(allomorph.id)?;
        if successors.is_empty() {
            continue;
        }
        let chain = match_allomorph_chain(rest, Edges::Plain(&successors), next_word, lexicon)?;
        if chain.nodes.is_empty() {
            continue;
        }
        let node = allomorph_node(allomorph, morph, chain.nodes);
        branches.push(node, chain.consumed_next);
    }

    Ok(branches)
}

// ---------------------------------------------------------------------------
// Next-word binding
// ---------------------------------------------------------------------------

/// Bind the following word to `anchor`. Particles are tried first, then
/// adpositions, then auxiliary verbs; the first rule with a result wins.
fn bind_next_word(
    anchor: Anchor,
    next_word: Option<&str>,
    lexicon: &dyn Lexicon,
) -> Result<Branches, LexiconError> {
    let Some(next) = next_word.filter(|w| !w.is_empty()) else {
        return Ok(Branches::default());
    };

    let particle_ids = match anchor {
        Anchor::Type(id) => lexicon.type_particles(id)?,
        Anchor::Allomorph(id) => lexicon.allomorph_particles(id)?,
    };
    if !particle_ids.is_empty() {
        let nodes = bind_particles(next, &particle_ids, lexicon)?;
        if !nodes.is_empty() {
            return Ok(Branches {
                nodes,
                consumed_next: true,
            });
        }
    }

    if let Some(adposition) = lexicon.adposition_by_value(next)? {
        return Ok(Branches {
            nodes: vec![AnalysisNode::Adposition(closed_class_node(adposition, next))],
            consumed_next: true,
        });
    }

    if let Some(verb) = lexicon.auxiliary_verb_by_value(next)? {
        return Ok(Branches {
            nodes: vec![AnalysisNode::AuxiliaryVerb(closed_class_node(verb, next))],
            consumed_next: true,
        });
    }

    Ok(Branches::default())
}

/// Particles among `ids` that start the following word, each with the
/// allomorph chain that consumes the rest of it.
fn bind_particles(
    next: &str,
    ids: &[Id],
    lexicon: &dyn Lexicon,
) -> Result<Vec<AnalysisNode>, LexiconError> {
    let particles = lexicon.particle_allomorphs_by_ids_and_values(ids, &prefixes(next))?;

    let mut nodes = Vec::new();
    for particle in particles {
        let morph = particle.value_lower.clone();
        let Some(rest) = next.strip_prefix(morph.as_str()).filter(|_| !morph.is_empty()) else {
            continue;
        };

        if rest.is_empty() {
            nodes.push(particle_node(particle, morph, Vec::new()));
            continue;
        }

        let successors = lexicon.particle_successors(particle.id)?;
        if successors.is_empty() {
            continue;
        }
        let chain = match_allomorph_chain(rest, Edges::Plain(&successors), None, lexicon)?;
        if chain.nodes.is_empty() {
            continue;
        }
        nodes.push(particle_node(particle, morph, chain.nodes));
    }

    Ok(nodes)
}

// ---------------------------------------------------------------------------
// Node construction
// ---------------------------------------------------------------------------

fn root_node(root: &RootRecord, morph: &str, children: Vec<AnalysisNode>) -> AnalysisNode {
    AnalysisNode::Root(RootNode {
        id: root.id,
        value: root.value.clone(),
        surface: morph.to_string(),
        pos: root.pos.clone(),
        concept: root.concept.clone(),
        children,
    })
}

fn allomorph_node(
    allomorph: AllomorphRecord,
    morph: String,
    children: Vec<AnalysisNode>,
) -> AnalysisNode {
    AnalysisNode::Allomorph(MorphNode {
        id: allomorph.id,
        value: allomorph.value,
        surface: morph,
        gram_value: allomorph.gram_value,
        children,
    })
}

fn particle_node(
    particle: ParticleRecord,
    morph: String,
    children: Vec<AnalysisNode>,
) -> AnalysisNode {
    AnalysisNode::Particle(MorphNode {
        id: particle.id,
        value: particle.value,
        surface: morph,
        gram_value: particle.gram_value,
        children,
    })
}

fn closed_class_node(record: ClosedClassRecord, next: &str) -> MorphNode {
    MorphNode {
        id: record.id,
        value: record.value,
        surface: next.to_string(),
        gram_value: record.gram_value,
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MemoryLexicon;

    /// Root "bar" (type 1, no strip), final allomorph "di" on a 1 -> di edge,
    /// auxiliary verb "ide".
    const SCENARIO: &str = r#"{
        "gram_value": [{"id": 1, "tag": "PST"}, {"id": 2, "tag": "COP"}],
        "morphonological_type": [{"id": 1, "strip": 0}],
        "root_morpheme": [{"id": 1, "value": "bar", "pos": "v", "type_id": 1}],
        "affixal_morpheme": [{"id": 1, "gram_value_id": 1}],
        "affixal_allomorph": [{"id": 10, "value": "di", "is_final": true, "affixal_morpheme_id": 1}],
        "auxiliary_verb": [{"id": 1, "value": "ide", "gram_value_id": 2}],
        "morphotactics_t2a": [{"morphonological_type_id": 1, "affixal_allomorph_id": 10}]
    }"#;

    const LEXICON: &str = r#"{
        "gram_value": [
            {"id": 1, "tag": "PST"}, {"id": 2, "tag": "COP"}, {"id": 3, "tag": "PL"},
            {"id": 4, "tag": "Q"}, {"id": 5, "tag": "LOC"}, {"id": 6, "tag": "POSS.3"},
            {"id": 7, "tag": "POST"}, {"id": 8, "tag": "NEG"}, {"id": 9, "tag": "DAT"},
            {"id": 10, "tag": "2SG"}
        ],
        "morphonological_type": [{"id": 1, "strip": 0}, {"id": 2, "strip": 1}],
        "root_morpheme": [
            {"id": 1, "value": "bar", "pos": "v", "type_id": 1},
            {"id": 2, "value": "at", "pos": "n", "type_id": 1},
            {"id": 3, "value": "ata", "pos": "n", "type_id": 1},
            {"id": 4, "value": "alu", "pos": "v", "type_id": 2},
            {"id": 5, "value": "zor", "pos": "adj", "type_id": null}
        ],
        "affixal_morpheme": [
            {"id": 1, "gram_value_id": 1}, {"id": 2, "gram_value_id": 3},
            {"id": 3, "gram_value_id": 5}, {"id": 4, "gram_value_id": 9},
            {"id": 5, "gram_value_id": 8}, {"id": 6, "gram_value_id": 6},
            {"id": 7, "gram_value_id": 10}
        ],
        "affixal_allomorph": [
            {"id": 10, "value": "di", "is_final": 1, "affixal_morpheme_id": 1},
            {"id": 11, "value": "lar", "is_final": 1, "affixal_morpheme_id": 2},
            {"id": 12, "value": "da", "is_final": 1, "affixal_morpheme_id": 3},
            {"id": 13, "value": "a", "is_final": 1, "affixal_morpheme_id": 4},
            {"id": 14, "value": "ma", "is_final": 0, "affixal_morpheme_id": 5},
            {"id": 15, "value": "ı", "is_final": 1, "affixal_morpheme_id": 6},
            {"id": 16, "value": "sın", "is_final": 1, "affixal_morpheme_id": 7}
        ],
        "particle": [{"id": 1, "gram_value_id": 4}],
        "particle_allomorph": [{"id": 20, "value": "mı", "particle_id": 1}],
        "adposition": [{"id": 1, "value": "bilän", "gram_value_id": 7}],
        "auxiliary_verb": [{"id": 1, "value": "ide", "gram_value_id": 2}],
        "morphotactics_t2a": [
            {"morphonological_type_id": 1, "affixal_allomorph_id": 10},
            {"morphonological_type_id": 1, "affixal_allomorph_id": 11},
            {"morphonological_type_id": 1, "affixal_allomorph_id": 12},
            {"morphonological_type_id": 1, "affixal_allomorph_id": 13},
            {"morphonological_type_id": 1, "affixal_allomorph_id": 14},
            {"morphonological_type_id": 1, "affixal_allomorph_id": 15, "link_chars": "s"},
            {"morphonological_type_id": 2, "affixal_allomorph_id": 10}
        ],
        "morphotactics_a2a": [
            {"affixal_allomorph1_id": 11, "affixal_allomorph2_id": 12},
            {"affixal_allomorph1_id": 14, "affixal_allomorph2_id": 10}
        ],
        "morphotactics_p2a": [{"particle_allomorph1_id": 20, "affixal_allomorph2_id": 16}],
        "morphotactics_t2p": [{"morphonological_type_id": 1, "particle_allomorph_id": 20}],
        "morphotactics_a2p": [{"affixal_allomorph1_id": 10, "particle_allomorph2_id": 20}]
    }"#;

    fn scenario() -> MemoryLexicon {
        MemoryLexicon::from_json_str(SCENARIO).unwrap()
    }

    fn lexicon() -> MemoryLexicon {
        MemoryLexicon::from_json_str(LEXICON).unwrap()
    }

    /// Every root-to-leaf chain as (kind, value) pairs.
    fn chains(nodes: &[AnalysisNode]) -> Vec<Vec<(NodeKind, String)>> {
        let mut out = Vec::new();
        for node in nodes {
            let here = (node.kind(), node.value().to_string());
            if node.children().is_empty() {
                out.push(vec![here]);
            } else {
                for mut tail in chains(node.children()) {
                    tail.insert(0, here.clone());
                    out.push(tail);
                }
            }
        }
        out
    }

    /// Every root-to-leaf chain as its concatenated surface text, with a
    /// space before the first node taken from the following word.
    fn surfaces(nodes: &[AnalysisNode], prefix: &str, crossed: bool, out: &mut Vec<String>) {
        for node in nodes {
            let mut text = prefix.to_string();
            let starts_next = node.is_next_word() && !crossed;
            if starts_next {
                text.push(' ');
            }
            text.push_str(node.surface());
            if node.children().is_empty() {
                out.push(text);
            } else {
                surfaces(node.children(), &text, crossed || starts_next, out);
            }
        }
    }

    fn values(chain: &[(NodeKind, String)]) -> Vec<&str> {
        chain.iter().map(|(_, v)| v.as_str()).collect()
    }

    #[test]
    fn test_bare_root() {
        let lex = scenario();
        let parse = analyze_word("bar", None, &lex).unwrap();
        let nodes = parse.analysis.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), NodeKind::Root);
        assert_eq!(nodes[0].value(), "bar");
        assert!(nodes[0].children().is_empty());
        assert!(!parse.consumed_next);
        assert_eq!(parse.word, "bar");
    }

    #[test]
    fn test_root_with_final_allomorph() {
        let lex = scenario();
        let nodes = analyze_word("bardi", None, &lex).unwrap().analysis.unwrap();
        let c = chains(&nodes);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0], vec![
            (NodeKind::Root, "bar".to_string()),
            (NodeKind::Allomorph, "di".to_string()),
        ]);
    }

    #[test]
    fn test_auxiliary_verb_binds() {
        let lex = scenario();
        let parse = analyze_word("bar", Some("ide"), &lex).unwrap();
        assert!(parse.consumed_next);
        assert_eq!(parse.word, "bar ide");
        let c = chains(parse.analysis.as_deref().unwrap());
        assert_eq!(c, vec![vec![
            (NodeKind::Root, "bar".to_string()),
            (NodeKind::AuxiliaryVerb, "ide".to_string()),
        ]]);
    }

    #[test]
    fn test_unknown_word_has_no_analysis() {
        let lex = scenario();
        let parse = analyze_word("zzz", Some("ide"), &lex).unwrap();
        assert_eq!(parse.analysis, None);
        assert!(!parse.consumed_next);
        assert_eq!(parse.word, "zzz");
        // No hidden state between calls.
        assert_eq!(analyze_word("zzz", None, &lex).unwrap().analysis, None);
    }

    #[test]
    fn test_empty_word_is_rejected() {
        let lex = scenario();
        assert!(matches!(
            analyze_word("", None, &lex),
            Err(AnalysisError::EmptyWord)
        ));
    }

    #[test]
    fn test_strip_applies_only_when_suffixed() {
        let lex = lexicon();

        let bare = analyze_word("alu", None, &lex).unwrap().analysis.unwrap();
        assert_eq!(bare.len(), 1);
        assert_eq!(bare[0].surface(), "alu");

        let suffixed = analyze_word("aldi", None, &lex).unwrap().analysis.unwrap();
        assert_eq!(suffixed.len(), 1);
        assert_eq!(suffixed[0].value(), "alu");
        assert_eq!(suffixed[0].surface(), "al");
        assert_eq!(suffixed[0].children()[0].value(), "di");
    }

    #[test]
    fn test_link_characters_are_skipped() {
        let lex = lexicon();
        let nodes = analyze_word("atası", None, &lex).unwrap().analysis.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].value(), "ata");
        let suffix = &nodes[0].children()[0];
        assert_eq!(suffix.value(), "ı");
        assert_eq!(suffix.surface(), "sı");
    }

    #[test]
    fn test_link_must_be_present() {
        let lex = lexicon();
        // "ı" is only reachable from a type through the "s" link.
        assert_eq!(analyze_word("atı", None, &lex).unwrap().analysis, None);
    }

    #[test]
    fn test_non_final_allomorph_cannot_end_a_word() {
        let lex = lexicon();
        assert_eq!(analyze_word("barma", None, &lex).unwrap().analysis, None);

        let nodes = analyze_word("barmadi", None, &lex).unwrap().analysis.unwrap();
        let c = chains(&nodes);
        assert_eq!(c.len(), 1);
        assert_eq!(values(&c[0]), vec!["bar", "ma", "di"]);
    }

    #[test]
    fn test_dead_end_is_discarded() {
        let lex = lexicon();
        assert_eq!(analyze_word("bardix", None, &lex).unwrap().analysis, None);
    }

    #[test]
    fn test_chain_of_two_allomorphs() {
        let lex = lexicon();
        let nodes = analyze_word("atlarda", None, &lex).unwrap().analysis.unwrap();
        let c = chains(&nodes);
        assert_eq!(c.len(), 1);
        assert_eq!(values(&c[0]), vec!["at", "lar", "da"]);
    }

    #[test]
    fn test_ambiguous_word_keeps_all_alternatives() {
        let lex = lexicon();
        let nodes = analyze_word("ata", None, &lex).unwrap().analysis.unwrap();
        let c = chains(&nodes);
        assert_eq!(c.len(), 2);
        assert_eq!(values(&c[0]), vec!["at", "a"]);
        assert_eq!(values(&c[1]), vec!["ata"]);
    }

    /// Root "kal" with suffixes "ab" (final) and "a" (non-final) -> "b" (final).
    const BRANCHING: &str = r#"{
        "gram_value": [{"id": 1, "tag": "A"}, {"id": 2, "tag": "B"}, {"id": 3, "tag": "C"}],
        "morphonological_type": [{"id": 1, "strip": 0}],
        "root_morpheme": [{"id": 1, "value": "kal", "pos": "v", "type_id": 1}],
        "affixal_morpheme": [
            {"id": 1, "gram_value_id": 1}, {"id": 2, "gram_value_id": 2}, {"id": 3, "gram_value_id": 3}
        ],
        "affixal_allomorph": [
            {"id": 10, "value": "ab", "is_final": 1, "affixal_morpheme_id": 1},
            {"id": 11, "value": "a", "is_final": 0, "affixal_morpheme_id": 2},
            {"id": 12, "value": "b", "is_final": 1, "affixal_morpheme_id": 3}
        ],
        "morphotactics_t2a": [
            {"morphonological_type_id": 1, "affixal_allomorph_id": 10},
            {"morphonological_type_id": 1, "affixal_allomorph_id": 11}
        ],
        "morphotactics_a2a": [{"affixal_allomorph1_id": 11, "affixal_allomorph2_id": 12}]
    }"#;

    #[test]
    fn test_one_root_with_two_suffix_paths() {
        let lex = MemoryLexicon::from_json_str(BRANCHING).unwrap();
        let nodes = analyze_word("kalab", None, &lex).unwrap().analysis.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children().len(), 2);

        let c = chains(&nodes);
        assert_eq!(c.len(), 2);
        assert_eq!(values(&c[0]), vec!["kal", "ab"]);
        assert_eq!(values(&c[1]), vec!["kal", "a", "b"]);
    }

    #[test]
    fn test_root_without_type_is_skipped() {
        let lex = lexicon();
        assert_eq!(analyze_word("zor", None, &lex).unwrap().analysis, None);
    }

    #[test]
    fn test_particle_binds_to_root() {
        let lex = lexicon();
        let parse = analyze_word("bar", Some("mı"), &lex).unwrap();
        assert!(parse.consumed_next);
        let c = chains(parse.analysis.as_deref().unwrap());
        assert_eq!(c, vec![vec![
            (NodeKind::Root, "bar".to_string()),
            (NodeKind::Particle, "mı".to_string()),
        ]]);
    }

    #[test]
    fn test_particle_with_suffix_chain() {
        let lex = lexicon();
        let parse = analyze_word("bar", Some("mısın"), &lex).unwrap();
        assert!(parse.consumed_next);
        let c = chains(parse.analysis.as_deref().unwrap());
        assert_eq!(c.len(), 1);
        assert_eq!(values(&c[0]), vec!["bar", "mı", "sın"]);
    }

    #[test]
    fn test_particle_binds_to_allomorph() {
        let lex = lexicon();
        let parse = analyze_word("bardi", Some("mı"), &lex).unwrap();
        assert!(parse.consumed_next);
        let c = chains(parse.analysis.as_deref().unwrap());
        assert_eq!(values(&c[0]), vec!["bar", "di", "mı"]);
    }

    #[test]
    fn test_failed_particle_falls_through_to_adposition() {
        let lex = lexicon();
        let parse = analyze_word("bar", Some("bilän"), &lex).unwrap();
        assert!(parse.consumed_next);
        let nodes = parse.analysis.unwrap();
        assert_eq!(nodes[0].children()[0].kind(), NodeKind::Adposition);
    }

    #[test]
    fn test_particle_dead_end_leaves_next_word_alone() {
        let lex = lexicon();
        let parse = analyze_word("bar", Some("mıx"), &lex).unwrap();
        assert!(!parse.consumed_next);
        assert_eq!(parse.word, "bar");
        let nodes = parse.analysis.unwrap();
        assert!(nodes[0].children().is_empty());
    }

    #[test]
    fn test_consumed_next_if_any_alternative_binds() {
        let lex = lexicon();
        // ata + particle binds; at + a has no particle edge and nothing else matches.
        let parse = analyze_word("ata", Some("mı"), &lex).unwrap();
        assert!(parse.consumed_next);
        assert_eq!(parse.word, "ata mı");
        let c = chains(parse.analysis.as_deref().unwrap());
        assert_eq!(values(&c[0]), vec!["at", "a"]);
        assert_eq!(values(&c[1]), vec!["ata", "mı"]);
    }

    #[test]
    fn test_surfaces_reproduce_the_input() {
        let lex = lexicon();
        let cases = [
            ("atası", None),
            ("aldi", None),
            ("atlarda", None),
            ("barmadi", Some("mısın")),
            ("bar", Some("bilän")),
            ("ata", Some("ide")),
        ];
        for (word, next) in cases {
            let parse = analyze_word(word, next, &lex).unwrap();
            let mut texts = Vec::new();
            surfaces(parse.analysis.as_deref().unwrap(), "", false, &mut texts);
            for text in texts {
                assert_eq!(text, parse.word, "surfaces of {word:?} + {next:?}");
            }
        }
    }

    #[test]
    fn test_analyze_pair_returns_analysis() {
        let lex = scenario();
        let analysis = analyze_pair("bardi", Some("ide"), &lex).unwrap().unwrap();
        let c = chains(&analysis);
        assert_eq!(values(&c[0]), vec!["bar", "di", "ide"]);
    }

    /// A provider whose backing store has gone away.
    struct Unavailable;

    fn gone<T>() -> crate::lexicon::Result<T> {
        Err(LexiconError::Unavailable("connection closed".to_string()))
    }

    impl Lexicon for Unavailable {
        fn metadata(&self) -> crate::lexicon::Result<LexiconMetadata> {
            gone()
        }
        fn alpha_letters(&self) -> crate::lexicon::Result<Vec<AlphaLetter>> {
            gone()
        }
        fn roots_by_values(&self, _: &[String]) -> crate::lexicon::Result<Vec<RootRecord>> {
            gone()
        }
        fn allomorphs_by_ids_and_values(
            &self,
            _: &[Id],
            _: &[String],
        ) -> crate::lexicon::Result<Vec<AllomorphRecord>> {
            gone()
        }
        fn allomorphs_by_linked_ids_and_values(
            &self,
            _: &[TypeEdge],
            _: &[String],
        ) -> crate::lexicon::Result<Vec<LinkedAllomorph>> {
            gone()
        }
        fn particle_allomorphs_by_ids_and_values(
            &self,
            _: &[Id],
            _: &[String],
        ) -> crate::lexicon::Result<Vec<ParticleRecord>> {
            gone()
        }
        fn adposition_by_value(&self, _: &str) -> crate::lexicon::Result<Option<ClosedClassRecord>> {
            gone()
        }
        fn auxiliary_verb_by_value(
            &self,
            _: &str,
        ) -> crate::lexicon::Result<Option<ClosedClassRecord>> {
            gone()
        }
        fn type_allomorph_edges(&self, _: Id) -> crate::lexicon::Result<Vec<TypeEdge>> {
            gone()
        }
        fn allomorph_successors(&self, _: Id) -> crate::lexicon::Result<Vec<Id>> {
            gone()
        }
        fn particle_successors(&self, _: Id) -> crate::lexicon::Result<Vec<Id>> {
            gone()
        }
        fn type_particles(&self, _: Id) -> crate::lexicon::Result<Vec<Id>> {
            gone()
        }
        fn allomorph_particles(&self, _: Id) -> crate::lexicon::Result<Vec<Id>> {
            gone()
        }
        fn roots_by_concept(&self, _: Id) -> crate::lexicon::Result<Vec<RootRecord>> {
            gone()
        }
        fn taxonomical_code(&self, _: Id) -> crate::lexicon::Result<Option<String>> {
            gone()
        }
        fn allomorphs_by_gram_value_and_type(
            &self,
            _: Id,
            _: Id,
        ) -> crate::lexicon::Result<Vec<LinkedAllomorph>> {
            gone()
        }
        fn allomorph_successors_by_gram_value(
            &self,
            _: Id,
            _: Id,
        ) -> crate::lexicon::Result<Vec<AllomorphRecord>> {
            gone()
        }
        fn allomorph_particles_by_gram_value(
            &self,
            _: Id,
            _: Id,
        ) -> crate::lexicon::Result<Vec<ParticleRecord>> {
            gone()
        }
        fn adpositions_by_gram_value(&self, _: Id) -> crate::lexicon::Result<Vec<ClosedClassRecord>> {
            gone()
        }
        fn auxiliary_verbs_by_gram_value(
            &self,
            _: Id,
        ) -> crate::lexicon::Result<Vec<ClosedClassRecord>> {
            gone()
        }
    }

    #[test]
    fn test_provider_failure_aborts_the_call() {
        let err = analyze_word("bar", None, &Unavailable).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Lexicon(LexiconError::Unavailable(_))
        ));
    }
}
