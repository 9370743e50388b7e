// Output formatting for analysis trees.

use crate::types::*;

/// Every root-to-leaf chain of an analysis, alternatives in order.
pub fn paths(analysis: &[AnalysisNode]) -> Vec<Vec<&AnalysisNode>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for node in analysis {
        collect_paths(node, &mut current, &mut out);
    }
    out
}

fn collect_paths<'a>(
    node: &'a AnalysisNode,
    current: &mut Vec<&'a AnalysisNode>,
    out: &mut Vec<Vec<&'a AnalysisNode>>,
) {
    current.push(node);
    if node.children().is_empty() {
        out.push(current.clone());
    } else {
        for child in node.children() {
            collect_paths(child, current, out);
        }
    }
    current.pop();
}

/// The input text a path consumed: surfaces concatenated, with one space
/// before the first node taken from the following word.
pub fn path_text(path: &[&AnalysisNode]) -> String {
    let mut text = String::new();
    let mut crossed = false;
    for node in path {
        if node.is_next_word() && !crossed {
            text.push(' ');
            crossed = true;
        }
        text.push_str(node.surface());
    }
    text
}

/// Convert a path to bracketed `{value:tag}` component format.
///
/// Format:
///   Roots:       `{bar:v}` (part of speech)
///   Allomorphs:  `{-dı:PST}` (leading dash, gram value tag)
///   Next word:   `{ide:COP}` (particle, adposition or auxiliary verb)
pub fn to_bracketed(path: &[&AnalysisNode]) -> String {
    path.iter()
        .map(|node| match node {
            AnalysisNode::Root(n) => format!("{{{}:{}}}", n.value, n.pos),
            AnalysisNode::Allomorph(n) => format!("{{-{}:{}}}", n.value, n.gram_value.tag),
            AnalysisNode::Particle(n)
            | AnalysisNode::Adposition(n)
            | AnalysisNode::AuxiliaryVerb(n) => format!("{{{}:{}}}", n.value, n.gram_value.tag),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// All alternatives of one analysis, separated by ` | `. No analysis is `?`.
pub fn analysis_to_bracketed(analysis: Option<&[AnalysisNode]>) -> String {
    match analysis {
        Some(nodes) if !nodes.is_empty() => paths(nodes)
            .iter()
            .map(|p| to_bracketed(p))
            .collect::<Vec<_>>()
            .join(" | "),
        _ => "?".to_string(),
    }
}

/// Format a full sentence parse in bracketed format, one unit per `;`.
pub fn sentence_to_bracketed(parse: &SentenceParse) -> String {
    parse
        .words
        .iter()
        .map(|wp| analysis_to_bracketed(wp.analysis.as_deref()))
        .collect::<Vec<_>>()
        .join("; ")
}
