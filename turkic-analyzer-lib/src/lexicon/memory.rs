use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use super::data::{AlphaLetterRow, ClosedClassRow, LexiconData, MorphemeRow};
use super::{Lexicon, Result};
use crate::alphabet::Alphabet;
use crate::error::LexiconError;
use crate::types::*;

/// Lexicon held entirely in memory, built once from a `LexiconData` dump.
///
/// Immutable after construction, so it can be shared across threads behind
/// an `Arc` without locking.
#[derive(Debug)]
pub struct MemoryLexicon {
    metadata: LexiconMetadata,
    alphabet: Alphabet,
    letters: Vec<AlphaLetter>,
    roots: Vec<RootRecord>,
    /// Stripped lower-case value -> indices into `roots`.
    roots_by_strip: HashMap<String, Vec<usize>>,
    roots_by_concept: HashMap<Id, Vec<usize>>,
    taxonomy: HashMap<Id, String>,
    allomorphs: Vec<AllomorphRecord>,
    allomorph_index: HashMap<Id, usize>,
    particles: Vec<ParticleRecord>,
    particle_index: HashMap<Id, usize>,
    adpositions: ClosedClass,
    auxiliary_verbs: ClosedClass,
    t2a: HashMap<Id, Vec<TypeEdge>>,
    a2a: HashMap<Id, Vec<Id>>,
    p2a: HashMap<Id, Vec<Id>>,
    t2p: HashMap<Id, Vec<Id>>,
    a2p: HashMap<Id, Vec<Id>>,
}

impl MemoryLexicon {
    /// Resolve and index a raw dataset.
    pub fn from_data(data: LexiconData) -> Result<Self> {
        let metadata = data
            .metadata
            .first()
            .map(|m| LexiconMetadata {
                language: m.language.clone(),
                version: m.version,
                build: m.build,
                size: m.size,
            })
            .unwrap_or_default();

        let letters = alpha_letters(data.alpha_letter);
        let alphabet = Alphabet::new(letters.iter().copied());

        let gram_values: HashMap<Id, GramValue> = data
            .gram_value
            .into_iter()
            .map(|g| (g.id, GramValue { id: g.id, tag: g.tag }))
            .collect();
        let morpheme_grams = resolve_owners(&data.affixal_morpheme, &gram_values, "affixal_morpheme")?;
        let particle_grams = resolve_owners(&data.particle, &gram_values, "particle")?;

        let types: HashMap<Id, MorphonologicalType> = data
            .morphonological_type
            .iter()
            .map(|t| (t.id, MorphonologicalType { id: t.id, strip: t.strip }))
            .collect();

        let mut roots = Vec::with_capacity(data.root_morpheme.len());
        let mut roots_by_strip: HashMap<String, Vec<usize>> = HashMap::new();
        let mut roots_by_concept: HashMap<Id, Vec<usize>> = HashMap::new();
        for row in data.root_morpheme {
            let morph_type = row.type_id.and_then(|id| types.get(&id).copied());
            let value_lower = row
                .value_lower
                .unwrap_or_else(|| alphabet.lower(&row.value));
            let value_strip = row.value_strip.unwrap_or_else(|| {
                let strip = morph_type.map_or(0, |t| t.strip);
                strip_trailing_chars(&value_lower, strip).to_string()
            });

            roots_by_strip
                .entry(value_strip.clone())
                .or_default()
                .push(roots.len());
            roots_by_concept
                .entry(row.concept_id)
                .or_default()
                .push(roots.len());
            roots.push(RootRecord {
                id: row.id,
                code: row.code,
                value: row.value,
                value_lower,
                value_strip,
                pos: row.pos,
                concept: Concept {
                    id: row.concept_id,
                    en_name: row.concept_en_name,
                    ru_name: row.concept_ru_name,
                },
                morph_type,
            });
        }

        let mut allomorphs = Vec::with_capacity(data.affixal_allomorph.len());
        let mut allomorph_index = HashMap::new();
        for row in data.affixal_allomorph {
            let gram_value = morpheme_grams
                .get(&row.affixal_morpheme_id)
                .cloned()
                .ok_or(LexiconError::DanglingReference {
                    table: "affixal_allomorph",
                    id: row.id,
                    column: "affixal_morpheme_id",
                    target: row.affixal_morpheme_id,
                })?;
            allomorph_index.entry(row.id).or_insert(allomorphs.len());
            allomorphs.push(AllomorphRecord {
                id: row.id,
                code: row.code,
                value: row.value,
                is_final: row.is_final,
                gram_value,
            });
        }

        let mut particles = Vec::with_capacity(data.particle_allomorph.len());
        let mut particle_index = HashMap::new();
        for row in data.particle_allomorph {
            let gram_value = particle_grams
                .get(&row.particle_id)
                .cloned()
                .ok_or(LexiconError::DanglingReference {
                    table: "particle_allomorph",
                    id: row.id,
                    column: "particle_id",
                    target: row.particle_id,
                })?;
            let value_lower = row
                .value_lower
                .unwrap_or_else(|| alphabet.lower(&row.value));
            particle_index.entry(row.id).or_insert(particles.len());
            particles.push(ParticleRecord {
                id: row.id,
                code: row.code,
                value: row.value,
                value_lower,
                gram_value,
            });
        }

        let adpositions = ClosedClass::build(data.adposition, &gram_values, &alphabet, "adposition")?;
        let auxiliary_verbs =
            ClosedClass::build(data.auxiliary_verb, &gram_values, &alphabet, "auxiliary_verb")?;

        let mut taxonomy = HashMap::new();
        for row in data.object_concept_taxonomy {
            taxonomy.entry(row.id).or_insert(row.taxonomical_code);
        }

        let mut t2a: HashMap<Id, Vec<TypeEdge>> = HashMap::new();
        for row in data.morphotactics_t2a {
            t2a.entry(row.morphonological_type_id)
                .or_default()
                .push(TypeEdge {
                    allomorph_id: row.affixal_allomorph_id,
                    link: row.link_chars.unwrap_or_default(),
                });
        }
        let a2a = edge_map(
            data.morphotactics_a2a
                .iter()
                .map(|e| (e.affixal_allomorph1_id, e.affixal_allomorph2_id)),
        );
        let p2a = edge_map(
            data.morphotactics_p2a
                .iter()
                .map(|e| (e.particle_allomorph1_id, e.affixal_allomorph2_id)),
        );
        let t2p = edge_map(
            data.morphotactics_t2p
                .iter()
                .map(|e| (e.morphonological_type_id, e.particle_allomorph_id)),
        );
        let a2p = edge_map(
            data.morphotactics_a2p
                .iter()
                .map(|e| (e.affixal_allomorph1_id, e.particle_allomorph2_id)),
        );

        tracing::info!(
            language = %metadata.language,
            version = metadata.version,
            build = metadata.build,
            roots = roots.len(),
            allomorphs = allomorphs.len(),
            particles = particles.len(),
            adpositions = adpositions.records.len(),
            auxiliary_verbs = auxiliary_verbs.records.len(),
            "lexicon loaded"
        );

        Ok(Self {
            metadata,
            alphabet,
            letters,
            roots,
            roots_by_strip,
            roots_by_concept,
            taxonomy,
            allomorphs,
            allomorph_index,
            particles,
            particle_index,
            adpositions,
            auxiliary_verbs,
            t2a,
            a2a,
            p2a,
            t2p,
            a2p,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_data(LexiconData::from_json_str(json)?)
    }

    pub fn from_xml_str(xml: &str) -> Result<Self> {
        Self::from_data(LexiconData::from_xml_str(xml)?)
    }

    /// Load a dataset file. The format follows the extension: `.json` or `.xml`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading lexicon");

        let data = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => {
                LexiconData::from_json_slice(&fs::read(path)?)?
            }
            Some(ext) if ext.eq_ignore_ascii_case("xml") => {
                LexiconData::from_xml_str(&fs::read_to_string(path)?)?
            }
            _ => return Err(LexiconError::UnsupportedFormat(path.to_path_buf())),
        };
        Self::from_data(data)
    }

    /// Alphabet built from the dataset's letters.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    fn allomorph_matches<'a>(
        &'a self,
        ids: &'a [Id],
        values: &'a HashSet<&'a str>,
    ) -> impl Iterator<Item = usize> + 'a {
        ids.iter()
            .filter_map(|id| self.allomorph_index.get(id).copied())
            .filter(|&idx| values.contains(self.allomorphs[idx].value.as_str()))
    }

    fn allomorph(&self, id: Id) -> Option<&AllomorphRecord> {
        self.allomorph_index.get(&id).map(|&idx| &self.allomorphs[idx])
    }

    fn particle(&self, id: Id) -> Option<&ParticleRecord> {
        self.particle_index.get(&id).map(|&idx| &self.particles[idx])
    }
}

/// Letters sorted by `ordering`. Rows whose forms are not single characters
/// cannot drive a char table and are skipped.
fn alpha_letters(mut rows: Vec<AlphaLetterRow>) -> Vec<AlphaLetter> {
    rows.sort_by_key(|r| r.ordering);
    rows.into_iter()
        .filter_map(|r| match (single_char(&r.lower), single_char(&r.upper)) {
            (Some(lower), Some(upper)) => Some(AlphaLetter { lower, upper }),
            _ => {
                tracing::warn!(id = r.id, lower = %r.lower, upper = %r.upper, "skipping multi-char letter");
                None
            }
        })
        .collect()
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Map morpheme/particle ids to their gram values.
fn resolve_owners(
    rows: &[MorphemeRow],
    gram_values: &HashMap<Id, GramValue>,
    table: &'static str,
) -> Result<HashMap<Id, GramValue>> {
    rows.iter()
        .map(|row| {
            let gram_value = gram_values.get(&row.gram_value_id).cloned().ok_or(
                LexiconError::DanglingReference {
                    table,
                    id: row.id,
                    column: "gram_value_id",
                    target: row.gram_value_id,
                },
            )?;
            Ok((row.id, gram_value))
        })
        .collect()
}

/// Adpositions or auxiliary verbs in dataset order, indexed by lower-case
/// value. The first record for a value wins the exact lookup.
#[derive(Debug, Default)]
struct ClosedClass {
    records: Vec<ClosedClassRecord>,
    index: HashMap<String, usize>,
}

impl ClosedClass {
    fn build(
        rows: Vec<ClosedClassRow>,
        gram_values: &HashMap<Id, GramValue>,
        alphabet: &Alphabet,
        table: &'static str,
    ) -> Result<Self> {
        let mut class = ClosedClass::default();
        for row in rows {
            let gram_value = gram_values.get(&row.gram_value_id).cloned().ok_or(
                LexiconError::DanglingReference {
                    table,
                    id: row.id,
                    column: "gram_value_id",
                    target: row.gram_value_id,
                },
            )?;
            class
                .index
                .entry(alphabet.lower(&row.value))
                .or_insert(class.records.len());
            class.records.push(ClosedClassRecord {
                id: row.id,
                code: row.code,
                value: row.value,
                gram_value,
            });
        }
        Ok(class)
    }

    fn by_value(&self, value: &str) -> Option<ClosedClassRecord> {
        self.index.get(value).map(|&idx| self.records[idx].clone())
    }

    fn by_gram_value(&self, gram_value_id: Id) -> Vec<ClosedClassRecord> {
        self.records
            .iter()
            .filter(|r| r.gram_value.id == gram_value_id)
            .cloned()
            .collect()
    }
}

fn edge_map(edges: impl Iterator<Item = (Id, Id)>) -> HashMap<Id, Vec<Id>> {
    let mut map: HashMap<Id, Vec<Id>> = HashMap::new();
    for (from, to) in edges {
        map.entry(from).or_default().push(to);
    }
    map
}

fn value_set(values: &[String]) -> HashSet<&str> {
    values.iter().map(String::as_str).collect()
}

/// Sort indices into dataset order and drop repeats.
fn dataset_order(mut indices: Vec<usize>) -> Vec<usize> {
    indices.sort_unstable();
    indices.dedup();
    indices
}

impl Lexicon for MemoryLexicon {
    fn metadata(&self) -> Result<LexiconMetadata> {
        Ok(self.metadata.clone())
    }

    fn alpha_letters(&self) -> Result<Vec<AlphaLetter>> {
        Ok(self.letters.clone())
    }

    fn roots_by_values(&self, values: &[String]) -> Result<Vec<RootRecord>> {
        let indices = values
            .iter()
            .filter_map(|v| self.roots_by_strip.get(v))
            .flatten()
            .copied()
            .collect();
        Ok(dataset_order(indices)
            .into_iter()
            .map(|idx| self.roots[idx].clone())
            .collect())
    }

    fn allomorphs_by_ids_and_values(
        &self,
        ids: &[Id],
        values: &[String],
    ) -> Result<Vec<AllomorphRecord>> {
        let values = value_set(values);
        let indices = self.allomorph_matches(ids, &values).collect();
        Ok(dataset_order(indices)
            .into_iter()
            .map(|idx| self.allomorphs[idx].clone())
            .collect())
    }

    fn allomorphs_by_linked_ids_and_values(
        &self,
        edges: &[TypeEdge],
        values: &[String],
    ) -> Result<Vec<LinkedAllomorph>> {
        let mut seen = HashSet::new();
        let mut linked = Vec::new();

        for edge in edges {
            let Some(&idx) = self.allomorph_index.get(&edge.allomorph_id) else {
                continue;
            };
            let allomorph = &self.allomorphs[idx];
            let matches = values.iter().any(|v| {
                let unlinked = v.strip_prefix(edge.link.as_str()).unwrap_or(v);
                unlinked == allomorph.value
            });
            if matches && seen.insert((allomorph.id, edge.link.as_str())) {
                linked.push(LinkedAllomorph {
                    link: edge.link.clone(),
                    allomorph: allomorph.clone(),
                });
            }
        }

        Ok(linked)
    }

    fn particle_allomorphs_by_ids_and_values(
        &self,
        ids: &[Id],
        values: &[String],
    ) -> Result<Vec<ParticleRecord>> {
        let values = value_set(values);
        let indices = ids
            .iter()
            .filter_map(|id| self.particle_index.get(id).copied())
            .filter(|&idx| values.contains(self.particles[idx].value.as_str()))
            .collect();
        Ok(dataset_order(indices)
            .into_iter()
            .map(|idx| self.particles[idx].clone())
            .collect())
    }

    fn adposition_by_value(&self, value: &str) -> Result<Option<ClosedClassRecord>> {
        Ok(self.adpositions.by_value(&self.alphabet.lower(value)))
    }

    fn auxiliary_verb_by_value(&self, value: &str) -> Result<Option<ClosedClassRecord>> {
        Ok(self.auxiliary_verbs.by_value(&self.alphabet.lower(value)))
    }

    fn type_allomorph_edges(&self, type_id: Id) -> Result<Vec<TypeEdge>> {
        Ok(self.t2a.get(&type_id).cloned().unwrap_or_default())
    }

    fn allomorph_successors(&self, allomorph_id: Id) -> Result<Vec<Id>> {
        Ok(self.a2a.get(&allomorph_id).cloned().unwrap_or_default())
    }

    fn particle_successors(&self, particle_id: Id) -> Result<Vec<Id>> {
        Ok(self.p2a.get(&particle_id).cloned().unwrap_or_default())
    }

    fn type_particles(&self, type_id: Id) -> Result<Vec<Id>> {
        Ok(self.t2p.get(&type_id).cloned().unwrap_or_default())
    }

    fn allomorph_particles(&self, allomorph_id: Id) -> Result<Vec<Id>> {
        Ok(self.a2p.get(&allomorph_id).cloned().unwrap_or_default())
    }

    fn roots_by_concept(&self, concept_id: Id) -> Result<Vec<RootRecord>> {
        Ok(self
            .roots_by_concept
            .get(&concept_id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.roots[idx])
            .filter(|r| r.morph_type.is_some())
            .cloned()
            .collect())
    }

    fn taxonomical_code(&self, concept_id: Id) -> Result<Option<String>> {
        Ok(self.taxonomy.get(&concept_id).cloned())
    }

    fn allomorphs_by_gram_value_and_type(
        &self,
        gram_value_id: Id,
        type_id: Id,
    ) -> Result<Vec<LinkedAllomorph>> {
        Ok(self
            .t2a
            .get(&type_id)
            .into_iter()
            .flatten()
            .filter_map(|edge| {
                let allomorph = self.allomorph(edge.allomorph_id)?;
                (allomorph.gram_value.id == gram_value_id).then(|| LinkedAllomorph {
                    link: edge.link.clone(),
                    allomorph: allomorph.clone(),
                })
            })
            .collect())
    }

    fn allomorph_successors_by_gram_value(
        &self,
        gram_value_id: Id,
        allomorph_id: Id,
    ) -> Result<Vec<AllomorphRecord>> {
        Ok(self
            .a2a
            .get(&allomorph_id)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.allomorph(id))
            .filter(|a| a.gram_value.id == gram_value_id)
            .cloned()
            .collect())
    }

    fn allomorph_particles_by_gram_value(
        &self,
        gram_value_id: Id,
        allomorph_id: Id,
    ) -> Result<Vec<ParticleRecord>> {
        Ok(self
            .a2p
            .get(&allomorph_id)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.particle(id))
            .filter(|p| p.gram_value.id == gram_value_id)
            .cloned()
            .collect())
    }

    fn adpositions_by_gram_value(&self, gram_value_id: Id) -> Result<Vec<ClosedClassRecord>> {
        Ok(self.adpositions.by_gram_value(gram_value_id))
    }

    fn auxiliary_verbs_by_gram_value(&self, gram_value_id: Id) -> Result<Vec<ClosedClassRecord>> {
        Ok(self.auxiliary_verbs.by_gram_value(gram_value_id))
    }
}
