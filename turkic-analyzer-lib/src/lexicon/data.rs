// Raw dataset rows, one struct per table. Field names follow column names so
// the same rows come out of the JSON and XML serializations.

use serde::{Deserialize, Deserializer, Serialize};

use super::Result;
use crate::types::Id;

/// A whole language dataset, table by table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconData {
    pub metadata: Vec<MetadataRow>,
    pub alpha_letter: Vec<AlphaLetterRow>,
    pub gram_value: Vec<GramValueRow>,
    pub morphonological_type: Vec<TypeRow>,
    pub root_morpheme: Vec<RootRow>,
    pub affixal_morpheme: Vec<MorphemeRow>,
    pub affixal_allomorph: Vec<AllomorphRow>,
    pub particle: Vec<MorphemeRow>,
    pub particle_allomorph: Vec<ParticleAllomorphRow>,
    pub adposition: Vec<ClosedClassRow>,
    #[serde(alias = "auxilary_verb")]
    pub auxiliary_verb: Vec<ClosedClassRow>,
    pub morphotactics_t2a: Vec<TypeAllomorphRow>,
    pub morphotactics_a2a: Vec<AllomorphAllomorphRow>,
    pub morphotactics_p2a: Vec<ParticleAllomorphEdgeRow>,
    pub morphotactics_t2p: Vec<TypeParticleRow>,
    pub morphotactics_a2p: Vec<AllomorphParticleRow>,
    pub object_concept_taxonomy: Vec<TaxonomyRow>,
}

impl LexiconData {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_slice(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataRow {
    pub language: String,
    pub version: u32,
    pub build: u32,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlphaLetterRow {
    #[serde(default)]
    pub id: Id,
    pub lower: String,
    pub upper: String,
    #[serde(default)]
    pub ordering: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GramValueRow {
    pub id: Id,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRow {
    pub id: Id,
    #[serde(default)]
    pub strip: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootRow {
    pub id: Id,
    #[serde(default)]
    pub code: String,
    pub value: String,
    #[serde(default)]
    pub value_lower: Option<String>,
    #[serde(default)]
    pub value_strip: Option<String>,
    #[serde(default)]
    pub pos: String,
    #[serde(default)]
    pub type_id: Option<Id>,
    #[serde(default)]
    pub concept_id: Id,
    #[serde(default)]
    pub concept_en_name: String,
    #[serde(default)]
    pub concept_ru_name: String,
}

/// Affixal morpheme or particle: the owner of a gram value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MorphemeRow {
    pub id: Id,
    pub gram_value_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllomorphRow {
    pub id: Id,
    #[serde(default)]
    pub code: String,
    pub value: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_final: bool,
    pub affixal_morpheme_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleAllomorphRow {
    pub id: Id,
    #[serde(default)]
    pub code: String,
    pub value: String,
    #[serde(default)]
    pub value_lower: Option<String>,
    pub particle_id: Id,
}

/// Adposition or auxiliary verb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedClassRow {
    pub id: Id,
    #[serde(default)]
    pub code: String,
    pub value: String,
    pub gram_value_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAllomorphRow {
    pub morphonological_type_id: Id,
    pub affixal_allomorph_id: Id,
    #[serde(default)]
    pub link_chars: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllomorphAllomorphRow {
    pub affixal_allomorph1_id: Id,
    pub affixal_allomorph2_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleAllomorphEdgeRow {
    pub particle_allomorph1_id: Id,
    pub affixal_allomorph2_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParticleRow {
    pub morphonological_type_id: Id,
    pub particle_allomorph_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllomorphParticleRow {
    pub affixal_allomorph1_id: Id,
    pub particle_allomorph2_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyRow {
    pub id: Id,
    #[serde(default)]
    pub taxonomical_code: String,
}

/// Accept `true`/`false` as well as the 0/1 integers of SQL exports.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}
