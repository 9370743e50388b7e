// Lexicon provider: read-only access to one language's morpheme dataset.
//
// `Lexicon` is the contract the segmentation engine consumes. `MemoryLexicon`
// implements it over a dataset loaded once from JSON or an XML table dump.

mod data;
mod memory;
mod xml;

pub use data::*;
pub use memory::MemoryLexicon;

use crate::error::LexiconError;
use crate::types::*;

pub type Result<T> = std::result::Result<T, LexiconError>;

/// Point and batch lookups over a language dataset.
///
/// Lookups are side-effect free and may be issued concurrently. Batch lookups
/// return records in dataset order.
pub trait Lexicon: Send + Sync {
    fn metadata(&self) -> Result<LexiconMetadata>;

    /// Letters of the language alphabet, in display order.
    fn alpha_letters(&self) -> Result<Vec<AlphaLetter>>;

    /// Roots whose stripped lower-case value is one of `values`.
    fn roots_by_values(&self, values: &[String]) -> Result<Vec<RootRecord>>;

    /// Allomorphs among `ids` whose value is one of `values`.
    fn allomorphs_by_ids_and_values(
        &self,
        ids: &[Id],
        values: &[String],
    ) -> Result<Vec<AllomorphRecord>>;

    /// Allomorphs reached through type edges. Each edge's link is stripped
    /// from the front of every candidate value (where present) before the
    /// comparison.
    fn allomorphs_by_linked_ids_and_values(
        &self,
        edges: &[TypeEdge],
        values: &[String],
    ) -> Result<Vec<LinkedAllomorph>>;

    fn particle_allomorphs_by_ids_and_values(
        &self,
        ids: &[Id],
        values: &[String],
    ) -> Result<Vec<ParticleRecord>>;

    /// First adposition whose lower-case value equals `value`.
    fn adposition_by_value(&self, value: &str) -> Result<Option<ClosedClassRecord>>;

    /// First auxiliary verb whose lower-case value equals `value`.
    fn auxiliary_verb_by_value(&self, value: &str) -> Result<Option<ClosedClassRecord>>;

    /// Type -> allomorph edges of a morphonological type.
    fn type_allomorph_edges(&self, type_id: Id) -> Result<Vec<TypeEdge>>;

    /// Allomorph -> allomorph successors.
    fn allomorph_successors(&self, allomorph_id: Id) -> Result<Vec<Id>>;

    /// Particle -> allomorph successors.
    fn particle_successors(&self, particle_id: Id) -> Result<Vec<Id>>;

    /// Type -> particle edges.
    fn type_particles(&self, type_id: Id) -> Result<Vec<Id>>;

    /// Allomorph -> particle edges.
    fn allomorph_particles(&self, allomorph_id: Id) -> Result<Vec<Id>>;

    // Reverse lookups: from a concept or gram value to the forms behind it.

    /// Roots glossed by `concept_id`. Roots without a type are left out.
    fn roots_by_concept(&self, concept_id: Id) -> Result<Vec<RootRecord>>;

    /// Taxonomical code of an object concept, if the dataset has one.
    fn taxonomical_code(&self, concept_id: Id) -> Result<Option<String>>;

    /// Allomorphs carrying `gram_value_id` that may directly follow a root
    /// of `type_id`, with the link of each edge.
    fn allomorphs_by_gram_value_and_type(
        &self,
        gram_value_id: Id,
        type_id: Id,
    ) -> Result<Vec<LinkedAllomorph>>;

    /// Successors of `allomorph_id` carrying `gram_value_id`.
    fn allomorph_successors_by_gram_value(
        &self,
        gram_value_id: Id,
        allomorph_id: Id,
    ) -> Result<Vec<AllomorphRecord>>;

    /// Particles carrying `gram_value_id` that may follow `allomorph_id`.
    fn allomorph_particles_by_gram_value(
        &self,
        gram_value_id: Id,
        allomorph_id: Id,
    ) -> Result<Vec<ParticleRecord>>;

    fn adpositions_by_gram_value(&self, gram_value_id: Id) -> Result<Vec<ClosedClassRecord>>;

    fn auxiliary_verbs_by_gram_value(&self, gram_value_id: Id) -> Result<Vec<ClosedClassRecord>>;
}
