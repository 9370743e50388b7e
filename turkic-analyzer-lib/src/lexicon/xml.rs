// Reads a lexicon from an XML table dump:
//
//   <table name="root_morpheme">
//     <column name="id">1</column>
//     <column name="value">бар</column>
//     ...
//   </table>
//
// One <table> element per row. Absent or empty columns are NULL.

use std::collections::HashMap;
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::data::*;
use super::Result;
use crate::error::LexiconError;

impl LexiconData {
    /// Parse an XML table dump. Tables the engine does not use are skipped.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut data = LexiconData::default();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) if e.name().as_ref() == b"table" => {
                    let table = name_attribute(e).unwrap_or_default();
                    let values = read_table_columns(&mut reader)?;
                    data.push_row(&Columns {
                        table: &table,
                        values,
                    })?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(data)
    }

    fn push_row(&mut self, row: &Columns<'_>) -> Result<()> {
        match row.table {
            "metadata" => self.metadata.push(MetadataRow {
                language: row.text_or_default("language"),
                version: row.optional_number("version")?.unwrap_or(0),
                build: row.optional_number("build")?.unwrap_or(0),
                size: row.optional_number("size")?.unwrap_or(0),
            }),
            "alpha_letter" => self.alpha_letter.push(AlphaLetterRow {
                id: row.optional_number("id")?.unwrap_or(0),
                lower: row.text("lower")?,
                upper: row.text("upper")?,
                ordering: row.optional_number("ordering")?.unwrap_or(0),
            }),
            "gram_value" => self.gram_value.push(GramValueRow {
                id: row.number("id")?,
                tag: row.text("tag")?,
            }),
            "morphonological_type" => self.morphonological_type.push(TypeRow {
                id: row.number("id")?,
                strip: row.optional_number("strip")?.unwrap_or(0),
            }),
            "root_morpheme" => self.root_morpheme.push(RootRow {
                id: row.number("id")?,
                code: row.text_or_default("code"),
                value: row.text("value")?,
                value_lower: row.optional_text("value_lower"),
                value_strip: row.optional_text("value_strip"),
                pos: row.text_or_default("pos"),
                type_id: row.optional_number("type_id")?,
                concept_id: row.optional_number("concept_id")?.unwrap_or(0),
                concept_en_name: row.text_or_default("concept_en_name"),
                concept_ru_name: row.text_or_default("concept_ru_name"),
            }),
            "affixal_morpheme" => self.affixal_morpheme.push(MorphemeRow {
                id: row.number("id")?,
                gram_value_id: row.number("gram_value_id")?,
            }),
            "affixal_allomorph" => self.affixal_allomorph.push(AllomorphRow {
                id: row.number("id")?,
                code: row.text_or_default("code"),
                value: row.text("value")?,
                is_final: row.flag("is_final")?,
                affixal_morpheme_id: row.number("affixal_morpheme_id")?,
            }),
            "particle" => self.particle.push(MorphemeRow {
                id: row.number("id")?,
                gram_value_id: row.number("gram_value_id")?,
            }),
            "particle_allomorph" => self.particle_allomorph.push(ParticleAllomorphRow {
                id: row.number("id")?,
                code: row.text_or_default("code"),
                value: row.text("value")?,
                value_lower: row.optional_text("value_lower"),
                particle_id: row.number("particle_id")?,
            }),
            "adposition" => self.adposition.push(closed_class_row(row)?),
            "auxiliary_verb" | "auxilary_verb" => self.auxiliary_verb.push(closed_class_row(row)?),
            "morphotactics_t2a" => self.morphotactics_t2a.push(TypeAllomorphRow {
                morphonological_type_id: row.number("morphonological_type_id")?,
                affixal_allomorph_id: row.number("affixal_allomorph_id")?,
                link_chars: row.optional_text("link_chars"),
            }),
            "morphotactics_a2a" => self.morphotactics_a2a.push(AllomorphAllomorphRow {
                affixal_allomorph1_id: row.number("affixal_allomorph1_id")?,
                affixal_allomorph2_id: row.number("affixal_allomorph2_id")?,
            }),
            "morphotactics_p2a" => self.morphotactics_p2a.push(ParticleAllomorphEdgeRow {
                particle_allomorph1_id: row.number("particle_allomorph1_id")?,
                affixal_allomorph2_id: row.number("affixal_allomorph2_id")?,
            }),
            "morphotactics_t2p" => self.morphotactics_t2p.push(TypeParticleRow {
                morphonological_type_id: row.number("morphonological_type_id")?,
                particle_allomorph_id: row.number("particle_allomorph_id")?,
            }),
            "morphotactics_a2p" => self.morphotactics_a2p.push(AllomorphParticleRow {
                affixal_allomorph1_id: row.number("affixal_allomorph1_id")?,
                particle_allomorph2_id: row.number("particle_allomorph2_id")?,
            }),
            "object_concept_taxonomy" => self.object_concept_taxonomy.push(TaxonomyRow {
                id: row.number("id")?,
                taxonomical_code: row.text_or_default("taxonomical_code"),
            }),
            other => tracing::trace!(table = other, "skipping table row"),
        }
        Ok(())
    }
}

fn closed_class_row(row: &Columns<'_>) -> Result<ClosedClassRow> {
    Ok(ClosedClassRow {
        id: row.number("id")?,
        code: row.text_or_default("code"),
        value: row.text("value")?,
        gram_value_id: row.number("gram_value_id")?,
    })
}

fn name_attribute(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == b"name")
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Read all <column> children of the current <table> element.
fn read_table_columns(reader: &mut Reader<&[u8]>) -> Result<HashMap<String, String>> {
    let mut columns = HashMap::new();
    let mut depth = 1u32;
    let mut current_col_name: Option<String> = None;
    let mut current_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                depth += 1;
                if e.name().as_ref() == b"column" {
                    current_col_name = name_attribute(e);
                    current_text.clear();
                }
            }
            Event::Text(ref e) => {
                if current_col_name.is_some() {
                    current_text.push_str(&e.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(ref e) => {
                if current_col_name.is_some() {
                    current_text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Event::End(ref e) => {
                if e.name().as_ref() == b"column" {
                    if let Some(name) = current_col_name.take() {
                        columns.insert(name, std::mem::take(&mut current_text));
                    }
                }
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(columns)
}

/// Column values of one row.
struct Columns<'a> {
    table: &'a str,
    values: HashMap<String, String>,
}

impl Columns<'_> {
    fn get(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn missing(&self, column: &str) -> LexiconError {
        LexiconError::MissingColumn {
            table: self.table.to_string(),
            column: column.to_string(),
        }
    }

    fn invalid(&self, column: &str, value: &str) -> LexiconError {
        LexiconError::InvalidColumn {
            table: self.table.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    fn text(&self, column: &str) -> Result<String> {
        self.get(column)
            .map(str::to_string)
            .ok_or_else(|| self.missing(column))
    }

    fn optional_text(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_string)
    }

    fn text_or_default(&self, column: &str) -> String {
        self.optional_text(column).unwrap_or_default()
    }

    fn number<T: FromStr>(&self, column: &str) -> Result<T> {
        self.optional_number(column)?
            .ok_or_else(|| self.missing(column))
    }

    fn optional_number<T: FromStr>(&self, column: &str) -> Result<Option<T>> {
        match self.get(column) {
            None => Ok(None),
            Some(v) => v
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(column, v)),
        }
    }

    fn flag(&self, column: &str) -> Result<bool> {
        match self.get(column).map(str::trim) {
            None | Some("0") | Some("false") => Ok(false),
            Some("1") | Some("true") => Ok(true),
            Some(v) => Err(self.invalid(column, v)),
        }
    }
}
