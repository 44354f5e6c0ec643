//! Typed views of the nested per-source annotation records.
//!
//! Upstream annotators emit one JSON object per record. Text fields are read
//! leniently (numbers and booleans are accepted and rendered as text) and
//! every field is optional, so a missing column simply decodes to `None`.

use crate::attributes::value_text;
use log::warn;
use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use serde_with::formats::PreferMany;
use serde_with::{serde_as, As, DefaultOnNull, OneOrMany, Same};

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(_)) => Err(D::Error::invalid_type(Unexpected::Map, &"a text value")),
        Some(v) => Ok(Some(value_text(&v))),
    }
}

/// Decodes a list cell into typed records, dropping elements that do not decode.
pub fn decode_records<T: DeserializeOwned>(column: &str, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<T>(v) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed {} record: {}", column, e);
                None
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BgeeRecord {
    #[serde(deserialize_with = "text")]
    pub anatomical_entity_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub anatomical_entity_name: Option<String>,
    pub expression_level: Option<Value>,
    #[serde(deserialize_with = "text")]
    pub confidence_level_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub confidence_level_name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub developmental_stage_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub developmental_stage_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DisgenetRecord {
    #[serde(deserialize_with = "text")]
    pub disease_name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub disease_type: Option<String>,
    #[serde(rename = "UMLS", deserialize_with = "text")]
    pub umls: Option<String>,
    #[serde(rename = "HPO", deserialize_with = "text")]
    pub hpo: Option<String>,
    #[serde(rename = "NCI", deserialize_with = "text")]
    pub nci: Option<String>,
    #[serde(rename = "OMIM", deserialize_with = "text")]
    pub omim: Option<String>,
    #[serde(rename = "MONDO", deserialize_with = "text")]
    pub mondo: Option<String>,
    #[serde(rename = "ORDO", deserialize_with = "text")]
    pub ordo: Option<String>,
    #[serde(rename = "EFO", deserialize_with = "text")]
    pub efo: Option<String>,
    #[serde(rename = "DO", deserialize_with = "text")]
    pub disease_ontology: Option<String>,
    #[serde(rename = "MESH", deserialize_with = "text")]
    pub mesh: Option<String>,
    pub score: Option<Value>,
    pub ei: Option<Value>,
    pub el: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LiteratureDiseaseRecord {
    #[serde(deserialize_with = "text")]
    pub disease_name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub source: Option<String>,
    #[serde(rename = "UMLS", deserialize_with = "text")]
    pub umls: Option<String>,
    #[serde(rename = "MONDO", deserialize_with = "text")]
    pub mondo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct KeggCompound {
    #[serde(rename = "KEGG_identifier", deserialize_with = "text")]
    pub kegg_identifier: Option<String>,
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PathwayRecord {
    #[serde(deserialize_with = "text")]
    pub pathway_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub pathway_label: Option<String>,
    pub pathway_gene_counts: Option<Value>,
    /// Only filled for KEGG pathways.
    #[serde_as(as = "DefaultOnNull")]
    pub compounds: Vec<KeggCompound>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GoRecord {
    #[serde(deserialize_with = "text")]
    pub go_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub go_name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub go_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SideEffectRecord {
    #[serde(deserialize_with = "text")]
    pub name: Option<String>,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OpenTargetsCompoundRecord {
    #[serde(deserialize_with = "text")]
    pub relation: Option<String>,
    #[serde(deserialize_with = "text")]
    pub compound_cid: Option<String>,
    #[serde(deserialize_with = "text")]
    pub chembl_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub drugbank_id: Option<String>,
    pub clinical_trial_phase: Option<Value>,
    pub is_approved: Option<Value>,
    pub adverse_effect_count: Option<Value>,
    #[serde_as(as = "DefaultOnNull<OneOrMany<_, PreferMany>>")]
    pub adverse_effect: Vec<SideEffectRecord>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MolMeDbRecord {
    #[serde(deserialize_with = "text")]
    pub compound_name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub compound_cid: Option<String>,
    #[serde(deserialize_with = "text")]
    pub molmedb_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub inchikey: Option<String>,
    #[serde(deserialize_with = "text")]
    pub smiles: Option<String>,
    #[serde(deserialize_with = "text")]
    pub source_pmid: Option<String>,
    #[serde(deserialize_with = "text")]
    pub chebi_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub drugbank_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub uniprot_trembl_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub hgnc_symbol: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PubChemAssayRecord {
    #[serde(deserialize_with = "text")]
    pub pubchem_assay_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub assay_type: Option<String>,
    #[serde(deserialize_with = "text")]
    pub outcome: Option<String>,
    #[serde(deserialize_with = "text")]
    pub compound_cid: Option<String>,
    #[serde(deserialize_with = "text")]
    pub compound_name: Option<String>,
    #[serde(deserialize_with = "text")]
    pub inchi: Option<String>,
    #[serde(deserialize_with = "text")]
    pub smiles: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StringPpiRecord {
    #[serde(deserialize_with = "text")]
    pub stringdb_link_to: Option<String>,
    pub score: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HomologRecord {
    #[serde(deserialize_with = "text")]
    pub homolog: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MolecularInteractionRecord {
    #[serde(deserialize_with = "text")]
    pub pathway_id: Option<String>,
    #[serde(deserialize_with = "text")]
    pub pathway_label: Option<String>,
    #[serde(deserialize_with = "text")]
    pub target_gene: Option<String>,
    #[serde(deserialize_with = "text")]
    pub target_metabolite: Option<String>,
    #[serde(deserialize_with = "text")]
    pub mim_type: Option<String>,
    #[serde(deserialize_with = "text")]
    pub rhea_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AopRecord {
    #[serde(deserialize_with = "text")]
    pub aop: Option<String>,
    #[serde(deserialize_with = "text")]
    pub aop_title: Option<String>,
    #[serde(rename = "MIE", deserialize_with = "text")]
    pub mie: Option<String>,
    #[serde(rename = "MIE_title", deserialize_with = "text")]
    pub mie_title: Option<String>,
    #[serde(rename = "KE_upstream", deserialize_with = "text")]
    pub ke_upstream: Option<String>,
    #[serde(rename = "KE_upstream_title", deserialize_with = "text")]
    pub ke_upstream_title: Option<String>,
    #[serde(rename = "KE_upstream_organ", deserialize_with = "text")]
    pub ke_upstream_organ: Option<String>,
    #[serde(rename = "KE_downstream", deserialize_with = "text")]
    pub ke_downstream: Option<String>,
    #[serde(rename = "KE_downstream_title", deserialize_with = "text")]
    pub ke_downstream_title: Option<String>,
    #[serde(rename = "KE_downstream_organ", deserialize_with = "text")]
    pub ke_downstream_organ: Option<String>,
    #[serde(deserialize_with = "text")]
    pub ao: Option<String>,
    #[serde(deserialize_with = "text")]
    pub ao_title: Option<String>,
}

/// IntAct interaction. Every field of the record ends up on the edge, so the
/// record keeps all of them and exposes the ones the builders branch on.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(transparent)]
pub struct IntactRecord {
    pub fields: Map<String, Value>,
}

impl IntactRecord {
    fn field(&self, key: &str) -> Option<String> {
        match self.fields.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(value_text(v).trim().to_string()).filter(|s| !s.is_empty()),
        }
    }

    pub fn interaction_id(&self) -> Option<String> {
        self.field("interaction_id")
    }

    pub fn binary_interaction_id(&self) -> Option<String> {
        self.field("binary_interaction_id")
    }

    pub fn id_a(&self) -> Option<String> {
        self.field("id_A")
    }

    pub fn id_b(&self) -> Option<String> {
        self.field("id_B")
    }

    /// Name, species and molecule of interactor `A` or `B`.
    pub fn interactor(&self, side: char) -> (Option<String>, Option<String>, Option<String>) {
        (
            self.field(&format!("interactor_{}_name", side)),
            self.field(&format!("interactor_{}_species", side)),
            self.field(&format!("molecule_{}", side)),
        )
    }

    pub fn protein_partner(&self) -> Option<String> {
        self.field("intact_link_to")
    }

    pub fn detection_method(&self) -> Option<String> {
        match self.fields.get("detection_method") {
            Some(Value::Array(items)) => Some(items.iter().map(value_text).collect::<Vec<_>>().join(",")).filter(|s| !s.is_empty()),
            _ => self.field("detection_method"),
        }
    }

    pub fn interaction_type(&self) -> Option<String> {
        self.field("type")
    }
}

/// Nested compounds cell of the pathway-compound table: a single record, a list, or null.
pub fn decode_kegg_compounds(value: Value) -> Result<Vec<KeggCompound>, serde_json::Error> {
    As::<DefaultOnNull<OneOrMany<Same, PreferMany>>>::deserialize(value)
}
