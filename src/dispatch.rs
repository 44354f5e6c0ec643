//! Routes each row of the annotation table to the builders of its columns.

use crate::attributes::{attrs, AttrMap};
use crate::builders::*;
use crate::constants::*;
use crate::error::Result;
use crate::graph::StagedGraph;
use crate::records::decode_records;
use crate::session::RunState;
use crate::table::{cell_text, Row};
use lazy_static::lazy_static;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Kind of entity the rows of the input table describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Gene,
    Compound,
}

impl Mode {
    /// Mode for a `target.source` namespace.
    pub fn from_namespace(namespace: &str) -> Option<Mode> {
        match namespace {
            ENSEMBL => Some(Mode::Gene),
            PUBCHEM_COMPOUND => Some(Mode::Compound),
            _ => None,
        }
    }

    pub fn namespace(&self) -> &'static str {
        match self {
            Mode::Gene => ENSEMBL,
            Mode::Compound => PUBCHEM_COMPOUND,
        }
    }

    /// Annotation sources handled in this mode, in processing order.
    pub fn sources(&self) -> &'static [Source] {
        match self {
            Mode::Gene => GENE_SOURCES.as_slice(),
            Mode::Compound => COMPOUND_SOURCES.as_slice(),
        }
    }
}

/// Annotation column with a dedicated builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    Bgee,
    Disgenet,
    LiteratureDisease,
    Minerva,
    WikiPathways,
    KeggPathways,
    Reactome,
    GeneOntology,
    GeneCompounds,
    MolMeDbInhibitors,
    MolMeDbInhibited,
    PubChemAssays,
    WikiPathwaysMolecular,
    EnsemblHomologs,
    IntAct,
    IntActCompounds,
    AopWiki,
}

lazy_static! {
    static ref GENE_SOURCES: Vec<Source> = vec![
        Source::Bgee,
        Source::Disgenet,
        Source::LiteratureDisease,
        Source::Minerva,
        Source::WikiPathways,
        Source::KeggPathways,
        Source::Reactome,
        Source::GeneOntology,
        Source::GeneCompounds,
        Source::MolMeDbInhibitors,
        Source::PubChemAssays,
        Source::WikiPathwaysMolecular,
        Source::EnsemblHomologs,
        Source::IntAct,
        Source::IntActCompounds,
        Source::AopWiki,
    ];
    static ref COMPOUND_SOURCES: Vec<Source> = vec![Source::MolMeDbInhibited, Source::IntActCompounds];
    static ref SOURCES_BY_COLUMN: HashMap<&'static str, Source> =
        GENE_SOURCES.iter().chain(COMPOUND_SOURCES.iter()).map(|s| (s.column(), *s)).collect();
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

impl Source {
    pub fn from_column(column: &str) -> Option<Source> {
        SOURCES_BY_COLUMN.get(column).copied()
    }

    pub fn column(&self) -> &'static str {
        match self {
            Source::Bgee => BGEE_COL,
            Source::Disgenet => DISGENET_COL,
            Source::LiteratureDisease => LITERATURE_DISEASE_COL,
            Source::Minerva => MINERVA_COL,
            Source::WikiPathways => WIKIPATHWAYS_COL,
            Source::KeggPathways => KEGG_PATHWAY_COL,
            Source::Reactome => OPENTARGETS_REACTOME_COL,
            Source::GeneOntology => OPENTARGETS_GO_COL,
            Source::GeneCompounds => OPENTARGETS_GENE_COMPOUND_COL,
            Source::MolMeDbInhibitors => MOLMEDB_PROTEIN_COMPOUND_COL,
            Source::MolMeDbInhibited => MOLMEDB_COMPOUND_PROTEIN_COL,
            Source::PubChemAssays => PUBCHEM_ASSAYS_COL,
            Source::WikiPathwaysMolecular => WIKIPATHWAYS_MOLECULAR_COL,
            Source::EnsemblHomologs => ENSEMBL_HOMOLOG_COL,
            Source::IntAct => INTACT_INTERACT_COL,
            Source::IntActCompounds => INTACT_COMPOUND_INTERACT_COL,
            Source::AopWiki => AOPWIKI_GENE_COL,
        }
    }

    /// Decodes `cell` and runs the builder of this source with `subject` as subject node.
    pub fn apply(&self, g: &mut StagedGraph, state: &mut RunState, subject: &str, cell: &Value) -> Result<()> {
        let column = self.column();
        match self {
            Source::Bgee => add_gene_bgee_subgraph(g, subject, &decode_cell(column, cell)),
            Source::Disgenet => add_disgenet_gene_disease_subgraph(g, subject, &decode_cell(column, cell)),
            Source::LiteratureDisease => add_literature_gene_disease_subgraph(g, subject, &decode_cell(column, cell)),
            Source::Minerva => add_minerva_gene_pathway_subgraph(g, subject, &decode_cell(column, cell)),
            Source::WikiPathways => add_wikipathways_gene_pathway_subgraph(g, subject, &decode_cell(column, cell)),
            Source::KeggPathways => add_kegg_gene_pathway_subgraph(g, subject, &decode_cell(column, cell)),
            Source::Reactome => add_opentargets_gene_reactome_pathway_subgraph(g, subject, &decode_cell(column, cell)),
            Source::GeneOntology => add_opentargets_gene_go_subgraph(g, subject, &decode_cell(column, cell))?,
            Source::GeneCompounds => add_opentargets_gene_compound_subgraph(g, subject, &decode_cell(column, cell)),
            Source::MolMeDbInhibitors => add_molmedb_gene_inhibitor_subgraph(g, subject, &decode_cell(column, cell)),
            Source::MolMeDbInhibited => add_molmedb_compound_gene_subgraph(g, subject, &decode_cell(column, cell)),
            Source::PubChemAssays => add_pubchem_assay_subgraph(g, subject, &decode_cell(column, cell)),
            Source::WikiPathwaysMolecular => add_wikipathways_molecular_subgraph(g, subject, &decode_cell(column, cell)),
            Source::EnsemblHomologs => add_ensembl_homolog_subgraph(g, subject, &decode_cell(column, cell)),
            Source::IntAct => add_intact_interactions_subgraph(g, state, subject, &decode_cell(column, cell)),
            Source::IntActCompounds => add_intact_compound_interactions_subgraph(g, state, subject, &decode_cell(column, cell)),
            Source::AopWiki => add_aopwiki_gene_subgraph(g, subject, &decode_cell(column, cell)),
        }
        Ok(())
    }
}

/// Elements of a list cell. Null is an empty list; any other non-list shape
/// is reported and treated as empty.
pub fn annotation_list(column: &str, cell: &Value) -> Vec<Value> {
    match cell {
        Value::Array(items) => items.clone(),
        Value::Null => vec![],
        other => {
            warn!("{} cell is not a list but {}. Skipping...", column, value_kind(other));
            vec![]
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Typed records of a list cell.
pub fn decode_cell<T: DeserializeOwned>(column: &str, cell: &Value) -> Vec<T> {
    decode_records(column, annotation_list(column, cell))
}

/// Columns carrying per-row differential expression values.
pub fn dea_columns(columns: &[String]) -> Vec<String> {
    columns.iter().filter(|c| c.ends_with(DEA_SUFFIX)).cloned().collect()
}

/// Plain-inserts the node for the entity a row describes and returns its label.
///
/// Rows without an identifier or a target produce no node.
pub fn add_primary_node(g: &mut StagedGraph, mode: Mode, row: &Row, dea_columns: &[String]) -> Option<String> {
    let identifier = cell_text(row, IDENTIFIER_COL)?;
    let target = cell_text(row, TARGET_COL)?;
    let identifier_source = cell_text(row, IDENTIFIER_SOURCE_COL).unwrap_or_default();
    let target_source = cell_text(row, TARGET_SOURCE_COL).unwrap_or_default();

    let mut node_attrs: AttrMap = attrs([
        (DATASOURCE, Value::from(BRIDGEDB)),
        (NAME, Value::from(format!("{}:{}", identifier_source, identifier))),
    ]);
    match mode {
        Mode::Gene => {
            node_attrs.insert(ID.to_string(), Value::from(format!("{}:{}", target_source, target)));
            node_attrs.insert(LABEL.to_string(), Value::from(GENE_NODE_LABEL));
            node_attrs.insert(target_source.clone(), Value::from(target.as_str()));
            for column in dea_columns.iter() {
                let key = column.strip_suffix(DEA_SUFFIX).unwrap_or(column);
                node_attrs.insert(key.to_string(), row.get(column).cloned().unwrap_or(Value::Null));
            }
        }
        Mode::Compound => {
            node_attrs.insert(ID.to_string(), Value::from(target.as_str()));
            node_attrs.insert(LABEL.to_string(), Value::from(COMPOUND_NODE_LABEL));
            node_attrs.insert(target_source.clone(), Value::from(format!("{}:{}", target_source, target)));
        }
    }

    g.insert_node(&identifier, node_attrs);
    Some(identifier)
}

/// Runs the builder of every source in `sources` whose column the row has.
pub fn process_annotations(g: &mut StagedGraph, state: &mut RunState, subject: &str, row: &Row, sources: &[Source]) -> Result<()> {
    for source in sources.iter() {
        if let Some(cell) = row.get(source.column()) {
            source.apply(g, state, subject, cell)?;
        }
    }
    Ok(())
}

/// Symmetric STRING interactions of the row.
pub fn process_ppi(g: &mut StagedGraph, subject: &str, row: &Row) {
    if let Some(cell) = row.get(STRING_INTERACT_COL) {
        let ppi_list = decode_cell(STRING_INTERACT_COL, cell);
        if !ppi_list.is_empty() {
            add_stringdb_ppi_subgraph(g, subject, &ppi_list);
        }
    }
}

/// Primary node, annotations and PPI step for a single row.
pub fn dispatch_row(g: &mut StagedGraph, state: &mut RunState, mode: Mode, row: &Row, dea_columns: &[String]) -> Result<()> {
    let Some(subject) = add_primary_node(g, mode, row, dea_columns) else {
        debug!("Skipping row without identifier or target");
        return Ok(());
    };
    process_annotations(g, state, &subject, row, mode.sources())?;
    process_ppi(g, &subject, row);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GraphError;
    use serde_json::json;

    fn row(v: Value) -> Row {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn columns_map_to_sources() {
        assert_eq!(Source::from_column("Bgee"), Some(Source::Bgee));
        assert_eq!(Source::from_column("MolMeDB_transporter_inhibited"), Some(Source::MolMeDbInhibited));
        assert_eq!(Source::from_column("StringDB_ppi"), None);
        assert_eq!(Source::GeneOntology.to_string(), "OpenTargets_go");
        assert!(Mode::Compound.sources().contains(&Source::IntActCompounds));
    }

    #[test]
    fn gene_primary_node_carries_dea_values() {
        let r = row(json!({
            "identifier": "AAGAB",
            "identifier.source": "HGNC",
            "target": "ENSG00000103591",
            "target.source": "Ensembl",
            "logFC_dea": -0.51
        }));
        let mut g = StagedGraph::new();
        let label = add_primary_node(&mut g, Mode::Gene, &r, &dea_columns(&r.keys().cloned().collect::<Vec<_>>())).unwrap();
        assert_eq!(label, "AAGAB");
        let node = g.node_attrs("AAGAB").unwrap();
        assert_eq!(node[NAME], json!("HGNC:AAGAB"));
        assert_eq!(node[ID], json!("Ensembl:ENSG00000103591"));
        assert_eq!(node["Ensembl"], json!("ENSG00000103591"));
        assert_eq!(node["logFC"], json!(-0.51));
        assert_eq!(node[LABEL], json!(GENE_NODE_LABEL));
    }

    #[test]
    fn compound_primary_node() {
        let r = row(json!({"identifier": "aspirin", "identifier.source": "Name", "target": "2244", "target.source": "PubChem Compound"}));
        let mut g = StagedGraph::new();
        add_primary_node(&mut g, Mode::Compound, &r, &[]).unwrap();
        let node = g.node_attrs("aspirin").unwrap();
        assert_eq!(node[ID], json!("2244"));
        assert_eq!(node["PubChem Compound"], json!("PubChem Compound:2244"));
        assert_eq!(node[LABEL], json!(COMPOUND_NODE_LABEL));
    }

    #[test]
    fn rows_without_target_are_skipped() {
        let r = row(json!({"identifier": "AAGAB", "target": null, "Bgee": [{"anatomical_entity_id": "UBERON:1", "anatomical_entity_name": "x"}]}));
        let mut g = StagedGraph::new();
        dispatch_row(&mut g, &mut RunState::new(), Mode::Gene, &r, &[]).unwrap();
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn malformed_cells_become_empty_lists() {
        assert!(annotation_list("Bgee", &json!("not a list")).is_empty());
        assert!(annotation_list("Bgee", &json!(null)).is_empty());
        assert_eq!(annotation_list("Bgee", &json!([1, 2])).len(), 2);

        let r = row(json!({"identifier": "AAGAB", "target": "ENSG1", "target.source": "Ensembl", "Bgee": {"anatomical_entity_id": "UBERON:1"}}));
        let mut g = StagedGraph::new();
        dispatch_row(&mut g, &mut RunState::new(), Mode::Gene, &r, &[]).unwrap();
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn invalid_go_type_propagates() {
        let r = row(json!({"identifier": "IL13", "target": "ENSG1", "target.source": "Ensembl", "OpenTargets_go": [{"go_id": "GO:1", "go_type": "Z"}]}));
        let mut g = StagedGraph::new();
        let err = dispatch_row(&mut g, &mut RunState::new(), Mode::Gene, &r, &[]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidGoType { .. }));
    }

    #[test]
    fn ppi_step_links_both_directions() {
        let r = row(json!({
            "identifier": "TP53",
            "target": "ENSG00000141510",
            "target.source": "Ensembl",
            "StringDB_ppi": [{"stringdb_link_to": "MDM2", "score": 0.999}]
        }));
        let mut g = StagedGraph::new();
        dispatch_row(&mut g, &mut RunState::new(), Mode::Gene, &r, &[]).unwrap();
        assert_eq!(g.edges_between("TP53", "MDM2").len(), 1);
        assert_eq!(g.edges_between("MDM2", "TP53").len(), 1);
    }
}
