//! Compound-centric builders: OpenTargets drugs and their adverse effects,
//! MolMeDB transporter inhibition and PubChem bioassays.

use super::required;
use crate::attributes::{attrs, set_present, synthetic_id, AttrMap};
use crate::constants::*;
use crate::graph::StagedGraph;
use crate::records::{MolMeDbRecord, OpenTargetsCompoundRecord, PubChemAssayRecord, SideEffectRecord};
use log::debug;
use serde_json::Value;

/// Node label and attributes of an OpenTargets compound, or `None` when the
/// record names neither a PubChem CID nor a ChEMBL id.
pub(crate) fn opentargets_compound_node(annot: &OpenTargetsCompoundRecord) -> Option<(String, AttrMap)> {
    let label = required(&annot.compound_cid).or_else(|| required(&annot.chembl_id))?.to_string();
    let mut node_attrs = attrs([
        (LABEL, Value::from(COMPOUND_NODE_LABEL)),
        (NAME, Value::from(label.as_str())),
        (ID, annot.chembl_id.clone().map(Value::from).unwrap_or(Value::Null)),
        (DATASOURCE, Value::from(OPENTARGETS)),
    ]);
    set_present(&mut node_attrs, "drugbank_id", annot.drugbank_id.clone());
    set_present(&mut node_attrs, "compound_cid", annot.compound_cid.clone());
    set_present(&mut node_attrs, "clinical_trial_phase", annot.clinical_trial_phase.clone());
    set_present(&mut node_attrs, "is_approved", annot.is_approved.clone());
    set_present(&mut node_attrs, "adverse_effect_count", annot.adverse_effect_count.clone());
    Some((label, node_attrs))
}

/// Links a gene to the drugs targeting it, then each drug to its adverse effects.
///
/// Edges point from the compound to the gene and carry the OpenTargets
/// relation (e.g. `inhibits`) as label.
pub fn add_opentargets_gene_compound_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[OpenTargetsCompoundRecord]) {
    debug!("Adding OpenTargets compound nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        let Some(relation) = required(&annot.relation) else {
            continue;
        };
        let Some((annot_node_label, node_attrs)) = opentargets_compound_node(annot) else {
            debug!("OpenTargets compound without identifier for {}", gene_node_label);
            continue;
        };
        g.merge_node(&annot_node_label, node_attrs);

        let edge_attrs = attrs([(DATASOURCE, Value::from(OPENTARGETS)), (EDGE_LABEL, Value::from(relation))]);
        g.add_edge_if_novel(&annot_node_label, gene_node_label, relation, edge_attrs);

        if !annot.adverse_effect.is_empty() {
            add_opentargets_compound_side_effect_subgraph(g, &annot_node_label, &annot.adverse_effect);
        }
    }
}

/// Links a compound to its reported side effects.
///
/// Side effects have no external identifier; a node seen for the first time
/// gets a synthetic id derived from its name, an existing node is left as is.
pub fn add_opentargets_compound_side_effect_subgraph(g: &mut StagedGraph, compound_node_label: &str, side_effects: &[SideEffectRecord]) {
    debug!("Adding OpenTargets side effect nodes and edges for {}", compound_node_label);
    for effect in side_effects.iter() {
        let Some(effect_node_label) = required(&effect.name) else {
            continue;
        };

        if !g.contains_node(effect_node_label) {
            let effect_attrs = attrs([
                (LABEL, Value::from(SIDE_EFFECT_NODE_LABEL)),
                (NAME, Value::from(effect_node_label)),
                (DATASOURCE, Value::from(OPENTARGETS)),
                (ID, Value::from(synthetic_id(effect_node_label))),
            ]);
            g.insert_node(effect_node_label, effect_attrs);
        }

        let edge_attrs = attrs([(DATASOURCE, Value::from(OPENTARGETS))]);
        g.add_edge_if_novel(compound_node_label, effect_node_label, SIDE_EFFECT_EDGE_LABEL, edge_attrs);
    }
}

/// Links a transporter gene to the compounds inhibiting it.
pub fn add_molmedb_gene_inhibitor_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[MolMeDbRecord]) {
    debug!("Adding MolMeDB gene inhibitor nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        let Some(name) = required(&annot.compound_name) else {
            continue;
        };
        let Some(annot_node_label) = required(&annot.compound_cid).or_else(|| required(&annot.molmedb_id)) else {
            continue;
        };

        let mut node_attrs = attrs([
            (LABEL, Value::from(COMPOUND_NODE_LABEL)),
            (NAME, Value::from(name)),
            (ID, Value::from(annot_node_label)),
            (DATASOURCE, Value::from(MOLMEDB)),
        ]);
        set_present(&mut node_attrs, "molmedb_id", annot.molmedb_id.clone());
        set_present(&mut node_attrs, "inchikey", annot.inchikey.clone());
        set_present(&mut node_attrs, "smiles", annot.smiles.clone());
        set_present(&mut node_attrs, "source_pmid", annot.source_pmid.clone());
        g.merge_node(annot_node_label, node_attrs);

        let edge_attrs = attrs([(DATASOURCE, Value::from(MOLMEDB))]);
        g.add_edge_if_novel(annot_node_label, gene_node_label, INHIBITS_EDGE_LABEL, edge_attrs);
    }
}

/// Links a compound to the transporter genes it inhibits.
///
/// The transporter is identified by its UniProt/TrEMBL accession, falling
/// back to the HGNC symbol.
pub fn add_molmedb_compound_gene_subgraph(g: &mut StagedGraph, compound_node_label: &str, annot_list: &[MolMeDbRecord]) {
    debug!("Adding MolMeDB compound gene nodes and edges for {}", compound_node_label);
    for annot in annot_list.iter() {
        let Some(gene_label) = required(&annot.uniprot_trembl_id).or_else(|| required(&annot.hgnc_symbol)) else {
            continue;
        };

        let name = required(&annot.hgnc_symbol).unwrap_or(gene_label);
        let mut node_attrs = attrs([
            (LABEL, Value::from(GENE_NODE_LABEL)),
            (NAME, Value::from(name)),
            (ID, Value::from(gene_label)),
            (DATASOURCE, Value::from(MOLMEDB)),
        ]);
        set_present(&mut node_attrs, "uniprot_trembl_id", annot.uniprot_trembl_id.clone());
        set_present(&mut node_attrs, "hgnc_symbol", annot.hgnc_symbol.clone());
        g.merge_node(gene_label, node_attrs);

        let mut edge_attrs = attrs([(DATASOURCE, Value::from(MOLMEDB))]);
        set_present(&mut edge_attrs, "source_pmid", annot.source_pmid.clone());
        g.add_edge_if_novel(compound_node_label, gene_label, INHIBITS_EDGE_LABEL, edge_attrs);
    }
}

/// Links a gene to the compounds tested against it; the assay outcome is the edge label.
pub fn add_pubchem_assay_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[PubChemAssayRecord]) {
    debug!("Adding PubChem assay nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        let Some(assay_id) = required(&annot.pubchem_assay_id) else {
            continue;
        };
        let (Some(annot_node_label), Some(outcome)) = (required(&annot.compound_cid), required(&annot.outcome)) else {
            debug!("PubChem assay {} lacks a compound or an outcome", assay_id);
            continue;
        };

        let mut node_attrs = attrs([
            (LABEL, Value::from(COMPOUND_NODE_LABEL)),
            (NAME, annot.compound_name.clone().map(Value::from).unwrap_or(Value::Null)),
            (ID, Value::from(annot_node_label)),
            (DATASOURCE, Value::from(PUBCHEM)),
        ]);
        set_present(&mut node_attrs, "inchi", annot.inchi.clone());
        set_present(&mut node_attrs, "smiles", annot.smiles.clone());
        g.merge_node(annot_node_label, node_attrs);

        let mut edge_attrs = attrs([
            (DATASOURCE, Value::from(PUBCHEM)),
            ("pubchem_assay_id", Value::from(assay_id)),
            ("outcome", Value::from(outcome)),
            (EDGE_LABEL, Value::from(outcome)),
        ]);
        set_present(&mut edge_attrs, "assay_type", annot.assay_type.clone());
        g.add_edge_if_novel(annot_node_label, gene_node_label, outcome, edge_attrs);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::records::decode_records;
    use serde_json::json;

    fn drugs() -> Vec<OpenTargetsCompoundRecord> {
        decode_records(
            OPENTARGETS_GENE_COMPOUND_COL,
            vec![
                json!({
                    "chembl_id": "CHEMBL1200",
                    "drugbank_id": "DB00988",
                    "compound_cid": "681",
                    "compound_name": "dopamine",
                    "clinical_trial_phase": 4,
                    "is_approved": true,
                    "relation": "activates",
                    "adverse_effect_count": 2,
                    "adverse_effect": [{"name": "hypotension"}, {"name": null}]
                }),
                json!({"chembl_id": "CHEMBL25", "relation": null}),
                json!({"chembl_id": "CHEMBL1201", "relation": "inhibits"}),
            ],
        )
    }

    #[test]
    fn drugs_point_at_the_gene() {
        let mut g = StagedGraph::new();
        add_opentargets_gene_compound_subgraph(&mut g, "DRD2", &drugs());

        let dopamine = g.node_attrs("681").unwrap();
        assert_eq!(dopamine[ID], json!("CHEMBL1200"));
        assert_eq!(dopamine["is_approved"], json!(true));
        assert_eq!(g.edges_between("681", "DRD2")[0].label, "activates");
        assert_eq!(g.edges_between("CHEMBL1201", "DRD2")[0].label, "inhibits");
        assert!(!g.contains_node("CHEMBL25"));

        let effects = g.edges_between("681", "hypotension");
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].label, SIDE_EFFECT_EDGE_LABEL);
    }

    #[test]
    fn side_effect_ids_are_deterministic() {
        let mut a = StagedGraph::new();
        let mut b = StagedGraph::new();
        add_opentargets_gene_compound_subgraph(&mut a, "DRD2", &drugs());
        add_opentargets_gene_compound_subgraph(&mut b, "DRD1", &drugs());
        let id = a.node_attrs("hypotension").unwrap()[ID].clone();
        assert_eq!(id, b.node_attrs("hypotension").unwrap()[ID]);
        assert_eq!(id, json!(synthetic_id("hypotension")));
    }

    #[test]
    fn existing_side_effect_node_is_kept() {
        let mut g = StagedGraph::new();
        g.insert_node("nausea", attrs([(ID, json!("MedDRA:10028813")), (LABEL, json!(SIDE_EFFECT_NODE_LABEL))]));
        let effects: Vec<SideEffectRecord> = decode_records("adverse_effect", vec![json!({"name": "nausea"})]);
        add_opentargets_compound_side_effect_subgraph(&mut g, "681", &effects);
        assert_eq!(g.node_attrs("nausea").unwrap()[ID], json!("MedDRA:10028813"));
        assert_eq!(g.edges_between("681", "nausea").len(), 1);
    }

    #[test]
    fn datasources_accumulate_on_shared_compounds() {
        let mut g = StagedGraph::new();
        add_opentargets_gene_compound_subgraph(&mut g, "SLC6A3", &drugs());
        let inhibitors: Vec<MolMeDbRecord> = decode_records(
            MOLMEDB_PROTEIN_COMPOUND_COL,
            vec![json!({"compound_name": "dopamine", "compound_cid": "681", "molmedb_id": "MM00001", "inchikey": null})],
        );
        add_molmedb_gene_inhibitor_subgraph(&mut g, "SLC6A3", &inhibitors);

        let node = g.node_attrs("681").unwrap();
        assert_eq!(node[DATASOURCE], json!("OpenTargets|MolMeDB"));
        assert!(!node.contains_key("inchikey"));
        assert_eq!(g.edges_between("681", "SLC6A3").len(), 2);
    }

    #[test]
    fn molmedb_compound_mode_creates_transporters() {
        let mut g = StagedGraph::new();
        let records: Vec<MolMeDbRecord> = decode_records(
            MOLMEDB_COMPOUND_PROTEIN_COL,
            vec![
                json!({"uniprot_trembl_id": "Q01959", "hgnc_symbol": "SLC6A3", "source_pmid": "1234"}),
                json!({"hgnc_symbol": "ABCB1"}),
                json!({"compound_name": "only a name"}),
            ],
        );
        add_molmedb_compound_gene_subgraph(&mut g, "681", &records);
        assert_eq!(g.node_attrs("Q01959").unwrap()[LABEL], json!(GENE_NODE_LABEL));
        assert_eq!(g.node_attrs("Q01959").unwrap()[NAME], json!("SLC6A3"));
        assert_eq!(g.edges_between("681", "Q01959")[0].label, INHIBITS_EDGE_LABEL);
        assert_eq!(g.edges_between("681", "ABCB1").len(), 1);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn assays_are_told_apart_by_id() {
        let mut g = StagedGraph::new();
        let assays: Vec<PubChemAssayRecord> = decode_records(
            PUBCHEM_ASSAYS_COL,
            vec![
                json!({"pubchem_assay_id": "AID1", "outcome": "active", "compound_cid": "CID2244", "compound_name": "aspirin", "assay_type": "IC50"}),
                json!({"pubchem_assay_id": "AID2", "outcome": "active", "compound_cid": "CID2244", "compound_name": "aspirin", "assay_type": "IC50"}),
                json!({"pubchem_assay_id": "AID1", "outcome": "active", "compound_cid": "CID2244", "compound_name": "aspirin", "assay_type": "IC50"}),
            ],
        );
        add_pubchem_assay_subgraph(&mut g, "PTGS1", &assays);
        let edges = g.edges_between("CID2244", "PTGS1");
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].key, 1);
        assert_eq!(edges[0].label, "active");
    }
}
