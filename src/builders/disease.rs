use super::compound::{add_opentargets_compound_side_effect_subgraph, opentargets_compound_node};
use super::required;
use crate::attributes::{attrs, set_present};
use crate::constants::*;
use crate::graph::StagedGraph;
use crate::records::{DisgenetRecord, LiteratureDiseaseRecord, OpenTargetsCompoundRecord};
use log::debug;
use serde_json::Value;

/// Links a gene to the curated DisGeNET diseases it is associated with.
///
/// Disease nodes are keyed by their UMLS concept and carry every cross
/// reference the record provides.
pub fn add_disgenet_gene_disease_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[DisgenetRecord]) {
    debug!("Adding DisGeNET nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        let Some(name) = required(&annot.disease_name) else {
            continue;
        };
        let Some(annot_node_label) = required(&annot.umls) else {
            debug!("DisGeNET disease '{}' has no UMLS id", name);
            continue;
        };

        let mut node_attrs = attrs([
            (LABEL, Value::from(DISEASE_NODE_LABEL)),
            (NAME, Value::from(name)),
            (ID, Value::from(annot_node_label)),
            (DATASOURCE, Value::from(DISGENET)),
        ]);
        for (key, value) in [
            ("HPO", &annot.hpo),
            ("NCI", &annot.nci),
            ("OMIM", &annot.omim),
            ("MONDO", &annot.mondo),
            ("ORDO", &annot.ordo),
            ("EFO", &annot.efo),
            ("DO", &annot.disease_ontology),
            ("MESH", &annot.mesh),
            ("UMLS", &annot.umls),
            ("disease_type", &annot.disease_type),
        ] {
            set_present(&mut node_attrs, key, value.clone());
        }
        g.insert_node(annot_node_label, node_attrs);

        let mut edge_attrs = attrs([
            (DATASOURCE, Value::from(DISGENET)),
            ("score", annot.score.clone().unwrap_or(Value::Null)),
        ]);
        set_present(&mut edge_attrs, "ei", annot.ei.clone());
        set_present(&mut edge_attrs, "el", annot.el.clone());

        g.add_edge_if_novel(gene_node_label, annot_node_label, GENE_DISEASE_EDGE_LABEL, edge_attrs);
    }
}

/// Links a gene to diseases mined from the literature. The record's own
/// `source` becomes the datasource of both node and edge.
pub fn add_literature_gene_disease_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[LiteratureDiseaseRecord]) {
    debug!("Adding literature disease nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        let Some(name) = required(&annot.disease_name) else {
            continue;
        };
        let Some(annot_node_label) = required(&annot.umls) else {
            continue;
        };
        let source = annot.source.clone().map(Value::from).unwrap_or(Value::Null);

        let mut node_attrs = attrs([
            (LABEL, Value::from(DISEASE_NODE_LABEL)),
            (NAME, Value::from(name)),
            (ID, Value::from(annot_node_label)),
            (DATASOURCE, source.clone()),
        ]);
        set_present(&mut node_attrs, "UMLS", annot.umls.clone());
        set_present(&mut node_attrs, "MONDO", annot.mondo.clone());
        g.insert_node(annot_node_label, node_attrs);

        let edge_attrs = attrs([(DATASOURCE, source)]);
        g.add_edge_if_novel(gene_node_label, annot_node_label, GENE_DISEASE_EDGE_LABEL, edge_attrs);
    }
}

/// Links the compounds treating a disease to that disease, then each
/// compound to its adverse effects.
pub fn add_opentargets_disease_compound_subgraph(g: &mut StagedGraph, disease_node_label: &str, annot_list: &[OpenTargetsCompoundRecord]) {
    debug!("Adding OpenTargets disease compound nodes and edges for {}", disease_node_label);
    for annot in annot_list.iter() {
        let Some(relation) = required(&annot.relation) else {
            continue;
        };
        let Some((annot_node_label, node_attrs)) = opentargets_compound_node(annot) else {
            continue;
        };
        g.merge_node(&annot_node_label, node_attrs);

        let edge_attrs = attrs([(DATASOURCE, Value::from(OPENTARGETS)), (EDGE_LABEL, Value::from(relation))]);
        g.add_edge_if_novel(&annot_node_label, disease_node_label, relation, edge_attrs);

        if !annot.adverse_effect.is_empty() {
            add_opentargets_compound_side_effect_subgraph(g, &annot_node_label, &annot.adverse_effect);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::records::decode_records;
    use serde_json::json;

    #[test]
    fn disgenet_keeps_cross_references() {
        let records: Vec<DisgenetRecord> = decode_records(
            DISGENET_COL,
            vec![
                json!({
                    "disease_name": "Asthma",
                    "disease_type": "disease",
                    "UMLS": "UMLS_C0004096",
                    "EFO": "EFO_0000270",
                    "HPO": null,
                    "score": 0.8,
                    "ei": 1.0,
                    "el": null
                }),
                json!({"disease_name": null, "UMLS": "UMLS_C0011849"}),
            ],
        );
        let mut g = StagedGraph::new();
        add_disgenet_gene_disease_subgraph(&mut g, "IL13", &records);

        let node = g.node_attrs("UMLS_C0004096").unwrap();
        assert_eq!(node["EFO"], json!("EFO_0000270"));
        assert_eq!(node["disease_type"], json!("disease"));
        assert!(!node.contains_key("HPO"));
        assert!(!g.contains_node("UMLS_C0011849"));

        let edge = g.edges_between("IL13", "UMLS_C0004096")[0];
        assert_eq!(edge.staged["score"], json!(0.8));
        assert_eq!(edge.staged["ei"], json!(1.0));
        assert!(!edge.staged.contains_key("el"));
    }

    #[test]
    fn literature_sources_are_distinct_edges() {
        let records: Vec<LiteratureDiseaseRecord> = decode_records(
            LITERATURE_DISEASE_COL,
            vec![
                json!({"disease_name": "Asthma", "source": "PubTator", "UMLS": "UMLS_C0004096"}),
                json!({"disease_name": "Asthma", "source": "EuropePMC", "UMLS": "UMLS_C0004096", "MONDO": "MONDO_0004979"}),
            ],
        );
        let mut g = StagedGraph::new();
        add_literature_gene_disease_subgraph(&mut g, "IL13", &records);
        assert_eq!(g.edges_between("IL13", "UMLS_C0004096").len(), 2);
        // plain insert: the last record wins
        assert_eq!(g.node_attrs("UMLS_C0004096").unwrap()[DATASOURCE], json!("EuropePMC"));
    }

    #[test]
    fn disease_compounds_point_at_the_disease() {
        let records: Vec<OpenTargetsCompoundRecord> = decode_records(
            OPENTARGETS_DISEASE_COMPOUND_COL,
            vec![json!({
                "chembl_id": "CHEMBL714",
                "compound_cid": "5865",
                "relation": "treats",
                "adverse_effect": [{"name": "tremor"}]
            })],
        );
        let mut g = StagedGraph::new();
        add_opentargets_disease_compound_subgraph(&mut g, "UMLS_C0004096", &records);
        add_opentargets_disease_compound_subgraph(&mut g, "UMLS_C0004096", &records);
        assert_eq!(g.edges_between("5865", "UMLS_C0004096")[0].label, "treats");
        assert_eq!(g.edges_between("5865", "tremor").len(), 1);
        assert_eq!(g.edge_count(), 2);
    }
}
