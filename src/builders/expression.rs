use super::required;
use crate::attributes::{attrs, set_present, AttrMap};
use crate::constants::*;
use crate::graph::StagedGraph;
use crate::records::BgeeRecord;
use log::debug;
use serde_json::Value;

/// Links a gene to the anatomical entities it is expressed in.
pub fn add_gene_bgee_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[BgeeRecord]) {
    debug!("Adding Bgee nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        let Some(name) = required(&annot.anatomical_entity_name) else {
            continue;
        };
        let Some(anatomical_id) = required(&annot.anatomical_entity_id) else {
            continue;
        };

        let annot_node_label = anatomical_id.replace(':', "_");
        let uberon = anatomical_id.split_once(':').map(|(_, local)| local).unwrap_or(anatomical_id);
        let entity_attrs = attrs([
            (DATASOURCE, Value::from(BGEE)),
            (NAME, Value::from(name)),
            (ID, Value::from(anatomical_id)),
            (LABEL, Value::from(ANATOMICAL_NODE_LABEL)),
            ("UBERON", Value::from(uberon)),
        ]);
        g.insert_node(&annot_node_label, entity_attrs);

        let mut edge_attrs: AttrMap = attrs([(DATASOURCE, Value::from(BGEE))]);
        set_present(&mut edge_attrs, "confidence_level_id", annot.confidence_level_id.clone());
        set_present(&mut edge_attrs, "confidence_level_name", annot.confidence_level_name.clone());
        set_present(&mut edge_attrs, "expression_level", annot.expression_level.clone());
        set_present(&mut edge_attrs, "developmental_stage_id", annot.developmental_stage_id.clone());
        set_present(&mut edge_attrs, "developmental_stage_name", annot.developmental_stage_name.clone());

        g.add_edge_if_novel(gene_node_label, &annot_node_label, GENE_ANATOMICAL_EDGE_LABEL, edge_attrs);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::records::decode_records;
    use serde_json::json;

    fn records() -> Vec<BgeeRecord> {
        decode_records(
            BGEE_COL,
            vec![
                json!({
                    "anatomical_entity_id": "UBERON:0000955",
                    "anatomical_entity_name": "brain",
                    "expression_level": 98.7,
                    "confidence_level_id": "CIO:0000029",
                    "confidence_level_name": "high confidence level",
                    "developmental_stage_id": null,
                    "developmental_stage_name": null
                }),
                json!({"anatomical_entity_id": "UBERON:0002107", "anatomical_entity_name": null}),
            ],
        )
    }

    #[test]
    fn expression_links_gene_to_anatomy() {
        let mut g = StagedGraph::new();
        add_gene_bgee_subgraph(&mut g, "AAGAB", &records());
        let node = g.node_attrs("UBERON_0000955").unwrap();
        assert_eq!(node["UBERON"], json!("0000955"));
        assert_eq!(node[LABEL], json!(ANATOMICAL_NODE_LABEL));
        assert!(!g.contains_node("UBERON_0002107"));

        let edges = g.edges_between("AAGAB", "UBERON_0000955");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].label, GENE_ANATOMICAL_EDGE_LABEL);
        assert_eq!(edges[0].staged["expression_level"], json!(98.7));
        assert!(!edges[0].staged.contains_key("developmental_stage_id"));
    }

    #[test]
    fn repeated_expression_is_a_no_op() {
        let mut g = StagedGraph::new();
        add_gene_bgee_subgraph(&mut g, "AAGAB", &records());
        add_gene_bgee_subgraph(&mut g, "AAGAB", &records());
        assert_eq!(g.edge_count(), 1);
    }
}
