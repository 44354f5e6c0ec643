use super::required;
use crate::attributes::attrs;
use crate::constants::*;
use crate::error::{GraphError, Result};
use crate::graph::StagedGraph;
use crate::records::GoRecord;
use log::debug;
use serde_json::Value;

/// Type tag for the one-letter GO aspect used by OpenTargets.
fn go_node_label(go_id: &str, go_type: Option<&str>) -> Result<&'static str> {
    match go_type {
        Some("P") => Ok(GO_BP_NODE_LABEL),
        Some("F") => Ok(GO_MF_NODE_LABEL),
        Some("C") => Ok(GO_CC_NODE_LABEL),
        other => Err(GraphError::InvalidGoType {
            go_id: go_id.to_string(),
            go_type: other.unwrap_or_default().to_string(),
        }),
    }
}

/// Links a gene to its GO terms.
///
/// An aspect other than `P`, `F` or `C` aborts the build; terms staged
/// before the offending record stay in the graph.
pub fn add_opentargets_gene_go_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[GoRecord]) -> Result<()> {
    debug!("Adding OpenTargets GO nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        let Some(go_id) = required(&annot.go_id) else {
            continue;
        };
        let node_label = go_node_label(go_id, annot.go_type.as_deref().map(str::trim))?;

        let node_attrs = attrs([
            (LABEL, Value::from(node_label)),
            (NAME, annot.go_name.clone().map(Value::from).unwrap_or(Value::Null)),
            (ID, Value::from(go_id)),
            (DATASOURCE, Value::from(OPENTARGETS)),
        ]);
        g.insert_node(go_id, node_attrs);

        let edge_attrs = attrs([(DATASOURCE, Value::from(OPENTARGETS))]);
        g.add_edge_if_novel(gene_node_label, go_id, GENE_GO_EDGE_LABEL, edge_attrs);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::records::decode_records;
    use serde_json::json;

    #[test]
    fn go_aspects_map_to_type_tags() {
        let records: Vec<GoRecord> = decode_records(
            OPENTARGETS_GO_COL,
            vec![
                json!({"go_id": "GO:0006955", "go_name": "immune response", "go_type": "P"}),
                json!({"go_id": "GO:0005125", "go_name": "cytokine activity", "go_type": "F"}),
                json!({"go_id": "GO:0005615", "go_name": "extracellular space", "go_type": "C"}),
                json!({"go_id": null, "go_type": "Z"}),
            ],
        );
        let mut g = StagedGraph::new();
        add_opentargets_gene_go_subgraph(&mut g, "IL13", &records).unwrap();
        assert_eq!(g.node_attrs("GO:0006955").unwrap()[LABEL], json!(GO_BP_NODE_LABEL));
        assert_eq!(g.node_attrs("GO:0005125").unwrap()[LABEL], json!(GO_MF_NODE_LABEL));
        assert_eq!(g.node_attrs("GO:0005615").unwrap()[LABEL], json!(GO_CC_NODE_LABEL));
        assert_eq!(g.edges_between("IL13", "GO:0006955")[0].label, GENE_GO_EDGE_LABEL);
    }

    #[test]
    fn unknown_go_aspect_is_fatal() {
        let records: Vec<GoRecord> = decode_records(OPENTARGETS_GO_COL, vec![json!({"go_id": "GO:0006955", "go_type": "Z"})]);
        let mut g = StagedGraph::new();
        match add_opentargets_gene_go_subgraph(&mut g, "IL13", &records) {
            Err(GraphError::InvalidGoType { go_id, go_type }) => {
                assert_eq!(go_id, "GO:0006955");
                assert_eq!(go_type, "Z");
            }
            other => panic!("expected InvalidGoType, got {:?}", other),
        }
        assert!(!g.contains_node("GO:0006955"));
    }
}
