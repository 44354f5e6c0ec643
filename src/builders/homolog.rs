use crate::attributes::attrs;
use crate::constants::*;
use crate::graph::StagedGraph;
use crate::records::HomologRecord;
use log::debug;
use serde_json::Value;

/// Homolog value usable as a node label: present, not blank and not `"nan"`.
pub(crate) fn homolog_label(record: &HomologRecord) -> Option<&str> {
    super::required(&record.homolog).filter(|h| *h != NAN)
}

/// Links a gene to its Ensembl homologs. Homolog nodes are left to the
/// homolog pass; an unseen homolog is created bare by the edge.
pub fn add_ensembl_homolog_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[HomologRecord]) {
    debug!("Adding Ensembl homolog nodes and edges for {}", gene_node_label);
    for hl in annot_list.iter() {
        let Some(homolog) = homolog_label(hl) else {
            continue;
        };
        let edge_attrs = attrs([(DATASOURCE, Value::from(ENSEMBL))]);
        g.add_edge_if_novel(gene_node_label, homolog, HOMOLOG_EDGE_LABEL, edge_attrs);
    }
}

/// Plain-inserts the node for a homolog gene.
pub fn add_homolog_node(g: &mut StagedGraph, homolog: &str) {
    let node_attrs = attrs([
        (ID, Value::from(homolog)),
        (DATASOURCE, Value::from(ENSEMBL)),
        (LABEL, Value::from(HOMOLOG_NODE_LABEL)),
    ]);
    g.insert_node(homolog, node_attrs);
}
