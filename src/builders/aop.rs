//! Adverse outcome pathways from AOP-Wiki.
//!
//! Each record describes one chain through an AOP:
//!
//! ```text
//! gene -> AOP <- MIE <- KE upstream -> KE downstream -> AO
//! ```
//!
//! Key events and adverse outcomes share the `KE:` label namespace.

use super::required;
use crate::attributes::{attrs, AttrMap};
use crate::constants::*;
use crate::graph::StagedGraph;
use crate::records::AopRecord;
use log::debug;
use serde_json::Value;

struct Stage<'a> {
    label: String,
    id: &'a str,
    node_type: &'static str,
    title: Option<&'a String>,
    organ: Option<&'a String>,
}

impl<'a> Stage<'a> {
    fn new(prefix: &str, id: &'a Option<String>, node_type: &'static str, title: &'a Option<String>, organ: Option<&'a Option<String>>) -> Option<Self> {
        let id = required(id)?;
        Some(Stage {
            label: format!("{}:{}", prefix, id),
            id,
            node_type,
            title: title.as_ref(),
            organ: organ.and_then(Option::as_ref),
        })
    }

    fn node_attrs(&self) -> AttrMap {
        let mut node_attrs = attrs([
            (DATASOURCE, Value::from(AOPWIKI)),
            (ID, Value::from(self.id)),
            ("type", Value::from(self.node_type)),
            ("title", self.title.cloned().map(Value::from).unwrap_or(Value::Null)),
            (LABEL, Value::from(self.node_type)),
        ]);
        if let Some(organ) = self.organ {
            node_attrs.insert("organ".to_string(), Value::from(organ.as_str()));
        }
        node_attrs
    }
}

fn link(g: &mut StagedGraph, source: &str, target: &str, relation: &str) {
    let edge_attrs = attrs([(DATASOURCE, Value::from(AOPWIKI)), ("relation", Value::from(relation))]);
    g.add_edge_if_novel(source, target, relation, edge_attrs);
}

/// Links a gene to the AOP-Wiki chains it takes part in. A stage without an
/// id is left out, together with the edges touching it.
pub fn add_aopwiki_gene_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[AopRecord]) {
    debug!("Adding AOP-Wiki nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        let aop = Stage::new("AOP", &annot.aop, AOP_NODE_LABEL, &annot.aop_title, None);
        let mie = Stage::new("MIE", &annot.mie, MIE_NODE_LABEL, &annot.mie_title, None);
        let ke_up = Stage::new("KE", &annot.ke_upstream, KEY_EVENT_NODE_LABEL, &annot.ke_upstream_title, Some(&annot.ke_upstream_organ));
        let ke_down = Stage::new(
            "KE",
            &annot.ke_downstream,
            KEY_EVENT_NODE_LABEL,
            &annot.ke_downstream_title,
            Some(&annot.ke_downstream_organ),
        );
        let ao = Stage::new("KE", &annot.ao, AO_NODE_LABEL, &annot.ao_title, None);

        for stage in [&aop, &mie, &ke_up, &ke_down, &ao].into_iter().flatten() {
            g.insert_node(&stage.label, stage.node_attrs());
        }

        if let Some(aop) = &aop {
            link(g, gene_node_label, &aop.label, AOP_GENE_EDGE_LABEL);
        }
        if let (Some(mie), Some(aop)) = (&mie, &aop) {
            link(g, &mie.label, &aop.label, MIE_AOP_EDGE_LABEL);
        }
        if let (Some(ke_up), Some(mie)) = (&ke_up, &mie) {
            link(g, &ke_up.label, &mie.label, KE_UPSTREAM_MIE_EDGE_LABEL);
        }
        if let (Some(ke_up), Some(ke_down)) = (&ke_up, &ke_down) {
            link(g, &ke_up.label, &ke_down.label, KE_DOWNSTREAM_KE_EDGE_LABEL);
        }
        if let (Some(ke_down), Some(ao)) = (&ke_down, &ao) {
            link(g, &ke_down.label, &ao.label, AO_KE_EDGE_LABEL);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::records::decode_records;
    use serde_json::json;

    fn chain() -> Vec<AopRecord> {
        decode_records(
            AOPWIKI_GENE_COL,
            vec![json!({
                "aop": "1",
                "aop_title": "Uncouplers of oxidative phosphorylation",
                "MIE": "2",
                "MIE_title": "Decoupling of OXPHOS",
                "KE_upstream": "3",
                "KE_upstream_title": "Decrease, ATP pool",
                "KE_upstream_organ": "liver",
                "KE_downstream": "4",
                "KE_downstream_title": "Cell death",
                "KE_downstream_organ": null,
                "ao": "5",
                "ao_title": "Growth, reduction"
            })],
        )
    }

    #[test]
    fn full_chain_gives_five_nodes_and_five_edges() {
        let mut g = StagedGraph::new();
        add_aopwiki_gene_subgraph(&mut g, "ENSG00000175206", &chain());
        assert_eq!(g.node_count(), 6);
        assert_eq!(g.edge_count(), 5);
        assert_eq!(g.edges_between("ENSG00000175206", "AOP:1")[0].label, AOP_GENE_EDGE_LABEL);
        assert_eq!(g.edges_between("MIE:2", "AOP:1")[0].label, MIE_AOP_EDGE_LABEL);
        assert_eq!(g.edges_between("KE:3", "MIE:2")[0].label, KE_UPSTREAM_MIE_EDGE_LABEL);
        assert_eq!(g.edges_between("KE:3", "KE:4")[0].label, KE_DOWNSTREAM_KE_EDGE_LABEL);
        assert_eq!(g.edges_between("KE:4", "KE:5")[0].label, AO_KE_EDGE_LABEL);
        assert_eq!(g.node_attrs("KE:5").unwrap()[LABEL], json!(AO_NODE_LABEL));
        assert_eq!(g.node_attrs("KE:3").unwrap()["organ"], json!("liver"));
        assert!(!g.node_attrs("KE:4").unwrap().contains_key("organ"));

        add_aopwiki_gene_subgraph(&mut g, "ENSG00000175206", &chain());
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn missing_stage_drops_its_edges() {
        let mut records = chain();
        records[0].mie = None;
        let mut g = StagedGraph::new();
        add_aopwiki_gene_subgraph(&mut g, "ENSG00000175206", &records);
        assert!(!g.contains_node("MIE:"));
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.edges_between("KE:3", "KE:4").len(), 1);
    }
}
