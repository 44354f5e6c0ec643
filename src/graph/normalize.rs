//! Finalized graph and the one-way conversion from the staged graph.

use super::StagedGraph;
use crate::attributes::AttrMap;
use crate::constants::{EDGE_HASH, EDGE_LABEL, LABEL, UNKNOWN_LABEL};
use log::info;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub label: String,
    pub attributes: AttrMap,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub sequence_key: usize,
    pub attributes: AttrMap,
}

/// Immutable, normalized multigraph.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl KnowledgeGraph {
    pub fn node(&self, label: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.label == label)
    }

    pub fn edges_between<'a>(&'a self, source: &'a str, target: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == source && e.target == target)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl StagedGraph {
    /// Hoists every staged attribute to the top level and drops the containers.
    ///
    /// Null values are not carried over. Nodes always end up with a type tag,
    /// edges keep their `label` and `edge_hash`.
    pub fn normalize(self) -> KnowledgeGraph {
        let nodes = self
            .nodes()
            .map(|n| {
                let mut attributes: AttrMap = n
                    .staged
                    .iter()
                    .flat_map(|staged| staged.iter())
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                if !attributes.contains_key(LABEL) {
                    let tag = attributes.get(EDGE_LABEL).cloned().unwrap_or_else(|| Value::from(UNKNOWN_LABEL));
                    attributes.insert(LABEL.to_string(), tag);
                }
                Node {
                    label: n.label.clone(),
                    attributes,
                }
            })
            .collect::<Vec<_>>();

        let edges = self
            .edges()
            .into_iter()
            .map(|(source, target, e)| {
                let mut attributes = AttrMap::new();
                attributes.insert(EDGE_LABEL.to_string(), Value::from(e.label.clone()));
                for (k, v) in e.staged.iter() {
                    if !v.is_null() && k != EDGE_HASH {
                        attributes.insert(k.clone(), v.clone());
                    }
                }
                attributes.insert(EDGE_HASH.to_string(), Value::from(e.hash));
                Edge {
                    source: source.to_string(),
                    target: target.to_string(),
                    sequence_key: e.key,
                    attributes,
                }
            })
            .collect::<Vec<_>>();

        info!("Normalized graph with {} nodes and {} edges", nodes.len(), edges.len());
        KnowledgeGraph { nodes, edges }
    }
}

#[cfg(test)]
mod test {
    use crate::attributes::attrs;
    use crate::constants::{EDGE_HASH, LABEL};
    use crate::graph::StagedGraph;
    use serde_json::json;

    #[test]
    fn every_node_has_a_type_tag() {
        let mut g = StagedGraph::new();
        g.insert_node("WP1", attrs([("name", json!("pathway")), ("gene_count", json!(null))]));
        g.add_edge_if_novel("ENSG1", "WP1", "part_of", attrs([("datasource", json!("WikiPathways"))]));
        let kg = g.normalize();
        assert_eq!(kg.node_count(), 2);
        for n in kg.nodes.iter() {
            assert!(n.attributes.get(LABEL).is_some_and(|v| !v.is_null()), "{} has no type tag", n.label);
        }
        assert!(!kg.node("WP1").unwrap().attributes.contains_key("gene_count"));
        assert_eq!(kg.node("ENSG1").unwrap().attributes[LABEL], json!("Unknown"));
    }

    #[test]
    fn edges_keep_label_and_hash() {
        let mut g = StagedGraph::new();
        g.add_edge_if_novel("a", "b", "interacts_with", attrs([("score", json!(0.9)), ("note", json!(null))]));
        let kg = g.normalize();
        let e = kg.edges_between("a", "b").next().unwrap();
        assert_eq!(e.sequence_key, 0);
        assert_eq!(e.attributes["label"], json!("interacts_with"));
        assert_eq!(e.attributes["score"], json!(0.9));
        assert!(e.attributes[EDGE_HASH].is_u64());
        assert!(!e.attributes.contains_key("note"));
    }
}
