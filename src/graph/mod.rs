//! Build-time multigraph: node merge policy and edge dedup policy.
//!
//! A [`StagedGraph`] is mutated by the builders while annotations are read.
//! Every node and edge keeps its attributes in a staged container until
//! [`StagedGraph::normalize`] turns the whole graph into an immutable
//! [`KnowledgeGraph`].

pub mod normalize;

pub use normalize::{Edge, KnowledgeGraph, Node};

use crate::attributes::{edge_hash, value_text, AttrMap};
use crate::constants::{EDGE_LABEL, LABEL, PIPE, UNKNOWN_LABEL};
use itertools::{join, Itertools};
use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde_json::Value;
use std::collections::HashMap;
use std::iter;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct StagedNode {
    pub label: String,
    /// `None` for nodes that only exist because an edge pointed at them.
    pub staged: Option<AttrMap>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StagedEdge {
    pub label: String,
    pub staged: AttrMap,
    pub hash: u64,
    /// Position among the parallel edges of the same ordered node pair.
    pub key: usize,
}

#[derive(Clone, Debug, Default)]
pub struct StagedGraph {
    graph: DiGraph<StagedNode, StagedEdge>,
    index: HashMap<String, NodeIndex>,
}

impl StagedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn node(&self, label: &str) -> Option<&StagedNode> {
        self.index.get(label).map(|idx| &self.graph[*idx])
    }

    /// Staged attributes of `label`, if the node exists and has a container.
    pub fn node_attrs(&self, label: &str) -> Option<&AttrMap> {
        self.node(label).and_then(|n| n.staged.as_ref())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &StagedNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Parallel edges from `source` to `target`, in insertion order.
    pub fn edges_between(&self, source: &str, target: &str) -> Vec<&StagedEdge> {
        match (self.index.get(source), self.index.get(target)) {
            (Some(s), Some(t)) => self.graph.edges_connecting(*s, *t).map(|e| e.weight()).sorted_by_key(|e| e.key).collect(),
            _ => vec![],
        }
    }

    fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(idx) = self.index.get(label) {
            return *idx;
        }
        let idx = self.graph.add_node(StagedNode {
            label: label.to_string(),
            staged: None,
        });
        self.index.insert(label.to_string(), idx);
        idx
    }

    /// Plain insert: the node's staged container is replaced by `attrs`.
    pub fn insert_node(&mut self, label: &str, attrs: AttrMap) {
        let idx = self.ensure_node(label);
        self.graph[idx].staged = Some(attrs);
    }

    /// Inserts `label`, or folds `attrs` into the node already staged under it.
    ///
    /// String values are accumulated into a `|` separated set. Non-string
    /// values only fill keys that are absent or null. A node created implicitly
    /// by an edge has no container and is re-wrapped with `attrs` alone.
    pub fn merge_node(&mut self, label: &str, mut attrs: AttrMap) {
        let idx = self.ensure_node(label);
        match self.graph[idx].staged.as_mut() {
            Some(existing) => {
                for (key, value) in attrs.into_iter() {
                    match existing.get_mut(&key) {
                        Some(current) => merge_value(current, value),
                        None => {
                            existing.insert(key, value);
                        }
                    }
                }
            }
            None => {
                if !attrs.contains_key(LABEL) {
                    let tag = attrs.get(EDGE_LABEL).cloned().unwrap_or_else(|| Value::from(UNKNOWN_LABEL));
                    attrs.insert(LABEL.to_string(), tag);
                }
                self.graph[idx].staged = Some(attrs);
            }
        }
    }

    /// Whether a parallel edge from `source` to `target` already stores `hash`.
    pub fn edge_exists(&self, source: &str, target: &str, hash: u64) -> bool {
        self.edges_between(source, target).iter().any(|e| e.hash == hash)
    }

    /// Hashes `attrs` and inserts the edge unless an identical one exists.
    ///
    /// Missing endpoints are created without a staged container. Returns
    /// `true` when the edge was inserted.
    pub fn add_edge_if_novel(&mut self, source: &str, target: &str, label: &str, attrs: AttrMap) -> bool {
        let hash = edge_hash(&attrs);
        self.add_hashed_edge(source, target, label, attrs, hash)
    }

    /// Like [`add_edge_if_novel`](Self::add_edge_if_novel) with a precomputed hash.
    pub fn add_hashed_edge(&mut self, source: &str, target: &str, label: &str, attrs: AttrMap, hash: u64) -> bool {
        if self.edge_exists(source, target, hash) {
            debug!("Skipping duplicate {} edge {} -> {}", label, source, target);
            return false;
        }
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        let key = self.graph.edges_connecting(s, t).count();
        self.graph.add_edge(
            s,
            t,
            StagedEdge {
                label: label.to_string(),
                staged: attrs,
                hash,
                key,
            },
        );
        true
    }

    /// Every edge with its endpoint labels, in insertion order.
    pub fn edges(&self) -> Vec<(&str, &str, &StagedEdge)> {
        self.graph
            .edge_indices()
            .filter_map(|e| {
                self.graph
                    .edge_endpoints(e)
                    .map(|(s, t)| (self.graph[s].label.as_str(), self.graph[t].label.as_str(), &self.graph[e]))
            })
            .collect()
    }
}

fn merge_value(current: &mut Value, incoming: Value) {
    if current.is_null() {
        *current = incoming;
        return;
    }
    if let Value::String(s) = incoming {
        let existing = value_text(current);
        let merged = join(existing.split(PIPE).chain(iter::once(s.as_str())).unique(), PIPE);
        *current = Value::String(merged);
    }
}
