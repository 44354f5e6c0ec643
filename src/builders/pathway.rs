use super::required;
use crate::attributes::{attrs, set_present, AttrMap};
use crate::constants::*;
use crate::graph::StagedGraph;
use crate::records::{KeggCompound, PathwayRecord};
use log::debug;
use serde_json::Value;

/// How a pathway source writes its pathway nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeWrite {
    Insert,
    Merge,
}

/// Which record field decides whether a pathway record is usable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Defining {
    Label,
    Id,
}

struct PathwaySource {
    datasource: &'static str,
    defining: Defining,
    write: NodeWrite,
    with_gene_count: bool,
}

const MINERVA_SOURCE: PathwaySource = PathwaySource {
    datasource: MINERVA,
    defining: Defining::Label,
    write: NodeWrite::Insert,
    with_gene_count: true,
};

const WIKIPATHWAYS_SOURCE: PathwaySource = PathwaySource {
    datasource: WIKIPATHWAYS,
    defining: Defining::Id,
    write: NodeWrite::Insert,
    with_gene_count: true,
};

const KEGG_SOURCE: PathwaySource = PathwaySource {
    datasource: KEGG,
    defining: Defining::Label,
    write: NodeWrite::Merge,
    with_gene_count: true,
};

const REACTOME_SOURCE: PathwaySource = PathwaySource {
    datasource: OPENTARGETS,
    defining: Defining::Id,
    write: NodeWrite::Insert,
    with_gene_count: false,
};

fn add_pathway_subgraph(g: &mut StagedGraph, source: &PathwaySource, gene_node_label: &str, annot_list: &[PathwayRecord]) {
    debug!("Adding {} pathway nodes and edges for {}", source.datasource, gene_node_label);
    for annot in annot_list.iter() {
        let defining = match source.defining {
            Defining::Label => required(&annot.pathway_label),
            Defining::Id => required(&annot.pathway_id),
        };
        if defining.is_none() {
            continue;
        }
        let Some(annot_node_label) = required(&annot.pathway_id) else {
            continue;
        };

        let mut node_attrs: AttrMap = attrs([
            (LABEL, Value::from(PATHWAY_NODE_LABEL)),
            (DATASOURCE, Value::from(source.datasource)),
            (NAME, annot.pathway_label.clone().map(Value::from).unwrap_or(Value::Null)),
            (ID, Value::from(annot_node_label)),
        ]);
        if source.with_gene_count {
            set_present(&mut node_attrs, "gene_count", annot.pathway_gene_counts.clone());
        }
        match source.write {
            NodeWrite::Insert => g.insert_node(annot_node_label, node_attrs),
            NodeWrite::Merge => g.merge_node(annot_node_label, node_attrs),
        }

        let edge_attrs = attrs([(DATASOURCE, Value::from(source.datasource))]);
        g.add_edge_if_novel(gene_node_label, annot_node_label, GENE_PATHWAY_EDGE_LABEL, edge_attrs);
    }
}

pub fn add_minerva_gene_pathway_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[PathwayRecord]) {
    add_pathway_subgraph(g, &MINERVA_SOURCE, gene_node_label, annot_list)
}

pub fn add_wikipathways_gene_pathway_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[PathwayRecord]) {
    add_pathway_subgraph(g, &WIKIPATHWAYS_SOURCE, gene_node_label, annot_list)
}

/// KEGG pathway nodes are merged, since the pathway-compound pass may already
/// have touched them.
pub fn add_kegg_gene_pathway_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[PathwayRecord]) {
    add_pathway_subgraph(g, &KEGG_SOURCE, gene_node_label, annot_list)
}

pub fn add_opentargets_gene_reactome_pathway_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[PathwayRecord]) {
    add_pathway_subgraph(g, &REACTOME_SOURCE, gene_node_label, annot_list)
}

/// Links a KEGG pathway to compounds it contains.
pub fn add_kegg_compounds_subgraph(g: &mut StagedGraph, pathway_node_label: &str, compounds: &[KeggCompound]) {
    debug!("Adding KEGG compound nodes and edges for {}", pathway_node_label);
    for compound in compounds.iter() {
        let Some(name) = required(&compound.name) else {
            continue;
        };
        let Some(annot_node_label) = required(&compound.kegg_identifier) else {
            continue;
        };

        let node_attrs = attrs([
            (LABEL, Value::from(COMPOUND_NODE_LABEL)),
            (ID, Value::from(annot_node_label)),
            (NAME, Value::from(name)),
            (DATASOURCE, Value::from(KEGG)),
        ]);
        g.merge_node(annot_node_label, node_attrs);

        let edge_attrs = attrs([(DATASOURCE, Value::from(KEGG))]);
        g.add_edge_if_novel(pathway_node_label, annot_node_label, KEGG_COMPOUND_EDGE_LABEL, edge_attrs);
    }
}
