//! Per-source subgraph builders.
//!
//! Each builder links one subject node (a gene, compound, disease or pathway)
//! to the entities described by a list of annotation records. Builders only
//! touch the graph through [`StagedGraph::merge_node`],
//! [`StagedGraph::insert_node`] and the edge dedup policy, so calling a
//! builder twice with the same records leaves the graph unchanged.
//!
//! [`StagedGraph::merge_node`]: crate::graph::StagedGraph::merge_node
//! [`StagedGraph::insert_node`]: crate::graph::StagedGraph::insert_node

pub mod aop;
pub mod compound;
pub mod disease;
pub mod expression;
pub mod homolog;
pub mod interaction;
pub mod ontology;
pub mod pathway;

pub use aop::add_aopwiki_gene_subgraph;
pub use compound::{
    add_molmedb_compound_gene_subgraph, add_molmedb_gene_inhibitor_subgraph, add_opentargets_compound_side_effect_subgraph,
    add_opentargets_gene_compound_subgraph, add_pubchem_assay_subgraph,
};
pub use disease::{add_disgenet_gene_disease_subgraph, add_literature_gene_disease_subgraph, add_opentargets_disease_compound_subgraph};
pub use expression::add_gene_bgee_subgraph;
pub use homolog::{add_ensembl_homolog_subgraph, add_homolog_node};
pub use interaction::{
    add_intact_compound_interactions_subgraph, add_intact_interactions_subgraph, add_stringdb_ppi_subgraph, add_wikipathways_molecular_subgraph,
};
pub use ontology::add_opentargets_gene_go_subgraph;
pub use pathway::{
    add_kegg_compounds_subgraph, add_kegg_gene_pathway_subgraph, add_minerva_gene_pathway_subgraph, add_opentargets_gene_reactome_pathway_subgraph,
    add_wikipathways_gene_pathway_subgraph,
};

/// Defining field of a record: present and not blank.
pub(crate) fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
