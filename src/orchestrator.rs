//! Top-level construction sequence.

use crate::attributes::{attrs, value_text};
use crate::builders::homolog::homolog_label;
use crate::builders::{add_homolog_node, add_kegg_compounds_subgraph, add_opentargets_disease_compound_subgraph};
use crate::constants::*;
use crate::dispatch::{dea_columns, decode_cell, dispatch_row, process_annotations, Mode, Source};
use crate::error::{GraphError, Result};
use crate::graph::{KnowledgeGraph, StagedGraph};
use crate::records::{decode_kegg_compounds, HomologRecord, OpenTargetsCompoundRecord, PathwayRecord};
use crate::session::RunState;
use crate::table::{cell_text, Table};
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::slice;

/// Tables a graph is built from.
#[derive(Clone, Debug, Default)]
pub struct GraphInputs {
    pub combined: Table,
    pub disease_compound: Option<Table>,
    pub pathway_compound: Option<Table>,
    pub homologs: Vec<Table>,
}

impl GraphInputs {
    pub fn new(combined: Table) -> Self {
        GraphInputs {
            combined,
            ..Default::default()
        }
    }
}

/// Most frequent non-null `target.source` of the table. Ties go to the
/// namespace seen first.
pub fn dominant_namespace(table: &Table) -> Option<String> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for row in table.rows().iter() {
        if let Some(ns) = cell_text(row, TARGET_SOURCE_COL) {
            *counts.entry(ns).or_insert(0) += 1;
        }
    }
    let mut best: Option<(String, usize)> = None;
    for (ns, count) in counts.into_iter() {
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((ns, count));
        }
    }
    best.map(|(ns, _)| ns)
}

/// Builds the knowledge graph with a fresh run state.
pub fn build_graph(inputs: &GraphInputs) -> Result<KnowledgeGraph> {
    build_graph_with_state(inputs, &mut RunState::new())
}

/// Builds the knowledge graph, recording consumed interaction ids in `state`.
pub fn build_graph_with_state(inputs: &GraphInputs, state: &mut RunState) -> Result<KnowledgeGraph> {
    let namespace = dominant_namespace(&inputs.combined).unwrap_or_default();
    let Some(mode) = Mode::from_namespace(&namespace) else {
        return Err(GraphError::UnsupportedNamespace { namespace });
    };

    let combined = inputs.combined.filter(|row| cell_text(row, TARGET_SOURCE_COL).as_deref() == Some(mode.namespace()));
    info!("Building {:?}-based graph from {} of {} rows", mode, combined.len(), inputs.combined.len());

    let dea = dea_columns(combined.columns());
    let mut g = StagedGraph::new();

    for row in combined.rows().iter() {
        dispatch_row(&mut g, state, mode, row, &dea)?;
    }
    info!("Staged {} nodes and {} edges from the main table", g.node_count(), g.edge_count());

    if !inputs.homologs.is_empty() {
        process_homologs(&mut g, state, mode, &combined, &inputs.homologs)?;
    }

    if let Some(disease_compound) = &inputs.disease_compound {
        process_disease_compound(&mut g, disease_compound);
    }

    if let Some(pathway_compound) = &inputs.pathway_compound {
        process_pathway_compound(&mut g, pathway_compound, &combined);
    }

    Ok(g.normalize())
}

/// Sources that homolog tables were produced for: the last column of a
/// homolog table names one, provided the main table has that column too.
pub fn homolog_sources(mode: Mode, combined: &Table, homologs: &[Table]) -> Vec<Source> {
    let last_columns: Vec<&str> = homologs.iter().filter_map(Table::last_column).collect();
    mode.sources()
        .iter()
        .filter(|s| last_columns.contains(&s.column()) && combined.has_column(s.column()))
        .copied()
        .collect()
}

/// Makes every homolog of a row a subject of its own for the homolog sources.
fn process_homologs(g: &mut StagedGraph, state: &mut RunState, mode: Mode, combined: &Table, homologs: &[Table]) -> Result<()> {
    let sources = homolog_sources(mode, combined, homologs);
    info!("Processing homologs for {}", sources.iter().join(", "));

    for row in combined.rows().iter() {
        if cell_text(row, IDENTIFIER_COL).is_none() {
            continue;
        }
        let Some(cell) = row.get(ENSEMBL_HOMOLOG_COL) else {
            continue;
        };
        let records: Vec<HomologRecord> = decode_cell(ENSEMBL_HOMOLOG_COL, cell);
        for record in records.iter() {
            let Some(homolog) = homolog_label(record) else {
                continue;
            };
            add_homolog_node(g, homolog);
            process_annotations(g, state, homolog, row, &sources)?;
        }
    }
    Ok(())
}

/// EFO cross reference of every disease node, mapped to the node label.
fn disease_nodes_by_efo(g: &StagedGraph) -> HashMap<String, String> {
    g.nodes()
        .filter_map(|n| {
            let staged = n.staged.as_ref()?;
            if staged.get(LABEL) != Some(&Value::from(DISEASE_NODE_LABEL)) {
                return None;
            }
            match staged.get("EFO") {
                None | Some(Value::Null) => None,
                Some(efo) => Some((value_text(efo), n.label.clone())),
            }
        })
        .collect()
}

/// Attaches compounds to the diseases of the disease-compound table.
///
/// Targets are written with `_` (`EFO_0001071`) and matched against the
/// `EFO` attribute of disease nodes (`EFO:0001071`). A disease without a
/// match gets a minimal node of its own.
fn process_disease_compound(g: &mut StagedGraph, disease_compound: &Table) {
    let efo_nodes = disease_nodes_by_efo(g);
    info!("Processing {} disease-compound rows against {} known diseases", disease_compound.len(), efo_nodes.len());

    for row in disease_compound.rows().iter() {
        let Some(target) = cell_text(row, TARGET_COL) else {
            continue;
        };
        let disease_id = target.replace('_', ":");
        let disease_node_label = match efo_nodes.get(&disease_id) {
            Some(label) => label.clone(),
            None => {
                debug!("Disease {} not in graph yet", disease_id);
                let node_attrs = attrs([
                    (LABEL, Value::from(DISEASE_NODE_LABEL)),
                    (NAME, Value::from(disease_id.as_str())),
                    (ID, Value::from(disease_id.as_str())),
                    (DATASOURCE, Value::from(OPENTARGETS)),
                ]);
                g.insert_node(&disease_id, node_attrs);
                disease_id
            }
        };

        let records: Vec<OpenTargetsCompoundRecord> = row
            .get(OPENTARGETS_DISEASE_COMPOUND_COL)
            .map(|cell| decode_cell(OPENTARGETS_DISEASE_COMPOUND_COL, cell))
            .unwrap_or_default();
        add_opentargets_disease_compound_subgraph(g, &disease_node_label, &records);
    }
}

/// KEGG pathways of the main table, by the compounds they list.
fn kegg_pathways_by_compound(combined: &Table) -> IndexMap<String, Vec<String>> {
    let mut index: IndexMap<String, Vec<String>> = IndexMap::new();
    for row in combined.rows().iter() {
        let Some(cell) = row.get(KEGG_PATHWAY_COL) else {
            continue;
        };
        let pathways: Vec<PathwayRecord> = decode_cell(KEGG_PATHWAY_COL, cell);
        for pathway in pathways.iter() {
            let Some(pathway_id) = pathway.pathway_id.as_deref() else {
                continue;
            };
            for compound in pathway.compounds.iter() {
                let Some(compound_id) = compound.kegg_identifier.as_deref() else {
                    continue;
                };
                let entry = index.entry(compound_id.to_string()).or_default();
                if !entry.iter().any(|p| p == pathway_id) {
                    entry.push(pathway_id.to_string());
                }
            }
        }
    }
    index
}

/// Links the compounds of the pathway-compound table to every KEGG pathway
/// of the main table that lists them.
fn process_pathway_compound(g: &mut StagedGraph, pathway_compound: &Table, combined: &Table) {
    let index = kegg_pathways_by_compound(combined);
    info!("Processing {} pathway-compound rows against {} indexed compounds", pathway_compound.len(), index.len());

    for row in pathway_compound.rows().iter() {
        let Some(cell) = row.get(KEGG_COMPOUND_COL) else {
            continue;
        };
        let compounds = match decode_kegg_compounds(cell.clone()) {
            Ok(compounds) => compounds,
            Err(e) => {
                warn!("Skipping malformed {} cell: {}", KEGG_COMPOUND_COL, e);
                continue;
            }
        };
        for compound in compounds.iter() {
            let Some(pathways) = compound.kegg_identifier.as_deref().and_then(|id| index.get(id)) else {
                continue;
            };
            for pathway_id in pathways.iter() {
                add_kegg_compounds_subgraph(g, pathway_id, slice::from_ref(compound));
            }
        }
    }
}
