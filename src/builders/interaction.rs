//! Molecular interaction builders: IntAct, STRING and WikiPathways
//! molecular interaction maps.

use super::required;
use crate::attributes::{attrs, edge_hash, flatten_list, is_blank, is_chebi, set_present, AttrMap};
use crate::constants::*;
use crate::graph::StagedGraph;
use crate::records::{IntactRecord, MolecularInteractionRecord, StringPpiRecord};
use crate::session::RunState;
use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

const DETECTION_METHOD: &str = "detection_method";
const INTERACTION_TYPE: &str = "interaction_type";
/// Prefix WikiPathways puts on gene targets of molecular interactions.
const TARGET_GENE_PREFIX: &str = "target_gene:";

/// Edge awaiting insertion, keyed by partner. The hash is fixed when the
/// first record for the partner is seen.
struct PendingEdge {
    label: String,
    attrs: AttrMap,
    hash: u64,
}

/// Every non-blank field of an IntAct record, lists joined with commas.
fn record_fields(record: &IntactRecord) -> AttrMap {
    record
        .fields
        .iter()
        .filter(|(_, v)| !is_blank(v))
        .map(|(k, v)| (k.clone(), flatten_list(v.clone())))
        .collect()
}

/// Folds the detection methods of `record` into the pending edge.
///
/// Once a second method arrives the attribute becomes a JSON list; each
/// method is kept whole and appears once.
fn union_method(pending: &mut PendingEdge, record: &IntactRecord) {
    let methods: Vec<Value> = match record.fields.get(DETECTION_METHOD) {
        Some(Value::Array(items)) => items.iter().filter(|v| !is_blank(v)).cloned().collect(),
        Some(v) if !is_blank(v) => vec![v.clone()],
        _ => return,
    };
    let mut listed: Vec<Value> = match pending.attrs.get(DETECTION_METHOD) {
        Some(Value::Array(items)) => items.clone(),
        Some(v) if !is_blank(v) => vec![v.clone()],
        _ => vec![],
    };
    let before = listed.len();
    for method in methods.into_iter() {
        if !listed.contains(&method) {
            listed.push(method);
        }
    }
    if listed.len() != before {
        pending.attrs.insert(DETECTION_METHOD.to_string(), Value::Array(listed));
    }
}

fn flush(g: &mut StagedGraph, source: &str, pending: IndexMap<String, PendingEdge>) {
    for (target, edge) in pending.into_iter() {
        g.add_hashed_edge(source, &target, &edge.label, edge.attrs, edge.hash);
    }
}

/// Links a gene to its IntAct interaction partners.
///
/// IntAct reports an interaction under both partners, so an
/// `interaction_id` is only used the first time it is seen in the run.
/// A partner with a `CHEBI:` id is a compound and gets a node of its own.
/// Records that lead to the same partner collapse into one edge listing every
/// detection method.
pub fn add_intact_interactions_subgraph(g: &mut StagedGraph, state: &mut RunState, gene_node_label: &str, annot_list: &[IntactRecord]) {
    debug!("Adding IntAct nodes and edges for {}", gene_node_label);
    let mut pending: IndexMap<String, PendingEdge> = IndexMap::new();

    for record in annot_list.iter() {
        let Some(interaction_id) = record.interaction_id() else {
            continue;
        };
        if !state.first_interaction(&interaction_id) {
            debug!("IntAct interaction {} already linked", interaction_id);
            continue;
        }

        let compound_side = match (record.id_a(), record.id_b()) {
            (Some(a), _) if is_chebi(&a) => Some((a, 'A')),
            (_, Some(b)) if is_chebi(&b) => Some((b, 'B')),
            _ => None,
        };
        let partner = match &compound_side {
            Some((id, _)) => Some(id.clone()),
            None => record.protein_partner(),
        };
        let Some(partner) = partner else {
            continue;
        };

        if let Some(existing) = pending.get_mut(&partner) {
            union_method(existing, record);
            continue;
        }

        if let Some((id, side)) = compound_side {
            let (name, species, molecule) = record.interactor(side);
            let mut node_attrs = attrs([
                (LABEL, Value::from(COMPOUND_NODE_LABEL)),
                (ID, Value::from(id.as_str())),
                (DATASOURCE, Value::from(INTACT)),
            ]);
            set_present(&mut node_attrs, NAME, name);
            set_present(&mut node_attrs, "species", species);
            set_present(&mut node_attrs, "molecule", molecule);
            g.merge_node(&id, node_attrs);
        }

        let mut edge_attrs = attrs([(DATASOURCE, Value::from(INTACT)), (EDGE_LABEL, Value::from(PPI_EDGE_LABEL))]);
        edge_attrs.extend(record_fields(record));
        let hash = edge_hash(&edge_attrs);
        pending.insert(
            partner,
            PendingEdge {
                label: PPI_EDGE_LABEL.to_string(),
                attrs: edge_attrs,
                hash,
            },
        );
    }

    flush(g, gene_node_label, pending);
}

/// Links a ChEBI compound to its IntAct interaction partners.
///
/// The subject may be given with or without its `CHEBI:` prefix. Only
/// records naming the subject as one of the interactors are used, and each
/// `binary_interaction_id` only once per run.
pub fn add_intact_compound_interactions_subgraph(
    g: &mut StagedGraph,
    state: &mut RunState,
    compound_node_label: &str,
    annot_list: &[IntactRecord],
) {
    debug!("Adding IntAct compound nodes and edges for {}", compound_node_label);
    let subject = compound_node_label.trim();
    let compound_full_id = if is_chebi(subject) {
        subject.to_string()
    } else {
        format!("{}{}", CHEBI_PREFIX, subject)
    };
    let mut pending: IndexMap<String, PendingEdge> = IndexMap::new();

    for record in annot_list.iter() {
        let Some(interaction_id) = record.binary_interaction_id() else {
            continue;
        };
        if !state.first_binary_interaction(&interaction_id) {
            continue;
        }

        let (id_a, id_b) = (record.id_a(), record.id_b());
        let (partner, side) = if id_a.as_deref() == Some(compound_full_id.as_str()) {
            (id_b, 'B')
        } else if id_b.as_deref() == Some(compound_full_id.as_str()) {
            (id_a, 'A')
        } else {
            continue;
        };
        let Some(partner) = partner else {
            continue;
        };

        if let Some(existing) = pending.get_mut(&partner) {
            union_method(existing, record);
            continue;
        }

        let (name, species, molecule) = record.interactor(side);
        let node_type = if is_chebi(&partner) { COMPOUND_NODE_LABEL } else { GENE_NODE_LABEL };
        let mut node_attrs = attrs([
            (LABEL, Value::from(node_type)),
            (ID, Value::from(partner.as_str())),
            (DATASOURCE, Value::from(INTACT)),
        ]);
        set_present(&mut node_attrs, NAME, name);
        set_present(&mut node_attrs, "species", species);
        set_present(&mut node_attrs, "molecule", molecule);
        g.merge_node(&partner, node_attrs);

        let interaction_type = record.interaction_type().unwrap_or_else(|| COMPOUND_PPI_EDGE_LABEL.to_string());
        let mut edge_attrs = record_fields(record);
        edge_attrs.insert(DETECTION_METHOD.to_string(), Value::from(record.detection_method().unwrap_or_default()));
        edge_attrs.insert(INTERACTION_TYPE.to_string(), Value::from(interaction_type.as_str()));
        let hash = edge_hash(&edge_attrs);
        pending.insert(
            partner,
            PendingEdge {
                label: interaction_type,
                attrs: edge_attrs,
                hash,
            },
        );
    }

    flush(g, compound_node_label, pending);
}

/// Links a gene to its STRING interactors in both directions.
pub fn add_stringdb_ppi_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[StringPpiRecord]) {
    debug!("Adding StringDB PPI nodes and edges for {}", gene_node_label);
    for ppi in annot_list.iter() {
        let Some(partner) = required(&ppi.stringdb_link_to) else {
            continue;
        };
        let edge_attrs = attrs([
            (DATASOURCE, Value::from(STRING)),
            ("score", ppi.score.clone().unwrap_or(Value::Null)),
        ]);
        let hash = edge_hash(&edge_attrs);
        if g.add_hashed_edge(gene_node_label, partner, PPI_EDGE_LABEL, edge_attrs.clone(), hash) {
            g.add_hashed_edge(partner, gene_node_label, PPI_EDGE_LABEL, edge_attrs, hash);
        }
    }
}

/// First character upper case, the rest lower case.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Links a gene to the genes and metabolites it interacts with in WikiPathways
/// molecular interaction maps. The interaction type names the edge.
pub fn add_wikipathways_molecular_subgraph(g: &mut StagedGraph, gene_node_label: &str, annot_list: &[MolecularInteractionRecord]) {
    debug!("Adding WikiPathways molecular nodes and edges for {}", gene_node_label);
    for annot in annot_list.iter() {
        for target in [&annot.target_gene, &annot.target_metabolite] {
            let Some(target) = required(target).filter(|t| *t != gene_node_label) else {
                continue;
            };
            let target_node_label = target.replace(TARGET_GENE_PREFIX, "");
            let target_node_label = target_node_label.as_str();
            if target_node_label.is_empty() {
                continue;
            }

            let interaction_type = required(&annot.mim_type).unwrap_or(DEFAULT_INTERACTION_TYPE);
            let mut edge_attrs = attrs([
                (DATASOURCE, Value::from(WIKIPATHWAYS)),
                (INTERACTION_TYPE, Value::from(interaction_type)),
            ]);
            set_present(&mut edge_attrs, "rhea_id", annot.rhea_id.clone());
            set_present(&mut edge_attrs, "pathway_id", annot.pathway_id.clone());

            if !g.contains_node(target_node_label) {
                let mut node_attrs = attrs([
                    (LABEL, Value::from(MOLECULAR_ENTITY_NODE_LABEL)),
                    (ID, Value::from(target_node_label)),
                    (DATASOURCE, Value::from(WIKIPATHWAYS)),
                ]);
                set_present(&mut node_attrs, "pathway_id", annot.pathway_id.clone());
                set_present(&mut node_attrs, "pathway_label", annot.pathway_label.clone());
                g.insert_node(target_node_label, node_attrs);
            }

            g.add_edge_if_novel(gene_node_label, target_node_label, &capitalize(interaction_type), edge_attrs);
        }
    }
}
