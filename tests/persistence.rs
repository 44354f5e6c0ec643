use biodatafuse_graph::io::{read_graph_json, read_graph_tsv, read_table, write_graph_json, write_graph_tsv, EDGES_TSV, NODES_TSV};
use biodatafuse_graph::{build_graph, GraphInputs, KnowledgeGraph};
use serde_json::json;
use std::fs;
use std::io::Write;

fn sample_graph(dir: &std::path::Path) -> KnowledgeGraph {
    let rows = [
        json!({
            "identifier": "TP53",
            "identifier.source": "HGNC",
            "target": "ENSG00000141510",
            "target.source": "Ensembl",
            "Bgee": [{"anatomical_entity_id": "UBERON:0000955", "anatomical_entity_name": "brain", "expression_level": 98.2}],
            "StringDB_ppi": [{"stringdb_link_to": "MDM2", "score": 0.999}]
        }),
        json!({
            "identifier": "MDM2",
            "identifier.source": "HGNC",
            "target": "ENSG00000135679",
            "target.source": "Ensembl",
            "OpenTargets_go": [{"go_id": "GO:0016567", "go_name": "protein ubiquitination", "go_type": "P"}]
        }),
    ];
    let path = dir.join("combined.jsonl");
    let mut file = fs::File::create(&path).unwrap();
    for row in rows.iter() {
        writeln!(file, "{}", row).unwrap();
    }
    drop(file);

    let table = read_table(&path).unwrap();
    assert_eq!(table.len(), 2);
    build_graph(&GraphInputs::new(table)).unwrap()
}

#[test]
fn json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let kg = sample_graph(dir.path());
    let path = dir.path().join("combined_graph.json");
    write_graph_json(&kg, &path).unwrap();
    assert_eq!(read_graph_json(&path).unwrap(), kg);
}

#[test]
fn tsv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let kg = sample_graph(dir.path());
    let out = dir.path().join("tsv");
    write_graph_tsv(&kg, &out).unwrap();

    let nodes = fs::read_to_string(out.join(NODES_TSV)).unwrap();
    assert_eq!(nodes.lines().count(), kg.node_count() + 1);
    let edges = fs::read_to_string(out.join(EDGES_TSV)).unwrap();
    assert!(edges.starts_with("source\ttarget\tkey\tattributes"));

    assert_eq!(read_graph_tsv(&out).unwrap(), kg);
}

#[test]
fn json_array_tables_load_like_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("combined.json");
    fs::write(
        &path,
        json!([{"identifier": "TP53", "target": "ENSG00000141510", "target.source": "Ensembl"}]).to_string(),
    )
    .unwrap();
    let kg = build_graph(&GraphInputs::new(read_table(&path).unwrap())).unwrap();
    assert_eq!(kg.node_count(), 1);
}
