//! Loading annotation tables and persisting the finished graph.

use crate::attributes::AttrMap;
use crate::error::{GraphError, Result};
use crate::graph::{Edge, KnowledgeGraph, Node};
use crate::table::{Row, Table};
use log::{debug, info, warn};
use polars::prelude::{JsonFormat, JsonWriter, ParquetReader, SerReader, SerWriter};
use serde_json::Value;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Read, Write};
use std::{fs, path};

pub const NODES_TSV: &str = "nodes.tsv";
pub const EDGES_TSV: &str = "edges.tsv";

/// Reads a table, choosing the format from the file extension: `.json`
/// (array of records), `.jsonl`/`.ndjson` (one record per line) or `.parquet`.
pub fn read_table(path: &path::Path) -> Result<Table> {
    let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    debug!("Reading table {:?}", path);
    let table = match extension.as_deref() {
        Some("json") => read_json_table(fs::File::open(path)?)?,
        Some("jsonl") | Some("ndjson") => read_json_lines_table(BufReader::new(fs::File::open(path)?))?,
        Some("parquet") => read_parquet_table(path)?,
        _ => {
            return Err(GraphError::UnsupportedFormat {
                path: path.display().to_string(),
            })
        }
    };
    info!("Read {} rows with {} columns from {:?}", table.len(), table.columns().len(), path);
    Ok(table)
}

/// Table from a JSON array of record objects. Elements that are not objects are skipped.
pub fn read_json_table<R: Read>(reader: R) -> Result<Table> {
    let values: Vec<Value> = serde_json::from_reader(BufReader::new(reader))?;
    Ok(Table::from_rows(values.into_iter().filter_map(into_row).collect()))
}

/// Table from JSON lines. Blank lines are ignored.
pub fn read_json_lines_table<R: BufRead>(reader: R) -> Result<Table> {
    let mut rows = vec![];
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line)?;
        if let Some(row) = into_row(value) {
            rows.push(row);
        }
    }
    Ok(Table::from_rows(rows))
}

/// Parquet through polars. Nested list-of-struct columns come out of the
/// JSON writer as arrays of objects, which is the shape the builders read.
pub fn read_parquet_table(path: &path::Path) -> Result<Table> {
    let mut file = fs::File::open(path)?;
    let mut df = ParquetReader::new(&mut file).finish()?;
    debug!("Parquet shape: {:?}", df.shape());

    let mut buf = Cursor::new(Vec::new());
    JsonWriter::new(&mut buf).with_json_format(JsonFormat::JsonLines).finish(&mut df)?;
    buf.set_position(0);
    read_json_lines_table(buf)
}

fn into_row(value: Value) -> Option<Row> {
    match value {
        Value::Object(map) => Some(map),
        other => {
            warn!("Skipping non-record table entry: {}", other);
            None
        }
    }
}

/// Writes the graph as a pretty printed JSON node/edge document.
pub fn write_graph_json(graph: &KnowledgeGraph, path: &path::Path) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, graph)?;
    writer.flush()?;
    info!("Wrote graph to {:?}", path);
    Ok(())
}

pub fn read_graph_json(path: &path::Path) -> Result<KnowledgeGraph> {
    let reader = BufReader::new(fs::File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Writes `nodes.tsv` and `edges.tsv` into `output_dir`, creating it if needed.
///
/// Attribute maps are written as one-line JSON. Fields holding a tab or a
/// quote are quoted, so labels may contain either.
pub fn write_graph_tsv(graph: &KnowledgeGraph, output_dir: &path::Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut node_writer = tsv_writer(&output_dir.join(NODES_TSV))?;
    node_writer.write_record(["node_id", "attributes"])?;
    for node in graph.nodes.iter() {
        node_writer.write_record([node.label.as_str(), serde_json::to_string(&node.attributes)?.as_str()])?;
    }
    node_writer.flush()?;

    let mut edge_writer = tsv_writer(&output_dir.join(EDGES_TSV))?;
    edge_writer.write_record(["source", "target", "key", "attributes"])?;
    for edge in graph.edges.iter() {
        edge_writer.write_record([
            edge.source.as_str(),
            edge.target.as_str(),
            edge.sequence_key.to_string().as_str(),
            serde_json::to_string(&edge.attributes)?.as_str(),
        ])?;
    }
    edge_writer.flush()?;

    info!("Wrote {} nodes and {} edges to {:?}", graph.node_count(), graph.edge_count(), output_dir);
    Ok(())
}

fn tsv_writer(path: &path::Path) -> Result<csv::Writer<BufWriter<fs::File>>> {
    let writer = BufWriter::new(fs::File::create(path)?);
    Ok(csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer))
}

fn tsv_reader(path: &path::Path) -> Result<csv::Reader<BufReader<fs::File>>> {
    let reader = BufReader::new(fs::File::open(path)?);
    Ok(csv::ReaderBuilder::new().has_headers(true).delimiter(b'\t').from_reader(reader))
}

/// Reads back a graph written by [`write_graph_tsv`].
pub fn read_graph_tsv(input_dir: &path::Path) -> Result<KnowledgeGraph> {
    let mut nodes = vec![];
    for result in tsv_reader(&input_dir.join(NODES_TSV))?.records() {
        let record = result?;
        let attributes: AttrMap = serde_json::from_str(record.get(1).unwrap_or("{}"))?;
        nodes.push(Node {
            label: record.get(0).unwrap_or_default().to_string(),
            attributes,
        });
    }

    let mut edges = vec![];
    for result in tsv_reader(&input_dir.join(EDGES_TSV))?.records() {
        let record = result?;
        let attributes: AttrMap = serde_json::from_str(record.get(3).unwrap_or("{}"))?;
        edges.push(Edge {
            source: record.get(0).unwrap_or_default().to_string(),
            target: record.get(1).unwrap_or_default().to_string(),
            sequence_key: record.get(2).and_then(|k| k.parse().ok()).unwrap_or_default(),
            attributes,
        });
    }

    Ok(KnowledgeGraph { nodes, edges })
}
