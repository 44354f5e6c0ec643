use biodatafuse_graph::io::{read_table, write_graph_json, write_graph_tsv};
use biodatafuse_graph::{build_graph, BuildConfig, GraphInputs};
use clap::Parser;
use humantime::format_duration;
use log::{debug, info};
use std::time::Instant;
use std::{error, fs, path};

#[derive(Parser, PartialEq, Debug)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// YAML run configuration; flags given on the command line take precedence
    #[arg(short = 'c', long)]
    config: Option<path::PathBuf>,

    #[arg(short = 'i', long)]
    combined: Option<path::PathBuf>,

    #[arg(short = 'd', long)]
    disease_compound: Option<path::PathBuf>,

    #[arg(short = 'p', long)]
    pathway_compound: Option<path::PathBuf>,

    #[arg(long = "homolog")]
    homologs: Vec<path::PathBuf>,

    #[arg(short = 'o', long)]
    output_dir: Option<path::PathBuf>,

    #[arg(short = 'n', long)]
    graph_name: Option<String>,
}

impl Options {
    fn into_config(self) -> Result<BuildConfig, Box<dyn error::Error>> {
        let mut config = match (&self.config, &self.combined) {
            (Some(config_path), _) => BuildConfig::load(config_path)?,
            (None, Some(combined)) => BuildConfig::new(combined.clone()),
            (None, None) => return Err("either --config or --combined is required".into()),
        };
        if let Some(combined) = self.combined {
            config.combined = combined;
        }
        if self.disease_compound.is_some() {
            config.disease_compound = self.disease_compound;
        }
        if self.pathway_compound.is_some() {
            config.pathway_compound = self.pathway_compound;
        }
        if !self.homologs.is_empty() {
            config.homologs = self.homologs;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(graph_name) = self.graph_name {
            config.graph_name = graph_name;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn error::Error>> {
    let start = Instant::now();
    env_logger::init();

    let options = Options::parse();
    debug!("{:?}", options);

    let config = options.into_config()?;
    info!("{:?}", config);

    let mut inputs = GraphInputs::new(read_table(&config.combined)?);
    if let Some(disease_compound) = &config.disease_compound {
        inputs.disease_compound = Some(read_table(disease_compound)?);
    }
    if let Some(pathway_compound) = &config.pathway_compound {
        inputs.pathway_compound = Some(read_table(pathway_compound)?);
    }
    for homolog in config.homologs.iter() {
        inputs.homologs.push(read_table(homolog)?);
    }

    let graph = build_graph(&inputs)?;
    info!("Graph has {} nodes and {} edges", graph.node_count(), graph.edge_count());

    let graph_dir = config.graph_dir();
    fs::create_dir_all(&graph_dir)?;
    write_graph_json(&graph, &config.graph_json_path())?;
    write_graph_tsv(&graph, &graph_dir)?;

    info!("Duration: {}", format_duration(start.elapsed()).to_string());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flags_without_config() {
        let options = Options::parse_from(["build-graph", "-i", "combined.parquet", "--homolog", "a.parquet", "--homolog", "b.parquet", "-n", "aagab"]);
        let config = options.into_config().unwrap();
        assert_eq!(config.combined, path::PathBuf::from("combined.parquet"));
        assert_eq!(config.homologs.len(), 2);
        assert_eq!(config.graph_name, "aagab");
        assert_eq!(config.output_dir, path::PathBuf::from("."));
    }

    #[test]
    fn config_or_combined_required() {
        let options = Options::parse_from(["build-graph", "-o", "out"]);
        assert!(options.into_config().is_err());
    }
}
