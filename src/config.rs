//! YAML run configuration for the `build-graph` binary.

use crate::error::Result;
use log::debug;
use serde_derive::{Deserialize, Serialize};
use std::{fs, path};

pub const DEFAULT_GRAPH_NAME: &str = "combined";

fn default_graph_name() -> String {
    DEFAULT_GRAPH_NAME.to_string()
}

fn default_output_dir() -> path::PathBuf {
    path::PathBuf::from(".")
}

/// Input tables and output location of one construction run.
///
/// ```yaml
/// combined: data/combined_df.parquet
/// disease_compound: data/opentargets_disease_compound.parquet
/// homologs:
///   - data/bgee_homologs.parquet
/// output_dir: out
/// graph_name: aagab
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub combined: path::PathBuf,
    #[serde(default)]
    pub disease_compound: Option<path::PathBuf>,
    #[serde(default)]
    pub pathway_compound: Option<path::PathBuf>,
    #[serde(default)]
    pub homologs: Vec<path::PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: path::PathBuf,
    #[serde(default = "default_graph_name")]
    pub graph_name: String,
}

impl BuildConfig {
    pub fn new(combined: path::PathBuf) -> Self {
        BuildConfig {
            combined,
            disease_compound: None,
            pathway_compound: None,
            homologs: vec![],
            output_dir: default_output_dir(),
            graph_name: default_graph_name(),
        }
    }

    pub fn load(path: &path::Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: BuildConfig = serde_yml::from_str(contents)?;
        debug!("{:?}", config);
        Ok(config)
    }

    /// Directory the outputs of this run are written to: `<output_dir>/<graph_name>`.
    pub fn graph_dir(&self) -> path::PathBuf {
        self.output_dir.join(&self.graph_name)
    }

    pub fn graph_json_path(&self) -> path::PathBuf {
        self.graph_dir().join(format!("{}_graph.json", self.graph_name))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config = BuildConfig::from_yaml("combined: data/combined_df.jsonl\n").unwrap();
        assert_eq!(config, BuildConfig::new(path::PathBuf::from("data/combined_df.jsonl")));
        assert_eq!(config.graph_json_path(), path::PathBuf::from("./combined/combined_graph.json"));
    }

    #[test]
    fn full_config() {
        let yaml = "combined: combined.parquet\n\
                    disease_compound: dc.parquet\n\
                    homologs:\n  - bgee_homologs.parquet\n  - wp_homologs.parquet\n\
                    output_dir: out\n\
                    graph_name: aagab\n";
        let config = BuildConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.disease_compound, Some(path::PathBuf::from("dc.parquet")));
        assert_eq!(config.pathway_compound, None);
        assert_eq!(config.homologs.len(), 2);
        assert_eq!(config.graph_dir(), path::PathBuf::from("out/aagab"));
    }

    #[test]
    fn missing_combined_is_an_error() {
        assert!(BuildConfig::from_yaml("graph_name: x\n").is_err());
    }
}
