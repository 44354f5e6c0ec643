//! Errors produced while loading tables, building the graph and writing it out.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// The dominant `target.source` of the input is neither Ensembl nor PubChem Compound.
    #[error("unsupported target type: '{namespace}'")]
    UnsupportedNamespace { namespace: String },

    /// A GO annotation carried a subtype discriminator other than P, F or C.
    #[error("invalid GO type '{go_type}' for term '{go_id}'")]
    InvalidGoType { go_id: String, go_type: String },

    #[error("unsupported input format: {path}")]
    UnsupportedFormat { path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yml::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, GraphError>;
