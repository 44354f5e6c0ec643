extern crate env_logger;
extern crate log;

pub mod attributes;
pub mod builders;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod graph;
pub mod io;
pub mod orchestrator;
pub mod records;
pub mod session;
pub mod table;

pub use config::BuildConfig;
pub use error::{GraphError, Result};
pub use graph::{KnowledgeGraph, StagedGraph};
pub use orchestrator::{build_graph, build_graph_with_state, GraphInputs};
pub use session::RunState;
pub use table::Table;
