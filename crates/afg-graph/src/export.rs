//! CSV export for Gephi
//!
//! `nodes.csv`: `Id,Label,Type,Role`
//! `edges.csv`: `Source,Target,Type,Affordance,Sentiment`
//!
//! Both tables are rendered in memory first; files are only written once
//! rendering succeeded. Headers are always present, even for an empty graph.

use std::io::Write;
use std::path::{Path, PathBuf};

use afg_core::{AfgError, OutputConfig, Result};
use serde::Serialize;

use crate::AffordanceGraph;

pub const NODE_HEADERS: [&str; 4] = ["Id", "Label", "Type", "Role"];
pub const EDGE_HEADERS: [&str; 5] = ["Source", "Target", "Type", "Affordance", "Sentiment"];

/// Edge type understood by Gephi
const EDGE_TYPE: &str = "Undirected";

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Decimal rendering of a sentiment value; whole numbers keep one decimal
pub fn format_sentiment(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Write the node table
pub fn write_nodes<W: Write>(graph: &AffordanceGraph, writer: W) -> csv::Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(NODE_HEADERS)?;

    for node in graph.nodes() {
        let role = node.role.map(|r| r.as_str()).unwrap_or("");
        wtr.write_record([
            node.id.as_str(),
            node.label.as_str(),
            node.entity_type.as_str(),
            role,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the edge table
pub fn write_edges<W: Write>(graph: &AffordanceGraph, writer: W) -> csv::Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(EDGE_HEADERS)?;

    for view in graph.edges() {
        let sentiment = format_sentiment(view.edge.sentiment);
        wtr.write_record([
            view.source,
            view.target,
            EDGE_TYPE,
            view.edge.affordance.as_str(),
            sentiment.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Paths and row counts of a finished export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
    pub node_rows: usize,
    pub edge_rows: usize,
}

/// Writes the node and edge tables to disk
#[derive(Debug, Clone)]
pub struct CsvExporter {
    nodes_path: PathBuf,
    edges_path: PathBuf,
}

impl CsvExporter {
    pub fn new(nodes_path: impl Into<PathBuf>, edges_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            edges_path: edges_path.into(),
        }
    }

    /// Exporter writing to the configured output directory
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.nodes_path(), config.edges_path())
    }

    /// Render both tables, then write them
    pub fn export(&self, graph: &AffordanceGraph) -> Result<ExportSummary> {
        let mut nodes = Vec::new();
        write_nodes(graph, &mut nodes).map_err(|e| export_error(&self.nodes_path, e))?;
        let mut edges = Vec::new();
        write_edges(graph, &mut edges).map_err(|e| export_error(&self.edges_path, e))?;

        write_file(&self.nodes_path, &nodes)?;
        write_file(&self.edges_path, &edges)?;

        tracing::info!(
            "Exported {} nodes to {} and {} edges to {}",
            graph.node_count(),
            self.nodes_path.display(),
            graph.edge_count(),
            self.edges_path.display()
        );

        Ok(ExportSummary {
            nodes_path: self.nodes_path.clone(),
            edges_path: self.edges_path.clone(),
            node_rows: graph.node_count(),
            edge_rows: graph.edge_count(),
        })
    }
}

fn export_error(path: &Path, err: csv::Error) -> AfgError {
    AfgError::Export {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AfgError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, contents).map_err(|e| AfgError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

// ============================================================================
// Tests
// ============================================================================
