//! AFG Graph - Affordance graph construction and export
//!
//! Holds one node per registry entity and one undirected edge per entity
//! pair that interacted, backed by `petgraph`. The graph is exported as
//! Gephi-compatible node and edge CSV tables.

use std::collections::{BTreeMap, HashMap};

use afg_core::{Affordance, Entity, EntityType, Role};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;

pub mod builder;
pub mod export;

pub use builder::{BuildReport, GraphBuilder};
pub use export::{CsvExporter, ExportSummary};

// ============================================================================
// Graph Types
// ============================================================================

/// Node of the affordance graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub entity_type: EntityType,
    pub role: Option<Role>,
}

impl From<&Entity> for GraphNode {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.name.clone(),
            label: entity.name.clone(),
            entity_type: entity.entity_type,
            role: entity.role,
        }
    }
}

/// Attributes of an edge, taken from the first interaction of the pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphEdge {
    pub affordance: Affordance,
    pub sentiment: f64,
}

/// Borrowed view of an edge with its endpoint ids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub edge: &'a GraphEdge,
}

/// Outcome of an edge insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeInsert {
    Added,
    /// The unordered pair already has an edge
    Duplicate,
    SelfLoop,
    /// An endpoint is not a node of the graph
    UnknownEntity,
}

/// Undirected graph of entities and their interactions
#[derive(Debug, Clone, Default)]
pub struct AffordanceGraph {
    graph: UnGraph<GraphNode, GraphEdge>,
    node_index: HashMap<String, NodeIndex>,
}

impl AffordanceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node for an entity; an existing node with the same id is kept
    pub fn add_node(&mut self, entity: &Entity) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&entity.name) {
            return idx;
        }

        let idx = self.graph.add_node(GraphNode::from(entity));
        self.node_index.insert(entity.name.clone(), idx);
        idx
    }

    /// Add an edge between two nodes unless the unordered pair is already linked
    pub fn add_edge(&mut self, a: &str, b: &str, edge: GraphEdge) -> EdgeInsert {
        if a == b {
            return EdgeInsert::SelfLoop;
        }
        let (Some(&ia), Some(&ib)) = (self.node_index.get(a), self.node_index.get(b)) else {
            return EdgeInsert::UnknownEntity;
        };
        if self.graph.find_edge(ia, ib).is_some() {
            return EdgeInsert::Duplicate;
        }

        self.graph.add_edge(ia, ib, edge);
        EdgeInsert::Added
    }

    /// Node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Edge between two ids, in either direction
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&GraphEdge> {
        let ia = *self.node_index.get(a)?;
        let ib = *self.node_index.get(b)?;
        self.graph.find_edge(ia, ib).map(|e| &self.graph[e])
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(move |e| EdgeView {
            source: self.graph[e.source()].id.as_str(),
            target: self.graph[e.target()].id.as_str(),
            edge: e.weight(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Summary counts by entity type and affordance
    pub fn stats(&self) -> GraphStats {
        let mut edges_by_affordance: BTreeMap<Affordance, usize> =
            Affordance::ALL.iter().map(|a| (*a, 0)).collect();
        for view in self.edges() {
            *edges_by_affordance.entry(view.edge.affordance).or_insert(0) += 1;
        }

        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            people: self
                .nodes()
                .filter(|n| n.entity_type == EntityType::Person)
                .count(),
            technologies: self
                .nodes()
                .filter(|n| n.entity_type == EntityType::Technology)
                .count(),
            edges_by_affordance,
        }
    }
}

/// Graph statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub people: usize,
    pub technologies: usize,
    pub edges_by_affordance: BTreeMap<Affordance, usize>,
}

// ============================================================================
// Tests
// ============================================================================
