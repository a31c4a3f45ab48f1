//! Graph Builder
//!
//! Converts the entity registry and the raw interaction list into an
//! [`AffordanceGraph`]: every entity becomes a node, every unordered pair
//! becomes at most one edge carrying its first interaction's attributes.

use afg_core::{EntityRegistry, Interaction};

use crate::{AffordanceGraph, EdgeInsert, GraphEdge};

/// Counts collected while building a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Nodes added
    pub nodes: usize,
    /// Edges added
    pub edges: usize,
    /// Interactions dropped because their pair already had an edge
    pub duplicates_dropped: usize,
    /// Interactions dropped because an endpoint is unknown or both are equal
    pub rejected: usize,
}

impl BuildReport {
    /// Interactions seen
    pub fn interactions(&self) -> usize {
        self.edges + self.duplicates_dropped + self.rejected
    }
}

/// Incremental graph builder
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: AffordanceGraph,
    report: BuildReport,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one node per registry entity, in registry order
    pub fn add_entities(&mut self, registry: &EntityRegistry) -> &mut Self {
        for entity in registry {
            let before = self.graph.node_count();
            self.graph.add_node(entity);
            if self.graph.node_count() > before {
                self.report.nodes += 1;
            }
        }
        self
    }

    /// Add interactions in order; only the first per unordered pair survives
    pub fn add_interactions(&mut self, interactions: &[Interaction]) -> &mut Self {
        for interaction in interactions {
            let edge = GraphEdge {
                affordance: interaction.affordance,
                sentiment: interaction.sentiment,
            };

            match self
                .graph
                .add_edge(&interaction.entity_a, &interaction.entity_b, edge)
            {
                EdgeInsert::Added => self.report.edges += 1,
                EdgeInsert::Duplicate => self.report.duplicates_dropped += 1,
                EdgeInsert::SelfLoop | EdgeInsert::UnknownEntity => {
                    tracing::warn!(
                        "Dropping interaction {} - {}: not a valid pair of graph nodes",
                        interaction.entity_a,
                        interaction.entity_b
                    );
                    self.report.rejected += 1;
                }
            }
        }
        self
    }

    /// Finish building
    pub fn build(self) -> (AffordanceGraph, BuildReport) {
        (self.graph, self.report)
    }
}

/// Build a graph from a completed registry and its interactions
pub fn build_graph(
    registry: &EntityRegistry,
    interactions: &[Interaction],
) -> (AffordanceGraph, BuildReport) {
    let mut builder = GraphBuilder::new();
    builder.add_entities(registry).add_interactions(interactions);
    builder.build()
}

// ============================================================================
// Tests
// ============================================================================
