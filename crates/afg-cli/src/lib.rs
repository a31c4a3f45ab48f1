//! AFG pipeline orchestration
//!
//! Runs the stages in order over a document collection:
//! 1. Entity extraction over every document into one registry
//! 2. Interaction detection against the completed registry
//! 3. Graph building with unordered-pair deduplication
//!
//! Export is left to the caller so the graph can be inspected first.
//!
//! Author: hephaex@gmail.com

use afg_core::{AppConfig, Document, EntityRegistry, InputConfig, Interaction, Result};
use afg_extractor::{
    EntityExtractor, ExtractionStats, InteractionDetector, LexiconSentiment,
    NamedEntityRecognizer, RuleBasedNer, SentimentScorer,
};
use afg_graph::builder::build_graph;
use afg_graph::{AffordanceGraph, BuildReport, CsvExporter, ExportSummary};
use afg_parser::{DemoSource, DirectorySource, DocumentSource};
use serde::Serialize;

/// Everything produced by one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub documents: usize,
    pub registry: EntityRegistry,
    pub interactions: Vec<Interaction>,
    pub graph: AffordanceGraph,
    pub extraction: ExtractionStats,
    pub build: BuildReport,
}

/// Short numeric summary of a run, suitable for logging or JSON output
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub documents: usize,
    pub entities: usize,
    pub interactions: usize,
    pub nodes: usize,
    pub edges: usize,
    pub duplicates_dropped: usize,
}

impl PipelineOutput {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            documents: self.documents,
            entities: self.registry.len(),
            interactions: self.interactions.len(),
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            duplicates_dropped: self.build.duplicates_dropped,
        }
    }
}

/// Extraction and detection stages wired to their collaborators
pub struct Pipeline {
    extractor: EntityExtractor,
    detector: InteractionDetector,
}

impl Pipeline {
    pub fn new(ner: Box<dyn NamedEntityRecognizer>, sentiment: Box<dyn SentimentScorer>) -> Self {
        Self {
            extractor: EntityExtractor::new(ner),
            detector: InteractionDetector::new(sentiment),
        }
    }

    /// Rule-based recognizer (with configured extra names) and the default lexicon
    pub fn from_config(config: &AppConfig) -> Self {
        let ner = RuleBasedNer::new().with_names(&config.extraction.person_names);
        Self::new(Box::new(ner), Box::new(LexiconSentiment::default()))
    }

    /// Build the entity registry of all documents
    pub fn extract(&self, documents: &[Document]) -> Result<(EntityRegistry, ExtractionStats)> {
        let mut registry = EntityRegistry::new();
        let mut stats = ExtractionStats::default();

        for document in documents {
            let doc_stats = self.extractor.extract_document(&document.text, &mut registry)?;
            tracing::debug!(
                "Document {}: +{} people, +{} technologies, {} roles",
                document.id,
                doc_stats.people_added,
                doc_stats.technologies_added,
                doc_stats.roles_assigned
            );
            stats.merge(doc_stats);
        }

        tracing::info!(
            "Extracted {} entities from {} documents",
            registry.len(),
            documents.len()
        );
        Ok((registry, stats))
    }

    /// Run extraction, detection and graph building
    pub fn run(&self, documents: &[Document]) -> Result<PipelineOutput> {
        let (registry, extraction) = self.extract(documents)?;

        let interactions = self.detector.detect_all(documents, &registry);
        tracing::info!("Detected {} interactions", interactions.len());

        let (graph, build) = build_graph(&registry, &interactions);
        tracing::info!(
            "Built graph with {} nodes and {} edges ({} duplicate interactions dropped)",
            graph.node_count(),
            graph.edge_count(),
            build.duplicates_dropped
        );

        Ok(PipelineOutput {
            documents: documents.len(),
            registry,
            interactions,
            graph,
            extraction,
            build,
        })
    }
}

/// Document source for the input configuration: the configured directory,
/// or the built-in demo transcripts
pub fn document_source(config: &InputConfig) -> Box<dyn DocumentSource> {
    match &config.directory {
        Some(dir) => {
            Box::new(DirectorySource::new(dir.clone()).with_extensions(config.extensions.clone()))
        }
        None => {
            tracing::info!("No input directory configured, using demo transcripts");
            Box::new(DemoSource)
        }
    }
}

/// Load the documents of the input configuration
pub fn load_documents(config: &InputConfig) -> Result<Vec<Document>> {
    let documents = document_source(config).documents()?;
    tracing::info!("Loaded {} documents", documents.len());
    Ok(documents)
}

/// Load, process and export according to the configuration
pub fn run_and_export(config: &AppConfig) -> Result<(PipelineOutput, ExportSummary)> {
    let documents = load_documents(&config.input)?;
    let output = Pipeline::from_config(config).run(&documents)?;
    let summary = CsvExporter::from_config(&config.output).export(&output.graph)?;
    Ok((output, summary))
}

// ============================================================================
// Tests
// ============================================================================
