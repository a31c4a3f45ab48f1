//! AFG Parser - Document sources for the extraction pipeline
//!
//! Supplies `(document id, text)` pairs to the pipeline from:
//! - The built-in demo interview transcripts
//! - A directory of plain text / Markdown transcripts
//!
//! Binary formats (PDF, DOCX, XLSX) are detected so they can be reported,
//! but are not parsed.

use std::path::{Path, PathBuf};

use afg_core::Document;
use thiserror::Error;

pub mod demo;

pub use demo::DemoSource;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while reading documents
#[derive(Error, Debug)]
pub enum ParserError {
    /// File format is not supported
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Input directory does not exist or is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Encoding error
    #[error("Text encoding error: {0}")]
    EncodingError(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

impl From<ParserError> for afg_core::AfgError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::IoError { path, source } => afg_core::AfgError::Io {
                path: PathBuf::from(path),
                source,
            },
            other => afg_core::AfgError::Source(other.to_string()),
        }
    }
}

// ============================================================================
// File Types
// ============================================================================

/// Supported file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Xlsx,
    Markdown,
    PlainText,
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "xlsx" | "xls" => Self::Xlsx,
            "md" | "markdown" => Self::Markdown,
            "txt" => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Whether the file holds text that can be read directly
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Markdown | Self::PlainText)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
            Self::Xlsx => write!(f, "xlsx"),
            Self::Markdown => write!(f, "markdown"),
            Self::PlainText => write!(f, "text"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ============================================================================
// Parser Trait
// ============================================================================

/// Trait for document parsers
pub trait DocumentParser: Send + Sync {
    /// Parse a document from a file path
    fn parse(&self, path: &Path) -> Result<Document>;

    /// Get supported file types
    fn supported_types(&self) -> &[FileType];

    /// Check if this parser can handle a file type
    fn can_parse(&self, file_type: FileType) -> bool {
        self.supported_types().contains(&file_type)
    }
}

/// Plain text and Markdown parser
pub struct PlainTextParser;

impl DocumentParser for PlainTextParser {
    fn parse(&self, path: &Path) -> Result<Document> {
        let bytes = std::fs::read(path).map_err(|e| ParserError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        let text = String::from_utf8(bytes)
            .map_err(|e| ParserError::EncodingError(format!("{}: {e}", path.display())))?;

        Ok(Document::new(document_id(path), text))
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::PlainText, FileType::Markdown]
    }
}

/// Document identifier for a file: its file name
fn document_id(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Parser Registry
// ============================================================================

/// Registry of available parsers
pub struct ParserRegistry {
    parsers: Vec<Box<dyn DocumentParser>>,
}

impl ParserRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registry with every built-in parser
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PlainTextParser);
        registry
    }

    /// Register a parser
    pub fn register<P: DocumentParser + 'static>(&mut self, parser: P) {
        self.parsers.push(Box::new(parser));
    }

    /// Find a parser for a file type
    pub fn find_parser(&self, file_type: FileType) -> Option<&dyn DocumentParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(file_type))
            .map(|p| p.as_ref())
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Document> {
        let file_type = FileType::from_path(path);

        let parser = self.find_parser(file_type).ok_or_else(|| {
            ParserError::UnsupportedFormat(
                path.extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("none")
                    .to_string(),
            )
        })?;

        parser.parse(path)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// Document Sources
// ============================================================================

/// Supplies the documents of one pipeline run, in processing order
pub trait DocumentSource {
    fn documents(&self) -> Result<Vec<Document>>;
}

/// Fixed in-memory documents
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: Vec<Document>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document (builder style)
    pub fn with_document(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.push(Document::new(id, text));
        self
    }
}

impl DocumentSource for InMemorySource {
    fn documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}

/// All readable transcripts of a directory (non-recursive), in file name order
pub struct DirectorySource {
    root: PathBuf,
    extensions: Vec<String>,
    registry: ParserRegistry,
}

impl DirectorySource {
    /// Create a source accepting `.txt` and `.md` files
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["txt".to_string(), "md".to_string()],
            registry: ParserRegistry::with_defaults(),
        }
    }

    /// Restrict the accepted extensions
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

impl DocumentSource for DirectorySource {
    fn documents(&self) -> Result<Vec<Document>> {
        if !self.root.is_dir() {
            return Err(ParserError::NotADirectory(self.root.display().to_string()));
        }

        let entries = std::fs::read_dir(&self.root).map_err(|e| ParserError::IoError {
            path: self.root.display().to_string(),
            source: e,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ParserError::IoError {
                path: self.root.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::new();
        for path in paths {
            let file_type = FileType::from_path(&path);
            if !file_type.is_text() {
                if file_type != FileType::Unknown {
                    tracing::warn!(
                        "Skipping {} ({} parsing is not supported)",
                        path.display(),
                        file_type
                    );
                }
                continue;
            }
            if !self.accepts(&path) {
                tracing::debug!("Skipping {} (extension not accepted)", path.display());
                continue;
            }

            documents.push(self.registry.parse(&path)?);
        }

        tracing::debug!(
            "Loaded {} documents from {}",
            documents.len(),
            self.root.display()
        );
        Ok(documents)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Docx);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("TXT"), FileType::PlainText);
        assert_eq!(FileType::from_extension("unknown"), FileType::Unknown);
        assert!(FileType::PlainText.is_text());
        assert!(!FileType::Docx.is_text());
    }

    #[test]
    fn test_in_memory_source_keeps_order() {
        let source = InMemorySource::new()
            .with_document("b", "second")
            .with_document("a", "first");

        let docs = source.documents().unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_directory_source_reads_text_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "Bob is a manager.").unwrap();
        std::fs::write(dir.path().join("a.md"), "Alice is a developer.").unwrap();
        std::fs::write(dir.path().join("c.pdf"), [0u8, 1, 2]).unwrap();
        std::fs::write(dir.path().join("notes.json"), "{}").unwrap();

        let docs = DirectorySource::new(dir.path()).documents().unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a.md");
        assert_eq!(docs[0].text, "Alice is a developer.");
        assert_eq!(docs[1].id, "b.txt");
    }

    #[test]
    fn test_directory_source_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "x").unwrap();
        std::fs::write(dir.path().join("b.txt"), "y").unwrap();

        let docs = DirectorySource::new(dir.path())
            .with_extensions(vec!["TXT".to_string()])
            .documents()
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "b.txt");
    }

    #[test]
    fn test_directory_source_missing_dir() {
        let err = DirectorySource::new("/no/such/afg/dir")
            .documents()
            .unwrap_err();
        assert!(matches!(err, ParserError::NotADirectory(_)));
    }

    #[test]
    fn test_registry_rejects_binary_formats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        std::fs::write(&path, [0u8; 4]).unwrap();

        let err = ParserRegistry::with_defaults().parse(&path).unwrap_err();
        assert!(matches!(err, ParserError::UnsupportedFormat(ext) if ext == "docx"));
    }

    #[test]
    fn test_plain_text_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0xffu8, 0xfe, 0xfd]).unwrap();

        let err = PlainTextParser.parse(&path).unwrap_err();
        assert!(matches!(err, ParserError::EncodingError(_)));
    }
}
