//! Built-in mock interview transcripts
//!
//! Used when no input directory is configured.

use afg_core::Document;

use crate::{DocumentSource, Result};

const INTERVIEW_1: &str = "Alice is a data scientist. \
She uses the DataRobot platform every day to analyze trends and predict outcomes. \
Alice said the DataRobot platform helps her make better decisions. \
Bob, a project manager, also relies on MLAnalytics system for decisions.";

const INTERVIEW_2: &str = "Carol is a customer of AcmeCorp. \
Carol finds the ChatBot software helpful when she needs quick answers. \
Dave is a developer who designs creative prototypes with the DesignAI tool. \
The DesignAI tool sends its drafts to the ChatBot software automatically.";

/// The two demo interview transcripts
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

impl DocumentSource for DemoSource {
    fn documents(&self) -> Result<Vec<Document>> {
        Ok(vec![
            Document::new("interview_1", INTERVIEW_1),
            Document::new("interview_2", INTERVIEW_2),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_documents() {
        let docs = DemoSource.documents().unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "interview_1");
        assert!(docs[0].text.starts_with("Alice is a data scientist. She uses"));
        assert!(docs[1].text.contains("Carol is a customer of AcmeCorp."));
    }
}
