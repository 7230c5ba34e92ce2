//! Movie corpus loading
//!
//! Reads title/plot-summary rows from a CSV file and validates them for
//! indexing. Rows are immutable once loaded; `index` is the stable row
//! position within the loaded corpus.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::error::{Result, SearchError};

/// One row of the movie corpus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Stable row position within the loaded corpus
    pub index: usize,
    pub title: String,
    pub summary: String,
}

impl Document {
    pub fn new(index: usize, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            summary: summary.into(),
        }
    }

    /// Text embedded for this document (the role prefix is applied by the
    /// index, not here)
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// Raw CSV row with the upstream column names
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "PlotSummary")]
    summary: String,
}

/// Load the corpus from a CSV file with `Title` and `PlotSummary` columns.
///
/// Row order is preserved. Fails if the file holds no rows or any row has
/// a blank title or summary.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut documents = Vec::new();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        documents.push(Document::new(index, row.title, row.summary));
    }

    validate_documents(&documents)?;

    log::info!(
        "loaded {} documents from {}",
        documents.len(),
        path.display()
    );
    Ok(documents)
}

/// Check the invariants the index relies on: at least one row, and every
/// row carries non-blank title and summary text.
pub(crate) fn validate_documents(documents: &[Document]) -> Result<()> {
    if documents.is_empty() {
        return Err(SearchError::data("corpus is empty"));
    }
    for doc in documents {
        if doc.title.trim().is_empty() {
            return Err(SearchError::data(format!("row {}: empty title", doc.index)));
        }
        if doc.summary.trim().is_empty() {
            return Err(SearchError::data(format!(
                "row {}: empty summary",
                doc.index
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_rows_in_order() {
        let file = write_csv("Title,PlotSummary\nA,dog story\nB,cat story\n");
        let docs = load_corpus(file.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].index, 0);
        assert_eq!(docs[0].title, "A");
        assert_eq!(docs[1].index, 1);
        assert_eq!(docs[1].summary, "cat story");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let file = write_csv("Title,PlotSummary,Year\nA,a plot,1999\n");
        let docs = load_corpus(file.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].summary, "a plot");
    }

    #[test]
    fn rejects_header_only_file() {
        let file = write_csv("Title,PlotSummary\n");
        let err = load_corpus(file.path()).unwrap_err();
        assert!(matches!(err, SearchError::Data(_)));
    }

    #[test]
    fn rejects_blank_summary() {
        let file = write_csv("Title,PlotSummary\nA,  \n");
        let err = load_corpus(file.path()).unwrap_err();
        assert!(matches!(err, SearchError::Data(_)));
    }

    #[test]
    fn missing_column_is_csv_error() {
        let file = write_csv("Title,Genre\nA,Drama\n");
        let err = load_corpus(file.path()).unwrap_err();
        assert!(matches!(err, SearchError::Csv(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_corpus("no-such-corpus.csv").unwrap_err();
        assert!(matches!(err, SearchError::Io(_)));
    }

    #[test]
    fn embedding_text_joins_title_and_summary() {
        let doc = Document::new(0, "Heat", "A heist crew is hunted across the city");
        assert_eq!(
            doc.embedding_text(),
            "Heat A heist crew is hunted across the city"
        );
    }
}
