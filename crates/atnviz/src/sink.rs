//! Output destinations for rendered documents.

use crate::document::Document;
use crate::{Error, Result};
use indexmap::IndexMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write as _};
use std::path::{Path, PathBuf};

pub trait DocumentSink {
    /// Writes one document completely before returning.
    fn write_document(&mut self, doc: &Document) -> io::Result<()>;
}

/// Writes each document to `<root>/<name>`, creating `root` on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSink for DirectorySink {
    fn write_document(&mut self, doc: &Document) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let mut w = BufWriter::new(File::create(self.root.join(&doc.name))?);
        w.write_all(doc.content.as_bytes())?;
        w.flush()
    }
}

/// Keeps documents in memory, keyed by name in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub documents: IndexMap<String, String>,
}

impl MemorySink {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }
}

impl DocumentSink for MemorySink {
    fn write_document(&mut self, doc: &Document) -> io::Result<()> {
        self.documents.insert(doc.name.clone(), doc.content.clone());
        Ok(())
    }
}

#[derive(Debug)]
pub struct DocumentFailure {
    pub name: String,
    pub error: io::Error,
}

impl DocumentFailure {
    pub(crate) fn names(failures: &[DocumentFailure]) -> String {
        failures
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.error)
    }
}

#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<String>,
    pub failures: Vec<DocumentFailure>,
}

impl WriteReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    pub fn into_result(self) -> Result<Vec<String>> {
        if self.failures.is_empty() {
            return Ok(self.written);
        }
        Err(Error::WriteFailures {
            attempted: self.attempted(),
            failures: self.failures,
        })
    }
}

/// Writes every document, recording failures instead of stopping at the first one.
pub fn write_documents<S: DocumentSink + ?Sized>(docs: &[Document], sink: &mut S) -> WriteReport {
    let mut report = WriteReport::default();
    for doc in docs {
        match sink.write_document(doc) {
            Ok(()) => report.written.push(doc.name.clone()),
            Err(error) => {
                tracing::warn!(name = %doc.name, %error, "failed to write document");
                report.failures.push(DocumentFailure {
                    name: doc.name.clone(),
                    error,
                });
            }
        }
    }
    tracing::info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "wrote documents"
    );
    report
}
