//! @ai:module:intent Keep the latest findings per document for an in-process host
//! @ai:module:layer application
//! @ai:module:public_api DiagnosticCollection
//! @ai:module:depends_on scanner, error
//! @ai:module:stateless false

use crate::error::Result;
use crate::scanner::{Finding, ScanResult, Scanner, SOURCE_TAG};
use std::collections::BTreeMap;

/// @ai:intent Map from document identifier to its most recent scan result
#[derive(Debug, Clone)]
pub struct DiagnosticCollection {
    name: String,
    scanner: Scanner,
    documents: BTreeMap<String, ScanResult>,
}

impl Default for DiagnosticCollection {
    fn default() -> Self {
        Self::new(SOURCE_TAG, Scanner::default())
    }
}

impl DiagnosticCollection {
    pub fn new(name: impl Into<String>, scanner: Scanner) -> Self {
        Self {
            name: name.into(),
            scanner,
            documents: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// @ai:intent Rescan a document and replace whatever was stored for it
    /// @ai:post get(id) returns exactly the new findings
    /// @ai:effects state:write
    pub fn check_document(&mut self, id: &str, text: &str) -> &[Finding] {
        let findings = self.scanner.scan(text);
        tracing::debug!("{}: {} findings in {}", self.name, findings.len(), id);
        self.set(id, findings)
    }

    /// @ai:intent Rescan raw document bytes, isolating a failure to this document
    /// @ai:post on error the document's previous findings are removed and others are untouched
    /// @ai:effects state:write
    pub fn check_document_bytes(&mut self, id: &str, bytes: &[u8]) -> Result<&[Finding]> {
        match self.scanner.scan_bytes(bytes) {
            Ok(findings) => Ok(self.set(id, findings)),
            Err(e) => {
                tracing::warn!("{}: dropping findings for {}: {}", self.name, id, e);
                self.documents.remove(id);
                Err(e)
            }
        }
    }

    /// @ai:intent Store findings for a document, replacing earlier ones
    /// @ai:effects state:write
    pub fn set(&mut self, id: &str, findings: ScanResult) -> &[Finding] {
        let slot = self.documents.entry(id.to_string()).or_default();
        *slot = findings;
        slot
    }

    pub fn get(&self, id: &str) -> Option<&[Finding]> {
        self.documents.get(id).map(Vec::as_slice)
    }

    /// @ai:intent Forget a document, returning its last findings
    pub fn delete(&mut self, id: &str) -> Option<ScanResult> {
        self.documents.remove(id)
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    /// @ai:intent Documents in identifier order with their findings
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Finding])> {
        self.documents
            .iter()
            .map(|(id, findings)| (id.as_str(), findings.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
