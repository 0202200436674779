//! Source descriptors - what the pipeline is asked to analyze.

use std::fmt;

use crate::error::{PricingError, Result};

/// A pricing source submitted for analysis.
///
/// Either a URL to fetch or an uploaded file. File descriptors carry the
/// size the caller declared for the upload so the ceiling can be enforced
/// before any byte is parsed.
#[derive(Debug, Clone)]
pub enum SourceDescriptor {
    /// A pricing page to fetch over HTTP.
    Url { url: String },

    /// An uploaded document.
    File {
        filename: String,
        bytes: Vec<u8>,
        declared_size: u64,
    },
}

impl SourceDescriptor {
    /// Create a URL descriptor.
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url { url: url.into() }
    }

    /// Create a file descriptor, declaring the actual byte length.
    pub fn file(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let declared_size = bytes.len() as u64;
        Self::File {
            filename: filename.into(),
            bytes,
            declared_size,
        }
    }

    /// Which kind of source this is, for per-kind thresholds.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Url { .. } => SourceKind::Url,
            Self::File { .. } => SourceKind::Document,
        }
    }
}

/// The two acquisition paths, each with its own minimum for how much
/// text must survive normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Url,
    Document,
}

impl SourceKind {
    /// Minimum normalized length for this kind. Fetched pages get a higher
    /// bar than uploads: a page this short usually means the content is
    /// JavaScript-rendered or bot-walled rather than genuinely tiny.
    pub fn min_chars(&self) -> usize {
        match self {
            Self::Url => 100,
            Self::Document => 50,
        }
    }
}

/// Supported content formats, dispatched from the file extension for
/// uploads and fixed to `Html` for fetched pages.
///
/// Adding a format is a one-case addition here plus an arm in
/// `pipeline::extract::extract_text`; the compiler flags every match that
/// needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Html,
    Pdf,
    Docx,
    Spreadsheet,
    PlainText,
}

impl SourceFormat {
    /// Dispatch an uploaded filename to its format.
    ///
    /// Extensions are matched case-insensitively. Anything outside the
    /// accepted set {pdf, docx, xlsx, xls, txt, csv} is rejected.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "xlsx" | "xls" => Ok(Self::Spreadsheet),
            "txt" | "csv" => Ok(Self::PlainText),
            _ => Err(PricingError::UnsupportedFormat { extension }),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::Docx => "Word document",
            Self::Spreadsheet => "spreadsheet",
            Self::PlainText => "plain text",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dispatch() {
        assert_eq!(
            SourceFormat::from_filename("pricing.pdf").unwrap(),
            SourceFormat::Pdf
        );
        assert_eq!(
            SourceFormat::from_filename("plans.docx").unwrap(),
            SourceFormat::Docx
        );
        assert_eq!(
            SourceFormat::from_filename("sheet.xlsx").unwrap(),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::from_filename("legacy.xls").unwrap(),
            SourceFormat::Spreadsheet
        );
        assert_eq!(
            SourceFormat::from_filename("notes.txt").unwrap(),
            SourceFormat::PlainText
        );
        assert_eq!(
            SourceFormat::from_filename("export.csv").unwrap(),
            SourceFormat::PlainText
        );
    }

    #[test]
    fn test_format_dispatch_is_case_insensitive() {
        assert_eq!(
            SourceFormat::from_filename("PRICING.PDF").unwrap(),
            SourceFormat::Pdf
        );
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = SourceFormat::from_filename("deck.pptx").unwrap_err();
        assert!(matches!(
            err,
            PricingError::UnsupportedFormat { ref extension } if extension == "pptx"
        ));
    }

    #[test]
    fn test_missing_extension_rejected() {
        let err = SourceFormat::from_filename("README").unwrap_err();
        assert!(matches!(
            err,
            PricingError::UnsupportedFormat { ref extension } if extension.is_empty()
        ));
    }

    #[test]
    fn test_kind_minimums() {
        assert_eq!(SourceKind::Url.min_chars(), 100);
        assert_eq!(SourceKind::Document.min_chars(), 50);

        let url = SourceDescriptor::url("https://example.com/pricing");
        assert_eq!(url.kind(), SourceKind::Url);

        let file = SourceDescriptor::file("pricing.txt", b"content".to_vec());
        assert_eq!(file.kind(), SourceKind::Document);
    }

    #[test]
    fn test_file_descriptor_declares_actual_size() {
        let file = SourceDescriptor::file("pricing.txt", vec![0u8; 128]);
        match file {
            SourceDescriptor::File { declared_size, .. } => assert_eq!(declared_size, 128),
            _ => panic!("expected file descriptor"),
        }
    }
}
