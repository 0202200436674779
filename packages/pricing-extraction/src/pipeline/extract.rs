//! Content extraction - turn source-specific raw content into plain text.
//!
//! Dispatch is a closed match over `SourceFormat`; each arm owns one
//! format's failure mode. Output is raw plain text, still un-normalized.

use std::io::{Cursor, Read};

use calamine::{open_workbook_auto_from_rs, Reader as WorkbookReader};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use scraper::{Html, Selector};
use tracing::warn;

use crate::error::{PricingError, Result};
use crate::types::source::SourceFormat;

/// Elements whose text is never pricing content.
const PRUNED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "iframe", "noscript",
];

/// Extract plain text from raw content of the given format.
pub fn extract_text(format: SourceFormat, bytes: &[u8]) -> Result<String> {
    match format {
        SourceFormat::Html => Ok(extract_html(&String::from_utf8_lossy(bytes))),
        SourceFormat::Pdf => extract_pdf(bytes),
        SourceFormat::Docx => extract_docx(bytes),
        SourceFormat::Spreadsheet => extract_spreadsheet(bytes),
        SourceFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Extract the visible text of an HTML page.
///
/// Drops everything inside chrome elements (script, style, nav, footer,
/// header, aside, iframe, noscript), elements marked `role="navigation"`,
/// and elements hidden with `aria-hidden="true"`, then collects the
/// remaining body text. Any page yields *some* text, so this path has no
/// parse failure of its own; pages that yield too little are rejected
/// downstream by the normalizer.
pub fn extract_html(html: &str) -> String {
    let document = Html::parse_document(html);

    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next());
    let root = match body {
        Some(element) => element,
        None => document.root_element(),
    };

    let mut out = String::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let pruned = node
            .ancestors()
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|element| {
                PRUNED_TAGS.contains(&element.name())
                    || element
                        .attr("role")
                        .map_or(false, |role| role.eq_ignore_ascii_case("navigation"))
                    || element
                        .attr("aria-hidden")
                        .map_or(false, |hidden| hidden.eq_ignore_ascii_case("true"))
            });
        if pruned {
            continue;
        }
        let chunk = text.trim();
        if !chunk.is_empty() {
            out.push_str(chunk);
            out.push(' ');
        }
    }

    out
}

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        warn!(error = %e, "PDF text extraction failed");
        parse_failure(SourceFormat::Pdf)
    })
}

/// Extract paragraph text from a Word document.
///
/// A DOCX is a zip container; the document body lives in
/// `word/document.xml`. Streaming the XML text events and breaking at
/// paragraph ends reproduces the raw paragraph text.
fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|_| parse_failure(SourceFormat::Docx))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| parse_failure(SourceFormat::Docx))?
        .read_to_string(&mut xml)
        .map_err(|_| parse_failure(SourceFormat::Docx))?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(chunk)) => match chunk.unescape() {
                Ok(decoded) => text.push_str(&decoded),
                Err(_) => return Err(parse_failure(SourceFormat::Docx)),
            },
            Ok(Event::End(end)) if end.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Empty(tag))
                if tag.name().as_ref() == b"w:tab" || tag.name().as_ref() == b"w:br" =>
            {
                text.push(' ')
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return Err(parse_failure(SourceFormat::Docx)),
        }
    }

    Ok(text)
}

/// Render a spreadsheet as a textual dump, one `Sheet: <name>` section per
/// sheet, rows tab-separated, sheets joined by blank lines.
fn extract_spreadsheet(bytes: &[u8]) -> Result<String> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|_| parse_failure(SourceFormat::Spreadsheet))?;

    let names = workbook.sheet_names().to_owned();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|_| parse_failure(SourceFormat::Spreadsheet))?;

        let mut dump = format!("Sheet: {}", name);
        for row in range.rows() {
            let line = row
                .iter()
                .map(|cell| cell.to_string())
                .collect::<Vec<_>>()
                .join("\t");
            if !line.trim().is_empty() {
                dump.push('\n');
                dump.push_str(line.trim_end());
            }
        }
        sheets.push(dump);
    }

    Ok(sheets.join("\n\n"))
}

fn parse_failure(format: SourceFormat) -> PricingError {
    PricingError::Extraction { format }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_html_strips_chrome_elements() {
        let html = r#"
            <html><head><title>Acme</title><style>body { color: red }</style></head>
            <body>
                <nav>Home Pricing About</nav>
                <header>Acme header</header>
                <main>
                    <h1>Pricing</h1>
                    <p>Pro plan costs $49 per month.</p>
                    <script>trackPageView();</script>
                </main>
                <div role="navigation">Sidebar links</div>
                <div aria-hidden="true">decorative</div>
                <footer>© Acme</footer>
            </body></html>
        "#;

        let text = extract_html(html);
        assert!(text.contains("Pro plan costs $49 per month."));
        assert!(!text.contains("Home Pricing About"));
        assert!(!text.contains("Acme header"));
        assert!(!text.contains("trackPageView"));
        assert!(!text.contains("Sidebar links"));
        assert!(!text.contains("decorative"));
        assert!(!text.contains("© Acme"));
    }

    #[test]
    fn test_plain_text_always_succeeds() {
        let text = extract_text(SourceFormat::PlainText, b"Starter: $9/mo\nPro: $29/mo").unwrap();
        assert!(text.contains("Starter: $9/mo"));

        // Invalid UTF-8 decodes lossily rather than failing.
        let lossy = extract_text(SourceFormat::PlainText, &[0x50, 0xff, 0x51]).unwrap();
        assert!(lossy.contains('P'));
        assert!(lossy.contains('Q'));
    }

    #[test]
    fn test_malformed_pdf_fails_with_format() {
        let err = extract_text(SourceFormat::Pdf, b"not a pdf").unwrap_err();
        assert!(matches!(
            err,
            PricingError::Extraction {
                format: SourceFormat::Pdf
            }
        ));
    }

    #[test]
    fn test_malformed_docx_fails_with_format() {
        let err = extract_text(SourceFormat::Docx, b"not a zip container").unwrap_err();
        assert!(matches!(
            err,
            PricingError::Extraction {
                format: SourceFormat::Docx
            }
        ));
        assert_eq!(err.to_string(), "could not parse Word document");
    }

    #[test]
    fn test_malformed_spreadsheet_fails_with_format() {
        let err = extract_text(SourceFormat::Spreadsheet, b"not a workbook").unwrap_err();
        assert!(matches!(
            err,
            PricingError::Extraction {
                format: SourceFormat::Spreadsheet
            }
        ));
    }

    #[test]
    fn test_docx_paragraph_text_extracted() {
        let document_xml = concat!(
            r#"<?xml version="1.0"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>",
            "<w:p><w:r><w:t>Pro plan $49 per month</w:t></w:r></w:p>",
            "<w:p><w:r><w:t>Enterprise</w:t></w:r><w:r><w:t xml:space=\"preserve\"> pricing: contact sales</w:t></w:r></w:p>",
            "</w:body></w:document>",
        );

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let text = extract_text(SourceFormat::Docx, &bytes).unwrap();
        assert!(text.contains("Pro plan $49 per month"));
        assert!(text.contains("Enterprise pricing: contact sales"));
        // Paragraphs end with line breaks.
        assert!(text.contains("month\n"));
    }

    #[test]
    fn test_docx_missing_document_xml_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("unrelated.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_text(SourceFormat::Docx, &bytes).unwrap_err();
        assert!(matches!(
            err,
            PricingError::Extraction {
                format: SourceFormat::Docx
            }
        ));
    }

    #[test]
    fn test_html_without_body_still_extracts() {
        let text = extract_html("Pro plan costs $49 per month.");
        assert!(text.contains("$49"));
    }
}
