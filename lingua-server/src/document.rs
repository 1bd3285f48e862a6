//! Plain-text extraction from uploaded PDF and DOCX documents
//!
//! Parsing is synchronous; callers on the async runtime should run it on the
//! blocking thread pool.

use std::io::{self, Cursor, Read};
use std::path::Path;

use lingua_common::DocumentKind;
use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

/// Archive member holding the main DOCX body
const DOCX_BODY_PART: &str = "word/document.xml";

/// Upper bound on the decompressed size of [`DOCX_BODY_PART`]
const MAX_DOCX_XML_BYTES: u64 = 64 * 1024 * 1024;

/// Extraction failures; all surface to users as an extraction failure
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read document: {0}")]
    Io(#[from] io::Error),
    #[error("invalid PDF: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("invalid DOCX archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("invalid DOCX markup: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document body exceeds {MAX_DOCX_XML_BYTES} bytes")]
    TooLarge,
    #[error("document contains no text")]
    Empty,
}

/// Extract the text of the document at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if it contains
/// no text.
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<String, ExtractionError> {
    let bytes = std::fs::read(path)?;
    match kind {
        DocumentKind::Pdf => extract_pdf_text(&bytes),
        DocumentKind::Docx => extract_docx_text(&bytes),
    }
}

/// Page texts, trimmed, one per line; pages without text are skipped
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let document = lopdf::Document::load_mem(bytes)?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().into_keys() {
        match document.extract_text(&[page_number]) {
            Ok(text) => pages.push(text),
            Err(e) => tracing::debug!(page_number, error = %e, "skipping unreadable PDF page"),
        }
    }

    non_empty(join_pages(pages))
}

/// Join page texts with newlines, dropping pages that are blank after trimming
fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages
        .into_iter()
        .filter_map(|page| {
            let text = page.as_ref().trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Body paragraph texts, one per line; empty paragraphs become empty lines
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let part = archive.by_name(DOCX_BODY_PART)?;

    let mut xml = String::new();
    part.take(MAX_DOCX_XML_BYTES + 1).read_to_string(&mut xml)?;
    if xml.len() as u64 > MAX_DOCX_XML_BYTES {
        return Err(ExtractionError::TooLarge);
    }

    non_empty(docx_paragraphs(&xml)?.join("\n"))
}

/// Collect the text of each paragraph that is a direct child of `w:body`
///
/// Tables and text boxes are not part of the body paragraph list and are
/// skipped. `w:tab` becomes a tab, `w:br` and `w:cr` become newlines.
fn docx_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    // Stack depth of the open body paragraph and its text so far
    let mut current: Option<(usize, String)> = None;
    let mut paragraphs = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && current.is_none() && is_body(&stack) {
                    current = Some((stack.len(), String::new()));
                }
                stack.push(name);
            }
            Event::End(_) => {
                stack.pop();
                if current.as_ref().is_some_and(|(depth, _)| *depth == stack.len())
                    && let Some((_, text)) = current.take()
                {
                    paragraphs.push(text);
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name == b"p" && current.is_none() && is_body(&stack) {
                    paragraphs.push(String::new());
                } else if let Some((depth, text)) = &mut current
                    && !nested_paragraph(&stack, *depth)
                {
                    match name {
                        b"tab" => text.push('\t'),
                        b"br" | b"cr" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(e) => {
                if let Some((depth, text)) = &mut current
                    && stack.last().is_some_and(|n| n == b"t")
                    && !nested_paragraph(&stack, *depth)
                {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn is_body(stack: &[Vec<u8>]) -> bool {
    stack.last().is_some_and(|n| n == b"body")
}

/// Whether the innermost open element sits inside a paragraph nested in the
/// body paragraph opened at `depth` (e.g. a text box)
fn nested_paragraph(stack: &[Vec<u8>], depth: usize) -> bool {
    stack.get(depth + 1..).is_some_and(|inner| inner.iter().any(|n| n == b"p"))
}

fn non_empty(text: String) -> Result<String, ExtractionError> {
    if text.trim().is_empty() {
        Err(ExtractionError::Empty)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};
    use zip::write::SimpleFileOptions;

    use super::*;

    /// Build a PDF with one page per entry; `None` pages have no text
    fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let operations = match page {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    fn build_docx(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer
            .start_file(DOCX_BODY_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_join_pages_skips_blank_pages() {
        assert_eq!(join_pages(["  one ", "", "\n\t", "two"]), "one\ntwo");
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }

    #[test]
    fn test_pdf_blank_middle_page_is_skipped() {
        let pdf = build_pdf(&[Some("First page"), None, Some("Third page")]);

        let text = extract_pdf_text(&pdf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("First page"));
        assert!(lines[1].contains("Third page"));
    }

    #[test]
    fn test_pdf_without_text_is_empty() {
        let pdf = build_pdf(&[None, None]);
        assert!(matches!(extract_pdf_text(&pdf), Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_garbage_pdf_is_rejected() {
        assert!(matches!(
            extract_pdf_text(b"definitely not a pdf"),
            Err(ExtractionError::Pdf(_))
        ));
    }

    #[test]
    fn test_docx_paragraphs_keep_empty_lines() {
        let docx = build_docx(
            r#"<w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p>
<w:p/>
<w:p><w:pPr><w:jc w:val="center"/></w:pPr></w:p>
<w:p><w:r><w:t>Tom &amp; Jerry</w:t></w:r></w:p>"#,
        );

        let text = extract_docx_text(&docx).unwrap();

        assert_eq!(text, "Hello world\n\n\nTom & Jerry");
    }

    #[test]
    fn test_docx_tabs_and_breaks() {
        let docx = build_docx(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "a\tb\nc");
    }

    #[test]
    fn test_docx_skips_tables() {
        let docx = build_docx(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p><w:r><w:t>after</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_docx_text(&docx).unwrap(), "before\nafter");
    }

    #[test]
    fn test_docx_with_only_empty_paragraphs_is_empty() {
        let docx = build_docx("<w:p/><w:p></w:p>");
        assert!(matches!(extract_docx_text(&docx), Err(ExtractionError::Empty)));
    }

    #[test]
    fn test_zip_without_body_is_rejected() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("readme.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(matches!(
            extract_docx_text(&bytes),
            Err(ExtractionError::Zip(_))
        ));
    }

    #[test]
    fn test_extract_text_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        std::fs::write(&path, build_docx("<w:p><w:r><w:t>from disk</w:t></w:r></w:p>")).unwrap();

        assert_eq!(
            extract_text(&path, DocumentKind::Docx).unwrap(),
            "from disk"
        );
        assert!(matches!(
            extract_text(&dir.path().join("missing.pdf"), DocumentKind::Pdf),
            Err(ExtractionError::Io(_))
        ));
    }
}
