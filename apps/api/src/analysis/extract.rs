//! Resume text extraction — turns PDF and DOCX uploads into plain text.

use std::io::{Cursor, Read};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("DOCX archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Accepted upload formats, keyed off the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if ext.eq_ignore_ascii_case("docx") {
            Some(Self::Docx)
        } else {
            None
        }
    }
}

/// Extracts the plain text of an uploaded resume. Uploads are processed
/// entirely in memory; nothing is written to disk.
pub fn extract_text(format: ResumeFormat, data: &[u8]) -> Result<String, ExtractError> {
    match format {
        ResumeFormat::Pdf => Ok(pdf_extract::extract_text_from_mem(data)?),
        ResumeFormat::Docx => extract_docx_text(data),
    }
}

/// A .docx file is a zip container with the body in `word/document.xml`.
/// Text runs are `<w:t>` elements; paragraphs close with `</w:p>` and become
/// output lines.
fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;

    let paragraphs: Vec<String> = xml
        .split("</w:p>")
        .map(paragraph_text)
        .filter(|p| !p.is_empty())
        .collect();
    Ok(paragraphs.join("\n"))
}

/// Concatenates the `<w:t>` run contents of one paragraph fragment.
fn paragraph_text(fragment: &str) -> String {
    let mut out = String::new();
    let mut rest = fragment;
    while let Some(open) = rest.find("<w:t") {
        let tail = &rest[open + 4..];
        let Some(gt) = tail.find('>') else { break };
        let attrs = &tail[..gt];
        // Skip sibling elements that share the prefix (<w:tab/>, <w:tc>, ...)
        // and self-closing empty runs.
        if !(attrs.is_empty() || attrs.starts_with(' ')) || attrs.ends_with('/') {
            rest = tail;
            continue;
        }
        let content = &tail[gt + 1..];
        let Some(close) = content.find("</w:t>") else {
            break;
        };
        out.push_str(&decode_entities(&content[..close]));
        rest = &content[close..];
    }
    out
}

/// Decodes the XML entities WordprocessingML uses in text runs.
/// `&amp;` last, so already-decoded fragments are not decoded twice.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
