//! Source document parsing and text extraction.

use scraper::{ElementRef, Html, Node, Selector};
use std::fs;
use std::path::Path;
use tradebot_core::{AppError, AppResult};

/// Elements whose subtree never contributes text.
const SKIP_TAGS: [&str; 7] = ["script", "style", "noscript", "svg", "nav", "footer", "head"];

/// Content type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Pdf,
    Markdown,
    Html,
    PlainText,
    Unknown,
}

impl ContentType {
    /// Detect content type from file extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("md") | Some("markdown") => Self::Markdown,
            Some("html") | Some("htm") => Self::Html,
            Some("txt") => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    /// Whether ingestion reads this type.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::PlainText => "text",
            Self::Unknown => "unknown",
        }
    }
}

/// Parse a source file and extract clean text.
pub fn parse_file(path: &Path) -> AppResult<String> {
    let content_type = ContentType::from_path(path);

    if content_type == ContentType::Pdf {
        return pdf_extract::extract_text(path)
            .map(|text| collapse_blank_lines(&text))
            .map_err(|e| AppError::Knowledge(format!("Failed to extract PDF {:?}: {}", path, e)));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Knowledge(format!("Failed to read {:?}: {}", path, e)))?;

    let cleaned = match content_type {
        ContentType::Markdown => clean_markdown(&raw),
        ContentType::Html => html_to_text(&raw),
        ContentType::PlainText => raw.trim().to_string(),
        ContentType::Pdf | ContentType::Unknown => {
            return Err(AppError::Knowledge(format!(
                "Unsupported document type: {:?}",
                path
            )));
        }
    };

    Ok(cleaned)
}

/// Clean markdown by removing excess formatting.
fn clean_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim_start_matches('#').trim();

        // Horizontal rules and code fences carry no text
        if trimmed.starts_with("---") || trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            continue;
        }

        if !trimmed.is_empty() {
            result.push_str(trimmed);
            result.push('\n');
        }
    }

    result.trim().to_string()
}

/// Extract readable text from an HTML page.
///
/// Uses `<body>` when present, drops scripts, styles and navigation, and
/// collapses whitespace.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next());
    let root = body.unwrap_or_else(|| document.root_element());

    let mut parts = Vec::new();
    collect_text(root, &mut parts);

    parts.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef, parts: &mut Vec<String>) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, parts);
                }
            }
            _ => {}
        }
    }
}

/// Trim lines and keep at most one blank line between paragraphs.
fn collapse_blank_lines(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run == 1 && !result.is_empty() {
                result.push('\n');
            }
            continue;
        }
        blank_run = 0;
        result.push_str(line);
        result.push('\n');
    }

    result.trim().to_string()
}
