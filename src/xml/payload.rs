//! Parsed XML payloads.

use roxmltree::{Document, ParsingOptions};

fn parsing_options() -> ParsingOptions {
    // A DTD is generally present in web pages, so allow it syntactically.
    // roxmltree never resolves external references, so a DOCTYPE pointing at
    // a remote DTD cannot cause a network fetch or a hang during parsing.
    ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    }
}

/// A well-formed XML document fetched from a remote resource.
///
/// The payload owns the response text; well-formedness is established once
/// at construction.
#[derive(Debug, Clone)]
pub struct XmlPayload {
    raw: String,
}

impl XmlPayload {
    /// Validates the given text as XML and takes ownership of it.
    ///
    /// On failure the original text is handed back inside the error so the
    /// caller can attach it to diagnostics.
    pub fn parse(raw: String) -> Result<Self, InvalidXml> {
        match Document::parse_with_options(&raw, parsing_options()) {
            Ok(_) => Ok(Self { raw }),
            Err(e) => Err(InvalidXml {
                message: e.to_string(),
                raw,
            }),
        }
    }

    /// The document text as received.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// A navigable view of the document.
    pub fn document(&self) -> Result<Document<'_>, roxmltree::Error> {
        Document::parse_with_options(&self.raw, parsing_options())
    }

    /// Consumes the payload, returning the document text.
    pub fn into_string(self) -> String {
        self.raw
    }
}

/// Parse failure carrying the text that failed, so it can be reported.
#[derive(Debug)]
pub struct InvalidXml {
    pub message: String,
    pub raw: String,
}

impl std::fmt::Display for InvalidXml {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not well-formed XML: {}", self.message)
    }
}

impl std::error::Error for InvalidXml {}
