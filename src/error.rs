//! Typed failures surfaced by the XML client.

/// Failures that end a fetch or transform immediately.
///
/// Transport-level failures (connection refused, reset, timeout) are not
/// represented here: they stay as context-wrapped `reqwest` errors and are
/// the only class of failure the retry loop will act on. Anything carrying
/// a `FetchError` is final.
#[derive(Debug)]
pub enum FetchError {
    /// A transform was requested without a stylesheet URL.
    MissingStylesheet,
    /// A configuration value could not be used, e.g. an unparseable proxy address.
    Configuration(String),
    /// The server answered with a status other than 200 OK.
    Status { code: u16, description: String },
    /// The response body was not well-formed XML. `body` holds the text
    /// captured by the diagnostic re-fetch, or the original body if that
    /// re-fetch did not answer 200 OK.
    MalformedXml { message: String, body: String },
    /// The stylesheet failed to compile or apply, or produced output that
    /// could not be read back as XML.
    Transform(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::MissingStylesheet => {
                write!(f, "A stylesheet URL is required to transform a response")
            }
            FetchError::Configuration(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            FetchError::Status { code, description } => {
                write!(
                    f,
                    "Request for XML data received an HTTP response of {} {}",
                    code, description
                )
            }
            FetchError::MalformedXml { message, .. } => {
                write!(f, "Response was not well-formed XML: {}", message)
            }
            FetchError::Transform(msg) => {
                write!(f, "XSLT transform failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_code_and_description() {
        let err = FetchError::Status {
            code: 404,
            description: "Not Found".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_malformed_xml_display_omits_body() {
        let err = FetchError::MalformedXml {
            message: "unexpected end of stream".to_string(),
            body: "<broken>".to_string(),
        };
        assert!(err.to_string().contains("well-formed"));
        assert!(!err.to_string().contains("<broken>"));
    }

    #[test]
    fn test_missing_stylesheet_display() {
        let err = FetchError::MissingStylesheet;
        assert!(err.to_string().contains("stylesheet"));
    }
}
