mod dial;
mod say;

pub use dial::{Dial, DialTarget};
pub use say::Say;
use thiserror::Error;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TwimlError {
    #[error("TwiML response has no verbs")]
    Empty,
    #[error("character {0:?} cannot be written to an XML document")]
    InvalidCharacter(char),
}

/// A TwiML verb.
pub trait Action: Send + Sync {
    fn as_twiml(&self) -> Result<String, TwimlError>;
}

/// A `<Response>` document. Verbs are rendered lazily by `to_xml`, so
/// building a document never fails but rendering one can.
#[derive(Default)]
pub struct Twiml {
    verbs: Vec<Box<dyn Action>>,
}

impl Twiml {
    pub fn new() -> Twiml {
        Twiml::default()
    }

    pub fn add(&mut self, action: impl Action + 'static) -> &mut Twiml {
        self.verbs.push(Box::new(action));
        self
    }

    pub fn to_xml(&self) -> Result<String, TwimlError> {
        if self.verbs.is_empty() {
            return Err(TwimlError::Empty);
        }

        let body = self
            .verbs
            .iter()
            .map(|verb| verb.as_twiml())
            .collect::<Result<String, _>>()?;

        Ok(format!(
            "{XML_DECLARATION}{}",
            format_xml_string("Response", &[], &body)?
        ))
    }
}

/// Escapes text or attribute content, rejecting characters XML 1.0 has no
/// representation for.
pub(crate) fn escape(value: &str) -> Result<String, TwimlError> {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(c),
            c if c < ' ' || c == '\u{FFFE}' || c == '\u{FFFF}' => {
                return Err(TwimlError::InvalidCharacter(c))
            }
            c => escaped.push(c),
        }
    }
    Ok(escaped)
}

/// Writes one element. `inner` must already be escaped markup; an empty
/// `inner` produces a self-closing tag.
pub(crate) fn format_xml_string(
    tag: &str,
    attrs: &[(&str, &str)],
    inner: &str,
) -> Result<String, TwimlError> {
    let mut element = format!("<{tag}");
    for (name, value) in attrs {
        element.push_str(&format!(" {name}=\"{}\"", escape(value)?));
    }

    if inner.is_empty() {
        element.push_str("/>");
    } else {
        element.push_str(&format!(">{inner}</{tag}>"));
    }

    Ok(element)
}
