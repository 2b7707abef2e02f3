//! TCAdmin response documents
//!
//! Every billing API call answers with a small XML document. There is no
//! fixed schema: informational calls return lists, mutating calls return an
//! `errorcode` (0 on success) and an `errortext`.

use crate::error::TcAdminError;
use serde::Serialize;
use std::ops::Deref;

/// Conventional error code field
pub const FIELD_ERROR_CODE: &str = "errorcode";
/// Conventional error message field
pub const FIELD_ERROR_TEXT: &str = "errortext";

/// An owned XML element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            }
        }

        Self {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            text: text.trim().to_string(),
            children,
        }
    }

    /// Local tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct text content, trimmed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of an attribute of this element
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements in document order
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// First child element with the given tag name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Child elements with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child element with the given tag name.
    ///
    /// Returns `None` when no such child exists.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlElement::text)
    }
}

/// A parsed billing API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteResponse {
    root: XmlElement,
}

impl RemoteResponse {
    /// Parse a response body.
    ///
    /// Empty or malformed bodies yield [`TcAdminError::ResponseFormat`].
    pub fn parse(body: &str) -> Result<Self, TcAdminError> {
        if body.trim().is_empty() {
            return Err(TcAdminError::ResponseFormat("empty response body".to_string()));
        }

        let doc = roxmltree::Document::parse(body)
            .map_err(|e| TcAdminError::ResponseFormat(e.to_string()))?;

        Ok(Self {
            root: XmlElement::from_node(doc.root_element()),
        })
    }

    /// Document root element
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// The `errorcode` field as a number.
    ///
    /// `Ok(None)` when the field is absent or empty; an error when it is
    /// present but not an integer.
    pub fn error_code(&self) -> Result<Option<i64>, TcAdminError> {
        match self.root.field(FIELD_ERROR_CODE) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                TcAdminError::ResponseFormat(format!("errorcode is not an integer: {:?}", raw))
            }),
        }
    }

    /// The `errortext` field, empty when absent
    pub fn error_text(&self) -> &str {
        self.root.field(FIELD_ERROR_TEXT).unwrap_or_default()
    }

    /// Consume the response, keeping the root element
    pub fn into_root(self) -> XmlElement {
        self.root
    }
}

impl Deref for RemoteResponse {
    type Target = XmlElement;

    fn deref(&self) -> &XmlElement {
        &self.root
    }
}

/// Apply the `errorcode` convention to a response.
///
/// An absent or zero `errorcode` passes the document through. Any other
/// value becomes [`TcAdminError::RemoteOperation`] with the absolute value of
/// the code and `errortext` as the message, so `-5` and `5` report the same.
pub fn check_errorcode(response: RemoteResponse) -> Result<RemoteResponse, TcAdminError> {
    match response.error_code()? {
        None | Some(0) => Ok(response),
        Some(code) => Err(TcAdminError::RemoteOperation {
            code: code.saturating_abs(),
            message: response.error_text().to_string(),
        }),
    }
}
