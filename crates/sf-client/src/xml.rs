//! Namespace-aware XML text extraction.
//!
//! SOAP responses use different namespace prefixes across API versions, so
//! lookups either ignore the namespace entirely (`text_by_local_name`) or
//! compare resolved namespace URIs (`text_at_path`), never prefixes.

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::{Error, ErrorKind, Result};

/// An element name qualified by its namespace URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'a> {
    /// Namespace URI, `None` for elements in no namespace.
    pub namespace: Option<&'a str>,
    /// Local part of the name.
    pub local_name: &'a str,
}

impl<'a> QualifiedName<'a> {
    /// Name in the given namespace.
    pub const fn new(namespace: &'a str, local_name: &'a str) -> Self {
        Self {
            namespace: Some(namespace),
            local_name,
        }
    }

    /// Name in no namespace.
    pub const fn unqualified(local_name: &'a str) -> Self {
        Self {
            namespace: None,
            local_name,
        }
    }

    fn matches(&self, ns: &ResolveResult<'_>, local_name: &[u8]) -> bool {
        let namespace_matches = match (self.namespace, ns) {
            (None, ResolveResult::Unbound) => true,
            (Some(expected), ResolveResult::Bound(Namespace(actual))) => {
                expected.as_bytes() == *actual
            }
            _ => false,
        };
        namespace_matches && self.local_name.as_bytes() == local_name
    }
}

/// Text of the first element anywhere in the document with the given local name.
///
/// Equivalent to the XPath `//*[local-name()='<name>']/text()`: direct text
/// children are concatenated, nested elements are skipped. Returns
/// `Ok(None)` when no such element exists. The whole document is read, so a
/// malformed or truncated document is an error even after the element is found.
pub fn text_by_local_name(xml: &str, local_name: &str) -> Result<Option<String>> {
    let mut reader = NsReader::from_str(xml);
    let mut depth = 0usize;
    // Depth of the matched element and the text collected so far.
    let mut capture: Option<(usize, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                depth += 1;
                if capture.is_none() && start.local_name().as_ref() == local_name.as_bytes() {
                    capture = Some((depth, String::new()));
                }
            }
            Event::Empty(start)
                if capture.is_none() && start.local_name().as_ref() == local_name.as_bytes() =>
            {
                read_to_end(&mut reader, depth)?;
                return Ok(Some(String::new()));
            }
            Event::Text(text) => {
                if let Some((level, collected)) = capture.as_mut() {
                    if *level == depth {
                        collected.push_str(&text.unescape().map_err(xml_error)?);
                    }
                }
            }
            Event::CData(data) => {
                if let Some((level, collected)) = capture.as_mut() {
                    if *level == depth {
                        collected.push_str(&String::from_utf8_lossy(&data));
                    }
                }
            }
            Event::End(_) => {
                if let Some((level, collected)) = capture.as_mut() {
                    if *level == depth {
                        let found = std::mem::take(collected);
                        read_to_end(&mut reader, depth - 1)?;
                        return Ok(Some(found));
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => return check_closed(depth).map(|()| None),
            _ => {}
        }
    }
}

/// Text of the element at an absolute, namespace-qualified path.
///
/// `path[0]` must be the root element, each following entry a direct child
/// of the previous one. Equivalent to the XPath
/// `/*[local-name()=.. and namespace-uri()=..]/*[..]/text()`. Like
/// [`text_by_local_name`], the whole document must be well formed.
pub fn text_at_path(xml: &str, path: &[QualifiedName<'_>]) -> Result<Option<String>> {
    if path.is_empty() {
        return Ok(None);
    }

    let mut reader = NsReader::from_str(xml);
    // One entry per open element: does it (and every ancestor) match the path?
    let mut open: Vec<bool> = Vec::new();
    let mut collected = String::new();

    loop {
        let (ns, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(start) => {
                let matched = child_matches(&open, path, &ns, start.local_name().as_ref());
                open.push(matched);
            }
            Event::Empty(start) => {
                if child_matches(&open, path, &ns, start.local_name().as_ref())
                    && open.len() + 1 == path.len()
                {
                    read_to_end(&mut reader, open.len())?;
                    return Ok(Some(String::new()));
                }
            }
            Event::Text(text) => {
                if at_target(&open, path) {
                    collected.push_str(&text.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(data) => {
                if at_target(&open, path) {
                    collected.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                if at_target(&open, path) {
                    read_to_end(&mut reader, open.len() - 1)?;
                    return Ok(Some(collected));
                }
                open.pop();
            }
            Event::Eof => return check_closed(open.len()).map(|()| None),
            _ => {}
        }
    }
}

/// Like [`text_by_local_name`], failing when the element is absent.
pub fn require_text_by_local_name(xml: &str, local_name: &str) -> Result<String> {
    text_by_local_name(xml, local_name)?.ok_or_else(|| missing_element(local_name))
}

/// Error for an element that is not present in a document.
pub fn missing_element(name: &str) -> Error {
    Error::new(ErrorKind::Xml(format!("element '{}' not found", name)))
}

fn child_matches(
    open: &[bool],
    path: &[QualifiedName<'_>],
    ns: &ResolveResult<'_>,
    local_name: &[u8],
) -> bool {
    let depth = open.len();
    let parent_matches = open.last().copied().unwrap_or(true);
    parent_matches && depth < path.len() && path[depth].matches(ns, local_name)
}

fn at_target(open: &[bool], path: &[QualifiedName<'_>]) -> bool {
    open.len() == path.len() && open.last().copied().unwrap_or(false)
}

/// Reads the rest of the document with `depth` elements still open.
fn read_to_end(reader: &mut NsReader<&[u8]>, mut depth: usize) -> Result<()> {
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Eof => return check_closed(depth),
            _ => {}
        }
    }
}

fn check_closed(depth: usize) -> Result<()> {
    if depth == 0 {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::Xml(format!(
            "unexpected end of document: {} unclosed element(s)",
            depth
        ))))
    }
}

fn xml_error(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    let message = err.to_string();
    Error::with_source(ErrorKind::Xml(message), err)
}
