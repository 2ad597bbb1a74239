use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt;

mod dom;
mod registry;
mod scanner;
mod selector;

#[cfg(test)]
mod tests;

pub use dom::{Dom, NodeId};
pub use registry::{HandlerDescriptor, ListenerTable, UnavailableRegistry};
pub use scanner::{
    HandlerMatch, HandlerRegistryReader, HandlerScanner, STANDARD_EVENT_TYPES, ScanMatch,
    SelectorResolver,
};

use selector::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    UnsupportedSelector(String),
    SelectorNotFound(String),
    RegistryUnavailable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::RegistryUnavailable(msg) => write!(f, "listener registry unavailable: {msg}"),
        }
    }
}

impl StdError for Error {}

/// In-memory host document: an arena DOM plus a listener registry.
///
/// `Page` is the stock implementation of the two capabilities the
/// scanner needs; hosts with their own DOM or registry implement
/// [`SelectorResolver`] and [`HandlerRegistryReader`] instead and hand
/// them to [`HandlerScanner`] directly.
#[derive(Debug, Clone)]
pub struct Page {
    dom: Dom,
    listeners: ListenerTable,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Ok(Self {
            dom: dom::parse_html(html)?,
            listeners: ListenerTable::default(),
        })
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn listeners(&self) -> &ListenerTable {
        &self.listeners
    }

    /// Seed a direct listener on every element `selector` matches.
    /// Seeding an unmatched selector is a fixture mistake and fails.
    pub fn listen(&mut self, selector: &str, event_type: &str) -> Result<()> {
        self.listen_with(selector, HandlerDescriptor::direct(event_type))
    }

    /// Seed a delegated listener: bound on the matched elements, firing
    /// for their descendants matching `child_selector`.
    pub fn listen_delegated(
        &mut self,
        selector: &str,
        event_type: &str,
        child_selector: &str,
    ) -> Result<()> {
        self.listen_with(selector, HandlerDescriptor::delegated(event_type, child_selector))
    }

    pub fn listen_with(&mut self, selector: &str, descriptor: HandlerDescriptor) -> Result<()> {
        let targets = self.dom.query_selector_all(selector)?;
        if targets.is_empty() {
            return Err(Error::SelectorNotFound(selector.into()));
        }
        for target in targets {
            self.listeners.add(target, descriptor.clone());
        }
        Ok(())
    }

    /// Seed a direct listener on the document node itself, which no
    /// selector can address.
    pub fn listen_on_document(&mut self, event_type: &str) {
        self.listen_on_document_with(HandlerDescriptor::direct(event_type));
    }

    pub fn listen_on_document_with(&mut self, descriptor: HandlerDescriptor) {
        self.listeners.add(self.dom.document_node(), descriptor);
    }

    pub fn scanner(&self) -> HandlerScanner<'_, Dom, ListenerTable> {
        HandlerScanner::new(&self.dom, &self.listeners)
    }

    pub fn scan(&self, event_type: &str, target_selector: &str) -> Result<Vec<ScanMatch>> {
        self.scanner().scan(event_type, target_selector)
    }

    pub fn has_handler(&self, event_type: &str, target_selector: &str) -> Result<bool> {
        self.scanner().has_handler(event_type, target_selector)
    }

    pub fn has_any_standard_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_any_standard_handler(target_selector)
    }

    pub fn has_click_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_click_handler(target_selector)
    }

    pub fn has_submit_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_submit_handler(target_selector)
    }

    pub fn has_change_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_change_handler(target_selector)
    }

    pub fn has_dblclick_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_dblclick_handler(target_selector)
    }

    pub fn has_select_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_select_handler(target_selector)
    }

    pub fn has_resize_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_resize_handler(target_selector)
    }

    pub fn has_mouseover_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_mouseover_handler(target_selector)
    }

    pub fn has_mouseout_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_mouseout_handler(target_selector)
    }

    pub fn has_mousedown_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_mousedown_handler(target_selector)
    }

    pub fn has_mouseup_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_mouseup_handler(target_selector)
    }

    pub fn has_mouseenter_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_mouseenter_handler(target_selector)
    }

    pub fn has_mouseleave_handler(&self, target_selector: &str) -> Result<bool> {
        self.scanner().has_mouseleave_handler(target_selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    /// First element matching `selector`, or `SelectorNotFound`.
    pub fn node_id_of(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.into()))
    }

    pub fn document_node(&self) -> NodeId {
        self.dom.document_node()
    }
}
