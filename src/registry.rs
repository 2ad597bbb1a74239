use super::*;

/// One bound listener as recorded by the host's internal registry.
///
/// `event_type` and the delegation `selector` are the fields the scanner
/// interprets. Everything else the host attaches to a listener (capture
/// flag, namespace, handler identity, arbitrary extras) rides along in
/// `meta` and the typed convenience fields, preserved but never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerDescriptor {
    pub event_type: String,
    /// Delegation selector; `None` means the listener is bound directly
    /// to its element.
    pub selector: Option<String>,
    pub capture: bool,
    pub namespace: Option<String>,
    /// Opaque host payload, carried through scan results untouched.
    pub meta: Vec<(String, String)>,
}

impl HandlerDescriptor {
    pub fn direct(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            selector: None,
            capture: false,
            namespace: None,
            meta: Vec::new(),
        }
    }

    pub fn delegated(event_type: &str, selector: &str) -> Self {
        Self {
            selector: Some(selector.to_string()),
            ..Self::direct(event_type)
        }
    }

    pub fn is_delegated(&self) -> bool {
        self.selector.is_some()
    }

    pub fn with_capture(mut self) -> Self {
        self.capture = true;
        self
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn with_meta(mut self, key: &str, value: &str) -> Self {
        self.meta.push((key.to_string(), value.to_string()));
        self
    }
}

/// In-memory listener registry, keyed per element and per event type.
#[derive(Debug, Default, Clone)]
pub struct ListenerTable {
    map: HashMap<NodeId, HashMap<String, Vec<HandlerDescriptor>>>,
}

impl ListenerTable {
    pub fn add(&mut self, node_id: NodeId, descriptor: HandlerDescriptor) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(descriptor.event_type.clone())
            .or_default()
            .push(descriptor);
    }

    pub fn get(&self, node_id: NodeId, event_type: &str) -> Vec<HandlerDescriptor> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event_type))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl HandlerRegistryReader for ListenerTable {
    fn handlers_for(&self, element: NodeId, event_type: &str) -> Vec<HandlerDescriptor> {
        self.get(element, event_type)
    }
}

/// Reader for hosts that expose no listener introspection at all.
/// Every scan against it fails up front with `RegistryUnavailable`, so
/// callers can tell "no handlers" from "cannot look".
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRegistry;

impl HandlerRegistryReader for UnavailableRegistry {
    fn ensure_available(&self) -> Result<()> {
        Err(Error::RegistryUnavailable(
            "host exposes no listener introspection".into(),
        ))
    }

    fn handlers_for(&self, _element: NodeId, _event_type: &str) -> Vec<HandlerDescriptor> {
        Vec::new()
    }
}
