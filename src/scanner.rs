use super::*;

/// The event types covered by the fixed predicate family and by
/// `has_any_standard_handler`.
pub const STANDARD_EVENT_TYPES: [&str; 12] = [
    "click",
    "submit",
    "change",
    "dblclick",
    "select",
    "resize",
    "mouseover",
    "mouseout",
    "mousedown",
    "mouseup",
    "mouseenter",
    "mouseleave",
];

/// Selector-matching capability of the host document.
pub trait SelectorResolver {
    /// Elements currently matching `selector`, in document order.
    fn resolve(&self, selector: &str) -> Result<Vec<NodeId>>;

    /// Elements matching `selector` among the descendants of `scope`
    /// (`scope` itself excluded).
    fn resolve_within(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>>;

    /// Every element currently in the document, in document order.
    fn all_elements(&self) -> Vec<NodeId>;

    /// The document node. `resolve` never returns it.
    fn document_node(&self) -> NodeId;
}

/// Read access to the host's internal listener registry.
pub trait HandlerRegistryReader {
    /// Hosts without introspection support fail here, once, before any
    /// per-element lookup happens.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    fn handlers_for(&self, element: NodeId, event_type: &str) -> Vec<HandlerDescriptor>;
}

/// One in-scope listener together with the elements it covers.
///
/// For a delegated listener `covered` is the set of descendants its
/// delegation selector matches right now, restricted to the elements the
/// scan was asked about. For a direct listener it is exactly the bound
/// element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerMatch {
    pub descriptor: HandlerDescriptor,
    pub covered: Vec<NodeId>,
}

/// Scan result entry: one element that carries at least one in-scope
/// listener for the queried event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMatch {
    pub element: NodeId,
    pub events: Vec<HandlerMatch>,
}

/// Walks every element in the document and reports the listeners whose
/// scope overlaps a target selector, attributing delegated listeners to
/// the element they are bound on rather than the elements they fire for.
pub struct HandlerScanner<'a, S, R> {
    resolver: &'a S,
    registry: &'a R,
}

impl<'a, S: SelectorResolver, R: HandlerRegistryReader> HandlerScanner<'a, S, R> {
    pub fn new(resolver: &'a S, registry: &'a R) -> Self {
        Self { resolver, registry }
    }

    /// One-shot snapshot query. Read-only, deterministic for a fixed
    /// document, returns a fresh result on every call.
    ///
    /// An unknown event type is not an error; it yields an empty result,
    /// as does a `target_selector` matching nothing. Invalid selectors
    /// fail with `UnsupportedSelector`, a host without registry
    /// introspection with `RegistryUnavailable`.
    pub fn scan(&self, event_type: &str, target_selector: &str) -> Result<Vec<ScanMatch>> {
        self.registry.ensure_available()?;

        let mut elements_of_interest = self.resolver.resolve(target_selector)?;
        if target_selector.trim() == "*" {
            // "*" does not match the document node, but handlers are
            // often registered there.
            elements_of_interest.push(self.resolver.document_node());
        }
        let elements_of_interest: HashSet<NodeId> = elements_of_interest.into_iter().collect();
        if elements_of_interest.is_empty() {
            return Ok(Vec::new());
        }

        let mut candidates = vec![self.resolver.document_node()];
        candidates.extend(self.resolver.all_elements());

        let mut results: Vec<ScanMatch> = Vec::new();
        for candidate in candidates {
            for descriptor in self.registry.handlers_for(candidate, event_type) {
                let covered = match &descriptor.selector {
                    // Delegated: the listener only fires for matching
                    // descendants bubbling up, never for the element itself.
                    Some(child_selector) => {
                        self.resolver.resolve_within(candidate, child_selector)?
                    }
                    None => vec![candidate],
                };

                let in_scope: Vec<NodeId> = covered
                    .into_iter()
                    .filter(|id| elements_of_interest.contains(id))
                    .collect();
                if in_scope.is_empty() {
                    continue;
                }

                let hit = HandlerMatch {
                    descriptor,
                    covered: in_scope,
                };
                match results.iter_mut().find(|entry| entry.element == candidate) {
                    Some(entry) => entry.events.push(hit),
                    None => results.push(ScanMatch {
                        element: candidate,
                        events: vec![hit],
                    }),
                }
            }
        }

        Ok(results)
    }

    /// True when `scan` for the same arguments is non-empty.
    pub fn has_handler(&self, event_type: &str, target_selector: &str) -> Result<bool> {
        Ok(!self.scan(event_type, target_selector)?.is_empty())
    }

    /// True when any of the twelve standard event types has an in-scope
    /// handler. Stops at the first hit; checks all twelve before
    /// reporting false.
    pub fn has_any_standard_handler(&self, target_selector: &str) -> Result<bool> {
        for event_type in STANDARD_EVENT_TYPES {
            if self.has_handler(event_type, target_selector)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn has_click_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("click", target_selector)
    }

    pub fn has_submit_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("submit", target_selector)
    }

    pub fn has_change_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("change", target_selector)
    }

    pub fn has_dblclick_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("dblclick", target_selector)
    }

    pub fn has_select_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("select", target_selector)
    }

    pub fn has_resize_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("resize", target_selector)
    }

    pub fn has_mouseover_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("mouseover", target_selector)
    }

    pub fn has_mouseout_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("mouseout", target_selector)
    }

    pub fn has_mousedown_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("mousedown", target_selector)
    }

    pub fn has_mouseup_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("mouseup", target_selector)
    }

    pub fn has_mouseenter_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("mouseenter", target_selector)
    }

    pub fn has_mouseleave_handler(&self, target_selector: &str) -> Result<bool> {
        self.has_handler("mouseleave", target_selector)
    }
}
