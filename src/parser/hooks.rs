//! Element construction and finalization hooks for inline markers.

use crate::core::ast::{InlineElement, Params};

/// Result of asking a hook to start an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Construction {
    /// Build this element and attach content to it.
    Element(InlineElement),
    /// Veto the marker: it still pairs with its closer, but its content is dropped.
    Discard,
}

/// Strategy for building inline elements out of markers.
pub trait ElementHook: Send + Sync {
    /// Returns `None` when this hook does not handle `name`.
    fn construct(&self, name: &str) -> Option<Construction>;

    /// Finishes an element once its closer has been seen.
    fn finalize(&self, element: &mut InlineElement, params: Params) {
        element.merge_params(params);
    }
}

/// Builds a generic element for any marker name.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultElementHook;

impl ElementHook for DefaultElementHook {
    fn construct(&self, name: &str) -> Option<Construction> {
        Some(Construction::Element(InlineElement::new(name)))
    }
}

/// Vetoes the listed markers, e.g. footnotes (`f`) and cross references (`x`).
#[derive(Debug, Default, Clone)]
pub struct DiscardMarkers {
    names: Vec<String>,
}

impl DiscardMarkers {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl ElementHook for DiscardMarkers {
    fn construct(&self, name: &str) -> Option<Construction> {
        self.names
            .iter()
            .any(|n| n == name)
            .then_some(Construction::Discard)
    }
}

/// Identifies which hook built an element so the same one finalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookId {
    Override(usize),
    Fallback,
}

/// Ordered override hooks with a default fallback.
#[derive(Default)]
pub struct HookTable {
    overrides: Vec<Box<dyn ElementHook>>,
    fallback: DefaultElementHook,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hook: Box<dyn ElementHook>) {
        self.overrides.push(hook);
    }

    /// Tries the overrides in registration order, then the fallback.
    pub fn construct(&self, name: &str) -> (Construction, HookId) {
        for (index, hook) in self.overrides.iter().enumerate() {
            if let Some(construction) = hook.construct(name) {
                return (construction, HookId::Override(index));
            }
        }
        let construction = self
            .fallback
            .construct(name)
            .unwrap_or(Construction::Discard);
        (construction, HookId::Fallback)
    }

    pub fn finalize(&self, id: HookId, element: &mut InlineElement, params: Params) {
        match id {
            HookId::Override(index) => match self.overrides.get(index) {
                Some(hook) => hook.finalize(element, params),
                None => self.fallback.finalize(element, params),
            },
            HookId::Fallback => self.fallback.finalize(element, params),
        }
    }
}
