//! Dashboard page model and the load-time initialization trigger.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::animator::BalanceAnimator;

/// Id of the element that shows the balance.
pub const BALANCE_ELEMENT_ID: &str = "balance";

/// Data attribute on the balance element holding the target amount.
pub const VALUE_ATTRIBUTE: &str = "value";

/// Why the balance element's target value could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("balance element has no data-value attribute")]
    Missing,
    #[error("balance value {0:?} is not a number")]
    Malformed(String),
    #[error("balance value {0:?} is not finite")]
    NotFinite(String),
}

/// A displayable element with text content and `data-*` attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    id: String,
    text_content: String,
    dataset: BTreeMap<String, String>,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set a `data-*` attribute (`key` without the `data-` prefix).
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = text.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    pub fn text_content(&self) -> &str {
        &self.text_content
    }

    pub fn set_text_content(&mut self, text: &str) {
        self.text_content.clear();
        self.text_content.push_str(text);
    }
}

/// The elements of a loaded page, looked up by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.insert(element);
        self
    }

    /// Add an element, replacing any element with the same id.
    pub fn insert(&mut self, element: Element) {
        match self.element_mut(element.id()) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }
}

/// Start the balance animation for a freshly loaded page.
///
/// Returns `Ok(None)` without doing anything when the page has no balance
/// element. Otherwise parses the element's target value and returns a running
/// animator.
pub fn initialize(page: &Page) -> Result<Option<BalanceAnimator>, TargetError> {
    let Some(element) = page.element(BALANCE_ELEMENT_ID) else {
        debug!("no balance element on page, skipping animation");
        return Ok(None);
    };

    let target = parse_target(element.data(VALUE_ATTRIBUTE))?;
    let mut animator = BalanceAnimator::new(target);
    animator.start();
    info!(balance = target, "balance animation started");
    Ok(Some(animator))
}

fn parse_target(raw: Option<&str>) -> Result<f64, TargetError> {
    let raw = raw.ok_or(TargetError::Missing)?.trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| TargetError::Malformed(raw.to_string()))?;
    if !value.is_finite() {
        return Err(TargetError::NotFinite(raw.to_string()));
    }
    Ok(value)
}
