//! Document abstraction the controller runs against.
//!
//! The controller never owns elements. It holds opaque [`ElementId`] handles
//! resolved through [`Document`] queries and re-resolves them after every
//! content replacement. Handles of removed elements simply stop matching
//! anything; every mutating call on them is a no-op.

pub mod memory;

pub use memory::{MemoryDocument, NodeSpec};

use anyhow::{Result, bail};
use crossterm::event::KeyModifiers;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque handle to an element. Never reused once the element is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Minimal selector: `.class`, `#id` or a bare tag name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    Class(String),
    Id(String),
    Tag(String),
}

impl Selector {
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }
}

impl FromStr for Selector {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (ctor, name): (fn(String) -> Selector, &str) = match raw.chars().next() {
            Some('.') => (Selector::Class, &raw[1..]),
            Some('#') => (Selector::Id, &raw[1..]),
            _ => (Selector::Tag, raw),
        };

        if name.is_empty() {
            bail!("empty selector: {:?}", raw);
        }
        if name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '.' | '#' | '>' | '[' | ']' | ','))
        {
            bail!("unsupported selector {:?}: only .class, #id or tag are allowed", raw);
        }

        Ok(ctor(name.to_string()))
    }
}

impl TryFrom<String> for Selector {
    type Error = anyhow::Error;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(name) => write!(f, ".{}", name),
            Selector::Id(name) => write!(f, "#{}", name),
            Selector::Tag(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlign {
    Center,
}

/// Where an element should land when scrolled into the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub block: ScrollAlign,
    pub inline: ScrollAlign,
}

impl ScrollOptions {
    pub const CENTERED: ScrollOptions = ScrollOptions {
        block: ScrollAlign::Center,
        inline: ScrollAlign::Center,
    };
}

/// A client-side cookie write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub max_age_secs: u64,
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; path={}; max-age={}",
            self.name, self.value, self.path, self.max_age_secs
        )
    }
}

/// Operations the controller needs from the page it drives.
///
/// Implementations must treat handles of elements that are no longer in the
/// document as inert: queries return nothing, mutations do nothing.
pub trait Document {
    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// Descendants of `root` matching `selector`, in document order
    fn query_all_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId>;

    fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn contains(&self, id: ElementId) -> bool;
    fn parent(&self, id: ElementId) -> Option<ElementId>;
    fn attribute(&self, id: ElementId, name: &str) -> Option<String>;

    fn add_class(&mut self, id: ElementId, class: &str);
    fn remove_class(&mut self, id: ElementId, class: &str);
    fn has_class(&self, id: ElementId, class: &str) -> bool;

    fn scroll_into_view(&mut self, id: ElementId, options: ScrollOptions);

    fn focus(&mut self, id: ElementId);
    fn blur(&mut self, id: ElementId);
    fn active_element(&self) -> Option<ElementId>;

    /// Current text of an input element
    fn value(&self, id: ElementId) -> String;
    fn set_value(&mut self, id: ElementId, value: &str);
    /// Caret/selection range in characters
    fn set_selection_range(&mut self, id: ElementId, start: usize, end: usize);

    /// Open a dialog as a modal surface
    fn show_modal(&mut self, id: ElementId);
    fn close_dialog(&mut self, id: ElementId);
    fn is_dialog_open(&self, id: ElementId) -> bool;

    /// Attribute on the document root element
    fn root_attribute(&self, name: &str) -> Option<String>;
    fn set_root_attribute(&mut self, name: &str, value: &str);

    fn cookie(&self, name: &str) -> Option<String>;
    fn set_cookie(&mut self, cookie: &Cookie);

    /// Modifier keys physically held right now
    fn held_modifiers(&self) -> KeyModifiers;

    /// `id` is `ancestor` or lies inside it
    fn is_within(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}
