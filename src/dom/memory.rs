use std::collections::{BTreeMap, BTreeSet, HashMap};

use crossterm::event::KeyModifiers;
use log::debug;

use super::{Cookie, Document, ElementId, ScrollOptions, Selector};

/// Markup description used to build or replace parts of a [`MemoryDocument`]
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub value: String,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    dialog_open: bool,
}

impl Node {
    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Class(name) => self.classes.contains(name),
            Selector::Id(name) => self.id.as_deref() == Some(name.as_str()),
            Selector::Tag(name) => self.tag.eq_ignore_ascii_case(name),
        }
    }
}

/// In-memory element tree implementing [`Document`].
///
/// Replacing a subtree allocates fresh ids for every new node, so handles
/// taken before a swap never alias the new content.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: HashMap<ElementId, Node>,
    body: ElementId,
    next_id: u64,
    focused: Option<ElementId>,
    selection: Option<(ElementId, usize, usize)>,
    last_scroll: Option<(ElementId, ScrollOptions)>,
    root_attributes: BTreeMap<String, String>,
    cookies: BTreeMap<String, Cookie>,
    modifiers: KeyModifiers,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Empty document holding only a `body` element
    pub fn new() -> Self {
        let body = ElementId::new(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            body,
            Node {
                tag: "body".to_string(),
                id: None,
                classes: BTreeSet::new(),
                attributes: BTreeMap::new(),
                text: String::new(),
                value: String::new(),
                parent: None,
                children: Vec::new(),
                dialog_open: false,
            },
        );

        Self {
            nodes,
            body,
            next_id: 1,
            focused: None,
            selection: None,
            last_scroll: None,
            root_attributes: BTreeMap::new(),
            cookies: BTreeMap::new(),
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Document whose body contains `children`
    pub fn from_specs(children: impl IntoIterator<Item = NodeSpec>) -> Self {
        let mut doc = Self::new();
        for spec in children {
            doc.append(doc.body, spec);
        }
        doc
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn append(&mut self, parent: ElementId, spec: NodeSpec) -> Option<ElementId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        let id = self.insert(Some(parent), spec);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(id);
        }
        Some(id)
    }

    fn insert(&mut self, parent: Option<ElementId>, spec: NodeSpec) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;

        self.nodes.insert(
            id,
            Node {
                tag: spec.tag,
                id: spec.id,
                classes: spec.classes.into_iter().collect(),
                attributes: spec.attributes.into_iter().collect(),
                text: spec.text,
                value: spec.value,
                parent,
                children: Vec::new(),
                dialog_open: false,
            },
        );

        let children: Vec<ElementId> = spec
            .children
            .into_iter()
            .map(|child| self.insert(Some(id), child))
            .collect();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.children = children;
        }
        id
    }

    fn remove_subtree(&mut self, id: ElementId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        for child in node.children {
            self.remove_subtree(child);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if matches!(self.selection, Some((sel, _, _)) if sel == id) {
            self.selection = None;
        }
    }

    /// Swap the children of `target` for freshly built nodes.
    ///
    /// Returns `false` when `target` is not in the document.
    pub fn replace_children(
        &mut self,
        target: ElementId,
        children: impl IntoIterator<Item = NodeSpec>,
    ) -> bool {
        let Some(old) = self.nodes.get_mut(&target).map(|n| std::mem::take(&mut n.children)) else {
            return false;
        };
        for child in old {
            self.remove_subtree(child);
        }

        let fresh: Vec<ElementId> = children
            .into_iter()
            .map(|spec| self.insert(Some(target), spec))
            .collect();
        debug!("replaced children of {:?} with {} nodes", target, fresh.len());
        if let Some(node) = self.nodes.get_mut(&target) {
            node.children = fresh;
        }
        true
    }

    /// Replace the children of the element whose id attribute is `dom_id`
    pub fn replace_region(&mut self, dom_id: &str, children: impl IntoIterator<Item = NodeSpec>) -> bool {
        match self.element_by_id(dom_id) {
            Some(target) => self.replace_children(target, children),
            None => false,
        }
    }

    pub fn replace_body(&mut self, children: impl IntoIterator<Item = NodeSpec>) {
        self.replace_children(self.body, children);
    }

    pub fn element_by_id(&self, dom_id: &str) -> Option<ElementId> {
        self.query(&Selector::id(dom_id))
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.text.as_str())
    }

    /// Text of the element and all its descendants, space separated
    pub fn text_content(&self, id: ElementId) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(text) = self.text(id).filter(|t| !t.is_empty()) {
            parts.push(text);
        }
        for node in self.descendants(id) {
            if let Some(text) = self.text(node).filter(|t| !t.is_empty()) {
                parts.push(text);
            }
        }
        parts.join(" ")
    }

    pub fn dom_id(&self, id: ElementId) -> Option<&str> {
        self.nodes.get(&id).and_then(|n| n.id.as_deref())
    }

    pub fn selection_range(&self, id: ElementId) -> Option<(usize, usize)> {
        match self.selection {
            Some((sel, start, end)) if sel == id => Some((start, end)),
            _ => None,
        }
    }

    pub fn last_scroll(&self) -> Option<(ElementId, ScrollOptions)> {
        self.last_scroll
    }

    /// Simulate the physical modifier state reported by the keyboard
    pub fn set_held_modifiers(&mut self, modifiers: KeyModifiers) {
        self.modifiers = modifiers;
    }

    /// Default action of a printable key on the focused input: insert at the caret
    pub fn insert_char(&mut self, id: ElementId, c: char) {
        let caret = self.caret(id);
        if let Some(node) = self.nodes.get_mut(&id) {
            let byte = byte_offset(&node.value, caret);
            node.value.insert(byte, c);
            self.selection = Some((id, caret + 1, caret + 1));
        }
    }

    /// Default action of backspace on the focused input
    pub fn delete_backward(&mut self, id: ElementId) {
        let caret = self.caret(id);
        if caret == 0 {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            let byte = byte_offset(&node.value, caret - 1);
            node.value.remove(byte);
            self.selection = Some((id, caret - 1, caret - 1));
        }
    }

    fn caret(&self, id: ElementId) -> usize {
        let len = self.nodes.get(&id).map(|n| n.value.chars().count()).unwrap_or(0);
        self.selection_range(id).map(|(_, end)| end.min(len)).unwrap_or(len)
    }

    fn walk(&self, root: ElementId, out: &mut Vec<ElementId>) {
        if let Some(node) = self.nodes.get(&root) {
            for &child in &node.children {
                out.push(child);
                self.walk(child, out);
            }
        }
    }

    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.walk(root, &mut out);
        out
    }
}

fn byte_offset(value: &str, chars: usize) -> usize {
    value
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

impl Document for MemoryDocument {
    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.query_all_within(self.body, selector)
    }

    fn query_all_within(&self, root: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(|n| n.matches(selector)))
            .collect()
    }

    fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        self.nodes.get(&id).and_then(|n| n.attributes.get(name).cloned())
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.classes.remove(class);
        }
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.classes.contains(class))
    }

    fn scroll_into_view(&mut self, id: ElementId, options: ScrollOptions) {
        if self.contains(id) {
            self.last_scroll = Some((id, options));
        }
    }

    fn focus(&mut self, id: ElementId) {
        if self.contains(id) {
            self.focused = Some(id);
        }
    }

    fn blur(&mut self, id: ElementId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    fn active_element(&self) -> Option<ElementId> {
        self.focused
    }

    fn value(&self, id: ElementId) -> String {
        self.nodes.get(&id).map(|n| n.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, id: ElementId, value: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.value = value.to_string();
            let len = value.chars().count();
            if matches!(self.selection, Some((sel, _, _)) if sel == id) {
                self.selection = Some((id, len, len));
            }
        }
    }

    fn set_selection_range(&mut self, id: ElementId, start: usize, end: usize) {
        if let Some(node) = self.nodes.get(&id) {
            let len = node.value.chars().count();
            self.selection = Some((id, start.min(len), end.min(len)));
        }
    }

    fn show_modal(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.dialog_open = true;
            self.focused = Some(id);
        }
    }

    fn close_dialog(&mut self, id: ElementId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.dialog_open = false;
            if self.focused.is_some_and(|f| f == id || self.is_within(f, id)) {
                self.focused = None;
            }
        }
    }

    fn is_dialog_open(&self, id: ElementId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.dialog_open)
    }

    fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.get(name).cloned()
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes.insert(name.to_string(), value.to_string());
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).map(|c| c.value.clone())
    }

    fn set_cookie(&mut self, cookie: &Cookie) {
        self.cookies.insert(cookie.name.clone(), cookie.clone());
    }

    fn held_modifiers(&self) -> KeyModifiers {
        self.modifiers
    }
}
