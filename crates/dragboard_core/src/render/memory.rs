//! In-memory render host.
//!
//! Keeps an element tree rooted at the `app` container. Used by tests and the
//! CLI demo in place of a real UI toolkit.

use super::{ElementId, InsertPosition, MountRequest, RenderError, RenderHost, RenderResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write;

/// Id of the root container every board mounts into.
pub const ROOT_CONTAINER_ID: &str = "app";

/// One mounted element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryElement {
    pub id: ElementId,
    pub template_id: String,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub text: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
}

impl MemoryElement {
    fn container(id: &str) -> Self {
        Self {
            id: id.to_string(),
            template_id: String::new(),
            parent: None,
            children: Vec::new(),
            text: BTreeMap::new(),
            classes: BTreeSet::new(),
        }
    }

    pub fn text(&self, slot: &str) -> Option<&str> {
        self.text.get(slot).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Element tree host.
#[derive(Debug, Clone)]
pub struct MemoryRenderHost {
    elements: HashMap<ElementId, MemoryElement>,
    /// When set, only these templates can be mounted.
    templates: Option<BTreeSet<String>>,
    next_generated_id: u64,
}

impl Default for MemoryRenderHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRenderHost {
    /// Creates a host with an empty `app` container accepting any template.
    pub fn new() -> Self {
        let mut elements = HashMap::new();
        elements.insert(
            ROOT_CONTAINER_ID.to_string(),
            MemoryElement::container(ROOT_CONTAINER_ID),
        );
        Self {
            elements,
            templates: None,
            next_generated_id: 0,
        }
    }

    /// Restricts mounting to the listed templates.
    pub fn with_templates<I, S>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.templates = Some(templates.into_iter().map(Into::into).collect());
        self
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.get(id)
    }

    /// Children of `id` in display order.
    pub fn children(&self, id: &str) -> Vec<&MemoryElement> {
        self.elements
            .get(id)
            .map(|element| {
                element
                    .children
                    .iter()
                    .filter_map(|child| self.elements.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Text of `slot` on every child of `id`, in display order.
    pub fn child_texts(&self, id: &str, slot: &str) -> Vec<String> {
        self.children(id)
            .into_iter()
            .filter_map(|child| child.text(slot).map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Indented outline of the tree below `app`, one element per line.
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(ROOT_CONTAINER_ID, 0, &mut out);
        out
    }

    fn write_outline(&self, id: &str, depth: usize, out: &mut String) {
        let Some(element) = self.elements.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}#{}", element.id);
        if !element.template_id.is_empty() {
            let _ = write!(out, " <{}>", element.template_id);
        }
        if !element.classes.is_empty() {
            let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
            let _ = write!(out, " .{}", classes.join("."));
        }
        out.push('\n');
        for (slot, text) in &element.text {
            let _ = writeln!(out, "{indent}  {slot}: {text}");
        }
        for child in &element.children {
            self.write_outline(child, depth + 1, out);
        }
    }

    fn remove_subtree(&mut self, id: &str) {
        if let Some(element) = self.elements.remove(id) {
            for child in element.children {
                self.remove_subtree(&child);
            }
        }
    }

    fn element_mut(&mut self, id: &str) -> RenderResult<&mut MemoryElement> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| RenderError::ElementNotFound(id.to_string()))
    }
}

impl RenderHost for MemoryRenderHost {
    fn mount(&mut self, request: &MountRequest) -> RenderResult<ElementId> {
        if let Some(templates) = &self.templates {
            if !templates.contains(request.template_id.as_str()) {
                return Err(RenderError::UnknownTemplate(request.template_id.clone()));
            }
        }
        if !self.elements.contains_key(request.container_id.as_str()) {
            return Err(RenderError::ContainerNotFound(request.container_id.clone()));
        }

        let id = match &request.element_id {
            Some(id) => id.clone(),
            None => {
                self.next_generated_id += 1;
                format!("{}-{}", request.template_id, self.next_generated_id)
            }
        };
        if self.elements.contains_key(id.as_str()) {
            return Err(RenderError::DuplicateElementId(id));
        }

        let container = self.element_mut(request.container_id.as_str())?;
        match request.position {
            InsertPosition::Start => container.children.insert(0, id.clone()),
            InsertPosition::End => container.children.push(id.clone()),
        }

        let mut element = MemoryElement::container(id.as_str());
        element.template_id = request.template_id.clone();
        element.parent = Some(request.container_id.clone());
        self.elements.insert(id.clone(), element);
        Ok(id)
    }

    fn set_text(&mut self, element_id: &str, slot: &str, text: &str) -> RenderResult<()> {
        self.element_mut(element_id)?
            .text
            .insert(slot.to_string(), text.to_string());
        Ok(())
    }

    fn clear_children(&mut self, element_id: &str) -> RenderResult<()> {
        let children = std::mem::take(&mut self.element_mut(element_id)?.children);
        for child in children {
            self.remove_subtree(&child);
        }
        Ok(())
    }

    fn set_class(&mut self, element_id: &str, class: &str, enabled: bool) -> RenderResult<()> {
        let element = self.element_mut(element_id)?;
        if enabled {
            element.classes.insert(class.to_string());
        } else {
            element.classes.remove(class);
        }
        Ok(())
    }
}
