//! Ownership, identity and paint order of drawn elements.

use log::debug;
use serde_json::Value;

use super::{Element, ElementKind, ElementPatch, Resource, Style};
use crate::error::CanvasError;
use crate::schema::{self, SchemaName, ValidationContext};
use crate::util::{Point, Size, SurfaceSize};

/// Stores elements in insertion order and hands out ids and z-indices.
///
/// Ids start at 0 and z-indices at 1; both only ever grow, so an erased id is
/// never handed out again and insertion order equals paint order.
#[derive(Debug)]
pub struct ElementRegistry {
    elements: Vec<Element>,
    next_id: u64,
    next_zindex: u64,
    active: Option<u64>,
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            next_id: 0,
            next_zindex: 1,
            active: None,
        }
    }

    /// Stores a new element on top of every existing one.
    ///
    /// Arguments are assumed valid; the draw operations check them first.
    pub fn create(
        &mut self,
        kind: ElementKind,
        position: Point,
        size: Size,
        resource: Resource,
        style: Style,
        fixed: bool,
    ) -> &Element {
        let element = Element {
            id: self.next_id,
            zindex: self.next_zindex,
            kind,
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
            resource,
            style,
            fixed,
        };
        self.next_id += 1;
        self.next_zindex += 1;

        debug!(
            "Created {} element {} (zindex {})",
            element.kind.as_str(),
            element.id,
            element.zindex
        );
        self.elements.push(element);
        &self.elements[self.elements.len() - 1]
    }

    pub fn get(&self, id: u64) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// All elements in insertion order.
    pub fn all(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements sorted by ascending z-index (stable).
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.zindex);
        ordered
    }

    /// Topmost element whose bounds contain `point`, fixed or not.
    pub fn hit_test(&self, point: Point) -> Option<&Element> {
        self.elements
            .iter()
            .filter(|e| e.bounds().contains(point))
            .max_by_key(|e| e.zindex)
    }

    /// Validates `patch` against the `element` schema and merges it into the
    /// element with `id`.
    ///
    /// Returns the element as it was just before the merge. Nothing changes
    /// when validation fails, the id is unknown or the patch does not fit.
    pub fn update(
        &mut self,
        id: u64,
        patch: &Value,
        surface: SurfaceSize,
    ) -> Result<Element, CanvasError> {
        let scope = RegistryScope {
            registry: self,
            surface,
        };
        if let Err(err) = schema::check(patch, SchemaName::Element, &scope) {
            debug!("Rejected update of element {}: {}", id, err);
            return Err(err.into());
        }

        let index = self.index_of(id).ok_or(CanvasError::NotFound(id))?;
        let typed: ElementPatch = serde_json::from_value(patch.clone())
            .map_err(|err| CanvasError::Patch(err.to_string()))?;

        let previous = self.elements[index].clone();
        let mut updated = previous.clone();
        updated.apply(&typed).map_err(CanvasError::Patch)?;
        self.elements[index] = updated;

        Ok(previous)
    }

    /// Removes the element with `id`, wherever it sits in storage.
    ///
    /// Clears the active selection when it pointed at the erased element.
    pub fn erase(&mut self, id: u64) -> Option<Element> {
        let index = self.index_of(id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        debug!("Erased element {}", id);
        Some(self.elements.remove(index))
    }

    pub fn active(&self) -> Option<&Element> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<u64> {
        self.active
    }

    /// Selects `id` (which must be live) or clears the selection with `None`.
    pub fn set_active(&mut self, id: Option<u64>) {
        self.active = id.filter(|id| self.get(*id).is_some());
    }
}

/// Validation view of a registry on a surface of a given size.
pub struct RegistryScope<'a> {
    pub registry: &'a ElementRegistry,
    pub surface: SurfaceSize,
}

impl ValidationContext for RegistryScope<'_> {
    fn surface_width(&self) -> f64 {
        self.surface.width
    }

    fn surface_height(&self) -> f64 {
        self.surface.height
    }

    fn is_live(&self, id: u64) -> bool {
        self.registry.get(id).is_some()
    }
}
