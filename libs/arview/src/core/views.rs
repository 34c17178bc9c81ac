//! Minimal view-hierarchy model.
//!
//! The windowing layer composites children by insertion order, not by an
//! explicit z-index; attaching the render surface before the overlay is what
//! puts the overlay on top. This module models exactly that: an ordered list
//! of children under one root content view.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a caller-supplied overlay layout resource.
///
/// `LayoutId(0)` is reserved as the invalid id; inflating it yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutId(pub u32);

/// Identity of one view instance within the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

fn next_view_id() -> ViewId {
    ViewId(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
}

/// Role of a view in the compositing stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// The drawable render surface.
    Surface,
    /// The optional GUI overlay inflated from a layout resource.
    Overlay,
}

/// One child view. Cloning preserves identity (same [`ViewId`]).
#[derive(Debug, Clone)]
pub struct View {
    id: ViewId,
    kind: ViewKind,
    layout: Option<LayoutId>,
}

impl View {
    pub fn surface() -> Self {
        Self {
            id: next_view_id(),
            kind: ViewKind::Surface,
            layout: None,
        }
    }

    pub fn overlay(layout: LayoutId) -> Self {
        Self {
            id: next_view_id(),
            kind: ViewKind::Overlay,
            layout: Some(layout),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn layout(&self) -> Option<LayoutId> {
        self.layout
    }
}

/// Inflate an overlay view from a layout resource.
///
/// Returns `None` for the invalid id; callers log that as an error and carry
/// on without an overlay.
pub fn inflate(layout: LayoutId) -> Option<View> {
    if layout.0 == 0 {
        return None;
    }
    Some(View::overlay(layout))
}

/// The root content view: an ordered stack of children.
#[derive(Debug, Default)]
pub struct ContentView {
    children: Vec<View>,
}

impl ContentView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an empty root, dropping any previous children.
    pub fn install_empty(&mut self) {
        self.children.clear();
    }

    /// Append a child. Insertion order is compositing order: later children
    /// draw on top of earlier ones.
    pub fn attach(&mut self, view: View) -> ViewId {
        let id = view.id();
        debug_assert!(
            !self.is_attached(id),
            "view attached twice to the content view"
        );
        self.children.push(view);
        id
    }

    pub fn is_attached(&self, id: ViewId) -> bool {
        self.children.iter().any(|v| v.id() == id)
    }

    /// Move a child to the top of the stack. Returns false when the child is
    /// not attached.
    pub fn bring_to_front(&mut self, id: ViewId) -> bool {
        let Some(pos) = self.children.iter().position(|v| v.id() == id) else {
            return false;
        };
        let view = self.children.remove(pos);
        self.children.push(view);
        true
    }

    /// Remove every child (the Stop step).
    pub fn remove_all(&mut self) {
        self.children.clear();
    }

    /// Drop view-to-native associations (the Destroy step). With ownership
    /// released here there is nothing left for a collector pass to find.
    pub fn unbind(&mut self) {
        self.children.clear();
    }

    /// Compositing order, bottom to top.
    pub fn stacking_order(&self) -> Vec<ViewKind> {
        self.children.iter().map(|v| v.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
