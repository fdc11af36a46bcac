// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene tree.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use hbar_text::{FontFamily, HeuristicTextMeasurer, TextMeasurer, TextStyle};
use kurbo::Size;

use crate::node::{GroupNode, LineNode, Node, NodeKind, NodePayload, RectNode, TextNode};
use crate::NodeId;

/// Structural errors reported by scene mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The parent passed to an insertion does not exist.
    #[error("parent node {0:?} does not exist")]
    MissingParent(NodeId),
    /// An existing node was ensured under a different parent.
    #[error("node {id:?} already exists under {existing:?}, not {requested:?}")]
    ParentMismatch {
        /// The ensured node.
        id: NodeId,
        /// Its current parent.
        existing: Option<NodeId>,
        /// The parent passed to `ensure`.
        requested: NodeId,
    },
}

/// Where a newly created node is placed among its siblings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Insert {
    /// After all existing siblings (painted last).
    #[default]
    Append,
    /// Before all existing siblings (painted first).
    First,
}

/// Outcome of [`Scene::ensure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ensure {
    /// The node already existed and was reused.
    Existing,
    /// The node was created.
    Created,
}

/// Outcome of [`Scene::join`]: the rows reconciled against a parent's keyed children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Join {
    /// Groups created for rows that had no node.
    pub enter: Vec<NodeId>,
    /// Groups reused for rows that already had a node.
    pub update: Vec<NodeId>,
    /// Groups removed because their row no longer exists.
    pub exit: Vec<NodeId>,
}

impl Join {
    /// All live row groups, in row order.
    pub fn rows(&self) -> impl Iterator<Item = NodeId> + '_ {
        // Entering rows always follow updating rows in an index-keyed join.
        self.update.iter().chain(self.enter.iter()).copied()
    }
}

/// A change between two commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneDiff {
    /// The node did not exist at the previous commit.
    Enter {
        /// Node id.
        id: NodeId,
        /// Node kind.
        kind: NodeKind,
    },
    /// The node's attributes, classes or children changed.
    Update {
        /// Node id.
        id: NodeId,
        /// Node kind.
        kind: NodeKind,
    },
    /// The node was removed.
    Exit {
        /// Node id.
        id: NodeId,
        /// Node kind at the previous commit.
        kind: NodeKind,
    },
}

/// A retained tree of keyed nodes rooted at [`NodeId::ROOT`].
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    committed: HashMap<NodeId, Node>,
    size: Size,
    font_family: FontFamily,
    measurer: Box<dyn TextMeasurer>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("nodes", &self.nodes.len())
            .field("committed", &self.committed.len())
            .field("size", &self.size)
            .field("font_family", &self.font_family)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(HeuristicTextMeasurer::default())
    }
}

impl Scene {
    /// Creates an empty scene measuring text with `measurer`.
    pub fn new(measurer: impl TextMeasurer + 'static) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId::ROOT,
            Node::new(NodeId::ROOT, None, GroupNode::default().into()),
        );
        Self {
            nodes,
            committed: HashMap::new(),
            size: Size::ZERO,
            font_family: FontFamily::SansSerif,
            measurer: Box::new(measurer),
        }
    }

    /// Returns the outer size of the surface.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets the outer size of the surface.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Returns the font family used for measurement and output.
    pub fn font_family(&self) -> &FontFamily {
        &self.font_family
    }

    /// Sets the font family used for measurement and output.
    pub fn set_font_family(&mut self, font_family: FontFamily) {
        self.font_family = font_family;
    }

    /// Returns the number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Returns `true` if `id` exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Returns a node for mutation.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Returns the children of `id` in paint order (empty if `id` is missing).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map_or(&[], |n| n.children.as_slice())
    }

    /// Returns the group payload of `id` for mutation.
    pub fn group_mut(&mut self, id: NodeId) -> Option<&mut GroupNode> {
        match &mut self.nodes.get_mut(&id)?.payload {
            NodePayload::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the rect payload of `id` for mutation.
    pub fn rect_mut(&mut self, id: NodeId) -> Option<&mut RectNode> {
        match &mut self.nodes.get_mut(&id)?.payload {
            NodePayload::Rect(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the text payload of `id` for mutation.
    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut TextNode> {
        match &mut self.nodes.get_mut(&id)?.payload {
            NodePayload::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the line payload of `id` for mutation.
    pub fn line_mut(&mut self, id: NodeId) -> Option<&mut LineNode> {
        match &mut self.nodes.get_mut(&id)?.payload {
            NodePayload::Line(l) => Some(l),
            _ => None,
        }
    }

    /// Looks up `id` under `parent`, creating it from `init` if it does not exist.
    ///
    /// An existing node is reused as-is (its payload is not reset), so calling this
    /// on every render never duplicates nodes.
    pub fn ensure(
        &mut self,
        parent: NodeId,
        id: NodeId,
        insert: Insert,
        class: &'static str,
        init: impl FnOnce() -> NodePayload,
    ) -> Result<Ensure, SceneError> {
        if let Some(existing) = self.nodes.get(&id) {
            if existing.parent != Some(parent) {
                return Err(SceneError::ParentMismatch {
                    id,
                    existing: existing.parent,
                    requested: parent,
                });
            }
            return Ok(Ensure::Existing);
        }
        let Some(parent_node) = self.nodes.get_mut(&parent) else {
            return Err(SceneError::MissingParent(parent));
        };
        match insert {
            Insert::Append => parent_node.children.push(id),
            Insert::First => parent_node.children.insert(0, id),
        }
        let mut node = Node::new(id, Some(parent), init());
        if !class.is_empty() {
            node.classes.push(class);
        }
        self.nodes.insert(id, node);
        Ok(Ensure::Created)
    }

    /// Removes `id` and its subtree. Removing the root clears its children instead.
    ///
    /// Returns `false` if `id` did not exist.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if id == NodeId::ROOT {
            for child in node.children.clone() {
                self.remove(child);
            }
            return true;
        }
        let parent = node.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&next) {
                stack.extend(removed.children);
            }
        }
        true
    }

    /// Reconciles `count` rows against the `class` children of `parent`.
    ///
    /// Row `i` is keyed as `namespace.child(i)`. Missing rows get a fresh group
    /// (bound to `i`, appended to `parent`); rows at or beyond `count` are removed
    /// with their subtrees.
    pub fn join(
        &mut self,
        parent: NodeId,
        namespace: NodeId,
        count: usize,
        class: &'static str,
    ) -> Result<Join, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::MissingParent(parent));
        }
        let mut out = Join::default();

        let stale: Vec<NodeId> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|c| {
                self.nodes
                    .get(c)
                    .is_some_and(|n| n.has_class(class) && n.datum.is_none_or(|row| row >= count))
            })
            .collect();
        for id in stale {
            self.remove(id);
            out.exit.push(id);
        }

        for row in 0..count {
            let id = namespace.child(row as u64);
            let created = self.ensure(parent, id, Insert::Append, class, || {
                GroupNode::default().into()
            })?;
            if let Some(node) = self.nodes.get_mut(&id) {
                node.datum = Some(row);
            }
            match created {
                Ensure::Created => out.enter.push(id),
                Ensure::Existing => out.update.push(id),
            }
        }
        Ok(out)
    }

    /// Returns the rendered advance width of the text node `id`.
    ///
    /// Missing nodes, non-text nodes and empty text all measure `0`.
    pub fn measure_text(&self, id: NodeId) -> f64 {
        let Some(text) = self.nodes.get(&id).and_then(Node::as_text) else {
            return 0.0;
        };
        self.measure_str(&text.text, text.font_size)
    }

    /// Measures arbitrary text with the scene's measurer and font family.
    pub fn measure_str(&self, text: &str, font_size: f64) -> f64 {
        let style = TextStyle::new(font_size).with_family(self.font_family.clone());
        self.measurer.advance_width(text, &style)
    }

    /// Finds the nearest ancestor-or-self of `id` that listens for hover, with its bound row.
    pub fn hover_target(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.nodes.get(&current)?;
            if node.hover {
                return node.datum.map(|row| (current, row));
            }
            cursor = node.parent;
        }
        None
    }

    /// Returns the subtree of `id` in depth-first paint order (including `id`).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Returns every node carrying `class`, in paint order.
    pub fn find_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    /// Diffs the tree against the previous commit and makes it the new baseline.
    ///
    /// Entering and updating nodes are reported in paint order, followed by exits
    /// ordered by id.
    pub fn commit(&mut self) -> Vec<SceneDiff> {
        let mut diffs = Vec::new();
        for id in self.descendants(NodeId::ROOT) {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let kind = node.payload.kind();
            match self.committed.get(&id) {
                None => diffs.push(SceneDiff::Enter { id, kind }),
                Some(old) if old != node => diffs.push(SceneDiff::Update { id, kind }),
                Some(_) => {}
            }
        }
        let mut exits: Vec<(NodeId, NodeKind)> = self
            .committed
            .iter()
            .filter(|(id, _)| !self.nodes.contains_key(*id))
            .map(|(id, old)| (*id, old.payload.kind()))
            .collect();
        exits.sort_by_key(|(id, _)| *id);
        diffs.extend(exits.into_iter().map(|(id, kind)| SceneDiff::Exit { id, kind }));
        self.committed = self.nodes.clone();
        diffs
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use hbar_text::FixedAdvanceMeasurer;

    use super::*;

    fn text(s: &str) -> NodePayload {
        TextNode {
            text: s.into(),
            ..TextNode::default()
        }
        .into()
    }

    #[test]
    fn ensure_reuses_existing_nodes() {
        let mut scene = Scene::default();
        let axis = NodeId::ROOT.named("axis");
        let first = scene
            .ensure(NodeId::ROOT, axis, Insert::First, "y-axis", || {
                GroupNode::default().into()
            })
            .unwrap();
        let second = scene
            .ensure(NodeId::ROOT, axis, Insert::First, "y-axis", || {
                GroupNode::default().into()
            })
            .unwrap();
        assert_eq!(first, Ensure::Created);
        assert_eq!(second, Ensure::Existing);
        assert_eq!(scene.children(NodeId::ROOT), &[axis]);
    }

    #[test]
    fn insert_first_places_node_before_siblings() {
        let mut scene = Scene::default();
        let a = NodeId::ROOT.named("a");
        let b = NodeId::ROOT.named("b");
        scene
            .ensure(NodeId::ROOT, a, Insert::Append, "", || GroupNode::default().into())
            .unwrap();
        scene
            .ensure(NodeId::ROOT, b, Insert::First, "", || GroupNode::default().into())
            .unwrap();
        assert_eq!(scene.children(NodeId::ROOT), &[b, a]);
    }

    #[test]
    fn ensure_under_missing_parent_fails() {
        let mut scene = Scene::default();
        let ghost = NodeId::from_raw(42);
        let err = scene
            .ensure(ghost, ghost.named("x"), Insert::Append, "", || {
                GroupNode::default().into()
            })
            .unwrap_err();
        assert_eq!(err, SceneError::MissingParent(ghost));
    }

    #[test]
    fn join_enters_updates_and_exits_rows() {
        let mut scene = Scene::default();
        let ns = NodeId::ROOT.named("bars");

        let j = scene.join(NodeId::ROOT, ns, 3, "bar").unwrap();
        assert_eq!(j.enter.len(), 3);
        assert!(j.update.is_empty() && j.exit.is_empty());

        let j = scene.join(NodeId::ROOT, ns, 2, "bar").unwrap();
        assert!(j.enter.is_empty());
        assert_eq!(j.update, std::vec![ns.child(0), ns.child(1)]);
        assert_eq!(j.exit, std::vec![ns.child(2)]);
        assert!(!scene.contains(ns.child(2)));

        let j = scene.join(NodeId::ROOT, ns, 4, "bar").unwrap();
        assert_eq!(j.enter, std::vec![ns.child(2), ns.child(3)]);
        assert_eq!(scene.get(ns.child(3)).unwrap().datum, Some(3));
        assert_eq!(j.rows().count(), 4);
    }

    #[test]
    fn remove_drops_the_whole_subtree() {
        let mut scene = Scene::default();
        let g = NodeId::ROOT.named("g");
        let t = g.named("t");
        scene
            .ensure(NodeId::ROOT, g, Insert::Append, "", || GroupNode::default().into())
            .unwrap();
        scene.ensure(g, t, Insert::Append, "", || text("hi")).unwrap();
        assert!(scene.remove(g));
        assert!(!scene.contains(t));
        assert!(scene.is_empty());
    }

    #[test]
    fn measure_text_reports_placed_text_width() {
        let mut scene = Scene::new(FixedAdvanceMeasurer::new(10.0));
        let t = NodeId::ROOT.named("t");
        scene
            .ensure(NodeId::ROOT, t, Insert::Append, "", || text("abc"))
            .unwrap();
        assert_eq!(scene.measure_text(t), 30.0);
        assert_eq!(scene.measure_text(NodeId::ROOT.named("missing")), 0.0);
        assert_eq!(scene.measure_text(NodeId::ROOT), 0.0);
    }

    #[test]
    fn hover_target_walks_up_to_listening_group() {
        let mut scene = Scene::default();
        let ns = NodeId::ROOT.named("bars");
        let j = scene.join(NodeId::ROOT, ns, 2, "bar").unwrap();
        let g = j.enter[1];
        scene.get_mut(g).unwrap().hover = true;
        let rect = g.named("rect");
        scene
            .ensure(g, rect, Insert::Append, "", || RectNode::default().into())
            .unwrap();
        assert_eq!(scene.hover_target(rect), Some((g, 1)));
        assert_eq!(scene.hover_target(j.enter[0]), None);
    }

    #[test]
    fn commit_reports_only_changes() {
        let mut scene = Scene::default();
        let t = NodeId::ROOT.named("t");
        scene
            .ensure(NodeId::ROOT, t, Insert::Append, "", || text("a"))
            .unwrap();
        let diffs = scene.commit();
        assert!(diffs.contains(&SceneDiff::Enter {
            id: t,
            kind: NodeKind::Text
        }));

        assert!(scene.commit().is_empty());

        scene.text_mut(t).unwrap().text = "b".into();
        scene.text_mut(t).unwrap().text = "a".into();
        assert!(scene.commit().is_empty(), "net-zero edits are not updates");

        scene.text_mut(t).unwrap().text = "b".into();
        assert_eq!(
            scene.commit(),
            std::vec![SceneDiff::Update {
                id: t,
                kind: NodeKind::Text
            }]
        );

        scene.remove(t);
        let diffs = scene.commit();
        assert!(diffs.contains(&SceneDiff::Exit {
            id: t,
            kind: NodeKind::Text
        }));
    }
}
