// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene node payloads.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Point, Vec2};
use peniko::{Brush, Color};
use smallvec::SmallVec;

use crate::NodeId;

/// Horizontal text anchor (SVG `text-anchor`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    #[default]
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

impl TextAnchor {
    /// Returns the SVG attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// A group that translates its children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupNode {
    /// Offset applied to all children.
    pub translate: Vec2,
}

/// A rectangle with its origin at the parent's origin.
#[derive(Clone, Debug, PartialEq)]
pub struct RectNode {
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke width (`0` disables the stroke).
    pub stroke_width: f64,
}

impl Default for RectNode {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            fill: Brush::Solid(Color::BLACK),
            stroke_width: 0.0,
        }
    }
}

/// A single line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    /// Anchor position relative to the parent.
    pub pos: Point,
    /// Vertical shift in em units (SVG `dy`).
    pub dy_em: f64,
    /// Displayed text.
    pub text: String,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Font size in scene units.
    pub font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke width (`0` disables the stroke).
    pub stroke_width: f64,
}

impl Default for TextNode {
    fn default() -> Self {
        Self {
            pos: Point::ZERO,
            dy_em: 0.0,
            text: String::new(),
            anchor: TextAnchor::Start,
            font_size: 12.0,
            fill: Brush::Solid(Color::BLACK),
            stroke_width: 0.0,
        }
    }
}

/// A stroked line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct LineNode {
    /// Segment geometry relative to the parent.
    pub line: Line,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width.
    pub stroke_width: f64,
}

impl Default for LineNode {
    fn default() -> Self {
        Self {
            line: Line::new(Point::ZERO, Point::ZERO),
            stroke: Brush::Solid(Color::BLACK),
            stroke_width: 1.0,
        }
    }
}

/// The kind-specific attributes of a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodePayload {
    /// A translating group.
    Group(GroupNode),
    /// A rectangle.
    Rect(RectNode),
    /// A text line.
    Text(TextNode),
    /// A line segment.
    Line(LineNode),
}

impl NodePayload {
    /// Returns the payload kind.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Group(_) => NodeKind::Group,
            Self::Rect(_) => NodeKind::Rect,
            Self::Text(_) => NodeKind::Text,
            Self::Line(_) => NodeKind::Line,
        }
    }
}

impl From<GroupNode> for NodePayload {
    fn from(value: GroupNode) -> Self {
        Self::Group(value)
    }
}

impl From<RectNode> for NodePayload {
    fn from(value: RectNode) -> Self {
        Self::Rect(value)
    }
}

impl From<TextNode> for NodePayload {
    fn from(value: TextNode) -> Self {
        Self::Text(value)
    }
}

impl From<LineNode> for NodePayload {
    fn from(value: LineNode) -> Self {
        Self::Line(value)
    }
}

/// Node kind tag, as reported in diffs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`GroupNode`].
    Group,
    /// [`RectNode`].
    Rect,
    /// [`TextNode`].
    Text,
    /// [`LineNode`].
    Line,
}

/// A node in the scene tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Class names (SVG `class`).
    pub classes: SmallVec<[&'static str; 2]>,
    /// Kind-specific attributes.
    pub payload: NodePayload,
    /// Index of the row bound to this node by a join, if any.
    pub datum: Option<usize>,
    /// Whether hover-enter/hover-exit events on this node are routed to its owner.
    pub hover: bool,
}

impl Node {
    pub(crate) fn new(id: NodeId, parent: Option<NodeId>, payload: NodePayload) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            classes: SmallVec::new(),
            payload,
            datum: None,
            hover: false,
        }
    }

    /// Returns this node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the parent id (`None` for the root).
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns child ids in paint order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` if the node carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    /// Adds or removes `class`.
    pub fn set_class(&mut self, class: &'static str, on: bool) {
        let present = self.has_class(class);
        if on && !present {
            self.classes.push(class);
        } else if !on && present {
            self.classes.retain(|c| *c != class);
        }
    }

    /// Returns the text payload, if this is a text node.
    pub fn as_text(&self) -> Option<&TextNode> {
        match &self.payload {
            NodePayload::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the rect payload, if this is a rect node.
    pub fn as_rect(&self) -> Option<&RectNode> {
        match &self.payload {
            NodePayload::Rect(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the group payload, if this is a group node.
    pub fn as_group(&self) -> Option<&GroupNode> {
        match &self.payload {
            NodePayload::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Returns the line payload, if this is a line node.
    pub fn as_line(&self) -> Option<&LineNode> {
        match &self.payload {
            NodePayload::Line(l) => Some(l),
            _ => None,
        }
    }
}
