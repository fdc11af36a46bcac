// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small retained scene for SVG-like chart output.
//!
//! The scene is the rendering surface charts draw into:
//! - **Nodes** (groups, rects, text, lines) are keyed by stable [`NodeId`]s, so
//!   "ensure this node exists" is an explicit lookup-or-insert rather than an
//!   implicit tree mutation.
//! - **Joins** reconcile a row count against the keyed children of a parent,
//!   reporting entering, updating and exiting rows.
//! - **Measurement** reports the rendered advance width of a placed text node,
//!   through a pluggable [`hbar_text::TextMeasurer`].
//! - **Commits** diff the tree against the previous commit, so repeated renders
//!   with unchanged inputs are observably idempotent.
//!
//! The tree serializes to an SVG document with [`Scene::to_svg_string`].

#![no_std]

extern crate alloc;

mod id;
mod node;
mod scene;
mod svg;

pub use hbar_text::{TextMeasurer, TextStyle};
pub use id::NodeId;
pub use node::{
    GroupNode, LineNode, Node, NodeKind, NodePayload, RectNode, TextAnchor, TextNode,
};
pub use scene::{Ensure, Insert, Join, Scene, SceneDiff, SceneError};
