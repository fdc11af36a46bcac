// Copyright 2025 the hbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable node identity.

/// A stable identity for a scene node.
///
/// Ids are derived structurally (`parent.named("viewport")`, `bars.child(row)`),
/// so the same logical node gets the same id on every render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// The scene root (the outer `<svg>` element).
    pub const ROOT: Self = Self(0);

    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives the id of a child keyed by `key` (typically a row index).
    #[must_use]
    pub fn child(self, key: u64) -> Self {
        Self(mix(self.0.rotate_left(23) ^ mix(key.wrapping_add(0x9e37_79b9_7f4a_7c15))))
    }

    /// Derives the id of a child keyed by a role name.
    #[must_use]
    pub fn named(self, name: &str) -> Self {
        // FNV-1a over the name bytes.
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in name.bytes() {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0000_0100_0000_01b3);
        }
        self.child(h)
    }
}

/// `SplitMix64` finalizer.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
