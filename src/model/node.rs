// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::NodeId;

/// Sibling index of the synthetic ".." row a listing prepends below the root.
pub const SYNTHETIC_PARENT_INDEX: i32 = -1;

/// The kind of a node is derived, never stored: a node with a link is a
/// file, a node without one is a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("FILE"),
            Self::Directory => f.write_str("DIRECTORY"),
        }
    }
}

/// One bookmark-store record as handed to the panes.
///
/// `index` is the zero-based position among siblings under `parent_id`
/// (`None` = a top-level root). Ids are unique tree-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub title: String,
    pub url: Option<String>,
    pub index: i32,
    pub date_added: Option<u64>,
    pub date_group_modified: Option<u64>,
    pub readonly: bool,
}

impl BookmarkNode {
    pub fn kind(&self) -> NodeKind {
        if self.url.is_some() {
            NodeKind::File
        } else {
            NodeKind::Directory
        }
    }

    pub fn is_synthetic_parent(&self) -> bool {
        self.index == SYNTHETIC_PARENT_INDEX
    }
}

/// Creation request for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNode {
    pub parent_id: NodeId,
    pub index: usize,
    pub title: String,
    pub url: Option<String>,
}

/// Partial update for the store; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// One step of a breadcrumb trail; `id == None` is the synthetic root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub id: Option<NodeId>,
    pub title: String,
}
