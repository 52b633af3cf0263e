// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use super::ids::NodeId;
use super::node::{BookmarkNode, Crumb, NewNode, NodePatch};

/// Title of the synthetic root crumb (no folder selected).
pub const ROOT_TITLE: &str = "Bookmarks";

/// The in-memory bookmark tree the store runs against.
///
/// Top-level roots are readonly directories; everything below them is
/// mutable. All operations are position-preserving: a node's `index` is its
/// position in the parent's child list, and create/move/remove shift the
/// sibling run accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkTree {
    arena: BTreeMap<NodeId, TreeNode>,
    roots: Vec<NodeId>,
    next_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TreeNode {
    title: String,
    url: Option<String>,
    date_added: Option<u64>,
    date_group_modified: Option<u64>,
    readonly: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    NotFound { id: NodeId },
    NonEmptyDirectory { id: NodeId },
    ReadonlyNode { id: NodeId },
    NotADirectory { id: NodeId },
    NotAFile { id: NodeId },
    MoveIntoSelf { id: NodeId },
    DuplicateId { id: NodeId },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "no such node: {id}"),
            Self::NonEmptyDirectory { id } => write!(f, "directory is not empty: {id}"),
            Self::ReadonlyNode { id } => write!(f, "node is readonly: {id}"),
            Self::NotADirectory { id } => write!(f, "node is not a directory: {id}"),
            Self::NotAFile { id } => write!(f, "node is not a file: {id}"),
            Self::MoveIntoSelf { id } => write!(f, "cannot move a directory into itself: {id}"),
            Self::DuplicateId { id } => write!(f, "duplicate node id: {id}"),
        }
    }
}

impl std::error::Error for TreeError {}

impl Default for BookmarkTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkTree {
    pub fn new() -> Self {
        Self {
            arena: BTreeMap::new(),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    /// A fresh tree with the default readonly roots.
    pub fn seeded() -> Self {
        let mut tree = Self::new();
        for (id, title) in [("toolbar", "Toolbar"), ("menu", "Menu"), ("other", "Other")] {
            let id = NodeId::new(id).expect("seed root id");
            tree.insert_loaded(id, None, title.to_owned(), None, None, None, true)
                .expect("seed root");
        }
        tree
    }

    /// Appends a node as loaded from disk; used by the folder loader and the
    /// demo seeder. The node lands at the end of the parent's child list.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_loaded(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
        title: String,
        url: Option<String>,
        date_added: Option<u64>,
        date_group_modified: Option<u64>,
        readonly: bool,
    ) -> Result<(), TreeError> {
        if self.arena.contains_key(&id) {
            return Err(TreeError::DuplicateId { id });
        }
        if let Some(parent_id) = &parent {
            let parent_node = self
                .arena
                .get(parent_id)
                .ok_or_else(|| TreeError::NotFound { id: parent_id.clone() })?;
            if parent_node.url.is_some() {
                return Err(TreeError::NotADirectory { id: parent_id.clone() });
            }
        }

        self.arena.insert(
            id.clone(),
            TreeNode {
                title,
                url,
                date_added,
                date_group_modified,
                readonly,
                parent: parent.clone(),
                children: Vec::new(),
            },
        );
        match parent {
            Some(parent_id) => {
                self.arena
                    .get_mut(&parent_id)
                    .expect("parent checked above")
                    .children
                    .push(id);
            }
            None => self.roots.push(id),
        }
        self.bump_next_id_past_loaded();
        Ok(())
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn set_next_id(&mut self, next_id: u64) {
        self.next_id = self.next_id.max(next_id);
    }

    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.arena.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Result<BookmarkNode, TreeError> {
        let raw = self
            .arena
            .get(id)
            .ok_or_else(|| TreeError::NotFound { id: id.clone() })?;
        Ok(self.to_public(id, raw))
    }

    /// Children of `parent`, in sibling order; `None` lists the top-level
    /// roots (the synthetic root).
    pub fn children(&self, parent: Option<&NodeId>) -> Result<Vec<BookmarkNode>, TreeError> {
        let child_ids = match parent {
            None => &self.roots,
            Some(parent_id) => {
                let parent_node = self
                    .arena
                    .get(parent_id)
                    .ok_or_else(|| TreeError::NotFound { id: parent_id.clone() })?;
                if parent_node.url.is_some() {
                    return Err(TreeError::NotADirectory { id: parent_id.clone() });
                }
                &parent_node.children
            }
        };

        Ok(child_ids
            .iter()
            .map(|id| self.to_public(id, &self.arena[id]))
            .collect())
    }

    /// Breadcrumb trail from the synthetic root down to `parent` inclusive.
    pub fn breadcrumbs(&self, parent: Option<&NodeId>) -> Result<Vec<Crumb>, TreeError> {
        let mut trail = vec![Crumb {
            id: None,
            title: ROOT_TITLE.to_owned(),
        }];

        let mut chain = Vec::new();
        let mut cursor = parent.cloned();
        while let Some(id) = cursor {
            let node = self
                .arena
                .get(&id)
                .ok_or_else(|| TreeError::NotFound { id: id.clone() })?;
            chain.push(Crumb {
                id: Some(id),
                title: node.title.clone(),
            });
            cursor = node.parent.clone();
        }
        chain.reverse();
        trail.extend(chain);
        Ok(trail)
    }

    pub fn create(&mut self, new: NewNode) -> Result<BookmarkNode, TreeError> {
        {
            let parent_node = self
                .arena
                .get(&new.parent_id)
                .ok_or_else(|| TreeError::NotFound { id: new.parent_id.clone() })?;
            if parent_node.url.is_some() {
                return Err(TreeError::NotADirectory { id: new.parent_id.clone() });
            }
        }

        let id = self.allocate_id();
        let now = now_millis();
        self.arena.insert(
            id.clone(),
            TreeNode {
                title: new.title,
                url: new.url,
                date_added: Some(now),
                date_group_modified: None,
                readonly: false,
                parent: Some(new.parent_id.clone()),
                children: Vec::new(),
            },
        );

        let parent_node = self.arena.get_mut(&new.parent_id).expect("parent checked above");
        let index = new.index.min(parent_node.children.len());
        parent_node.children.insert(index, id.clone());
        parent_node.date_group_modified = Some(now);

        self.node(&id)
    }

    pub fn update(&mut self, id: &NodeId, patch: NodePatch) -> Result<BookmarkNode, TreeError> {
        {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| TreeError::NotFound { id: id.clone() })?;
            if node.readonly {
                return Err(TreeError::ReadonlyNode { id: id.clone() });
            }
            if patch.url.is_some() && node.url.is_none() {
                return Err(TreeError::NotAFile { id: id.clone() });
            }
        }

        let node = self.arena.get_mut(id).expect("node checked above");
        if let Some(title) = patch.title {
            node.title = title;
        }
        if let Some(url) = patch.url {
            node.url = Some(url);
        }
        self.node(id)
    }

    /// Moves `id` under `parent` at `index` (clamped to the child count
    /// after the node left its old position).
    pub fn move_node(
        &mut self,
        id: &NodeId,
        parent: &NodeId,
        index: usize,
    ) -> Result<BookmarkNode, TreeError> {
        {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| TreeError::NotFound { id: id.clone() })?;
            if node.readonly {
                return Err(TreeError::ReadonlyNode { id: id.clone() });
            }
            let dest = self
                .arena
                .get(parent)
                .ok_or_else(|| TreeError::NotFound { id: parent.clone() })?;
            if dest.url.is_some() {
                return Err(TreeError::NotADirectory { id: parent.clone() });
            }
        }
        if self.is_same_or_descendant(parent, id) {
            return Err(TreeError::MoveIntoSelf { id: id.clone() });
        }

        let now = now_millis();
        let old_parent = self.arena[id].parent.clone();
        match &old_parent {
            Some(old_parent_id) => {
                let old = self.arena.get_mut(old_parent_id).expect("old parent exists");
                old.children.retain(|child| child != id);
                old.date_group_modified = Some(now);
            }
            None => self.roots.retain(|root| root != id),
        }

        let dest = self.arena.get_mut(parent).expect("destination checked above");
        let index = index.min(dest.children.len());
        dest.children.insert(index, id.clone());
        dest.date_group_modified = Some(now);
        self.arena.get_mut(id).expect("node checked above").parent = Some(parent.clone());

        self.node(id)
    }

    /// Removes `id`. Without `force`, a directory that still has children
    /// fails with [`TreeError::NonEmptyDirectory`].
    pub fn remove(&mut self, id: &NodeId, force: bool) -> Result<(), TreeError> {
        {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| TreeError::NotFound { id: id.clone() })?;
            if node.readonly {
                return Err(TreeError::ReadonlyNode { id: id.clone() });
            }
            if node.url.is_none() && !node.children.is_empty() && !force {
                return Err(TreeError::NonEmptyDirectory { id: id.clone() });
            }
        }

        let now = now_millis();
        match self.arena[id].parent.clone() {
            Some(parent_id) => {
                let parent = self.arena.get_mut(&parent_id).expect("parent exists");
                parent.children.retain(|child| child != id);
                parent.date_group_modified = Some(now);
            }
            None => self.roots.retain(|root| root != id),
        }

        let mut doomed = vec![id.clone()];
        while let Some(next) = doomed.pop() {
            if let Some(node) = self.arena.remove(&next) {
                doomed.extend(node.children);
            }
        }
        Ok(())
    }

    fn to_public(&self, id: &NodeId, raw: &TreeNode) -> BookmarkNode {
        let index = match &raw.parent {
            Some(parent_id) => self.arena[parent_id]
                .children
                .iter()
                .position(|child| child == id),
            None => self.roots.iter().position(|root| root == id),
        };
        BookmarkNode {
            id: id.clone(),
            parent_id: raw.parent.clone(),
            title: raw.title.clone(),
            url: raw.url.clone(),
            index: index.map(|i| i as i32).unwrap_or_default(),
            date_added: raw.date_added,
            date_group_modified: raw.date_group_modified,
            readonly: raw.readonly,
        }
    }

    fn is_same_or_descendant(&self, candidate: &NodeId, ancestor: &NodeId) -> bool {
        let mut cursor = Some(candidate.clone());
        while let Some(id) = cursor {
            if id == *ancestor {
                return true;
            }
            cursor = self.arena.get(&id).and_then(|node| node.parent.clone());
        }
        false
    }

    fn allocate_id(&mut self) -> NodeId {
        loop {
            let candidate = NodeId::new(format!("n{}", self.next_id)).expect("generated id");
            self.next_id = self.next_id.saturating_add(1);
            if !self.arena.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    fn bump_next_id_past_loaded(&mut self) {
        if let Some(max_numeric) = self
            .arena
            .keys()
            .filter_map(|id| id.as_str().strip_prefix('n'))
            .filter_map(|digits| digits.parse::<u64>().ok())
            .max()
        {
            self.next_id = self.next_id.max(max_numeric.saturating_add(1));
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
