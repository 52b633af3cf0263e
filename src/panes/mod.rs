// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The pane coordinator: two list views, one active side, and the
//! command-enablement rules recomputed on every selection change.

use crate::model::{NodeId, NodeKind};
use crate::view::ListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One pane: its list view plus the parent id it currently displays
/// (`None` = the synthetic root).
#[derive(Debug, Default)]
pub struct PaneState {
    pub view: ListView,
    parent: Option<NodeId>,
}

impl PaneState {
    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Derived command availability; recomputed from the active pane's
/// selection and both panes' full content lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandStates {
    pub move_left: bool,
    pub move_right: bool,
    pub trash: bool,
    pub copy_link: bool,
    pub edit_link: bool,
    pub edit_title: bool,
    pub new_file: bool,
    pub new_directory: bool,
}

/// Owns exactly two list views and tracks which is active.
#[derive(Debug)]
pub struct Panes {
    left: PaneState,
    right: PaneState,
    active: Side,
}

impl Default for Panes {
    fn default() -> Self {
        Self::new()
    }
}

impl Panes {
    pub fn new() -> Self {
        Self {
            left: PaneState::default(),
            right: PaneState::default(),
            active: Side::Left,
        }
    }

    pub fn active(&self) -> Side {
        self.active
    }

    pub fn focus(&mut self, side: Side) {
        self.active = side;
    }

    pub fn pane(&self, side: Side) -> &PaneState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn pane_mut(&mut self, side: Side) -> &mut PaneState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn active_pane(&self) -> &PaneState {
        self.pane(self.active)
    }

    pub fn active_pane_mut(&mut self) -> &mut PaneState {
        self.pane_mut(self.active)
    }

    pub fn view_mut(&mut self, side: Side) -> &mut ListView {
        &mut self.pane_mut(side).view
    }

    pub fn set_parent(&mut self, side: Side, parent: Option<NodeId>) {
        self.pane_mut(side).parent = parent;
    }

    /// Recomputes command availability from the current selection.
    ///
    /// Cross-pane moves are disabled outright when the selection contains a
    /// readonly node or both panes display the same parent (a self-move is
    /// meaningless). Moving a directory is additionally blocked when the
    /// destination pane's full id list is a positional prefix of the source
    /// pane's, a sibling-list approximation of "into its own descendant".
    pub fn changed(&self) -> CommandStates {
        let active = self.active;
        let entries = self.active_pane().view.entries(true);

        let readonly = entries.iter().any(|entry| entry.readonly);
        let directory = entries.iter().any(|entry| entry.kind() == NodeKind::Directory);
        let file = entries.iter().any(|entry| entry.kind() == NodeKind::File);
        let mirror = self.left.parent == self.right.parent;

        let mut states = CommandStates::default();

        if !(readonly || mirror) {
            states.move_left = {
                let mut movable = active == Side::Right;
                if movable && self.left.is_root() {
                    movable = false;
                }
                if movable && directory && self.lists_prefix(Side::Left, Side::Right) {
                    movable = false;
                }
                movable
            };
            states.move_right = {
                let mut movable = active == Side::Left;
                if movable && self.right.is_root() {
                    movable = false;
                }
                if movable && directory && self.lists_prefix(Side::Right, Side::Left) {
                    movable = false;
                }
                movable
            };
        }

        states.trash = !readonly;
        states.copy_link = file;
        states.edit_link = !readonly && file && entries.len() == 1;
        states.edit_title = !readonly && entries.len() == 1;
        states.new_file = !self.active_pane().is_root();
        states.new_directory = states.new_file;

        states
    }

    /// Whether `prefix_side`'s full id list is a positional prefix of
    /// `of_side`'s.
    fn lists_prefix(&self, prefix_side: Side, of_side: Side) -> bool {
        let prefix = self.pane(prefix_side).view.entries(false);
        let of = self.pane(of_side).view.entries(false);
        if prefix.len() > of.len() {
            return false;
        }
        prefix.iter().zip(of.iter()).all(|(a, b)| a.id == b.id)
    }
}
