// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The list view: one pane's rows, selection state, and navigation.
//!
//! This layer is headless; it owns the selection/navigation model and emits
//! typed [`ViewEvent`]s that the shell drains, while all drawing stays in
//! `tui`. Rows are replaced wholesale on every [`ListView::build`].

use std::collections::VecDeque;

use crate::model::{BookmarkNode, NodeId};

/// Minimum column width in terminal cells; a divider drag that would push
/// either adjacent column below this floor is ignored.
pub const MIN_COLUMN_WIDTH: u16 = 4;

/// Modifier keys accompanying a click, keypress, or submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const EXTEND: Self = Self {
        shift: false,
        ctrl: true,
        meta: false,
    };

    fn any(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }

    fn toggle(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Events a list view emits; the owner drains them after every interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SelectionChanged,
    Submit {
        entries: Vec<BookmarkNode>,
        modifiers: Modifiers,
    },
    Beep,
}

/// One rendered record: a node snapshot plus transient UI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub node: BookmarkNode,
    pub key: Option<char>,
    pub selected: bool,
    pub last_selected: bool,
}

impl EntryRow {
    fn new(node: BookmarkNode, selected: bool) -> Self {
        let key = node.title.chars().next().map(|ch| ch.to_ascii_lowercase());
        Self {
            node,
            key,
            selected,
            last_selected: false,
        }
    }
}

/// Column widths for name/link/added/modified as percentages of the
/// flexible area (the icon column is fixed). The percentages are
/// normalized at render time, so redistribution may drift without harm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pct: [u16; 4],
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            pct: [30, 40, 15, 15],
        }
    }
}

impl Columns {
    /// Cell widths for the given flexible area, proportional to the stored
    /// percentages; the link column absorbs rounding leftovers.
    pub fn cell_widths(&self, total: u16) -> [u16; 4] {
        let sum: u32 = self.pct.iter().map(|p| u32::from(*p)).sum::<u32>().max(1);
        let mut cells = [0u16; 4];
        for (i, pct) in self.pct.iter().enumerate() {
            cells[i] = ((u32::from(total) * u32::from(*pct)) / sum) as u16;
        }
        let used: u16 = cells.iter().sum();
        cells[1] += total.saturating_sub(used);
        cells
    }

    /// Drags the divider left of column `divider` by `delta` cells (positive
    /// = rightwards). The dragged column shrinks and its left neighbour
    /// grows; the drag is blocked entirely if either would fall below the
    /// minimum width.
    pub fn resize(&mut self, divider: usize, delta: i16, total: u16) {
        if divider == 0 || divider >= self.pct.len() || total == 0 {
            return;
        }
        let cells = self.cell_widths(total);
        let dragged = i32::from(cells[divider]) - i32::from(delta);
        let neighbour = i32::from(cells[divider - 1]) + i32::from(delta);
        if dragged < i32::from(MIN_COLUMN_WIDTH) || neighbour < i32::from(MIN_COLUMN_WIDTH) {
            return;
        }
        self.pct[divider] = ((dragged as u32 * 100) / u32::from(total)).max(1) as u16;
        self.pct[divider - 1] = ((neighbour as u32 * 100) / u32::from(total)).max(1) as u16;
    }
}

/// Renders an ordered sequence of entry rows for one pane and owns its
/// selection state. Callers are responsible for sibling ordering of the
/// nodes they pass in.
#[derive(Debug, Default)]
pub struct ListView {
    rows: Vec<EntryRow>,
    error: Option<String>,
    columns: Columns,
    offset: usize,
    pending_scroll: Option<usize>,
    events: VecDeque<ViewEvent>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[EntryRow] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut Columns {
        &mut self.columns
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        self.events.drain(..).collect()
    }

    /// Replaces all rows. With an error, a single error row is rendered
    /// instead of entries. Ids in `preserve_selected_ids` that are not in
    /// `nodes` are dropped first; an empty preserve set selects the first
    /// row when any node exists. Emits exactly one `SelectionChanged`.
    pub fn build(
        &mut self,
        nodes: Vec<BookmarkNode>,
        error: Option<String>,
        preserve_selected_ids: &[NodeId],
    ) {
        self.rows.clear();
        self.offset = 0;
        self.pending_scroll = None;
        self.error = error;

        if self.error.is_none() {
            let preserve: Vec<&NodeId> = preserve_selected_ids
                .iter()
                .filter(|id| nodes.iter().any(|node| node.id == **id))
                .collect();
            for (position, node) in nodes.into_iter().enumerate() {
                let selected = if preserve.is_empty() {
                    position == 0
                } else {
                    preserve.iter().any(|id| **id == node.id)
                };
                self.rows.push(EntryRow::new(node, selected));
            }
            self.pending_scroll = self.rows.iter().position(|row| row.selected);
        }

        self.events.push_back(ViewEvent::SelectionChanged);
    }

    /// Rebuilds from fresh nodes while keeping the selection for ids that
    /// are still present.
    pub fn update(&mut self, nodes: Vec<BookmarkNode>, error: Option<String>) {
        let keep: Vec<NodeId> = self
            .rows
            .iter()
            .filter(|row| row.selected)
            .filter(|row| nodes.iter().any(|node| node.id == row.node.id))
            .map(|row| row.node.id.clone())
            .collect();
        self.build(nodes, error, &keep);
    }

    /// Selected rows as plain records; with `selected_only == false`, all
    /// non-error rows except the synthetic parent row.
    pub fn entries(&self, selected_only: bool) -> Vec<BookmarkNode> {
        if self.error.is_some() {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter(|row| {
                if selected_only {
                    row.selected
                } else {
                    !row.node.is_synthetic_parent()
                }
            })
            .map(|row| row.node.clone())
            .collect()
    }

    fn selected_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.selected)
            .map(|(index, _)| index)
            .collect()
    }

    fn anchor_index(&self) -> Option<usize> {
        self.rows.iter().position(|row| row.last_selected)
    }

    /// Click semantics: a plain click replaces the selection with the row,
    /// shift-click extends the range from the anchor to the row inclusive,
    /// ctrl/cmd-click toggles only the row. The clicked row becomes the new
    /// anchor.
    pub fn select(&mut self, index: usize, modifiers: Modifiers) {
        if self.error.is_some() || index >= self.rows.len() {
            return;
        }

        if !modifiers.any() {
            for row in &mut self.rows {
                row.selected = false;
            }
        }
        if modifiers.shift {
            if let Some(anchor) = self.anchor_index() {
                let from = anchor.min(index);
                let to = anchor.max(index);
                for row in &mut self.rows[from..to] {
                    row.selected = true;
                }
            }
        }
        if modifiers.toggle() {
            self.rows[index].selected = !self.rows[index].selected;
        } else {
            self.rows[index].selected = true;
        }

        for row in &mut self.rows {
            row.last_selected = false;
        }
        self.rows[index].last_selected = true;
        self.pending_scroll = Some(index);
        self.events.push_back(ViewEvent::SelectionChanged);
    }

    /// Moves towards the end of the list. Without flags the single selection
    /// jumps to the row after the selection edge; `extend` adds that row to
    /// the selection; `shrink` deselects the trailing endpoint instead.
    pub fn next(&mut self, extend: bool, shrink: bool) {
        if shrink {
            let selected = self.selected_indices();
            if selected.len() > 1 {
                if let Some(&last) = selected.last() {
                    self.rows[last].selected = false;
                    self.events.push_back(ViewEvent::SelectionChanged);
                }
            }
            return;
        }

        let target = self
            .selected_indices()
            .iter()
            .filter_map(|&index| (index + 1 < self.rows.len()).then_some(index + 1))
            .last();
        if let Some(target) = target {
            let modifiers = if extend { Modifiers::EXTEND } else { Modifiers::default() };
            self.select(target, modifiers);
        }
    }

    /// Mirror of [`ListView::next`] towards the start of the list.
    pub fn previous(&mut self, extend: bool, shrink: bool) {
        if shrink {
            let selected = self.selected_indices();
            if selected.len() > 1 {
                if let Some(&first) = selected.first() {
                    self.rows[first].selected = false;
                    self.events.push_back(ViewEvent::SelectionChanged);
                }
            }
            return;
        }

        let target = self
            .selected_indices()
            .iter()
            .find(|&&index| index > 0)
            .map(|&index| index - 1);
        if let Some(target) = target {
            let modifiers = if extend { Modifiers::EXTEND } else { Modifiers::default() };
            self.select(target, modifiers);
        }
    }

    /// Enter: submits the whole selection when it is non-empty.
    pub fn submit(&mut self, modifiers: Modifiers) {
        let entries = self.entries(true);
        if !entries.is_empty() {
            self.events.push_back(ViewEvent::Submit { entries, modifiers });
        }
    }

    /// Double-click: submits just the clicked row.
    pub fn double_click(&mut self, index: usize, modifiers: Modifiers) {
        if self.error.is_some() || index >= self.rows.len() {
            return;
        }
        let entries = vec![self.rows[index].node.clone()];
        self.events.push_back(ViewEvent::Submit { entries, modifiers });
    }

    /// Type-ahead: jumps to the next row after the selection whose title
    /// starts with `ch`, else the first matching row from the top.
    pub fn type_ahead(&mut self, ch: char) {
        let ch = ch.to_ascii_lowercase();
        let after = self.selected_indices().first().copied().map(|first| first + 1);
        let matches = |row: &EntryRow| row.key == Some(ch);

        let target = after
            .and_then(|start| {
                self.rows[start.min(self.rows.len())..]
                    .iter()
                    .position(matches)
                    .map(|offset| start + offset)
            })
            .or_else(|| self.rows.iter().position(matches));
        if let Some(target) = target {
            self.select(target, Modifiers::default());
        }
    }

    /// Backspace: submits the synthetic parent row when the listing has
    /// one, else emits a beep.
    pub fn backspace(&mut self) {
        match self.rows.iter().position(|row| row.node.is_synthetic_parent()) {
            Some(index) => self.double_click(index, Modifiers::default()),
            None => self.events.push_back(ViewEvent::Beep),
        }
    }

    /// Clamps the scroll offset so the most recent selection stays inside a
    /// viewport of `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 || self.rows.is_empty() {
            return;
        }
        let max_offset = self.rows.len().saturating_sub(height);
        self.offset = self.offset.min(max_offset);
        let Some(target) = self.pending_scroll.take() else {
            return;
        };
        if target < self.offset {
            self.offset = target;
        } else if target >= self.offset + height {
            self.offset = target.saturating_sub(height - 1);
        }
    }

    /// Scrolls by `delta` rows without touching the selection.
    pub fn scroll_by(&mut self, delta: i32, height: usize) {
        let max_offset = self.rows.len().saturating_sub(height.max(1));
        let next = i64::from(delta) + self.offset as i64;
        self.offset = next.clamp(0, max_offset as i64) as usize;
    }
}

#[cfg(test)]
mod tests;
