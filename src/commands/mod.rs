// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command dispatch against the active pane's selection.
//!
//! Batch executors (`move_entries`, `trash_entries`) issue their store calls
//! strictly sequentially in original selection order; a per-entry failure is
//! collected and never aborts the remaining entries.

use std::fmt;
use std::str::FromStr;

use crate::model::{BookmarkNode, NodeId};
use crate::store::{Bookmarks, StoreError};

/// Placeholder link seeded into the new-file prompt when the anchor entry
/// has none.
pub const NEW_FILE_URL_PLACEHOLDER: &str = "https://www.example.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CopyTitle,
    CopyId,
    CopyLink,
    EditTitle,
    EditLink,
    MoveLeft,
    MoveRight,
    Root,
    NewFile,
    NewDirectory,
    Trash,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Self::CopyTitle => "copy-title",
            Self::CopyId => "copy-id",
            Self::CopyLink => "copy-link",
            Self::EditTitle => "edit-title",
            Self::EditLink => "edit-link",
            Self::MoveLeft => "move-left",
            Self::MoveRight => "move-right",
            Self::Root => "root",
            Self::NewFile => "new-file",
            Self::NewDirectory => "new-directory",
            Self::Trash => "trash",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand {
    pub name: String,
}

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.name)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy-title" => Ok(Self::CopyTitle),
            "copy-id" => Ok(Self::CopyId),
            "copy-link" => Ok(Self::CopyLink),
            "edit-title" => Ok(Self::EditTitle),
            "edit-link" => Ok(Self::EditLink),
            "move-left" => Ok(Self::MoveLeft),
            "move-right" => Ok(Self::MoveRight),
            "root" => Ok(Self::Root),
            "new-file" => Ok(Self::NewFile),
            "new-directory" => Ok(Self::NewDirectory),
            "trash" => Ok(Self::Trash),
            other => Err(UnknownCommand { name: other.to_owned() }),
        }
    }
}

/// Clipboard payload for the copy-* commands: the relevant field of every
/// selected entry joined with newlines. copy-link silently skips entries
/// without a link. Non-copy commands yield `None`.
pub fn copy_payload(command: Command, entries: &[BookmarkNode]) -> Option<String> {
    match command {
        Command::CopyTitle => Some(
            entries.iter().map(|entry| entry.title.as_str()).collect::<Vec<_>>().join("\n"),
        ),
        Command::CopyId => Some(
            entries.iter().map(|entry| entry.id.as_str()).collect::<Vec<_>>().join("\n"),
        ),
        Command::CopyLink => Some(
            entries
                .iter()
                .filter_map(|entry| entry.url.as_deref())
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        _ => None,
    }
}

/// Insertion position directly after the anchor entry; an empty pane (no
/// anchor) inserts at the top.
pub fn insertion_index(anchor: Option<&BookmarkNode>) -> usize {
    anchor
        .map(|entry| entry.index.saturating_add(1).max(0) as usize)
        .unwrap_or(0)
}

/// Prompt seed for new-file: `title,url` from the anchor entry, with a
/// placeholder link when the anchor has none.
pub fn new_file_seed(anchor: Option<&BookmarkNode>) -> String {
    match anchor {
        Some(entry) => format!(
            "{},{}",
            entry.title,
            entry.url.as_deref().unwrap_or(NEW_FILE_URL_PLACEHOLDER)
        ),
        None => format!(",{NEW_FILE_URL_PLACEHOLDER}"),
    }
}

/// Prompt seed for new-directory: the anchor entry's title.
pub fn new_directory_seed(anchor: Option<&BookmarkNode>) -> String {
    anchor.map(|entry| entry.title.clone()).unwrap_or_default()
}

/// Splits a `title,url` prompt answer; both halves must be non-empty or the
/// command aborts silently.
pub fn parse_new_file_input(input: &str) -> Option<(String, String)> {
    let (title, url) = input.split_once(',')?;
    let title = title.trim();
    let url = url.trim();
    if title.is_empty() || url.is_empty() {
        return None;
    }
    Some((title.to_owned(), url.to_owned()))
}

/// A store failure for one entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub id: NodeId,
    pub title: String,
    pub error: StoreError,
}

/// Moves `entries` under `dest_parent` at `dest_index`, one at a time in
/// the given order, awaiting each store call before issuing the next.
/// Failures are collected per entry and do not cancel the remainder.
pub async fn move_entries(
    store: &dyn Bookmarks,
    entries: &[BookmarkNode],
    dest_parent: &NodeId,
    dest_index: usize,
) -> Vec<EntryFailure> {
    let mut failures = Vec::new();
    for entry in entries {
        if let Err(error) = store.move_node(&entry.id, dest_parent, dest_index).await {
            failures.push(EntryFailure {
                id: entry.id.clone(),
                title: entry.title.clone(),
                error,
            });
        }
    }
    failures
}

/// Outcome of a sequential trash batch. Directories that refused an
/// unforced removal are handed back for a per-entry force confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrashOutcome {
    pub needs_force: Vec<BookmarkNode>,
    pub failures: Vec<EntryFailure>,
}

/// Removes `entries` one at a time in the given order. A
/// non-empty-directory failure queues the entry for a forced retry; any
/// other failure is collected and the batch continues.
pub async fn trash_entries(store: &dyn Bookmarks, entries: &[BookmarkNode]) -> TrashOutcome {
    let mut outcome = TrashOutcome::default();
    for entry in entries {
        match store.remove(&entry.id, false).await {
            Ok(()) => {}
            Err(error) if error.is_non_empty_directory() => {
                outcome.needs_force.push(entry.clone());
            }
            Err(error) => {
                outcome.failures.push(EntryFailure {
                    id: entry.id.clone(),
                    title: entry.title.clone(),
                    error,
                });
            }
        }
    }
    outcome
}
