// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus — dual-pane bookmark commander TUI.
//!
//! Two synchronized list panes over a folder-backed bookmark tree, with
//! multi-selection, cross-pane move validation, and a command dispatcher.

pub mod commands;
pub mod model;
pub mod panes;
pub mod store;
pub mod tui;
pub mod view;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
