// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: typed ids, bookmark nodes, and the bookmark tree.

pub mod ids;
pub mod node;
pub mod tree;

pub use ids::{Id, IdError, NodeId};
pub use node::{BookmarkNode, Crumb, NewNode, NodeKind, NodePatch, SYNTHETIC_PARENT_INDEX};
pub use tree::{BookmarkTree, TreeError, ROOT_TITLE};
