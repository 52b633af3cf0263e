// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{BookmarkTree, TreeError, ROOT_TITLE};
use crate::model::{NewNode, NodeId, NodeKind, NodePatch};

fn id(raw: &str) -> NodeId {
    NodeId::new(raw).expect("node id")
}

fn seeded_with_folder() -> (BookmarkTree, NodeId) {
    let mut tree = BookmarkTree::seeded();
    let folder = tree
        .create(NewNode {
            parent_id: id("menu"),
            index: 0,
            title: "Reading".to_owned(),
            url: None,
        })
        .expect("create folder");
    (tree, folder.id)
}

#[test]
fn seeded_roots_are_readonly_directories() {
    let tree = BookmarkTree::seeded();
    let roots = tree.children(None).expect("roots");
    assert_eq!(roots.len(), 3);
    for (position, root) in roots.iter().enumerate() {
        assert!(root.readonly);
        assert_eq!(root.kind(), NodeKind::Directory);
        assert_eq!(root.index, position as i32);
        assert_eq!(root.parent_id, None);
    }
}

#[test]
fn create_inserts_at_index_and_shifts_siblings() {
    let (mut tree, folder) = seeded_with_folder();
    let first = tree
        .create(NewNode {
            parent_id: folder.clone(),
            index: 0,
            title: "a".to_owned(),
            url: Some("https://a.example".to_owned()),
        })
        .expect("create a");
    let second = tree
        .create(NewNode {
            parent_id: folder.clone(),
            index: 0,
            title: "b".to_owned(),
            url: Some("https://b.example".to_owned()),
        })
        .expect("create b");

    let children = tree.children(Some(&folder)).expect("children");
    assert_eq!(
        children.iter().map(|n| n.id.clone()).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );
    assert_eq!(children[0].index, 0);
    assert_eq!(children[1].index, 1);
}

#[test]
fn create_clamps_out_of_range_index() {
    let (mut tree, folder) = seeded_with_folder();
    let node = tree
        .create(NewNode {
            parent_id: folder.clone(),
            index: 99,
            title: "tail".to_owned(),
            url: None,
        })
        .expect("create");
    assert_eq!(node.index, 0);
}

#[test]
fn create_inside_file_is_rejected() {
    let (mut tree, folder) = seeded_with_folder();
    let file = tree
        .create(NewNode {
            parent_id: folder,
            index: 0,
            title: "f".to_owned(),
            url: Some("https://f.example".to_owned()),
        })
        .expect("create file");

    let err = tree
        .create(NewNode {
            parent_id: file.id.clone(),
            index: 0,
            title: "child".to_owned(),
            url: None,
        })
        .unwrap_err();
    assert_eq!(err, TreeError::NotADirectory { id: file.id });
}

#[test]
fn update_patches_title_and_url() {
    let (mut tree, folder) = seeded_with_folder();
    let file = tree
        .create(NewNode {
            parent_id: folder,
            index: 0,
            title: "old".to_owned(),
            url: Some("https://old.example".to_owned()),
        })
        .expect("create file");

    let updated = tree
        .update(
            &file.id,
            NodePatch {
                title: Some("new".to_owned()),
                url: Some("https://new.example".to_owned()),
            },
        )
        .expect("update");
    assert_eq!(updated.title, "new");
    assert_eq!(updated.url.as_deref(), Some("https://new.example"));
}

#[test]
fn update_rejects_readonly_and_url_on_directory() {
    let (mut tree, folder) = seeded_with_folder();

    let err = tree
        .update(&id("menu"), NodePatch { title: Some("x".to_owned()), url: None })
        .unwrap_err();
    assert_eq!(err, TreeError::ReadonlyNode { id: id("menu") });

    let err = tree
        .update(
            &folder,
            NodePatch { title: None, url: Some("https://x.example".to_owned()) },
        )
        .unwrap_err();
    assert_eq!(err, TreeError::NotAFile { id: folder });
}

#[test]
fn move_reindexes_source_and_destination() {
    let (mut tree, folder) = seeded_with_folder();
    let a = tree
        .create(NewNode {
            parent_id: folder.clone(),
            index: 0,
            title: "a".to_owned(),
            url: Some("https://a.example".to_owned()),
        })
        .expect("a");
    let b = tree
        .create(NewNode {
            parent_id: folder.clone(),
            index: 1,
            title: "b".to_owned(),
            url: Some("https://b.example".to_owned()),
        })
        .expect("b");
    let other = tree
        .create(NewNode {
            parent_id: id("other"),
            index: 0,
            title: "dest".to_owned(),
            url: None,
        })
        .expect("dest");

    let moved = tree.move_node(&a.id, &other.id, 0).expect("move");
    assert_eq!(moved.parent_id, Some(other.id.clone()));
    assert_eq!(moved.index, 0);

    let remaining = tree.children(Some(&folder)).expect("children");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, b.id);
    assert_eq!(remaining[0].index, 0);
}

#[test]
fn move_into_own_subtree_is_rejected() {
    let (mut tree, folder) = seeded_with_folder();
    let inner = tree
        .create(NewNode {
            parent_id: folder.clone(),
            index: 0,
            title: "inner".to_owned(),
            url: None,
        })
        .expect("inner");

    let err = tree.move_node(&folder, &inner.id, 0).unwrap_err();
    assert_eq!(err, TreeError::MoveIntoSelf { id: folder.clone() });

    let err = tree.move_node(&folder, &folder, 0).unwrap_err();
    assert_eq!(err, TreeError::MoveIntoSelf { id: folder });
}

#[test]
fn remove_directory_requires_force_when_non_empty() {
    let (mut tree, folder) = seeded_with_folder();
    tree.create(NewNode {
        parent_id: folder.clone(),
        index: 0,
        title: "child".to_owned(),
        url: Some("https://c.example".to_owned()),
    })
    .expect("child");

    let err = tree.remove(&folder, false).unwrap_err();
    assert_eq!(err, TreeError::NonEmptyDirectory { id: folder.clone() });

    tree.remove(&folder, true).expect("forced remove");
    assert!(!tree.contains(&folder));
    assert!(tree.children(Some(&id("menu"))).expect("menu children").is_empty());
}

#[test]
fn remove_deletes_subtree_from_arena() {
    let (mut tree, folder) = seeded_with_folder();
    let inner = tree
        .create(NewNode {
            parent_id: folder.clone(),
            index: 0,
            title: "inner".to_owned(),
            url: None,
        })
        .expect("inner");
    let leaf = tree
        .create(NewNode {
            parent_id: inner.id.clone(),
            index: 0,
            title: "leaf".to_owned(),
            url: Some("https://leaf.example".to_owned()),
        })
        .expect("leaf");

    tree.remove(&folder, true).expect("forced remove");
    assert!(!tree.contains(&inner.id));
    assert!(!tree.contains(&leaf.id));
}

#[test]
fn remove_readonly_root_is_rejected() {
    let mut tree = BookmarkTree::seeded();
    let err = tree.remove(&id("toolbar"), true).unwrap_err();
    assert_eq!(err, TreeError::ReadonlyNode { id: id("toolbar") });
}

#[test]
fn breadcrumbs_walk_from_root_to_parent() {
    let (mut tree, folder) = seeded_with_folder();
    let inner = tree
        .create(NewNode {
            parent_id: folder.clone(),
            index: 0,
            title: "inner".to_owned(),
            url: None,
        })
        .expect("inner");

    let trail = tree.breadcrumbs(Some(&inner.id)).expect("breadcrumbs");
    let titles = trail.iter().map(|crumb| crumb.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, vec![ROOT_TITLE, "Menu", "Reading", "inner"]);
    assert_eq!(trail[0].id, None);

    let root_only = tree.breadcrumbs(None).expect("root breadcrumbs");
    assert_eq!(root_only.len(), 1);
    assert_eq!(root_only[0].title, ROOT_TITLE);
}

#[test]
fn generated_ids_skip_loaded_numeric_ids() {
    let mut tree = BookmarkTree::seeded();
    tree.insert_loaded(id("n7"), None, "loaded".to_owned(), None, None, None, false)
        .expect("insert loaded");

    let created = tree
        .create(NewNode {
            parent_id: id("n7"),
            index: 0,
            title: "fresh".to_owned(),
            url: None,
        })
        .expect("create");
    assert_eq!(created.id, id("n8"));
}
