// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! Runs the interactive dual-pane TUI against a store folder (the current
//! working directory by default). Use `--demo` for a seeded in-memory tree
//! with no persistence.

use std::error::Error;
use std::sync::Arc;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<store-dir>] [--durable-writes]\n  {program} [--store <dir>] [--durable-writes]\n  {program} --demo\n\nIf store-dir/--store is omitted, the current working directory is used.\n--demo uses a built-in in-memory tree and cannot be combined with store-dir/--store.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    store_dir: Option<String>,
    durable_writes: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--store" => {
                if options.store_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.store_dir = Some(dir);
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.store_dir.is_some() {
                    return Err(());
                }
                options.store_dir = Some(arg);
            }
        }
    }

    if options.demo && options.store_dir.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "proteus".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let (store, prefs_folder): (Arc<dyn proteus::store::Bookmarks>, _) = if options.demo {
            let tree = proteus::tui::demo_tree();
            (Arc::new(proteus::store::BookmarkStore::in_memory(tree)), None)
        } else {
            let dir = options.store_dir.unwrap_or_else(|| ".".to_owned());
            let folder = if options.durable_writes {
                proteus::store::BookmarkFolder::new(dir)
                    .with_durability(proteus::store::WriteDurability::Durable)
            } else {
                proteus::store::BookmarkFolder::new(dir)
            };
            let store = proteus::store::BookmarkStore::open(folder.clone())?;
            (Arc::new(store), Some(folder))
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        proteus::tui::run_with_store(&runtime, store, prefs_folder)?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("proteus: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(["--demo".to_owned()].into_iter()).expect("parse options");
        assert!(options.demo);
        assert!(options.store_dir.is_none());
        assert!(!options.durable_writes);
    }

    #[test]
    fn parses_store_dir() {
        let options = parse_options(["--store".to_owned(), "some/dir".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.store_dir.as_deref(), Some("some/dir"));
        assert!(!options.demo);
    }

    #[test]
    fn parses_positional_store_dir() {
        let options = parse_options(["some/dir".to_owned()].into_iter()).expect("parse options");
        assert_eq!(options.store_dir.as_deref(), Some("some/dir"));
    }

    #[test]
    fn parses_durable_writes_with_store_dir() {
        let options =
            parse_options(["some/dir".to_owned(), "--durable-writes".to_owned()].into_iter())
                .expect("parse options");
        assert_eq!(options.store_dir.as_deref(), Some("some/dir"));
        assert!(options.durable_writes);
    }

    #[test]
    fn rejects_demo_with_store_dir() {
        parse_options(["--demo".to_owned(), "--store".to_owned(), ".".to_owned()].into_iter())
            .unwrap_err();

        parse_options(["--demo".to_owned(), ".".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(["--demo".to_owned(), "--demo".to_owned()].into_iter()).unwrap_err();

        parse_options(
            ["--store".to_owned(), ".".to_owned(), "--store".to_owned(), "other".to_owned()]
                .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_multiple_positional_store_dirs() {
        parse_options(["one".to_owned(), "two".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_missing_store_value() {
        parse_options(["--store".to_owned()].into_iter()).unwrap_err();
    }
}
