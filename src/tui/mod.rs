// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive dual-pane shell (ratatui + crossterm): key and
//! mouse dispatch, modal prompt/confirm dialogs, the toast line, and the
//! pending-action queue that drives every store call to completion on the
//! caller's tokio runtime before the next frame.

use std::{
    collections::VecDeque,
    error::Error,
    io,
    process::{Command as ProcessCommand, Stdio},
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::commands::{
    copy_payload, insertion_index, move_entries, new_directory_seed, new_file_seed,
    parse_new_file_input, trash_entries, Command, EntryFailure,
};
use crate::model::{
    BookmarkNode, BookmarkTree, NewNode, NodeId, NodeKind, NodePatch, SYNTHETIC_PARENT_INDEX,
};
use crate::panes::{CommandStates, Panes, Side};
use crate::store::{BookmarkFolder, Bookmarks, PanePrefs, StoreError};
use crate::view::{Modifiers, ViewEvent};

const FOCUS_COLOR: Color = Color::LightGreen;
const SELECTED_BG: Color = Color::Blue;
const ERROR_COLOR: Color = Color::LightRed;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_DISABLED_COLOR: Color = Color::DarkGray;
const ICON_COLUMN_WIDTH: u16 = 2;
const DOUBLE_CLICK_MS: u64 = 400;
const BELL: &str = "\x07";

/// Runs the interactive terminal UI against the given store.
///
/// The event loop itself is synchronous; every queued store action is
/// driven to completion on `runtime` between frames, so batch commands keep
/// their strict sequential ordering.
pub fn run_with_store(
    runtime: &tokio::runtime::Runtime,
    store: Arc<dyn Bookmarks>,
    prefs_folder: Option<BookmarkFolder>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(store, prefs_folder);
    app.queue_startup();

    while !app.should_quit {
        while let Some(action) = app.pending_actions.pop_front() {
            runtime.block_on(app.execute_action(action));
            app.drain_view_events();
        }
        if app.take_bell() {
            let _ = execute!(io::stdout(), Print(BELL));
        }
        app.expire_toast();

        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
            app.drain_view_events();
        }
    }

    Ok(())
}

/// Seeded in-memory tree for `--demo` runs.
pub fn demo_tree() -> BookmarkTree {
    let mut tree = BookmarkTree::seeded();
    let menu = NodeId::new("menu").expect("seed root id");
    let other = NodeId::new("other").expect("seed root id");

    let reading = tree
        .create(NewNode {
            parent_id: menu.clone(),
            index: 0,
            title: "Reading".to_owned(),
            url: None,
        })
        .expect("demo folder");
    for (position, (title, url)) in [
        ("Rust Book", "https://doc.rust-lang.org/book/"),
        ("Crates", "https://crates.io/"),
        ("Docs", "https://docs.rs/"),
    ]
    .into_iter()
    .enumerate()
    {
        tree.create(NewNode {
            parent_id: reading.id.clone(),
            index: position,
            title: title.to_owned(),
            url: Some(url.to_owned()),
        })
        .expect("demo bookmark");
    }

    let projects = tree
        .create(NewNode {
            parent_id: other.clone(),
            index: 0,
            title: "Projects".to_owned(),
            url: None,
        })
        .expect("demo folder");
    tree.create(NewNode {
        parent_id: projects.id.clone(),
        index: 0,
        title: "Issue Tracker".to_owned(),
        url: Some("https://example.com/issues".to_owned()),
    })
    .expect("demo bookmark");

    tree
}

/// Fetches one pane's listing: the children of `parent` plus, below the
/// root, the synthetic ".." row (the current directory retitled, with the
/// reserved index) supplied ahead of the entries.
async fn fetch_listing(
    store: &dyn Bookmarks,
    parent: Option<&NodeId>,
) -> Result<Vec<BookmarkNode>, StoreError> {
    let mut nodes = Vec::new();
    if let Some(parent_id) = parent {
        let mut up = store.node(parent_id).await?;
        up.title = "..".to_owned();
        up.index = SYNTHETIC_PARENT_INDEX;
        nodes.push(up);
    }
    nodes.extend(store.children(parent).await?);
    Ok(nodes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreAction {
    Navigate {
        side: Side,
        parent: Option<NodeId>,
    },
    RefreshBoth,
    Submit {
        side: Side,
        entries: Vec<BookmarkNode>,
        modifiers: Modifiers,
    },
    Command(Command),
    PromptDone {
        prompt: PendingPrompt,
        input: String,
    },
    ForceTrashConfirmed {
        entry: BookmarkNode,
        rest: VecDeque<BookmarkNode>,
    },
    ForceTrashSkipped {
        rest: VecDeque<BookmarkNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingPrompt {
    EditTitle { id: NodeId, current: String },
    EditLink { id: NodeId, current: String },
    NewFile { parent: NodeId, index: usize },
    NewDirectory { parent: NodeId, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Modal {
    Prompt {
        title: &'static str,
        value: String,
        cursor: usize,
        prompt: PendingPrompt,
    },
    Confirm {
        message: String,
        entry: BookmarkNode,
        rest: VecDeque<BookmarkNode>,
    },
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct ClickInfo {
    side: Side,
    row: usize,
    at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    side: Side,
    divider: usize,
    last_x: u16,
}

#[derive(Debug, Default, Clone, Copy)]
struct LayoutCache {
    left: Rect,
    right: Rect,
}

impl LayoutCache {
    fn pane(&self, side: Side) -> Rect {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn side_at(&self, x: u16, y: u16) -> Option<Side> {
        if rect_contains(self.left, x, y) {
            Some(Side::Left)
        } else if rect_contains(self.right, x, y) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

struct App {
    store: Arc<dyn Bookmarks>,
    prefs_folder: Option<BookmarkFolder>,
    panes: Panes,
    states: CommandStates,
    titles: [String; 2],
    modal: Option<Modal>,
    toast: Option<Toast>,
    show_help: bool,
    pending_actions: VecDeque<StoreAction>,
    layout: LayoutCache,
    last_click: Option<ClickInfo>,
    drag: Option<DragState>,
    bell_pending: bool,
    should_quit: bool,
}

impl App {
    fn new(store: Arc<dyn Bookmarks>, prefs_folder: Option<BookmarkFolder>) -> Self {
        Self {
            store,
            prefs_folder,
            panes: Panes::new(),
            states: CommandStates::default(),
            titles: ["...".to_owned(), "...".to_owned()],
            modal: None,
            toast: None,
            show_help: false,
            pending_actions: VecDeque::new(),
            layout: LayoutCache::default(),
            last_click: None,
            drag: None,
            bell_pending: false,
            should_quit: false,
        }
    }

    /// Restores both panes to their last-visited parents from the prefs
    /// file; missing prefs land both panes at the synthetic root.
    fn queue_startup(&mut self) {
        let prefs = self
            .prefs_folder
            .as_ref()
            .and_then(|folder| folder.load_prefs().ok())
            .unwrap_or_default();
        self.pending_actions.push_back(StoreAction::Navigate {
            side: Side::Left,
            parent: prefs.left,
        });
        self.pending_actions.push_back(StoreAction::Navigate {
            side: Side::Right,
            parent: prefs.right,
        });
    }

    fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = &self.toast {
            if toast.expires_at <= Instant::now() {
                self.toast = None;
            }
        }
    }

    fn report_failures(&mut self, what: &str, failures: &[EntryFailure]) {
        if let Some(failure) = failures.first() {
            if failures.len() == 1 {
                self.set_toast(format!("{what} failed for \"{}\": {}", failure.title, failure.error));
            } else {
                self.set_toast(format!(
                    "{what} failed for \"{}\" and {} more",
                    failure.title,
                    failures.len() - 1
                ));
            }
        }
    }

    fn focus(&mut self, side: Side) {
        self.panes.focus(side);
        self.states = self.panes.changed();
    }

    fn title_slot(side: Side) -> usize {
        match side {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    fn drain_view_events(&mut self) {
        for side in [Side::Left, Side::Right] {
            for event in self.panes.view_mut(side).take_events() {
                match event {
                    ViewEvent::SelectionChanged => {
                        self.states = self.panes.changed();
                    }
                    ViewEvent::Submit { entries, modifiers } => {
                        self.pending_actions.push_back(StoreAction::Submit {
                            side,
                            entries,
                            modifiers,
                        });
                    }
                    ViewEvent::Beep => self.bell_pending = true,
                }
            }
        }
    }

    fn command_enabled(&self, command: Command) -> bool {
        match command {
            Command::CopyTitle | Command::CopyId | Command::Root => true,
            Command::CopyLink => self.states.copy_link,
            Command::EditTitle => self.states.edit_title,
            Command::EditLink => self.states.edit_link,
            Command::MoveLeft => self.states.move_left,
            Command::MoveRight => self.states.move_right,
            Command::NewFile => self.states.new_file,
            Command::NewDirectory => self.states.new_directory,
            Command::Trash => self.states.trash,
        }
    }

    fn queue_command(&mut self, command: Command) {
        if self.command_enabled(command) {
            self.pending_actions.push_back(StoreAction::Command(command));
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => self.show_help = false,
                KeyCode::F(10) => self.should_quit = true,
                KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true;
                }
                _ => {}
            }
            return;
        }

        if let Some(modal) = self.modal.take() {
            self.handle_modal_key(key, modal);
            return;
        }

        let mods = modifiers_of(key.modifiers);
        match key.code {
            KeyCode::Tab => self.focus(self.panes.active().other()),
            KeyCode::Left if !mods_any(key.modifiers) => self.focus(Side::Left),
            KeyCode::Right if !mods_any(key.modifiers) => self.focus(Side::Right),
            KeyCode::Char('1') if mods.ctrl || mods.meta => self.focus(Side::Left),
            KeyCode::Char('2') if mods.ctrl || mods.meta => self.focus(Side::Right),
            KeyCode::Up | KeyCode::Down => {
                let extend = mods.shift || mods.ctrl || mods.meta;
                let shrink = (mods.ctrl && mods.shift) || (mods.meta && mods.shift);
                let view = &mut self.panes.active_pane_mut().view;
                if key.code == KeyCode::Up {
                    view.previous(extend, shrink);
                } else {
                    view.next(extend, shrink);
                }
            }
            KeyCode::Enter => self.panes.active_pane_mut().view.submit(mods),
            KeyCode::Backspace if !mods_any(key.modifiers) => {
                self.panes.active_pane_mut().view.backspace();
            }
            KeyCode::F(1) => self.show_help = true,
            KeyCode::F(2) => self.queue_command(Command::EditTitle),
            KeyCode::F(4) => self.queue_command(Command::EditLink),
            KeyCode::F(6) => self.queue_command(Command::NewFile),
            KeyCode::F(7) => self.queue_command(Command::NewDirectory),
            KeyCode::F(8) | KeyCode::Delete => self.queue_command(Command::Trash),
            KeyCode::F(9) => self.queue_command(Command::Root),
            KeyCode::F(10) => self.should_quit = true,
            KeyCode::Char('[') => self.queue_command(Command::MoveLeft),
            KeyCode::Char(']') => self.queue_command(Command::MoveRight),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('q') if mods.ctrl => self.should_quit = true,
            KeyCode::Char('r') if mods.ctrl => {
                self.pending_actions.push_back(StoreAction::RefreshBoth);
            }
            KeyCode::Char('t') if mods.ctrl => self.queue_command(Command::CopyTitle),
            KeyCode::Char('b') if mods.ctrl => self.queue_command(Command::CopyId),
            KeyCode::Char('l') if mods.ctrl => self.queue_command(Command::CopyLink),
            KeyCode::Char(ch) if ch.is_ascii_alphanumeric() && !mods.ctrl && !mods.meta => {
                self.panes.active_pane_mut().view.type_ahead(ch);
            }
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent, modal: Modal) {
        match modal {
            Modal::Prompt {
                title,
                mut value,
                mut cursor,
                prompt,
            } => match key.code {
                KeyCode::Esc => {}
                KeyCode::Enter => {
                    let input = value.trim().to_owned();
                    if !input.is_empty() {
                        self.pending_actions.push_back(StoreAction::PromptDone { prompt, input });
                    }
                }
                code => {
                    match code {
                        KeyCode::Left => cursor = cursor.saturating_sub(1),
                        KeyCode::Right => cursor = (cursor + 1).min(value.chars().count()),
                        KeyCode::Home => cursor = 0,
                        KeyCode::End => cursor = value.chars().count(),
                        KeyCode::Backspace => {
                            if cursor > 0 {
                                cursor -= 1;
                                remove_char_at(&mut value, cursor);
                            }
                        }
                        KeyCode::Delete => {
                            if cursor < value.chars().count() {
                                remove_char_at(&mut value, cursor);
                            }
                        }
                        KeyCode::Char(ch) => {
                            insert_char_at(&mut value, cursor, ch);
                            cursor += 1;
                        }
                        _ => {}
                    }
                    self.modal = Some(Modal::Prompt {
                        title,
                        value,
                        cursor,
                        prompt,
                    });
                }
            },
            Modal::Confirm { message, entry, rest } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.pending_actions
                        .push_back(StoreAction::ForceTrashConfirmed { entry, rest });
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.pending_actions.push_back(StoreAction::ForceTrashSkipped { rest });
                }
                _ => self.modal = Some(Modal::Confirm { message, entry, rest }),
            },
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.modal.is_some() || self.show_help {
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let delta = if mouse.kind == MouseEventKind::ScrollUp { -1 } else { 1 };
                let height = self.rows_height(self.panes.active());
                self.panes.active_pane_mut().view.scroll_by(delta, height);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(side) = self.layout.side_at(mouse.column, mouse.row) else {
                    return;
                };
                let area = self.layout.pane(side);
                self.focus(side);

                if mouse.row == area.y {
                    // header: a press near a divider starts a column drag
                    let widths =
                        self.panes.pane(side).view.columns().cell_widths(flexible_width(area));
                    if let Some(divider) = divider_at(mouse.column.saturating_sub(area.x), &widths)
                    {
                        self.drag = Some(DragState {
                            side,
                            divider,
                            last_x: mouse.column,
                        });
                    }
                    return;
                }

                let offset = self.panes.pane(side).view.offset();
                let row = offset + usize::from(mouse.row - area.y - 1);
                if row >= self.panes.pane(side).view.rows().len() {
                    return;
                }

                let mods = modifiers_of(mouse.modifiers);
                let double = self
                    .last_click
                    .map(|last| {
                        last.side == side
                            && last.row == row
                            && last.at.elapsed() <= Duration::from_millis(DOUBLE_CLICK_MS)
                    })
                    .unwrap_or(false);
                let view = &mut self.panes.pane_mut(side).view;
                if double {
                    view.double_click(row, mods);
                    self.last_click = None;
                } else {
                    view.select(row, mods);
                    self.last_click = Some(ClickInfo {
                        side,
                        row,
                        at: Instant::now(),
                    });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(drag) = self.drag {
                    let delta = i32::from(mouse.column) - i32::from(drag.last_x);
                    if delta != 0 {
                        let area = self.layout.pane(drag.side);
                        let total = flexible_width(area);
                        self.panes
                            .pane_mut(drag.side)
                            .view
                            .columns_mut()
                            .resize(drag.divider, delta as i16, total);
                        self.drag = Some(DragState {
                            last_x: mouse.column,
                            ..drag
                        });
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag = None,
            _ => {}
        }
    }

    fn rows_height(&self, side: Side) -> usize {
        usize::from(self.layout.pane(side).height.saturating_sub(1))
    }

    fn persist_prefs(&mut self) {
        let Some(folder) = &self.prefs_folder else {
            return;
        };
        let prefs = PanePrefs {
            left: self.panes.pane(Side::Left).parent().cloned(),
            right: self.panes.pane(Side::Right).parent().cloned(),
        };
        if let Err(err) = folder.save_prefs(&prefs) {
            self.set_toast(format!("Saving pane prefs failed: {err}"));
        }
    }

    async fn execute_action(&mut self, action: StoreAction) {
        match action {
            StoreAction::Navigate { side, parent } => self.navigate(side, parent).await,
            StoreAction::RefreshBoth => self.refresh_both().await,
            StoreAction::Submit {
                side,
                entries,
                modifiers,
            } => self.submit(side, entries, modifiers).await,
            StoreAction::Command(command) => self.run_command(command).await,
            StoreAction::PromptDone { prompt, input } => self.finish_prompt(prompt, input).await,
            StoreAction::ForceTrashConfirmed { entry, rest } => {
                if let Err(err) = self.store.remove(&entry.id, true).await {
                    self.set_toast(format!("Removing \"{}\" failed: {err}", entry.title));
                }
                self.next_force_confirm(rest).await;
            }
            StoreAction::ForceTrashSkipped { rest } => self.next_force_confirm(rest).await,
        }
    }

    async fn navigate(&mut self, side: Side, parent: Option<NodeId>) {
        let store = self.store.clone();
        match fetch_listing(store.as_ref(), parent.as_ref()).await {
            Ok(nodes) => {
                self.panes.set_parent(side, parent.clone());
                self.panes.view_mut(side).build(nodes, None, &[]);
                let title = match store.breadcrumbs(parent.as_ref()).await {
                    Ok(trail) => trail.last().map(|crumb| crumb.title.clone()).unwrap_or_default(),
                    Err(_) => parent.as_ref().map(ToString::to_string).unwrap_or_default(),
                };
                self.titles[Self::title_slot(side)] = title;
                self.persist_prefs();
            }
            Err(err) => {
                self.panes.set_parent(side, parent);
                self.panes.view_mut(side).build(Vec::new(), Some(err.to_string()), &[]);
            }
        }
    }

    async fn refresh(&mut self, side: Side) {
        let store = self.store.clone();
        let parent = self.panes.pane(side).parent().cloned();
        match fetch_listing(store.as_ref(), parent.as_ref()).await {
            Ok(nodes) => self.panes.view_mut(side).update(nodes, None),
            Err(err) => self.panes.view_mut(side).update(Vec::new(), Some(err.to_string())),
        }
    }

    /// Re-renders both panes for their current parents; used after every
    /// mutating command, since both panes may show overlapping content.
    async fn refresh_both(&mut self) {
        self.refresh(Side::Left).await;
        self.refresh(Side::Right).await;
    }

    async fn submit(&mut self, side: Side, entries: Vec<BookmarkNode>, modifiers: Modifiers) {
        let descend = entries.len() == 1;
        for entry in entries {
            match entry.kind() {
                NodeKind::Directory if descend => {
                    let parent = if entry.is_synthetic_parent() {
                        entry.parent_id.clone()
                    } else {
                        Some(entry.id.clone())
                    };
                    self.navigate(side, parent).await;
                }
                NodeKind::Directory => {}
                NodeKind::File => {
                    if let Some(url) = &entry.url {
                        let background = modifiers.ctrl || modifiers.meta;
                        if let Err(err) = open_url(url, background) {
                            self.set_toast(format!("Opening link failed: {err}"));
                        }
                    }
                }
            }
        }
    }

    async fn run_command(&mut self, command: Command) {
        match command {
            Command::CopyTitle | Command::CopyId | Command::CopyLink => {
                let entries = self.panes.active_pane().view.entries(true);
                if let Some(payload) = copy_payload(command, &entries) {
                    if payload.is_empty() {
                        return;
                    }
                    match copy_to_clipboard(&payload) {
                        Ok(backend) => self.set_toast(format!("Copied ({backend})")),
                        Err(err) => self.set_toast(format!("Clipboard error: {err}")),
                    }
                }
            }
            Command::EditTitle => {
                let Some(entry) = self.panes.active_pane().view.entries(true).into_iter().next()
                else {
                    return;
                };
                self.modal = Some(Modal::Prompt {
                    title: "Edit Title",
                    cursor: entry.title.chars().count(),
                    value: entry.title.clone(),
                    prompt: PendingPrompt::EditTitle {
                        id: entry.id,
                        current: entry.title,
                    },
                });
            }
            Command::EditLink => {
                let Some(entry) = self.panes.active_pane().view.entries(true).into_iter().next()
                else {
                    return;
                };
                let current = entry.url.clone().unwrap_or_default();
                self.modal = Some(Modal::Prompt {
                    title: "Edit Link",
                    cursor: current.chars().count(),
                    value: current.clone(),
                    prompt: PendingPrompt::EditLink {
                        id: entry.id,
                        current,
                    },
                });
            }
            Command::MoveLeft | Command::MoveRight => {
                let dest_side = if command == Command::MoveLeft { Side::Left } else { Side::Right };
                let source_side = dest_side.other();
                let Some(dest_parent) = self.panes.pane(dest_side).parent().cloned() else {
                    return;
                };
                let entries: Vec<BookmarkNode> = self
                    .panes
                    .pane(source_side)
                    .view
                    .entries(true)
                    .into_iter()
                    .filter(|entry| !entry.is_synthetic_parent())
                    .collect();
                if entries.is_empty() {
                    return;
                }
                let anchor = self.panes.pane(dest_side).view.entries(true).into_iter().next();
                let index = insertion_index(anchor.as_ref());

                let store = self.store.clone();
                let failures = move_entries(store.as_ref(), &entries, &dest_parent, index).await;
                self.report_failures("Move", &failures);
                self.refresh_both().await;
            }
            Command::Root => {
                self.panes.set_parent(Side::Left, None);
                self.panes.set_parent(Side::Right, None);
                self.persist_prefs();
                self.navigate(Side::Left, None).await;
                self.navigate(Side::Right, None).await;
            }
            Command::NewFile | Command::NewDirectory => {
                let Some(parent) = self.panes.active_pane().parent().cloned() else {
                    return;
                };
                let anchor = self.panes.active_pane().view.entries(true).into_iter().next();
                let index = insertion_index(anchor.as_ref());
                if command == Command::NewFile {
                    let value = new_file_seed(anchor.as_ref());
                    self.modal = Some(Modal::Prompt {
                        title: "New Bookmark",
                        cursor: value.chars().count(),
                        value,
                        prompt: PendingPrompt::NewFile { parent, index },
                    });
                } else {
                    let value = new_directory_seed(anchor.as_ref());
                    self.modal = Some(Modal::Prompt {
                        title: "New Directory",
                        cursor: value.chars().count(),
                        value,
                        prompt: PendingPrompt::NewDirectory { parent, index },
                    });
                }
            }
            Command::Trash => {
                let entries: Vec<BookmarkNode> = self
                    .panes
                    .active_pane()
                    .view
                    .entries(true)
                    .into_iter()
                    .filter(|entry| !entry.is_synthetic_parent())
                    .collect();
                if entries.is_empty() {
                    return;
                }
                let store = self.store.clone();
                let outcome = trash_entries(store.as_ref(), &entries).await;
                self.report_failures("Remove", &outcome.failures);
                self.refresh_both().await;
                self.next_force_confirm(outcome.needs_force.into()).await;
            }
        }
    }

    async fn next_force_confirm(&mut self, mut rest: VecDeque<BookmarkNode>) {
        match rest.pop_front() {
            Some(entry) => {
                self.modal = Some(Modal::Confirm {
                    message: format!(
                        "\"{}\" directory is not empty. Remove anyway?",
                        entry.title
                    ),
                    entry,
                    rest,
                });
            }
            None => self.refresh_both().await,
        }
    }

    async fn finish_prompt(&mut self, prompt: PendingPrompt, input: String) {
        match prompt {
            PendingPrompt::EditTitle { id, current } => {
                if input == current {
                    return;
                }
                let store = self.store.clone();
                let result = store
                    .update(&id, NodePatch { title: Some(input), url: None })
                    .await;
                if let Err(err) = result {
                    self.set_toast(format!("Edit failed: {err}"));
                }
                self.refresh_both().await;
            }
            PendingPrompt::EditLink { id, current } => {
                if input == current {
                    return;
                }
                let store = self.store.clone();
                let result = store
                    .update(&id, NodePatch { title: None, url: Some(input) })
                    .await;
                if let Err(err) = result {
                    self.set_toast(format!("Edit failed: {err}"));
                }
                self.refresh_both().await;
            }
            PendingPrompt::NewFile { parent, index } => {
                let Some((title, url)) = parse_new_file_input(&input) else {
                    return;
                };
                let store = self.store.clone();
                match store
                    .create(NewNode {
                        parent_id: parent,
                        index,
                        title,
                        url: Some(url),
                    })
                    .await
                {
                    Ok(_) => self.refresh_both().await,
                    Err(err) => self.set_toast(format!("Creating bookmark failed: {err}")),
                }
            }
            PendingPrompt::NewDirectory { parent, index } => {
                let store = self.store.clone();
                match store
                    .create(NewNode {
                        parent_id: parent,
                        index,
                        title: input,
                        url: None,
                    })
                    .await
                {
                    Ok(_) => self.refresh_both().await,
                    Err(err) => self.set_toast(format!("Creating directory failed: {err}")),
                }
            }
        }
    }
}

fn modifiers_of(raw: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: raw.contains(KeyModifiers::SHIFT),
        ctrl: raw.contains(KeyModifiers::CONTROL),
        meta: raw.contains(KeyModifiers::SUPER) || raw.contains(KeyModifiers::META),
    }
}

fn mods_any(raw: KeyModifiers) -> bool {
    let mods = modifiers_of(raw);
    mods.shift || mods.ctrl || mods.meta
}

fn insert_char_at(value: &mut String, at: usize, ch: char) {
    let byte = value
        .char_indices()
        .nth(at)
        .map(|(index, _)| index)
        .unwrap_or(value.len());
    value.insert(byte, ch);
}

fn remove_char_at(value: &mut String, at: usize) {
    if let Some((byte, _)) = value.char_indices().nth(at) {
        value.remove(byte);
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

fn open_url(url: &str, background: bool) -> Result<(), String> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut command = ProcessCommand::new("open");
        if background {
            command.arg("-g");
        }
        command
    };
    #[cfg(not(target_os = "macos"))]
    let mut command = {
        let _ = background;
        ProcessCommand::new("xdg-open")
    };

    command
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| format!("failed to launch opener: {err}"))?;
    Ok(())
}

include!("chrome.rs");
