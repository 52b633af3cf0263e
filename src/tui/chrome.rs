// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, row-formatting, and overlay helpers used by TUI
/// rendering.
fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let title_area = layout[0];
    let main_area = layout[1];
    let footer_area = layout[2];

    frame.render_widget(
        Paragraph::new(title_line(&app.titles, app.panes.active())),
        title_area,
    );

    let pane_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_area);
    draw_pane(frame, app, Side::Left, pane_areas[0]);
    draw_pane(frame, app, Side::Right, pane_areas[1]);

    let footer = match &app.toast {
        Some(toast) => Line::from(Span::styled(
            toast.message.clone(),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        None => footer_help_line(&app.states),
    };
    frame.render_widget(Paragraph::new(footer), footer_area);

    if app.show_help {
        draw_help(frame, area);
    } else if let Some(modal) = app.modal.clone() {
        draw_modal(frame, area, &modal);
    }
}

fn draw_pane(frame: &mut Frame<'_>, app: &mut App, side: Side, area: Rect) {
    let is_active = app.panes.active() == side;
    let key = match side {
        Side::Left => '1',
        Side::Right => '2',
    };
    let title = view_title(&app.titles[App::title_slot(side)], key);
    let border_style = if is_active {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match side {
        Side::Left => app.layout.left = inner,
        Side::Right => app.layout.right = inner,
    }
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let widths = app.panes.pane(side).view.columns().cell_widths(flexible_width(inner));
    let header_area = Rect { height: 1, ..inner };
    frame.render_widget(
        Paragraph::new(header_line(&widths))
            .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Gray)),
        header_area,
    );
    if inner.height == 1 {
        return;
    }

    let rows_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    let height = usize::from(rows_area.height);
    app.panes.view_mut(side).ensure_visible(height);

    let view = &app.panes.pane(side).view;
    if let Some(error) = view.error() {
        frame.render_widget(
            Paragraph::new(format!("✗ {error}"))
                .style(Style::default().fg(ERROR_COLOR))
                .wrap(Wrap { trim: true }),
            rows_area,
        );
        return;
    }

    let offset = view.offset();
    let end = (offset + height).min(view.rows().len());
    let items = view.rows()[offset..end]
        .iter()
        .map(|row| {
            let mut item = ListItem::new(format_row(&row.node, &widths));
            let mut style = Style::default();
            if row.selected {
                style = style.bg(SELECTED_BG).fg(Color::White);
            }
            if row.last_selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            item = item.style(style);
            item
        })
        .collect::<Vec<_>>();
    frame.render_widget(List::new(items), rows_area);
}

fn draw_modal(frame: &mut Frame<'_>, area: Rect, modal: &Modal) {
    match modal {
        Modal::Prompt {
            title,
            value,
            cursor,
            ..
        } => {
            let overlay = centered_rect(area, 56, 3);
            frame.render_widget(Clear, overlay);
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} "))
                .border_style(Style::default().fg(FOCUS_COLOR));
            let inner = block.inner(overlay);
            frame.render_widget(block, overlay);
            frame.render_widget(Paragraph::new(value.as_str()), inner);

            let visible_cursor = (*cursor).min(usize::from(inner.width.saturating_sub(1)));
            frame.set_cursor(inner.x + visible_cursor as u16, inner.y);
        }
        Modal::Confirm { message, .. } => {
            let overlay = centered_rect(area, 56, 4);
            frame.render_widget(Clear, overlay);
            let block = Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .border_style(Style::default().fg(ERROR_COLOR));
            let inner = block.inner(overlay);
            frame.render_widget(block, overlay);
            let text = Text::from(vec![
                Line::from(message.clone()),
                Line::from(Span::styled(
                    "[y]es  [n]o",
                    Style::default().fg(FOOTER_KEY_COLOR),
                )),
            ]);
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
        }
    }
}

fn draw_help(frame: &mut Frame<'_>, area: Rect) {
    let overlay = centered_rect(area, 62, 20);
    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Keys ")
        .border_style(Style::default().fg(FOCUS_COLOR));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(help_text()).wrap(Wrap { trim: false }),
        inner,
    );
}

fn help_text() -> String {
    [
        "Tab            switch active pane",
        "Left / Right   focus left / right pane",
        "Ctrl+1 / 2     focus left / right pane",
        "Up / Down      move selection",
        "Shift+Up/Down  extend selection",
        "Ctrl+Shift+Up/Down  shrink selection",
        "Enter          open selection / enter directory",
        "Backspace      parent directory",
        "a-z 0-9        jump to next matching entry",
        "[ / ]          move selection to left / right pane",
        "F2             edit title",
        "F4             edit link",
        "F6             new bookmark",
        "F7             new directory",
        "F8 / Delete    delete selection",
        "F9             reset both panes to the root",
        "Ctrl+R         refresh both panes",
        "Ctrl+T / B / L copy titles / ids / links",
        "F1 or ?        this help",
        "F10 / Ctrl+Q   quit",
    ]
    .join("\n")
}

fn title_line(titles: &[String; 2], active: Side) -> Line<'static> {
    let style_for = |side: Side| {
        if side == active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    Line::from(vec![
        Span::styled(titles[0].clone(), style_for(Side::Left)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(titles[1].clone(), style_for(Side::Right)),
    ])
}

fn view_title(label: &str, key: char) -> String {
    let label = if label.is_empty() { "..." } else { label };
    format!("─[{key}]─ {label} ")
}

fn footer_help_line(states: &CommandStates) -> Line<'static> {
    let mut spans = Vec::new();
    push_hint(&mut spans, "Tab", "pane", true);
    push_hint(&mut spans, "Enter", "open", true);
    push_hint(&mut spans, "[", "◀", states.move_left);
    push_hint(&mut spans, "]", "▶", states.move_right);
    push_hint(&mut spans, "F2", "title", states.edit_title);
    push_hint(&mut spans, "F4", "link", states.edit_link);
    push_hint(&mut spans, "F6", "+file", states.new_file);
    push_hint(&mut spans, "F7", "+dir", states.new_directory);
    push_hint(&mut spans, "F8", "del", states.trash);
    push_hint(&mut spans, "F9", "root", true);
    push_hint(&mut spans, "F1", "help", true);
    Line::from(spans)
}

fn push_hint(spans: &mut Vec<Span<'static>>, key: &str, label: &str, enabled: bool) {
    let (key_style, label_style) = if enabled {
        (
            Style::default().fg(FOOTER_KEY_COLOR),
            Style::default().fg(FOOTER_LABEL_COLOR),
        )
    } else {
        (
            Style::default().fg(FOOTER_DISABLED_COLOR),
            Style::default().fg(FOOTER_DISABLED_COLOR),
        )
    };
    if !spans.is_empty() {
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(key.to_owned(), key_style));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(label.to_owned(), label_style));
}

fn flexible_width(area: Rect) -> u16 {
    area.width.saturating_sub(ICON_COLUMN_WIDTH)
}

fn header_line(widths: &[u16; 4]) -> String {
    let mut line = " ".repeat(usize::from(ICON_COLUMN_WIDTH));
    line.push_str(&fit("Name", widths[0]));
    line.push_str(&fit("Link", widths[1]));
    line.push_str(&fit("Added", widths[2]));
    line.push_str(&fit("Modified", widths[3]));
    line
}

fn format_row(node: &BookmarkNode, widths: &[u16; 4]) -> String {
    let icon = match node.kind() {
        NodeKind::Directory if node.readonly => "▪ ",
        NodeKind::Directory => "▸ ",
        NodeKind::File => "· ",
    };
    let mut line = icon.to_owned();
    line.push_str(&fit(&node.title, widths[0]));
    line.push_str(&fit(node.url.as_deref().unwrap_or(""), widths[1]));
    line.push_str(&fit(&format_date(node.date_added), widths[2]));
    line.push_str(&fit(&format_date(node.date_group_modified), widths[3]));
    line
}

/// Truncates to `width` cells with a trailing ellipsis, else pads with
/// spaces; a trailing space separates adjacent columns.
fn fit(text: &str, width: u16) -> String {
    let width = usize::from(width);
    if width == 0 {
        return String::new();
    }
    let visible = width - usize::from(width > 1);
    let count = text.chars().count();
    let mut out = if count > visible {
        let mut truncated = text
            .chars()
            .take(visible.saturating_sub(1))
            .collect::<String>();
        truncated.push('…');
        truncated
    } else {
        text.to_owned()
    };
    let out_count = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(out_count)));
    out
}

/// Divider index (1..=3) if `x_rel` falls on a column boundary of the
/// header row, within a one-cell grab tolerance.
fn divider_at(x_rel: u16, widths: &[u16; 4]) -> Option<usize> {
    let mut boundary = ICON_COLUMN_WIDTH;
    for (position, width) in widths.iter().take(3).enumerate() {
        boundary = boundary.saturating_add(*width);
        if x_rel + 1 >= boundary && x_rel <= boundary + 1 {
            return Some(position + 1);
        }
    }
    None
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Days-since-epoch to a civil date, proleptic Gregorian.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = if month <= 2 { year + 1 } else { year };
    (year, month, day)
}

fn format_date(millis: Option<u64>) -> String {
    match millis {
        Some(millis) => {
            let days = (millis / 86_400_000) as i64;
            let (year, month, day) = civil_from_days(days);
            format!("{year:04}-{month:02}-{day:02}")
        }
        None => String::new(),
    }
}
