use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::task::Task;
use crate::model::view::SortMode;
use crate::ops::view::project;

use super::app::{App, Mode};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let bg = app.theme.background;
    frame.render_widget(
        Paragraph::new("").style(Style::default().bg(bg)),
        area,
    );

    let [header_area, controls_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, app, header_area);
    render_controls(frame, app, controls_area);
    render_list(frame, app, list_area);
    render_status_row(frame, app, status_area);
}

// ---------------------------------------------------------------------------
// Header: title + counters
// ---------------------------------------------------------------------------

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let counts = app.store.counts();
    let title = " petal ";
    let counters = format!(
        "{} total · {} done · {} remaining ",
        counts.total, counts.done, counts.remaining
    );

    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let width = area.width as usize;
    let used = title.width() + counters.width();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }
    spans.push(Span::styled(
        counters,
        Style::default().fg(app.theme.dim).bg(bg),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Controls: active sort, filters, search
// ---------------------------------------------------------------------------

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = Style::default().fg(app.theme.yellow).bg(bg);
    let inactive = Style::default().fg(app.theme.dim).bg(bg);

    let style_for = |is_active: bool| if is_active { active } else { inactive };

    let mut spans = vec![
        Span::styled(
            format!(" sort:{}", app.params.sort.name()),
            style_for(app.params.sort != SortMode::Default),
        ),
        Span::styled(
            format!(
                "  category:{}",
                app.params
                    .category
                    .map_or("all".to_string(), |c| c.name().to_lowercase())
            ),
            style_for(app.params.category.is_some()),
        ),
        Span::styled(
            format!(
                "  priority:{}",
                app.params
                    .priority
                    .map_or("all".to_string(), |p| p.name().to_lowercase())
            ),
            style_for(app.params.priority.is_some()),
        ),
        Span::styled(
            format!(
                "  overdue:{}",
                if app.params.overdue_only { "on" } else { "off" }
            ),
            style_for(app.params.overdue_only),
        ),
    ];

    let query = app.params.query.trim();
    if !query.is_empty() {
        spans.push(Span::styled(
            format!("  /{}", query),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Task list
// ---------------------------------------------------------------------------

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let today = app.today();
    let view = project(app.store.tasks(), &app.params, today);

    if view.is_empty() {
        let msg = if app.store.tasks().is_empty() {
            "no tasks yet — press a to add one"
        } else {
            "nothing matches the current filters"
        };
        let line = Line::from(Span::styled(
            format!("  {}", msg),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    // Keep the cursor inside the visible window
    let height = area.height as usize;
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll + height {
        app.scroll = app.cursor + 1 - height;
    }

    let mut lines = Vec::new();
    for (i, task) in view.iter().enumerate().skip(app.scroll).take(height) {
        lines.push(task_line(app, task, i == app.cursor, area.width as usize, today));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn task_line<'a>(
    app: &App,
    task: &'a Task,
    selected: bool,
    width: usize,
    today: chrono::NaiveDate,
) -> Line<'a> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };

    let marker = if selected { "▌" } else { " " };
    let checkbox = if task.done { "[x] " } else { "[ ] " };

    let cat_badge = format!(" @{}", task.category.name().to_lowercase());
    let pri_badge = format!(" !{}", task.priority.name().to_lowercase());
    let due_text = task
        .due_date
        .map(|d| format!(" due:{}", d.format("%Y-%m-%d")))
        .unwrap_or_default();

    // Truncate the text cell to whatever the badges leave free
    let fixed = 1 + checkbox.len() + cat_badge.width() + pri_badge.width() + due_text.width();
    let text = truncate_to_width(&task.text, width.saturating_sub(fixed + 1));

    let text_style = if task.done {
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(app.theme.text_bright).bg(bg)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(
            checkbox,
            Style::default()
                .fg(if task.done {
                    app.theme.green
                } else {
                    app.theme.dim
                })
                .bg(bg),
        ),
        Span::styled(text, text_style),
        Span::styled(
            cat_badge,
            Style::default()
                .fg(app.theme.category_color(task.category))
                .bg(bg),
        ),
        Span::styled(
            pri_badge,
            Style::default()
                .fg(app.theme.priority_color(task.priority))
                .bg(bg),
        ),
    ];
    if !due_text.is_empty() {
        let due_color = if task.is_overdue(today) {
            app.theme.red
        } else {
            app.theme.dim
        };
        spans.push(Span::styled(
            due_text,
            Style::default().fg(due_color).bg(bg),
        ));
    }

    // Pad the row so the selection background reaches the edge
    let used: usize = spans.iter().map(|s| s.content.width()).sum();
    if used < width {
        spans.push(Span::styled(
            " ".repeat(width - used),
            Style::default().bg(bg),
        ));
    }

    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Status row
// ---------------------------------------------------------------------------

fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.mode {
        Mode::Navigate => {
            if let Some(ref status) = app.status {
                Line::from(Span::styled(
                    format!(" {}", status),
                    Style::default().fg(app.theme.yellow).bg(bg),
                ))
            } else {
                hint_line(app, width, "a add  e edit  space toggle  d delete  / search  s sort  q quit")
            }
        }
        Mode::Insert | Mode::Edit => {
            let prompt = if app.mode == Mode::Insert { "+ " } else { "~ " };
            input_line(app, width, prompt, "Enter save  Esc cancel")
        }
        Mode::Search => input_line(app, width, "/", "Enter keep  Esc cancel"),
    };

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

fn hint_line<'a>(app: &App, width: usize, hint: &'a str) -> Line<'a> {
    let bg = app.theme.background;
    let mut spans = Vec::new();
    let hint_width = hint.width();
    if hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - hint_width),
            Style::default().bg(bg),
        ));
    }
    spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    Line::from(spans)
}

fn input_line<'a>(app: &'a App, width: usize, prompt: &'a str, hint: &'a str) -> Line<'a> {
    let bg = app.theme.background;
    let mut spans = vec![
        Span::styled(
            format!("{}{}", prompt, app.input),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ),
        // ▌ cursor
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
    ];
    let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let hint_width = hint.width();
    if content_width + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - content_width - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
    Line::from(spans)
}

/// Truncate a string to a display width, appending … when cut
fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
