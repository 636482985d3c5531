use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::{Category, Priority};
use crate::model::view::SortMode;
use crate::ops::store::StoreError;
use crate::parse::parse_quick_entry;

use super::app::{App, Mode};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Status messages live for one keypress
    app.status = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert | Mode::Edit => handle_input_line(app, key),
        Mode::Search => handle_search(app, key),
    }
}

// ---------------------------------------------------------------------------
// Navigate mode
// ---------------------------------------------------------------------------

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < app.visible_ids().len() {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') => app.cursor = 0,
        KeyCode::Char('G') => {
            app.cursor = app.visible_ids().len().saturating_sub(1);
        }

        KeyCode::Char(' ') => {
            if let Some(id) = app.selected_id() {
                let result = app.store.toggle(id);
                report(app, result);
                app.clamp_cursor();
            }
        }
        KeyCode::Char('a') => {
            app.input.clear();
            app.mode = Mode::Insert;
        }
        KeyCode::Char('e') => begin_edit(app),
        KeyCode::Char('d') => {
            if let Some(id) = app.selected_id() {
                let result = app.store.delete(id);
                report(app, result);
                app.clamp_cursor();
            }
        }
        KeyCode::Char('J') => move_selected(app, 1),
        KeyCode::Char('K') => move_selected(app, -1),

        KeyCode::Char('/') => {
            app.saved_query = app.params.query.clone();
            app.input = app.params.query.clone();
            app.mode = Mode::Search;
        }
        KeyCode::Char('c') => {
            app.params.category = cycle_category(app.params.category);
            app.clamp_cursor();
        }
        KeyCode::Char('p') => {
            app.params.priority = cycle_priority(app.params.priority);
            app.clamp_cursor();
        }
        KeyCode::Char('o') => {
            app.params.overdue_only = !app.params.overdue_only;
            app.clamp_cursor();
        }
        KeyCode::Char('s') => {
            app.params.sort = next_sort(app.params.sort);
            app.clamp_cursor();
        }
        KeyCode::Char('x') => {
            let result = app.store.clear();
            report(app, result);
            app.cursor = 0;
        }
        KeyCode::Esc => {
            app.params.query.clear();
            app.clamp_cursor();
        }
        _ => {}
    }
}

fn begin_edit(app: &mut App) {
    let Some(id) = app.selected_id() else {
        return;
    };
    let Some(task) = app.store.get(id) else {
        return;
    };

    // Prefill the input line in quick-entry form so the whole task is
    // editable as one line
    let mut line = format!(
        "{} @{} !{}",
        task.text,
        task.category.name().to_lowercase(),
        task.priority.name().to_lowercase(),
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due:{}", due.format("%Y-%m-%d")));
    }

    app.input = line;
    app.editing_id = Some(id);
    app.mode = Mode::Edit;
}

fn move_selected(app: &mut App, delta: i64) {
    if !app.manual_order_active() {
        app.set_status("reordering needs the default view with no filters");
        return;
    }
    let Some(id) = app.selected_id() else {
        return;
    };
    let len = app.visible_ids().len() as i64;
    let target = app.cursor as i64 + delta;
    if target < 0 || target >= len {
        return;
    }
    // Unfiltered default view: displayed index == authoritative index
    let result = app.store.move_to(id, target as usize);
    report(app, result);
    app.cursor = target as usize;
}

// ---------------------------------------------------------------------------
// Insert / Edit modes
// ---------------------------------------------------------------------------

fn handle_input_line(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.editing_id = None;
        }
        KeyCode::Enter => commit_input_line(app),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

fn commit_input_line(app: &mut App) {
    let entry = parse_quick_entry(&app.input);
    let mode = app.mode;
    app.mode = Mode::Navigate;

    // Empty text: drop the submission, same as the store contract
    if entry.text.is_empty() {
        app.editing_id = None;
        return;
    }

    match mode {
        Mode::Insert => {
            let result = app.store.add(
                &entry.text,
                entry.category.unwrap_or(app.defaults.category),
                entry.priority.unwrap_or(app.defaults.priority),
                entry.due_date,
            );
            match result {
                Ok(Some(id)) => {
                    // Put the cursor on the new task
                    if let Some(pos) = app.visible_ids().iter().position(|&v| v == id) {
                        app.cursor = pos;
                    }
                }
                Ok(None) => {}
                Err(e) => app.set_status(format!("error: {}", e)),
            }
        }
        Mode::Edit => {
            let Some(id) = app.editing_id.take() else {
                return;
            };
            let (cur_category, cur_priority) = match app.store.get(id) {
                Some(t) => (t.category, t.priority),
                None => {
                    app.set_status("task no longer exists");
                    return;
                }
            };
            // Missing @/! tokens keep the current values; a deleted
            // due: token clears the due date
            let category = entry.category.unwrap_or(cur_category);
            let priority = entry.priority.unwrap_or(cur_priority);
            let result = app
                .store
                .edit(id, &entry.text, category, priority, entry.due_date);
            report(app, result);
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Search mode
// ---------------------------------------------------------------------------

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.params.query = app.saved_query.clone();
            app.input.clear();
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        KeyCode::Enter => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            app.input.pop();
            app.params.query = app.input.clone();
            app.clamp_cursor();
        }
        KeyCode::Char(c) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                app.input.push(c);
                app.params.query = app.input.clone();
                app.clamp_cursor();
            }
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn report(app: &mut App, result: Result<(), StoreError>) {
    if let Err(e) = result {
        app.set_status(format!("error: {}", e));
    }
}

/// Cycle a category filter: all → Personal → … → Education → all
fn cycle_category(current: Option<Category>) -> Option<Category> {
    match current {
        None => Some(Category::ALL[0]),
        Some(c) => {
            let idx = Category::ALL.iter().position(|&x| x == c).unwrap_or(0);
            Category::ALL.get(idx + 1).copied()
        }
    }
}

/// Cycle a priority filter: all → Low → Medium → High → all
fn cycle_priority(current: Option<Priority>) -> Option<Priority> {
    match current {
        None => Some(Priority::ALL[0]),
        Some(p) => {
            let idx = Priority::ALL.iter().position(|&x| x == p).unwrap_or(0);
            Priority::ALL.get(idx + 1).copied()
        }
    }
}

fn next_sort(current: SortMode) -> SortMode {
    let idx = SortMode::ALL.iter().position(|&m| m == current).unwrap_or(0);
    SortMode::ALL[(idx + 1) % SortMode::ALL.len()]
}
