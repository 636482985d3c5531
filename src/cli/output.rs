use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::Task;
use crate::ops::store::Counts;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub tasks: Vec<&'a Task>,
    pub counts: Counts,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One listing row: `id [x] text  @category !priority due:date (overdue)`
pub fn format_task_row(task: &Task, today: NaiveDate) -> String {
    let checkbox = if task.done { "[x]" } else { "[ ]" };
    let mut row = format!(
        "{}  {} {}  @{} !{}",
        task.id,
        checkbox,
        task.text,
        task.category.name().to_lowercase(),
        task.priority.name().to_lowercase(),
    );
    if let Some(due) = task.due_date {
        row.push_str(&format!(" due:{}", due.format("%Y-%m-%d")));
        if task.is_overdue(today) {
            row.push_str(" (overdue)");
        }
    }
    row
}

pub fn format_counts(counts: &Counts) -> String {
    format!(
        "{} tasks · {} done · {} remaining",
        counts.total, counts.done, counts.remaining
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Category, Priority};
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn row_shows_fields_and_overdue_marker() {
        let mut task = Task::new(
            17,
            "file taxes".into(),
            Category::Work,
            Priority::High,
            Some(date("2025-04-15")),
        );
        let today = date("2025-05-01");
        assert_eq!(
            format_task_row(&task, today),
            "17  [ ] file taxes  @work !high due:2025-04-15 (overdue)"
        );

        task.done = true;
        assert_eq!(
            format_task_row(&task, today),
            "17  [x] file taxes  @work !high due:2025-04-15"
        );
    }

    #[test]
    fn row_without_due_date_omits_the_field() {
        let task = Task::new(3, "walk".into(), Category::Health, Priority::Low, None);
        assert_eq!(
            format_task_row(&task, date("2025-05-01")),
            "3  [ ] walk  @health !low"
        );
    }

    #[test]
    fn counts_line() {
        let counts = Counts {
            total: 3,
            done: 1,
            remaining: 2,
        };
        assert_eq!(format_counts(&counts), "3 tasks · 1 done · 2 remaining");
    }
}
