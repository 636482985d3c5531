use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::model::task::Task;
use crate::model::view::{SortMode, ViewParams};

/// Project the authoritative list into the displayed sequence.
///
/// Pure: borrows the tasks, mutates nothing, and is deterministic for a
/// given (tasks, params, today). Filters compose by AND; every sort is
/// stable with respect to the order that survives filtering. `today` is a
/// parameter rather than read from the clock so the overdue filter is
/// testable.
pub fn project<'a>(tasks: &'a [Task], params: &ViewParams, today: NaiveDate) -> Vec<&'a Task> {
    let query = params.query.trim().to_lowercase();

    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|t| query.is_empty() || t.text.to_lowercase().contains(&query))
        .filter(|t| params.category.is_none_or(|c| t.category == c))
        .filter(|t| params.priority.is_none_or(|p| t.priority == p))
        .filter(|t| !params.overdue_only || t.is_overdue(today))
        .collect();

    match params.sort {
        // Dated tasks ascending, undated after all dated
        SortMode::DueDate => view.sort_by_key(|t| match t.due_date {
            Some(due) => (0u8, due),
            None => (1u8, NaiveDate::MAX),
        }),
        SortMode::Priority => view.sort_by_key(|t| Reverse(t.priority.rank())),
        SortMode::Completion | SortMode::Default => view.sort_by_key(|t| t.done),
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Category, Priority};
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn today() -> NaiveDate {
        date("2025-06-10")
    }

    fn task(id: i64, text: &str) -> Task {
        Task::new(
            id,
            text.into(),
            Category::Personal,
            Priority::Medium,
            None,
        )
    }

    fn ids(view: &[&Task]) -> Vec<i64> {
        view.iter().map(|t| t.id).collect()
    }

    #[test]
    fn no_params_returns_input_order() {
        let tasks = vec![task(1, "a"), task(2, "b"), task(3, "c")];
        let view = project(&tasks, &ViewParams::default(), today());
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let tasks = vec![task(1, "Buy MILK"), task(2, "walk dog"), task(3, "milky way")];
        let params = ViewParams {
            query: "milk".into(),
            ..Default::default()
        };
        let view = project(&tasks, &params, today());
        assert_eq!(ids(&view), vec![1, 3]);

        // Surrounding whitespace in the query is ignored
        let padded = ViewParams {
            query: "  MILK ".into(),
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &padded, today())), vec![1, 3]);
    }

    #[test]
    fn filters_compose_by_and() {
        let mut work_high = task(1, "report");
        work_high.category = Category::Work;
        work_high.priority = Priority::High;
        let mut work_low = task(2, "email");
        work_low.category = Category::Work;
        work_low.priority = Priority::Low;
        let mut home_high = task(3, "repair");
        home_high.priority = Priority::High;

        let tasks = vec![work_high, work_low, home_high];
        let params = ViewParams {
            category: Some(Category::Work),
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &params, today())), vec![1]);
    }

    #[test]
    fn overdue_filter_requires_past_due_and_undone() {
        let mut yesterday = task(1, "late");
        yesterday.due_date = Some(date("2025-06-09"));
        let mut tomorrow = task(2, "future");
        tomorrow.due_date = Some(date("2025-06-11"));
        let undated = task(3, "whenever");

        let tasks = vec![yesterday.clone(), tomorrow, undated];
        let params = ViewParams {
            overdue_only: true,
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &params, today())), vec![1]);

        // Completing the task removes it from the overdue view
        yesterday.done = true;
        let tasks = vec![yesterday];
        assert!(project(&tasks, &params, today()).is_empty());
    }

    #[test]
    fn due_date_sort_puts_undated_last() {
        let mut late = task(1, "late");
        late.due_date = Some(date("2025-07-01"));
        let undated = task(2, "undated");
        let mut soon = task(3, "soon");
        soon.due_date = Some(date("2025-06-12"));

        let tasks = vec![late, undated, soon];
        let params = ViewParams {
            sort: SortMode::DueDate,
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &params, today())), vec![3, 1, 2]);
    }

    #[test]
    fn due_date_sort_is_stable_for_equal_dates() {
        let mut a = task(1, "a");
        a.due_date = Some(date("2025-06-12"));
        let mut b = task(2, "b");
        b.due_date = Some(date("2025-06-12"));
        let mut c = task(3, "c");
        c.due_date = Some(date("2025-06-11"));

        let tasks = vec![a, b, c];
        let params = ViewParams {
            sort: SortMode::DueDate,
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &params, today())), vec![3, 1, 2]);
    }

    #[test]
    fn priority_sort_is_high_medium_low() {
        let mut low = task(1, "low");
        low.priority = Priority::Low;
        let mut high = task(2, "high");
        high.priority = Priority::High;
        let mut medium = task(3, "medium");
        medium.priority = Priority::Medium;

        let tasks = vec![low, high, medium];
        let params = ViewParams {
            sort: SortMode::Priority,
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &params, today())), vec![2, 3, 1]);
    }

    #[test]
    fn priority_sort_is_stable_for_equal_priorities() {
        let tasks = vec![task(1, "a"), task(2, "b"), task(3, "c")];
        let params = ViewParams {
            sort: SortMode::Priority,
            ..Default::default()
        };
        assert_eq!(ids(&project(&tasks, &params, today())), vec![1, 2, 3]);
    }

    #[test]
    fn completion_sort_moves_done_last_stably() {
        let mut a = task(1, "a");
        a.done = true;
        let b = task(2, "b");
        let mut c = task(3, "c");
        c.done = true;

        let tasks = vec![a, b, c];
        for sort in [SortMode::Completion, SortMode::Default] {
            let params = ViewParams {
                sort,
                ..Default::default()
            };
            assert_eq!(ids(&project(&tasks, &params, today())), vec![2, 1, 3]);
        }
    }

    #[test]
    fn projection_is_deterministic() {
        let mut a = task(1, "buy milk");
        a.priority = Priority::High;
        let tasks = vec![a, task(2, "milk the cow"), task(3, "other")];
        let params = ViewParams {
            query: "milk".into(),
            sort: SortMode::Priority,
            ..Default::default()
        };
        let first = ids(&project(&tasks, &params, today()));
        let second = ids(&project(&tasks, &params, today()));
        assert_eq!(first, second);
        assert_eq!(first, vec![1, 2]);
    }
}
