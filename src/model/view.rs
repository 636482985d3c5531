use crate::model::task::{Category, Priority};

/// How the projected list is ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Undone before done (the stored order already satisfies this)
    #[default]
    Default,
    DueDate,
    Priority,
    Completion,
}

impl SortMode {
    /// All modes, in cycle order
    pub const ALL: [SortMode; 4] = [
        SortMode::Default,
        SortMode::DueDate,
        SortMode::Priority,
        SortMode::Completion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::DueDate => "due",
            SortMode::Priority => "priority",
            SortMode::Completion => "completion",
        }
    }

    pub fn from_name(s: &str) -> Option<SortMode> {
        match s {
            "default" => Some(SortMode::Default),
            "due" | "duedate" | "due-date" => Some(SortMode::DueDate),
            "priority" => Some(SortMode::Priority),
            "completion" => Some(SortMode::Completion),
            _ => None,
        }
    }
}

/// User-controlled view parameters. Ephemeral — never persisted.
#[derive(Debug, Clone, Default)]
pub struct ViewParams {
    /// Case-insensitive substring match against task text
    pub query: String,
    /// `None` means "all"
    pub category: Option<Category>,
    /// `None` means "all"
    pub priority: Option<Priority>,
    pub overdue_only: bool,
    pub sort: SortMode,
}

impl ViewParams {
    /// True if any filter narrows the list. When false and sort is Default,
    /// the displayed order equals the stored order.
    pub fn is_filtered(&self) -> bool {
        !self.query.trim().is_empty()
            || self.category.is_some()
            || self.priority.is_some()
            || self.overdue_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_unfiltered() {
        assert!(!ViewParams::default().is_filtered());
    }

    #[test]
    fn whitespace_query_does_not_count_as_filter() {
        let params = ViewParams {
            query: "   ".into(),
            ..Default::default()
        };
        assert!(!params.is_filtered());
    }

    #[test]
    fn any_filter_marks_params_filtered() {
        let base = ViewParams::default();
        let with_query = ViewParams {
            query: "milk".into(),
            ..base.clone()
        };
        assert!(with_query.is_filtered());
        let with_category = ViewParams {
            category: Some(Category::Work),
            ..base.clone()
        };
        assert!(with_category.is_filtered());
        let with_overdue = ViewParams {
            overdue_only: true,
            ..base
        };
        assert!(with_overdue.is_filtered());
    }

    #[test]
    fn sort_mode_names_round_trip() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(SortMode::from_name("duedate"), Some(SortMode::DueDate));
        assert_eq!(SortMode::from_name("bogus"), None);
    }
}
