use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Personal,
    Work,
    Shopping,
    Health,
    Education,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 5] = [
        Category::Personal,
        Category::Work,
        Category::Shopping,
        Category::Health,
        Category::Education,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Education => "Education",
        }
    }

    /// Parse a category name, case-insensitively
    pub fn from_name(s: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }
}

/// Task priority. Ordering always goes through `rank`, never the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// All priorities, lowest first
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Total order: High > Medium > Low
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parse a priority name, case-insensitively
    pub fn from_name(s: &str) -> Option<Priority> {
        Priority::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, assigned at creation, never reused
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    /// `None`, `null`, and `""` all mean "no due date"
    #[serde(
        default,
        deserialize_with = "de_due_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(
        id: i64,
        text: String,
        category: Category,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Task {
            id,
            text,
            done: false,
            category,
            priority,
            due_date,
        }
    }

    /// Overdue means: has a due date strictly before `today`, and not done.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && !self.done,
            None => false,
        }
    }
}

/// Accept a date string, `null`, or `""` (the stored form of "no due date").
fn de_due_date<'de, D>(de: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let task = Task::new(
            1700000000000,
            "Buy milk".into(),
            Category::Shopping,
            Priority::High,
            Some(date("2025-06-01")),
        );
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"dueDate\":\"2025-06-01\""));
        assert!(json.contains("\"category\":\"Shopping\""));
        assert!(json.contains("\"priority\":\"High\""));
        assert!(json.contains("\"done\":false"));
    }

    #[test]
    fn empty_due_date_string_is_none() {
        let task: Task =
            serde_json::from_str(r#"{"id":1,"text":"a","done":false,"dueDate":""}"#).unwrap();
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":1,"text":"a"}"#).unwrap();
        assert!(!task.done);
        assert_eq!(task.category, Category::Personal);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn overdue_requires_past_due_and_not_done() {
        let today = date("2025-06-10");
        let mut task = Task::new(1, "a".into(), Category::Personal, Priority::Medium, None);
        assert!(!task.is_overdue(today));

        task.due_date = Some(date("2025-06-09"));
        assert!(task.is_overdue(today));

        // Due today is not overdue
        task.due_date = Some(today);
        assert!(!task.is_overdue(today));

        task.due_date = Some(date("2025-06-09"));
        task.done = true;
        assert!(!task.is_overdue(today));
    }

    #[test]
    fn priority_rank_orders_high_over_low() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn names_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_name(c.name()), Some(c));
        }
        for p in Priority::ALL {
            assert_eq!(Priority::from_name(p.name()), Some(p));
        }
        assert_eq!(Category::from_name("work"), Some(Category::Work));
        assert_eq!(Priority::from_name("HIGH"), Some(Priority::High));
        assert_eq!(Category::from_name("other"), None);
    }
}
