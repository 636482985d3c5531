use chrono::NaiveDate;

use crate::model::task::{Category, Priority};

/// A quick-entry line split into task text and inline field tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickEntry {
    pub text: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
}

/// Extract inline field tokens from an entered line: `@category`,
/// `!priority`, and `due:YYYY-MM-DD`. Tokens may appear anywhere; the last
/// occurrence of each kind wins. Words that look like tokens but don't
/// resolve (`@nobody`, `!urgent`, `due:tomorrow`) stay in the text.
pub fn parse_quick_entry(input: &str) -> QuickEntry {
    let mut category = None;
    let mut priority = None;
    let mut due_date = None;
    let mut words: Vec<&str> = Vec::new();

    for word in input.split_whitespace() {
        if let Some(name) = word.strip_prefix('@')
            && let Some(c) = Category::from_name(name)
        {
            category = Some(c);
            continue;
        }
        if let Some(name) = word.strip_prefix('!')
            && let Some(p) = Priority::from_name(name)
        {
            priority = Some(p);
            continue;
        }
        if let Some(date) = word.strip_prefix("due:")
            && let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        {
            due_date = Some(d);
            continue;
        }
        words.push(word);
    }

    QuickEntry {
        text: words.join(" "),
        category,
        priority,
        due_date,
    }
}
