use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pt", about = concat!("[*] petal v", env!("CARGO_PKG_VERSION"), " - a small to-do list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks, filtered and sorted
    List(ListArgs),
    /// Flip a task between done and not done
    Toggle(IdArg),
    /// Edit a task's text, category, priority, or due date
    Edit(EditArgs),
    /// Delete a task
    Rm(IdArg),
    /// Move a task to a new position in the list
    Mv(MvArgs),
    /// Search tasks by text
    Search(SearchArgs),
    /// Show task counters
    Stats,
    /// Delete all tasks
    Clear,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text
    pub text: String,
    /// Category (Personal, Work, Shopping, Health, Education)
    #[arg(long)]
    pub category: Option<String>,
    /// Priority (Low, Medium, High)
    #[arg(long)]
    pub priority: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show only tasks whose text contains this (case-insensitive)
    pub query: Option<String>,
    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,
    /// Filter by priority
    #[arg(long)]
    pub priority: Option<String>,
    /// Show only overdue tasks
    #[arg(long)]
    pub overdue: bool,
    /// Sort mode (default, due, priority, completion)
    #[arg(long)]
    pub sort: Option<String>,
}

#[derive(Args)]
pub struct IdArg {
    /// Task id (as shown by `pt list`)
    pub id: i64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id
    pub id: i64,
    /// New task text
    #[arg(long)]
    pub text: Option<String>,
    /// New category
    #[arg(long)]
    pub category: Option<String>,
    /// New priority
    #[arg(long)]
    pub priority: Option<String>,
    /// New due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Remove the due date
    #[arg(long, conflicts_with = "due")]
    pub no_due: bool,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task id
    pub id: i64,
    /// New position (0-indexed; clamped to the list length)
    pub position: usize,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to search for (case-insensitive)
    pub query: String,
}
