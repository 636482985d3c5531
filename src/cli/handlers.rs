use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::data_dir::resolve_data_dir;
use crate::io::kv::FileKv;
use crate::model::config::Config;
use crate::model::task::{Category, Priority};
use crate::model::view::{SortMode, ViewParams};
use crate::ops::store::TaskStore;
use crate::ops::view::project;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(cmd) = cli.command else {
        return Ok(());
    };
    let json = cli.json;
    let (mut store, config) = open(cli.data_dir.as_deref())?;

    match cmd {
        Commands::Add(args) => cmd_add(&mut store, &config, args, json),
        Commands::List(args) => cmd_list(&store, args, json),
        Commands::Toggle(args) => cmd_toggle(&mut store, args),
        Commands::Edit(args) => cmd_edit(&mut store, args),
        Commands::Rm(args) => cmd_rm(&mut store, args),
        Commands::Mv(args) => cmd_mv(&mut store, args),
        Commands::Search(args) => cmd_search(&store, args, json),
        Commands::Stats => cmd_stats(&store, json),
        Commands::Clear => cmd_clear(&mut store),
    }
}

fn open(data_dir: Option<&str>) -> Result<(TaskStore, Config), Box<dyn std::error::Error>> {
    let dir = resolve_data_dir(data_dir.map(Path::new))?;
    let config = config_io::read_config(&dir)?;
    let store = TaskStore::load(Box::new(FileKv::new(&dir)?));
    Ok((store, config))
}

// ---------------------------------------------------------------------------
// Argument parsing helpers
// ---------------------------------------------------------------------------

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_name(s).ok_or_else(|| {
        format!(
            "unknown category: {} (expected Personal, Work, Shopping, Health, Education)",
            s
        )
    })
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_name(s)
        .ok_or_else(|| format!("unknown priority: {} (expected Low, Medium, High)", s))
}

fn parse_sort(s: &str) -> Result<SortMode, String> {
    SortMode::from_name(&s.to_lowercase()).ok_or_else(|| {
        format!(
            "unknown sort mode: {} (expected default, due, priority, completion)",
            s
        )
    })
}

fn parse_due(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid due date: {} (expected YYYY-MM-DD)", s))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_add(
    store: &mut TaskStore,
    config: &Config,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = args
        .category
        .as_deref()
        .map(parse_category)
        .transpose()?
        .unwrap_or(config.defaults.category);
    let priority = args
        .priority
        .as_deref()
        .map(parse_priority)
        .transpose()?
        .unwrap_or(config.defaults.priority);
    let due = args.due.as_deref().map(parse_due).transpose()?;

    // Empty text is a silent no-op, mirroring the store contract
    if let Some(id) = store.add(&args.text, category, priority, due)? {
        if json {
            println!("{}", serde_json::to_string(&AddedJson { id })?);
        } else {
            println!("added {}", id);
        }
    }
    Ok(())
}

fn print_listing(
    store: &TaskStore,
    params: &ViewParams,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = Local::now().date_naive();
    let view = project(store.tasks(), params, today);
    // Counters cover the whole list, not the filtered view
    let counts = store.counts();

    if json {
        let out = ListJson {
            tasks: view,
            counts,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if view.is_empty() {
        println!("no tasks");
    } else {
        for task in &view {
            println!("{}", format_task_row(task, today));
        }
    }
    println!();
    println!("{}", format_counts(&counts));
    Ok(())
}

fn cmd_list(
    store: &TaskStore,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = ViewParams {
        query: args.query.unwrap_or_default(),
        category: args.category.as_deref().map(parse_category).transpose()?,
        priority: args.priority.as_deref().map(parse_priority).transpose()?,
        overdue_only: args.overdue,
        sort: args.sort.as_deref().map(parse_sort).transpose()?.unwrap_or_default(),
    };
    print_listing(store, &params, json)
}

fn cmd_search(
    store: &TaskStore,
    args: SearchArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = ViewParams {
        query: args.query,
        ..Default::default()
    };
    print_listing(store, &params, json)
}

fn cmd_toggle(store: &mut TaskStore, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    store.toggle(args.id)?;
    let state = if store.get(args.id).is_some_and(|t| t.done) {
        "done"
    } else {
        "not done"
    };
    println!("{} is {}", args.id, state);
    Ok(())
}

fn cmd_edit(store: &mut TaskStore, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let current = store
        .get(args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?
        .clone();

    let text = args.text.unwrap_or(current.text);
    let category = args
        .category
        .as_deref()
        .map(parse_category)
        .transpose()?
        .unwrap_or(current.category);
    let priority = args
        .priority
        .as_deref()
        .map(parse_priority)
        .transpose()?
        .unwrap_or(current.priority);
    let due = if args.no_due {
        None
    } else {
        match args.due.as_deref() {
            Some(s) => Some(parse_due(s)?),
            None => current.due_date,
        }
    };

    store.edit(args.id, &text, category, priority, due)?;
    println!("edited {}", args.id);
    Ok(())
}

fn cmd_rm(store: &mut TaskStore, args: IdArg) -> Result<(), Box<dyn std::error::Error>> {
    store.delete(args.id)?;
    println!("deleted {}", args.id);
    Ok(())
}

fn cmd_mv(store: &mut TaskStore, args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    store.move_to(args.id, args.position)?;
    println!("moved {}", args.id);
    Ok(())
}

fn cmd_stats(store: &TaskStore, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let counts = store.counts();
    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!("{}", format_counts(&counts));
    }
    Ok(())
}

fn cmd_clear(store: &mut TaskStore) -> Result<(), Box<dyn std::error::Error>> {
    store.clear()?;
    println!("cleared");
    Ok(())
}
