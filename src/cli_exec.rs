use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use checklist::model::{ClientConfig, TodoItem};
use checklist::remote::{RemoteClient, TodoApi};
use checklist::sync::{Container, NoticeKind, PendingConfirmation};

use crate::Commands;

pub(crate) fn handle_command(config: &ClientConfig, command: Commands) -> Result<()> {
    if let Commands::Tui = command {
        return checklist::tui::run(config);
    }

    let client = RemoteClient::new(config).context("create todo client")?;
    let mut todos = Container::new(client, config.reload_after_mutation);

    match command {
        Commands::Tui => {}

        Commands::List { filter, json } => {
            todos.reload().context("load todos")?;
            todos.set_filter(filter);
            let items = todos.state().visible_items();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&items).context("serialize todos json")?
                );
            } else if items.is_empty() {
                println!("No todos yet. Add one with `checklist add <title>`.");
            } else {
                for t in items {
                    println!("{}", todo_line(t));
                }
            }
        }

        Commands::Show { id, json } => {
            let item = todos
                .api()
                .get(&id)
                .with_context(|| format!("get todo {}", id))?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&item).context("serialize todo json")?
                );
            } else {
                println!("id: {}", item.id);
                println!("title: {}", item.title);
                println!("completed: {}", item.completed);
            }
        }

        Commands::Stats { json } => {
            todos.reload().context("load todos")?;
            let stats = todos.state().stats();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("serialize stats json")?
                );
            } else {
                println!(
                    "total: {}  active: {}  completed: {}",
                    stats.total, stats.active, stats.completed
                );
            }
        }

        Commands::Add { title } => {
            let title = title.join(" ");
            todos.add_item(&title).context("add todo")?;
            if let Some(item) = todos.state().items().last() {
                println!("Added {}", todo_line(item));
            }
        }

        Commands::Toggle { id } => {
            todos.reload().context("load todos")?;
            if !todos.toggle_item(&id).context("toggle todo")? {
                anyhow::bail!("no todo with id {}", id);
            }
            if let Some(item) = todos.state().find(&id) {
                println!("{}", todo_line(item));
            }
        }

        Commands::Rm { id, yes } => {
            todos.reload().context("load todos")?;
            if todos.state().find(&id).is_none() {
                anyhow::bail!("no todo with id {}", id);
            }
            let removed = todos
                .remove_item(&id, |pending| yes || prompt_delete(pending))
                .context("delete todo")?;
            if removed {
                println!("Deleted {}", id);
            } else {
                println!("Kept {}", id);
            }
        }
    }

    // A follow-up reload can fail after the change itself went through.
    if let Some(notice) = todos.state().notice() {
        if notice.kind == NoticeKind::Error {
            eprintln!("warning: {}", notice.text);
        }
    }

    Ok(())
}

fn todo_line(t: &TodoItem) -> String {
    let mark = if t.completed { "[x]" } else { "[ ]" };
    format!("{} {:>4}  {}", mark, t.id, t.title)
}

fn prompt_delete(pending: &PendingConfirmation) -> bool {
    print!("Delete \"{}\"? [y/N] ", pending.title);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
