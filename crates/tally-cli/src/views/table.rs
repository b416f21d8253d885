use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use tally_core::models::{FeedItem, Frequency, LedgerCause, Task, TodayItem};

pub fn display_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks yet. Add one with: tally add \"Morning run\" -f daily");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Frequency", "Active"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(&task.id.to_string()[..7]));

        let mut title_cell = Cell::new(&task.title);
        if !task.is_active {
            title_cell = title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        }
        row.add_cell(title_cell);

        row.add_cell(frequency_cell(task.frequency));
        row.add_cell(if task.is_active {
            Cell::new("yes")
        } else {
            Cell::new("paused").fg(Color::DarkGrey)
        });

        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_today(items: &[TodayItem]) {
    if items.is_empty() {
        println!("Nothing to do. Add a habit with: tally add \"Morning run\" -f daily");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Task", "Frequency", "Status", "Streak"]);

    for item in items {
        let task = &item.task;
        let mut row = Row::new();
        row.add_cell(Cell::new(&task.id.to_string()[..7]));

        let mut title_cell = Cell::new(&task.title);
        if item.completed_for_period {
            title_cell = title_cell.fg(Color::Green);
        }
        row.add_cell(title_cell);

        row.add_cell(frequency_cell(task.frequency));

        row.add_cell(if item.completed_for_period {
            Cell::new("✓ done").fg(Color::Green)
        } else {
            Cell::new("open")
        });

        // For open tasks this is what completing now would record
        let streak_text = if item.completed_for_period {
            String::new()
        } else if item.streak_if_completed > 1 {
            format!("continues ({})", item.streak_if_completed)
        } else {
            "-".to_string()
        };
        row.add_cell(Cell::new(streak_text));

        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_feed(items: &[FeedItem]) {
    if items.is_empty() {
        println!("No ledger events yet.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["When", "Event", "Points"]);

    for item in items {
        let mut row = Row::new();
        row.add_cell(Cell::new(item.created_at.humanize()));

        let title = item.task_title.as_deref().unwrap_or("a task");
        let label = match item.cause {
            LedgerCause::TaskCompletion => format!("Completed “{}”", title),
            LedgerCause::TaskMissed => format!("Missed “{}”", title),
        };
        row.add_cell(Cell::new(label));

        let delta_cell = if item.delta >= 0 {
            Cell::new(format!("+{}", item.delta)).fg(Color::Green)
        } else {
            Cell::new(item.delta.to_string()).fg(Color::Red)
        };
        row.add_cell(delta_cell);

        table.add_row(row);
    }

    println!("{table}");
}

fn frequency_cell(frequency: Frequency) -> Cell {
    match frequency {
        Frequency::Daily => Cell::new("daily").fg(Color::Cyan),
        Frequency::Weekly => Cell::new("weekly").fg(Color::Blue),
        Frequency::None => Cell::new("one-off"),
    }
}
