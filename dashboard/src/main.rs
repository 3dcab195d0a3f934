use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use shared::{CategoryFilter, ExpenseField, GoalField, GoalStatus, MoodField, SortOrder, TaskField, TaskStatus};

use wellness_dashboard::backend::config::{DashboardConfig, SortPreference};
use wellness_dashboard::backend::domain::{
    apply_view, budget_progress, daily_mood_trend, format_duration, format_name, format_phone, goal_status_style,
    priority_style, recent_entries, task_status_style, DateStyle, ListRecord, MoodSummary, StatusLabel,
};
use wellness_dashboard::backend::storage::JsonFileApi;
use wellness_dashboard::ui::state::{completed_goals, DashboardState};
use wellness_dashboard::ui::DashboardCoordinator;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Personal productivity and wellness dashboard")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Data directory (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List expenses with totals
    Expenses {
        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,
        /// Only show this category ("all" shows everything)
        #[arg(long)]
        category: Option<String>,
        /// Sort by date, amount, description or category
        #[arg(long)]
        sort: Option<ExpenseField>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Write the listed expenses as CSV into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List tasks
    Tasks {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Sort by title, due_date, priority or status
        #[arg(long)]
        sort: Option<TaskField>,
        #[arg(long)]
        desc: bool,
    },
    /// List career goals with mean progress
    Goals {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Sort by title, target_date, progress, priority or status
        #[arg(long)]
        sort: Option<GoalField>,
        #[arg(long)]
        desc: bool,
    },
    /// Last week's mood summary, daily trend and check-in history
    Moods,
    /// Budget progress against this data's expenses
    Budgets,
    /// Format a single value the way the dashboard displays it
    Format {
        #[command(subcommand)]
        kind: FormatKind,
    },
}

#[derive(Subcommand)]
enum FormatKind {
    Currency { value: String },
    Date { value: String },
    Relative { value: String },
    Percentage { value: f64 },
    Size { bytes: u64 },
    Duration { seconds: u64 },
    Phone { value: String },
    Name { value: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_directory = Some(data_dir);
    }

    if let Commands::Format { kind } = &cli.command {
        let state = DashboardState::from_config(&config);
        println!("{}", format_value(&state, kind));
        return Ok(());
    }

    let data_directory = config.resolved_data_directory();
    info!("🚀 Starting dashboard with data directory {}", data_directory.display());
    let api = JsonFileApi::new(&data_directory)
        .with_context(|| format!("Failed to open data directory {}", data_directory.display()))?;

    let mut coordinator = DashboardCoordinator::new(Arc::new(api), DashboardState::from_config(&config));
    coordinator.refresh().await;
    for notification in coordinator.state.notifications.drain() {
        error!("❌ {}", notification.message);
    }

    match cli.command {
        Commands::Expenses {
            search,
            category,
            sort,
            desc,
            export,
        } => {
            let page = coordinator.state.expenses.state_mut();
            if let Some(term) = search {
                page.set_search_term(term);
            }
            if let Some(category) = category {
                page.set_filter(CategoryFilter::from_ui_value(&category));
            }
            if let Some(field) = sort {
                page.set_sort_field(field);
            }
            if desc {
                page.set_sort_order(SortOrder::Descending);
            }

            print_expenses(&mut coordinator.state);

            if let Some(directory) = export {
                coordinator.state.export_directory = Some(directory);
                coordinator.state.expenses.export();
                coordinator.tick().await;
                for notification in coordinator.state.notifications.drain() {
                    println!("{}", notification.message);
                }
            }
        }
        Commands::Tasks {
            search,
            category,
            sort,
            desc,
        } => {
            let page = coordinator.state.tasks.state_mut();
            if let Some(term) = search {
                page.set_search_term(term);
            }
            if let Some(category) = category {
                page.set_filter(CategoryFilter::from_ui_value(&category));
            }
            if let Some(field) = sort {
                page.set_sort_field(field);
            }
            if desc {
                page.set_sort_order(SortOrder::Descending);
            }
            print_tasks(&mut coordinator.state);
        }
        Commands::Goals {
            search,
            category,
            sort,
            desc,
        } => {
            let page = coordinator.state.goals.state_mut();
            if let Some(term) = search {
                page.set_search_term(term);
            }
            if let Some(category) = category {
                page.set_filter(CategoryFilter::from_ui_value(&category));
            }
            if let Some(field) = sort {
                page.set_sort_field(field);
            }
            if desc {
                page.set_sort_order(SortOrder::Descending);
            }
            print_goals(&mut coordinator.state);
        }
        Commands::Moods => print_moods(&coordinator.state, &config.default_page_sort.moods),
        Commands::Budgets => print_budgets(&coordinator.state),
        Commands::Format { .. } => {}
    }

    Ok(())
}

fn print_expenses(state: &mut DashboardState) {
    let Some(snapshot) = state.cache.expenses.snapshot() else {
        println!("Expenses are unavailable");
        return;
    };
    let view = state.expenses.visible(snapshot);
    let formatter = &state.formatter;

    println!("{:<6} {:<14} {:<30} {:<16} {:>14}", "ID", "Date", "Description", "Category", "Amount");
    for expense in &view.records {
        println!(
            "{:<6} {:<14} {:<30} {:<16} {:>14}",
            expense.id,
            formatter.format_date(expense.date.as_deref(), DateStyle::Short),
            expense.description,
            expense.category.as_deref().unwrap_or("-"),
            formatter.format_currency(Some(ListRecord::amount(*expense))),
        );
    }
    println!();
    println!(
        "{} expenses, total {}, average {}",
        view.count,
        formatter.format_currency(Some(view.total)),
        formatter.format_currency(Some(view.average)),
    );
    for category in view.category_breakdown() {
        println!(
            "  {:<16} {:>14} ({})",
            category.category,
            formatter.format_currency(Some(category.total)),
            category.count
        );
    }
}

fn print_tasks(state: &mut DashboardState) {
    let Some(snapshot) = state.cache.tasks.snapshot() else {
        println!("Tasks are unavailable");
        return;
    };
    let view = state.tasks.visible(snapshot);
    let formatter = &state.formatter;

    println!("{:<6} {:<36} {:<10} {:<12} {:<14}", "ID", "Title", "Priority", "Status", "Due");
    for task in &view.records {
        let priority = priority_style(&StatusLabel::parse(task.priority.as_deref()));
        let status = task_status_style(&StatusLabel::<TaskStatus>::parse(task.status.as_deref()));
        println!(
            "{:<6} {:<36} {:<10} {:<12} {:<14}",
            task.id,
            task.title,
            priority.text,
            status.text,
            formatter.format_date(task.due_date.as_deref(), DateStyle::Short),
        );
    }
    println!();
    println!("{} tasks", view.count);
}

fn print_goals(state: &mut DashboardState) {
    let Some(snapshot) = state.cache.goals.snapshot() else {
        println!("Goals are unavailable");
        return;
    };
    let view = state.goals.visible(snapshot);
    let formatter = &state.formatter;

    println!("{:<6} {:<36} {:<10} {:<12} {:>9} {:<14}", "ID", "Title", "Priority", "Status", "Progress", "Target");
    for goal in &view.records {
        let priority = priority_style(&StatusLabel::parse(goal.priority.as_deref()));
        let status = goal_status_style(&StatusLabel::<GoalStatus>::parse(goal.status.as_deref()));
        println!(
            "{:<6} {:<36} {:<10} {:<12} {:>9} {:<14}",
            goal.id,
            goal.title,
            priority.text,
            status.text,
            formatter.format_percentage(Some(ListRecord::amount(*goal))),
            formatter.format_date(goal.target_date.as_deref(), DateStyle::Short),
        );
    }
    println!();
    println!(
        "{} goals, {} completed, mean progress {}",
        view.count,
        completed_goals(&view),
        formatter.format_percentage(Some(view.average)),
    );
}

fn print_moods(state: &DashboardState, history_sort: &SortPreference<MoodField>) {
    let Some(entries) = state.cache.moods.data() else {
        println!("Mood logs are unavailable");
        return;
    };
    let now = Utc::now().naive_utc();
    let summary = MoodSummary::weekly(entries, now);
    if summary.entry_count == 0 {
        println!("No mood check-ins in the last 7 days");
    } else {
        println!("Last 7 days");
        println!("Check-ins:      {}", summary.entry_count);
        println!("Average mood:   {:.1}", summary.average_mood);
        println!("Average energy: {:.1}", summary.average_energy);
        println!("Average stress: {:.1}", summary.average_stress);
        println!("Average sleep:  {:.1}h", summary.average_sleep);
        println!("Wellness score: {:.1}", summary.wellness_score);
        if let Some(category) = summary.category {
            println!("Overall:        {}", category.label());
        }
        println!();
        for (day, average) in daily_mood_trend(&recent_entries(entries, now)) {
            println!("  {}  {:.1}", day, average);
        }
    }

    let history = apply_view(entries, &history_sort.to_params());
    if history.count == 0 {
        return;
    }
    println!();
    println!("{:<6} {:<14} {:>5} {:<16} Notes", "ID", "Date", "Mood", "Label");
    for entry in &history.records {
        println!(
            "{:<6} {:<14} {:>5} {:<16} {}",
            entry.id,
            state.formatter.format_date(entry.date.as_deref(), DateStyle::Short),
            entry.mood_score,
            entry.mood_label.as_deref().unwrap_or("-"),
            entry.notes.as_deref().unwrap_or(""),
        );
    }
}

fn print_budgets(state: &DashboardState) {
    let (Some(budgets), Some(expenses)) = (state.cache.budgets.data(), state.cache.expenses.data()) else {
        println!("Budgets are unavailable");
        return;
    };
    let formatter = &state.formatter;

    for progress in budget_progress(budgets, expenses) {
        let marker = if progress.is_exceeded() {
            "EXCEEDED"
        } else if progress.is_over_threshold() {
            "ALERT"
        } else {
            ""
        };
        println!(
            "{:<20} {:>14} of {:>14} {:>8} {}",
            progress.name,
            formatter.format_currency(Some(progress.spent)),
            formatter.format_currency(Some(progress.amount)),
            formatter.format_percentage(Some(progress.spent_percentage)),
            marker
        );
    }
}

fn format_value(state: &DashboardState, kind: &FormatKind) -> String {
    let formatter = &state.formatter;
    match kind {
        FormatKind::Currency { value } => formatter.format_currency_str(value),
        FormatKind::Date { value } => formatter.format_date(Some(value.as_str()), DateStyle::Long),
        FormatKind::Relative { value } => formatter.format_relative(Some(value.as_str()), Utc::now()),
        FormatKind::Percentage { value } => formatter.format_percentage(Some(*value)),
        FormatKind::Size { bytes } => formatter.format_file_size(*bytes),
        FormatKind::Duration { seconds } => format_duration(*seconds),
        FormatKind::Phone { value } => format_phone(value),
        FormatKind::Name { value } => format_name(value),
    }
}
