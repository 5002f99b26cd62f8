use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::debug;

use getfit::analysis::Analysis;
use getfit::config::StoreConfig;
use getfit::db::Store;
use getfit::db::models::{Workout, WorkoutStats};
use getfit::logging;
use getfit::session::{LoginOutcome, Session};

mod tui;

#[derive(Parser, Debug)]
#[command(version, about = "GetFit - Workout Tracker CLI", long_about = None)]
struct Args {
    /// SQLite database file (defaults to DATABASE_URL, then GetFit.db)
    #[arg(long, global = true)]
    database: Option<String>,
    /// off, error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Full-screen login, logging, stats and charts
    Interactive {
        /// Skip the login screen
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Log in, registering the name if it is new
    Login { name: String },
    /// Log a workout
    Log {
        name: String,
        #[arg(long)]
        exercise: String,
        /// DD-MM-YYYY
        #[arg(long)]
        date: String,
        /// Minutes
        #[arg(long)]
        duration: String,
        #[arg(long)]
        calories: String,
    },
    /// Delete every workout on a date
    Delete {
        name: String,
        /// DD-MM-YYYY
        #[arg(long)]
        date: String,
    },
    /// Total workouts and averages
    Stats {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// List all workouts
    List {
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Calories per day and average calories per exercise
    Analysis {
        name: String,
        #[arg(long)]
        json: bool,
    },
}

fn login_message(name: &str, outcome: LoginOutcome) -> String {
    match outcome {
        LoginOutcome::Returning => format!("Welcome back {}!", name),
        LoginOutcome::Registered => format!("User {} registered successfully!", name),
    }
}

fn print_stats(stats: &WorkoutStats) {
    println!("Total Workouts: {}", stats.count);
    println!("Average Workout Duration: {:.2} minutes", stats.avg_duration);
    println!("Average Calories Burned: {:.2}", stats.avg_calories);
}

fn print_workouts(workouts: &[Workout]) {
    if workouts.is_empty() {
        println!("No workouts logged yet.");
        return;
    }
    for workout in workouts {
        println!("{}", workout);
    }
}

fn print_analysis(analysis: &Analysis) {
    if analysis.is_empty() {
        println!("No workout data found!");
        return;
    }
    println!("Calories Burned Per Day");
    for day in &analysis.calories_per_day {
        println!("\t{}: {}", day.date, day.calories);
    }
    println!("Average Calories Burned Per Exercise");
    for exercise in &analysis.avg_calories_per_exercise {
        println!("\t{}: {:.2}", exercise.exercise, exercise.avg_calories);
    }
}

fn open_store(database: Option<String>) -> Result<Store> {
    let mut config = StoreConfig::from_env();
    if let Some(path) = database {
        config = config.with_database_url(path);
    }
    debug!("Using database {}", config.database_url);
    let url = config.database_url.clone();
    Store::open_and_initialize(config)
        .with_context(|| format!("failed to open workout database {}", url))
}

/// Every action needs a user, as in the login-first desktop flow.
fn login(store: Store, name: &str) -> Result<Session> {
    let (session, outcome) = Session::login(store, name)?;
    if outcome == LoginOutcome::Registered {
        println!("{}", login_message(session.name(), outcome));
    }
    Ok(session)
}

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    if !logging::set_log_level(&args.log_level) {
        bail!("unknown log level {:?}", args.log_level);
    }

    let store = open_store(args.database)?;

    match args.command {
        Commands::Interactive { name } => {
            let terminal = ratatui::init();
            let result = tui::run(terminal, store, name);
            ratatui::restore();
            result
        }
        Commands::Login { name } => {
            let (session, outcome) = Session::login(store, &name)?;
            println!("{}", login_message(session.name(), outcome));
            Ok(())
        }
        Commands::Log {
            name,
            exercise,
            date,
            duration,
            calories,
        } => {
            let session = login(store, &name)?;
            session.log_workout(&exercise, &date, &duration, &calories)?;
            println!("Workout logged successfully!");
            Ok(())
        }
        Commands::Delete { name, date } => {
            let session = login(store, &name)?;
            let deleted = session.delete_workouts(&date)?;
            println!("Deleted {} workout(s) on {}.", deleted, date);
            Ok(())
        }
        Commands::Stats { name, json } => {
            let session = login(store, &name)?;
            let stats = session.stats()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_stats(&stats);
            }
            Ok(())
        }
        Commands::List { name, json } => {
            let session = login(store, &name)?;
            let workouts = session.workouts()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&workouts)?);
            } else {
                print_workouts(&workouts);
            }
            Ok(())
        }
        Commands::Analysis { name, json } => {
            let session = login(store, &name)?;
            let analysis = session.analysis()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
            Ok(())
        }
    }
}
