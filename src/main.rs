mod commands;

use agenda::endpoint::EndpointConfig;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ag",
    version,
    about = "Task list and month calendar for a remote task service"
)]
struct Cli {
    /// Base URL of the task service (wins over every other source)
    #[arg(long, env = "AGENDA_API_URL", global = true)]
    api_url: Option<String>,

    /// Host name the client runs on; localhost and 127.0.0.1 select the local backend
    #[arg(long, env = "AGENDA_HOST", global = true)]
    host: Option<String>,

    /// Service URL injected by the deployment
    #[arg(long, env = "AGENDA_SERVICE_URL", global = true)]
    service_url: Option<String>,

    /// Output as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks with stats and the month calendar
    List {
        /// Filter (all, pending, completed)
        #[arg(short, long, default_value = "all")]
        filter: String,
        /// Month to show in the calendar (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Leave the calendar out
        #[arg(long)]
        no_calendar: bool,
    },
    /// Create a task
    Add {
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD, default: today)
        #[arg(short, long, conflicts_with = "no_due")]
        due: Option<String>,
        /// Create without a due date
        #[arg(long)]
        no_due: bool,
    },
    /// Flip a task between pending and completed
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the month grid, marking days with tasks
    Calendar {
        /// Month to show (YYYY-MM, default: current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Move the cursor by N months (negative goes back)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        shift: i32,
    },
    /// Show the tasks due on a date
    Day {
        /// Date (YYYY-MM-DD or "today")
        date: String,
    },
    /// Show total, completed, and pending counts
    Stats,
    /// Check that the task service is reachable
    Health {
        /// Keep polling every 30 seconds until Ctrl-C
        #[arg(short, long)]
        watch: bool,
    },
    /// Interactive session with periodic health checks
    Shell,
    /// Print the resolved task service URL
    Endpoint,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = agenda::logging::init_tracing(cli.verbose, cli.quiet) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    let endpoint = EndpointConfig {
        override_url: cli.api_url,
        host: cli.host,
        service_url: cli.service_url,
    };

    let result = match cli.command {
        Commands::List {
            filter,
            month,
            no_calendar,
        } => {
            commands::list::run(&endpoint, &filter, month.as_deref(), !no_calendar, cli.json)
                .await
        }
        Commands::Add { title, due, no_due } => {
            commands::add::run(&endpoint, &title, due.as_deref(), no_due, cli.json).await
        }
        Commands::Toggle { id } => commands::toggle::run(&endpoint, &id, cli.json).await,
        Commands::Delete { id, yes } => commands::delete::run(&endpoint, &id, yes, cli.json).await,
        Commands::Calendar { month, shift } => {
            commands::calendar::run(&endpoint, month.as_deref(), shift, cli.json).await
        }
        Commands::Day { date } => commands::day::run(&endpoint, &date, cli.json).await,
        Commands::Stats => commands::stats::run(&endpoint, cli.json).await,
        Commands::Health { watch } => commands::health::run(&endpoint, watch, cli.json).await,
        Commands::Shell => commands::shell::run(&endpoint).await,
        Commands::Endpoint => commands::endpoint::run(&endpoint, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
