use anyhow::Result;
use clap::{Parser, Subcommand};

use expense::api::ApiClient;
use expense::cli::{
    handle_category_command, handle_login, handle_logout, handle_report_command, handle_status,
    handle_transaction_command, CategoryCommands, ReportArgs, TransactionCommands,
};
use expense::config::{paths::ExpensePaths, settings::Settings};
use expense::dashboard::Dashboard;
use expense::session::{LogObserver, Session, SessionStore};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal client for a personal expense tracker",
    long_about = "Expense CLI records income and expenses against a remote backend \
                  and shows where the money goes, broken down by category."
)]
struct Cli {
    /// Backend base URL (overrides config.json)
    #[arg(long, global = true, env = "EXPENSE_CLI_API_URL")]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the backend
    Login {
        /// Account email (defaults to the last one used)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show login state
    Status,

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Show the expense breakdown by category
    Report(ReportArgs),

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let effective = settings.clone().with_api_base_url(cli.api_url.clone());

    // Restore the session; the store follows every later change
    let store = SessionStore::new(paths.session_file());
    let mut session = Session::restore(store.load()?);
    session.subscribe(Box::new(LogObserver));
    session.subscribe(Box::new(store));

    let client = ApiClient::new(&effective)?;
    let mut dashboard = Dashboard::new(client, session);

    match cli.command {
        Some(Commands::Login { email }) => {
            handle_login(&mut dashboard, &mut settings, &paths, email)?;
        }
        Some(Commands::Logout) => {
            handle_logout(&mut dashboard)?;
        }
        Some(Commands::Status) => {
            handle_status(&mut dashboard, &settings, &effective.api_base_url)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&mut dashboard, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&mut dashboard, &effective, cmd)?;
        }
        Some(Commands::Report(args)) => {
            handle_report_command(&mut dashboard, &effective, args)?;
        }
        Some(Commands::Config) => {
            println!("Expense CLI Configuration");
            println!("=========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Session file:     {}", paths.session_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:    {}", effective.api_base_url);
            println!("  Request timeout: {}s", effective.request_timeout_secs);
            println!("  Currency:        {}", effective.currency_symbol);
            println!("  Date format:     {}", effective.date_format);
            if let Some(email) = &settings.last_email {
                println!("  Last email:      {}", email);
            }
        }
        None => {
            println!("Expense CLI - Personal expense tracker");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense login' to get started.");
        }
    }

    Ok(())
}
