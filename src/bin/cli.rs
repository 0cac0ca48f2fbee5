//! Loadcast CLI
//!
//! Command-line front end for the Load Forecaster service:
//! - Register, log in and out
//! - Request a load forecast
//! - Show the dashboard, profile and prediction history

use anyhow::Context;
use clap::{Parser, Subcommand};
use loadcast::api::{ApiClient, ClientConfig, HistoryEntry};
use loadcast::config::{generate_default_config, Config, LoggingConfig};
use loadcast::pages::{
    verify_session, ChangePasswordForm, ChangePasswordPage, DashboardPage, DashboardState,
    Effect, ForecastField, ForecastPage, HistoryPage, HistoryState, LoginPage, ProfilePage,
    ProfileState, RegisterForm, RegisterPage, Route, SessionCheck,
};
use loadcast::session::{FileTokenStore, Session};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "loadcast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Electric load forecasting client")]
#[command(long_about = "Loadcast talks to a Load Forecaster backend.\nLog in once, then request hourly load forecasts with confidence bounds.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: platform config dir, then ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Token file (overrides the config file)
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored token
    Logout,

    /// Show the current user
    Profile,

    /// Show past predictions
    History {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Request a load forecast
    Forecast {
        /// Temperature in °C
        #[arg(short, long, allow_hyphen_values = true)]
        temperature: String,
        /// Hour of day (0-23)
        #[arg(short = 'H', long)]
        hour: String,
        /// Date as YYYY-MM-DD or DD-MM-YYYY (default: today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Summary of your account and predictions
    Dashboard,

    /// Check the stored token with the server
    Verify,

    /// Change your password
    ChangePassword {
        #[arg(long)]
        old: String,
        #[arg(long)]
        new: String,
    },

    /// Show backend health
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &cli.token_file {
        config.session.token_file = path.clone();
    }

    init_logging(&config.logging);
    tracing::debug!("Backend: {}", config.api.base_url);

    let session = Session::new(FileTokenStore::new(&config.session.token_file));
    let api = ApiClient::new(ClientConfig::from(&config.api), session.clone())
        .context("Failed to create HTTP client")?;

    match cli.command {
        Commands::Login { email, password } => {
            let mut page = LoginPage::with_credentials(email, password);
            match page.submit(&api).await {
                Effect::Navigate(route) => {
                    println!("Logged in.");
                    print_next(route);
                }
                Effect::None => fail(&format!(
                    "Login failed: {}",
                    page.error().unwrap_or("Check your credentials")
                )),
            }
        }

        Commands::Register {
            username,
            email,
            password,
        } => {
            let mut page = RegisterPage::new(RegisterForm {
                username,
                email,
                password,
            });
            match page.submit(&api).await {
                Effect::Navigate(route) => {
                    println!("{}", page.notice().unwrap_or("Registered."));
                    print_next(route);
                }
                Effect::None => fail(&format!(
                    "Registration failed: {}",
                    page.error().unwrap_or("Try again")
                )),
            }
        }

        Commands::Logout => {
            let mut page = ProfilePage::new();
            match page.logout(&api).await {
                Ok(effect) => {
                    println!("Logged out.");
                    if let Effect::Navigate(route) = effect {
                        print_next(route);
                    }
                }
                Err(e) => fail(&format!("Logout failed: {}", e)),
            }
        }

        Commands::Profile => {
            let mut page = ProfilePage::new();
            page.load(&api).await;

            match page.state() {
                ProfileState::Loaded(user) => {
                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(user)?);
                    } else {
                        println!("Username: {}", user.username);
                        println!("Email:    {}", user.email);
                        println!("Role:     {}", user.role);
                        println!("Verified: {}", if user.is_verified { "Yes" } else { "No" });
                    }
                }
                _ => login_prompt("your profile"),
            }
        }

        Commands::History { limit } => {
            let mut page = match limit {
                Some(n) => HistoryPage::with_limit(n),
                None => HistoryPage::new(),
            };
            page.load(&api).await;

            if page.state() == &HistoryState::LoginRequired {
                login_prompt("your prediction history");
            }

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(page.entries())?),
                "csv" => print_history_csv(page.entries())?,
                _ => print_history_table(page.entries(), page.total()),
            }
        }

        Commands::Forecast {
            temperature,
            hour,
            date,
        } => {
            let date =
                date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

            let mut page = ForecastPage::new();
            page.set_field(ForecastField::Temperature, &temperature);
            page.set_field(ForecastField::Hour, &hour);
            page.set_field(ForecastField::Date, &date);
            page.submit(&api).await;

            if let Some(error) = page.error() {
                fail(error);
            }

            if let Some(result) = page.result() {
                if cli.format == "json" {
                    println!("{}", serde_json::to_string_pretty(result)?);
                } else {
                    println!("Predicted Load: {}", result.predicted_load);
                    println!("Lower Bound:    {}", result.lower_bound);
                    println!("Upper Bound:    {}", result.upper_bound);
                    println!("Interval:       {}", result.confidence_interval);
                }
            }
        }

        Commands::Dashboard => {
            let mut page = DashboardPage::new();
            page.load(&api).await;

            let summary = match page.state() {
                DashboardState::Ready(summary) => summary,
                _ => login_prompt("the dashboard"),
            };

            println!("Welcome, {}", summary.profile.username);
            println!();
            match summary.prediction_count {
                Some(count) => println!("Predictions made: {}", count),
                None => println!("Predictions made: unavailable"),
            }
            if let Some(latest) = &summary.latest {
                println!(
                    "Latest: {} {}:00 -> {} ({} - {})",
                    latest.date,
                    latest.hour,
                    latest.predicted_load,
                    latest.lower_bound,
                    latest.upper_bound
                );
            }

            println!();
            for item in page.menu() {
                println!("{:<20} {}", item.title, item.description);
                println!("{:<20} -> {}", "", command_for(item.route));
            }
        }

        Commands::Verify => match verify_session(&api).await {
            SessionCheck::Valid(status) => {
                println!("Token is valid.");
                if let Some(username) = status.username {
                    println!("User: {}", username);
                }
                if let Some(role) = status.role {
                    println!("Role: {}", role);
                }
            }
            SessionCheck::LoginRequired => login_prompt("this command"),
        },

        Commands::ChangePassword { old, new } => {
            let mut page = ChangePasswordPage::new(ChangePasswordForm {
                old_password: old,
                new_password: new,
            });
            page.submit(&api).await;

            if let Some(error) = page.error() {
                fail(error);
            }
            println!("{}", page.notice().unwrap_or("Password changed."));
        }

        Commands::Status => {
            println!("Loadcast v{}", env!("CARGO_PKG_VERSION"));
            println!("Backend:  {}", api.config().base_url);
            println!();

            match api.health().await {
                Ok(health) => {
                    println!("Health:   {}", health.status);
                    if let Some(message) = health.message {
                        println!("          {}", message);
                    }
                }
                Err(e) => {
                    eprintln!("Cannot reach the forecasting backend at {}", api.config().base_url);
                    fail(&e.to_string());
                }
            }

            if let Ok(status) = api.status().await {
                println!("Status:   {}", status.status);
                if let Some(version) = status.version {
                    println!("Version:  {}", version);
                }
                if let Some(database) = status.database {
                    println!("Database: {}", database);
                }
            }

            println!();
            println!(
                "Session:  {}",
                if session.is_logged_in() {
                    "logged in"
                } else {
                    "not logged in"
                }
            );
        }

        Commands::Config { .. } => unreachable!("handled before configuration is loaded"),
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("loadcast={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so json/csv output stays clean
    if config.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }

    Ok(())
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn login_prompt(what: &str) -> ! {
    eprintln!("Please register or log in to access {}.", what);
    eprintln!("  loadcast login --email <EMAIL> --password <PASSWORD>");
    std::process::exit(1);
}

fn command_for(route: Route) -> &'static str {
    match route {
        Route::Dashboard => "loadcast dashboard",
        Route::Login => "loadcast login",
        Route::Forecast => "loadcast forecast",
        Route::History => "loadcast history",
        Route::Profile => "loadcast profile",
    }
}

fn print_next(route: Route) {
    println!("Next: {}", command_for(route));
}

fn print_history_table(entries: &[HistoryEntry], total: usize) {
    if entries.is_empty() {
        println!("No predictions yet.");
        println!();
        println!("Make your first one with:");
        println!("  loadcast forecast --temperature 21.5 --hour 14");
        return;
    }

    println!(
        "{:<12} {:>4} {:>8} {:>12} {:>12} {:>12}",
        "Date", "Hour", "Temp", "Load", "Lower", "Upper"
    );
    println!("{}", "-".repeat(65));

    for entry in entries {
        println!(
            "{:<12} {:>4} {:>8} {:>12} {:>12} {:>12}",
            entry.date.to_string(),
            entry.hour.to_string(),
            entry.temperature.to_string(),
            entry.predicted_load.to_string(),
            entry.lower_bound.to_string(),
            entry.upper_bound.to_string()
        );
    }

    if entries.len() < total {
        println!();
        println!("Showing {} of {} predictions", entries.len(), total);
    }
}

fn print_history_csv(entries: &[HistoryEntry]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record([
        "date",
        "hour",
        "temperature",
        "predicted_load",
        "lower_bound",
        "upper_bound",
    ])?;

    for entry in entries {
        writer.write_record([
            entry.date.to_string(),
            entry.hour.to_string(),
            entry.temperature.to_string(),
            entry.predicted_load.to_string(),
            entry.lower_bound.to_string(),
            entry.upper_bound.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
