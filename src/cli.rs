use anyhow::{Context as _, Result};
use bikeshare::analyser::logic::{City, FilterSpec, load_filtered, run_query};
use bikeshare::analyser::report::{render_page, render_report};
use bikeshare::config::{AppSettings, get_config_path, load_app_settings, save_settings};
use bikeshare::logging::get_current_log_path;
use bikeshare::session::Session;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bikeshare", about = "Explore US bikeshare trip data")]
pub struct Cli {
    /// Path to a JSON settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the city datasets
    #[arg(long, global = true, env = "BIKESHARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print statistics for one city without prompting
    Stats {
        /// City to analyse (chicago, "new york city", washington)
        #[arg(short, long)]
        city: String,

        /// Month to keep (january to june) or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Day of week to keep or "all"
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Also print every matching row, one page at a time
        #[arg(long)]
        raw: bool,
    },
    /// List the configured city datasets
    Cities,
    /// Show the effective settings and where settings and logs live
    Settings {
        /// Write the effective settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub fn settings(&self) -> Result<AppSettings> {
        let settings =
            load_app_settings(self.config.as_deref()).context("Failed to load settings")?;
        Ok(settings.with_data_dir_override(self.data_dir.clone()))
    }
}

pub fn run_interactive(settings: &AppSettings) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), settings);
    session.run().context("Interactive session failed")
}

pub fn run_command(
    command: Commands,
    settings: &AppSettings,
    config: Option<&Path>,
) -> Result<()> {
    match command {
        Commands::Stats {
            city,
            month,
            day,
            raw,
        } => handle_stats(&city, &month, &day, raw, settings),
        Commands::Cities => {
            handle_cities(settings);
            Ok(())
        }
        Commands::Settings { init } => handle_settings(settings, config, init),
    }
}

#[expect(clippy::print_stdout)]
fn handle_stats(
    city: &str,
    month: &str,
    day: &str,
    raw: bool,
    settings: &AppSettings,
) -> Result<()> {
    let city: City = city.parse()?;
    let spec = FilterSpec::parse(month, day)?;
    let path = settings.dataset_path(city);

    println!("{city} ({spec})");
    let table = load_filtered(&path, &spec)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    println!("{} matching trips", table.len());

    let report = run_query(&table);
    print!("{}", render_report(&report, city, settings.show_timings));

    if raw {
        let mut offset = 0;
        while offset < table.len() {
            println!("{}", render_page(&table, offset, settings.page_size));
            offset += settings.page_size;
        }
    }
    Ok(())
}

#[expect(clippy::print_stdout)]
fn handle_cities(settings: &AppSettings) {
    for city in City::ALL {
        let path = settings.dataset_path(city);
        let status = if path.exists() { "" } else { " (missing)" };
        println!("{:<15} {}{status}", city.key(), path.display());
    }
}

#[expect(clippy::print_stdout)]
fn handle_settings(settings: &AppSettings, config: Option<&Path>, init: bool) -> Result<()> {
    let path = config
        .map(Path::to_path_buf)
        .or_else(get_config_path)
        .context("No config directory on this platform; pass --config")?;

    if init {
        save_settings(settings, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote settings to {}", path.display());
        println!("Wrote {}", path.display());
    }

    println!("Settings file: {}", path.display());
    match get_current_log_path() {
        Ok(log) => println!("Log file:      {}", log.display()),
        Err(e) => println!("Log file:      unavailable ({e})"),
    }
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
