use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use topup::config::{config_dir, expand_path, init_config, load_config, Config};
use topup::error::Result;
use topup::records::{load_companies, load_users, CompanyRecord, UserRecord};
use topup::report::{ReportBuilder, ReportFormat};

#[derive(Parser)]
#[command(name = "topup")]
#[command(version, about = "Company token top-up report generator", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.topup or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Default)]
struct InputArgs {
    /// Companies JSON file (overrides [input].companies)
    #[arg(long, value_name = "FILE")]
    companies: Option<PathBuf>,

    /// Users JSON file (overrides [input].users)
    #[arg(long, value_name = "FILE")]
    users: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the top-up report (default when no command is given)
    Run {
        #[command(flatten)]
        input: InputArgs,

        /// Report file path (overrides [output].path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Report format (overrides [output].format)
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,
    },

    /// List companies with their active users and top-up totals
    Companies {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Write a topup.toml template to the config directory
    Init,
}

fn main() {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("TOPUP_LOG", "warn"))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    let command = cli.command.unwrap_or(Commands::Run {
        input: InputArgs::default(),
        output: None,
        stdout: false,
        format: None,
    });

    match command {
        Commands::Run {
            input,
            output,
            stdout,
            format,
        } => cmd_run(&cfg_dir, &input, output, stdout, format),
        Commands::Companies { input } => cmd_companies(&cfg_dir, &input),
        Commands::Init => cmd_init(&cfg_dir),
    }
}

/// Load both input collections. Either failing aborts before any output.
fn load_inputs(
    config: &Config,
    input: &InputArgs,
) -> Result<(Vec<CompanyRecord>, Vec<UserRecord>)> {
    let companies_path = input
        .companies
        .clone()
        .unwrap_or_else(|| expand_path(&config.input.companies));
    let users_path = input
        .users
        .clone()
        .unwrap_or_else(|| expand_path(&config.input.users));

    let companies = load_companies(&companies_path)?;
    let users = load_users(&users_path)?;
    Ok((companies, users))
}

/// Generate the report and write it out
fn cmd_run(
    cfg_dir: &Path,
    input: &InputArgs,
    output: Option<PathBuf>,
    stdout: bool,
    format: Option<ReportFormat>,
) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let (companies, users) = load_inputs(&config, input)?;

    let report = ReportBuilder::new(&companies, &users).report();
    let rendered = report.render(format.unwrap_or(config.output.format))?;

    if stdout {
        print!("{rendered}");
        return Ok(());
    }

    let path = output.unwrap_or_else(|| expand_path(&config.output.path));
    fs::write(&path, rendered)?;
    log::info!(
        "Wrote {} company section(s) to {}",
        report.companies.len(),
        path.display()
    );

    println!("Output has been written to {}", path.display());
    Ok(())
}

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ACTIVE")]
    active: usize,
    #[tabled(rename = "EMAILED")]
    emailed: usize,
    #[tabled(rename = "TOP UP TOTAL")]
    total: String,
}

/// List report companies as a table
fn cmd_companies(cfg_dir: &Path, input: &InputArgs) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let (companies, users) = load_inputs(&config, input)?;

    let summaries = ReportBuilder::new(&companies, &users).report().summaries();
    if summaries.is_empty() {
        println!("No companies with an id found.");
        return Ok(());
    }

    let rows: Vec<CompanyRow> = summaries
        .into_iter()
        .map(|s| CompanyRow {
            id: s.id.to_string(),
            name: s.name,
            active: s.active_users,
            emailed: s.emailed_users,
            total: s.total_top_up.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Write the config template
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    let path = init_config(cfg_dir)?;

    println!("Initialized topup config at: {}", path.display());
    println!();
    println!("Edit input and output paths:  $EDITOR {}", path.display());
    println!("Then generate the report:     topup run");

    Ok(())
}
