//! Command-line entry point for the status dashboard core.
//!
//! # Responsibility
//! - Load the dashboard document through the fallback chain and print it.
//! - Serve one project file the way the file endpoint does.
//! - Rewrite built asset paths for repository-scoped hosting.
//!
//! Logging starts only when `STATUSBOARD_LOG_DIR` names an absolute directory.

use clap::{Args, Parser, Subcommand};
use log::warn;
use statusboard_core::insight::{pipeline_ids, OverviewStats};
use statusboard_core::site::{fix_index_html, repo_name_from, RewriteOutcome};
use statusboard_core::{
    core_version, default_log_level, init_logging, DataOrigin, FileEndpoint, LoaderConfig,
    LocalOrigin, ProjectDataLoader,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "statusboard")]
#[command(about = "Project status dashboard data tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the dashboard document through the fallback chain.
    Load(LoadArgs),
    /// Serve one project file as the file endpoint would.
    File {
        path: Option<String>,
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
    },
    /// Rewrite root-absolute asset paths in a built index.html.
    FixPaths {
        index: PathBuf,
        /// Defaults to the name part of `GITHUB_REPOSITORY`.
        repo: Option<String>,
    },
    Version,
}

#[derive(Args)]
struct LoadArgs {
    #[arg(long, default_value_t = false)]
    json: bool,
    #[arg(long, value_name = "DIR", conflicts_with = "site_url")]
    site_dir: Option<PathBuf>,
    #[arg(long, value_name = "URL")]
    site_url: Option<String>,
    #[arg(long, value_name = "PATH")]
    page_base: Option<String>,
}

impl LoadArgs {
    fn config(&self) -> LoaderConfig {
        let mut config = LoaderConfig::default();
        if let Some(dir) = &self.site_dir {
            config.local_origin = LocalOrigin::Directory(dir.clone());
        }
        if let Some(url) = &self.site_url {
            config.local_origin = LocalOrigin::Http(url.clone());
        }
        if let Some(page_base) = &self.page_base {
            config.page_base = page_base.clone();
        }
        config
    }
}

fn main() -> ExitCode {
    start_logging();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Load(args) => run_load(&args),
        Commands::File { path, root } => run_file(root, path.as_deref()),
        Commands::FixPaths { index, repo } => {
            let repo = repo.unwrap_or_else(|| {
                repo_name_from(std::env::var("GITHUB_REPOSITORY").ok().as_deref())
            });
            run_fix_paths(&index, &repo)
        }
        Commands::Version => {
            println!("statusboard_core version={}", core_version());
            Ok(())
        }
    }
}

fn start_logging() {
    let Ok(dir) = std::env::var("STATUSBOARD_LOG_DIR") else {
        return;
    };
    let level =
        std::env::var("STATUSBOARD_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &dir) {
        eprintln!("logging disabled: {err}");
    }
}

fn run_load(args: &LoadArgs) -> Result<(), String> {
    let loader = ProjectDataLoader::from_config(&args.config()).map_err(|err| err.to_string())?;
    let (data, origin) = loader.load_with_origin();
    if origin == DataOrigin::Fallback {
        warn!("event=cli_load module=cli status=fallback");
    }

    if args.json {
        let body = serde_json::to_string_pretty(data.as_ref()).map_err(|err| err.to_string())?;
        println!("{body}");
        return Ok(());
    }

    let stats = OverviewStats::from_data(&data);
    let meta = data.meta();
    println!("name={}", meta.name());
    println!("updated={}", meta.updated());
    println!("origin={}", origin_label(&origin));
    println!("pipeline_steps={}", pipeline_ids(&data).len());
    println!("tasks_remaining={}", stats.tasks_remaining);
    println!("checks_missing={}", stats.checks_missing);
    println!("badges_remaining={}", stats.badges_remaining);
    Ok(())
}

fn run_file(root: PathBuf, requested: Option<&str>) -> Result<(), String> {
    let response = FileEndpoint::new(root).serve(requested);
    let body = serde_json::to_string_pretty(&response.to_json()).map_err(|err| err.to_string())?;
    println!("{body}");
    if response.status_code() == 200 {
        Ok(())
    } else {
        Err(format!("status={}", response.status_code()))
    }
}

fn run_fix_paths(index: &std::path::Path, repo: &str) -> Result<(), String> {
    match fix_index_html(index, repo).map_err(|err| err.to_string())? {
        RewriteOutcome::Skipped => println!("skipped: {} not found", index.display()),
        RewriteOutcome::Rewritten => println!("rewrote asset paths for /{repo}/"),
    }
    Ok(())
}

fn origin_label(origin: &DataOrigin) -> &str {
    match origin {
        DataOrigin::Cache => "cache",
        DataOrigin::Source(name) => name,
        DataOrigin::Fallback => "fallback",
    }
}
