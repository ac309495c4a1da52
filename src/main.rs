use std::io::IsTerminal;

use anyhow::{bail, Context as AnyhowContext, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{debug, warn};

use prj::cli::{Cli, Command, ListArgs, ScanArgs};
use prj::config::{expand_path, Config, DataDir};
use prj::logging::{self, Verbosity};
use prj::output::{render_summary, render_table, OutputFormat, OutputFormatter, Style};
use prj::query::{find_project, sort_projects};
use prj::scan::{run_scan, FolderOutcome};
use prj::store::Store;

struct Env {
    data_dir: DataDir,
    config: Config,
    style: Style,
}

impl Env {
    fn store(&self) -> Store {
        Store::new(self.data_dir.store_path())
    }

    fn save_config(&self) -> Result<()> {
        let path = self.data_dir.config_path();
        self.config
            .save(&path)
            .with_context(|| format!("failed to write config {}", path.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    let color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    let data_dir = DataDir::resolve(cli.data_dir).context("cannot locate data directory")?;
    debug!(data_dir = %data_dir.root().display(), "resolved data directory");
    let config_path = data_dir.config_path();
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;

    let mut env = Env {
        data_dir,
        config,
        style: Style::new(color),
    };

    match cli.command {
        Command::Add { folder } => add(&mut env, &folder),
        Command::Remove { folder } => remove(&mut env, &folder),
        Command::Config => show_config(&env),
        Command::Scan(args) => scan(&env, &args),
        Command::List(args) => list(&env, &args),
        Command::Info { name, format } => info(&env, &name, format),
        Command::Status => status(&env),
    }
}

fn add(env: &mut Env, folder: &str) -> Result<()> {
    let path = expand_path(folder);
    if !path.is_dir() {
        bail!("not a directory: {}", path.display());
    }
    if env.config.add_folder(path.clone()) {
        env.save_config()?;
        println!("Added {}", path.display());
    } else {
        println!("Already tracking {}", path.display());
    }
    Ok(())
}

fn remove(env: &mut Env, folder: &str) -> Result<()> {
    let path = expand_path(folder);
    if !env.config.remove_folder(&path) {
        bail!("not tracking {}", path.display());
    }
    env.save_config()?;
    println!("Removed {}", path.display());
    Ok(())
}

fn show_config(env: &Env) -> Result<()> {
    let style = env.style;
    let config = &env.config;
    println!("{} {}", style.bold("Data directory:"), env.data_dir.root().display());
    println!("{}", style.bold("Folders:"));
    if config.folders.is_empty() {
        println!("  (none)");
    }
    for folder in &config.folders {
        println!("  {}", folder.display());
    }
    println!("{} {}", style.bold("Cutoff days:"), config.cutoff_days);
    println!("{} {}s", style.bold("Git timeout:"), config.git_timeout_secs);
    println!("{} {}", style.bold("Jobs:"), config.effective_jobs());
    Ok(())
}

fn scan(env: &Env, args: &ScanArgs) -> Result<()> {
    if env.config.folders.is_empty() {
        bail!("no folders configured. Run: prj add <folder>");
    }
    let style = env.style;
    let store = env.store();
    let report = run_scan(&env.config, &store, &args.to_options())
        .with_context(|| format!("scan failed (store {})", store.path().display()))?;

    for folder in &report.folders {
        match &folder.outcome {
            FolderOutcome::Found(count) => {
                println!("{} {count} repositories", folder.folder.display())
            }
            FolderOutcome::Skipped(reason) => println!(
                "{} {} ({reason})",
                folder.folder.display(),
                style.yellow("skipped")
            ),
        }
    }
    println!("Scanned {} repositories", report.scanned.len());

    let failing: Vec<_> = report.with_errors().collect();
    if !failing.is_empty() {
        println!("\n{}", style.yellow(&format!("{} with errors:", failing.len())));
        for project in failing {
            warn!(project = %project.name, errors = project.errors.len(), "extraction recorded errors");
            println!("  {}", project.name);
            for error in &project.errors {
                println!("    - {error}");
            }
        }
    }

    if args.dry_run {
        let scanned: Vec<_> = report.scanned.iter().collect();
        println!("\n{}", render_table(&scanned, style, Utc::now()));
        println!("Dry run: nothing saved");
        return Ok(());
    }
    for path in &report.pruned {
        println!("Pruned {}", path.display());
    }
    if let Some(saved) = report.saved {
        println!("Saved {saved} projects to {}", store.path().display());
    }
    Ok(())
}

fn list(env: &Env, args: &ListArgs) -> Result<()> {
    let projects = env.store().load().context("failed to load projects")?;
    let mut selected = args.to_filter().apply(&projects);
    sort_projects(&mut selected, args.sort);
    let out = OutputFormatter::format_list(&selected, args.format, env.style, Utc::now())?;
    print!("{out}");
    if args.format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn info(env: &Env, name: &str, format: OutputFormat) -> Result<()> {
    let projects = env.store().load().context("failed to load projects")?;
    let Some(project) = find_project(&projects, name) else {
        bail!("no project matching '{name}'");
    };
    let out = OutputFormatter::format_one(project, format, env.style, Utc::now())?;
    print!("{out}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn status(env: &Env) -> Result<()> {
    let projects = env.store().load().context("failed to load projects")?;
    print!(
        "{}",
        render_summary(&projects, env.style, env.config.cutoff_days, Utc::now())
    );
    Ok(())
}
