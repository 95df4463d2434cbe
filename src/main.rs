use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use git_quill::ai::Registry;
use git_quill::commit::run_commit_workflow;
use git_quill::config::Config;
use git_quill::error::QuillError;
use git_quill::git::open_repo;
use git_quill::tag::run_tag_workflow;
use git_quill::workflow::Options;

#[derive(Parser, Debug)]
#[command(name = "git-quill", version)]
#[command(about = "Commit messages and release notes from the AI CLI you already have", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// List known AI providers and whether they are installed
    #[arg(long)]
    list_providers: bool,

    /// List the models a provider offers
    #[arg(long, value_name = "PROVIDER")]
    list_models: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a commit message for the staged changes
    Commit {
        #[command(flatten)]
        shared: SharedArgs,

        /// Ask for a one-sentence summary
        #[arg(short, long)]
        brief: bool,
    },

    /// Generate release notes for the commits since the last tag
    Tag {
        #[command(flatten)]
        shared: SharedArgs,

        /// Print only the generated notes, without the "create this tag" footer
        #[arg(long)]
        raw: bool,
    },
}

#[derive(Args, Debug)]
struct SharedArgs {
    /// AI provider (ollama, opencode, gemini, copilot, claude)
    #[arg(short, long)]
    provider: Option<String>,

    /// Model name, passed through to the provider
    #[arg(short, long)]
    model: Option<String>,

    /// Ask for gitmoji / emoji section headers
    #[arg(short, long)]
    emoji: bool,
}

impl From<SharedArgs> for Options {
    fn from(args: SharedArgs) -> Self {
        Self {
            provider: args.provider,
            model: args.model,
            emoji: args.emoji,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => report(e),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "git_quill=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list_providers {
        list_providers();
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(name) = cli.list_models {
        list_models(&name)?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::FAILURE);
    };

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring config file");
        Config::default()
    });
    let repo = open_repo()?;

    match command {
        Command::Commit { shared, brief } => {
            run_commit_workflow(&repo, &shared.into(), brief, &config)?
        }
        Command::Tag { shared, raw } => run_tag_workflow(&repo, &shared.into(), raw, &config)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn list_providers() {
    let registry = Registry::builtin();
    let available: Vec<&str> = registry.list_available().iter().map(|p| p.name()).collect();

    println!("{}", "PROVIDERS".bold());
    for provider in registry.all() {
        if available.contains(&provider.name()) {
            println!("   {} {}", "✓".green(), provider.name());
        } else {
            println!(
                "   {} {} {}",
                "✗".red(),
                provider.name().dimmed(),
                "(not installed)".dimmed()
            );
        }
    }
}

fn list_models(name: &str) -> Result<()> {
    let provider = Registry::builtin().resolve(name)?;
    if !provider.is_available() {
        return Err(QuillError::UnavailableProvider(provider.name().to_string()).into());
    }

    for model in provider.list_models()? {
        println!("{}", model);
    }

    Ok(())
}

/// Graceful outcomes exit 0, everything else prints the chain and exits 1
fn report(e: anyhow::Error) -> ExitCode {
    if let Some(quill) = e.downcast_ref::<QuillError>() {
        if quill.is_graceful() {
            eprintln!("{} {}", "●".cyan(), quill.to_string().dimmed());
            return ExitCode::SUCCESS;
        }
    }

    eprintln!("{} {}", "✗".red().bold(), e);
    for cause in e.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause);
    }

    ExitCode::FAILURE
}
