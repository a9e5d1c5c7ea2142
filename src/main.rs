use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::checkout::target::CheckoutTarget;
use twig::artifacts::core::PagerWriter;
use twig::artifacts::core::config::Config;
use twig::errors::RepositoryError;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "twig keeps snapshots of a working directory in a .twig repository. \
    It supports staging, commits, branches and three-way merges, \
    without remotes or a network protocol.",
    arg_required_else_help = true,
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates a .twig repository in the current directory, \
        holding the initial commit on the master branch."
    )]
    Init,
    #[command(
        name = "add",
        about = "Stage files for the next commit",
        long_about = "This command stages the current content of the given files. \
        Directories are expanded to every file below them."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files to stage")]
        files: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes",
        long_about = "This command creates a new commit on the active branch from the staged files \
        and the files marked for removal."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage files or stop tracking them",
        long_about = "This command unstages the given files. Files tracked by the current commit \
        are also marked for removal and deleted from the working directory."
    )]
    Rm {
        #[arg(index = 1, required = true, help = "The files to remove")]
        files: Vec<String>,
    },
    #[command(
        name = "log",
        about = "Show the history of the active branch",
        long_about = "This command lists the commits from the head of the active branch back to the initial commit."
    )]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit ever made",
        long_about = "This command lists every commit in the repository in the order they were created."
    )]
    GlobalLog,
    #[command(
        name = "find",
        about = "Print the IDs of the commits with the given message",
        long_about = "This command prints the ID of every commit whose message is exactly the one given."
    )]
    Find {
        #[arg(index = 1, help = "The commit message to look for")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command shows the branches, the staged files, the files marked for removal, \
        the modifications not staged for commit and the untracked files."
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Restore files or switch branches",
        long_about = "This command has three forms: \
        `checkout -- <file>` restores a file from the current commit, \
        `checkout <commit> -- <file>` restores a file from the given commit, \
        and `checkout <branch>` switches to the given branch."
    )]
    Checkout {
        #[arg(index = 1, help = "The commit ID or the branch to check out")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(
        name = "branch",
        about = "Create a new branch",
        long_about = "This command creates a branch pointing at the current commit, without switching to it."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the new branch")]
        name: String,
    },
    #[command(
        name = "rm-branch",
        about = "Delete a branch",
        long_about = "This command deletes the given branch. The commits it pointed at are kept."
    )]
    RmBranch {
        #[arg(index = 1, help = "The branch to delete")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the active branch to a commit",
        long_about = "This command restores every file of the given commit, \
        moves the active branch to it and clears the staging area."
    )]
    Reset {
        #[arg(index = 1, help = "The (abbreviated) commit ID")]
        commit: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the active branch",
        long_about = "This command merges the given branch into the active branch, \
        using their latest common ancestor as the base."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_from_env()?;
    let paged =
        cli.command.is_paged() && config.pager_enabled() && std::io::stdout().is_terminal();

    let pager = Pager::new();
    let writer: Box<dyn Write> = if paged {
        Box::new(PagerWriter::new(pager.clone()))
    } else {
        Box::new(std::io::stdout())
    };

    let pwd = std::env::current_dir()?;
    let mut repository = Repository::new(&pwd, writer, config)?;

    match cli.command {
        Commands::Init => repository.init().await?,
        Commands::Add { files } => repository.add(&files).await?,
        Commands::Commit { message } => repository.commit(&message).await?,
        Commands::Rm { files } => repository.rm(&files).await?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(&message)?,
        Commands::Status => repository.status().await?,
        Commands::Checkout { target, file } => {
            let target = CheckoutTarget::try_from_args(target, file)?;
            repository.checkout(target).await?
        }
        Commands::Branch { name } => repository.create_branch(&name).await?,
        Commands::RmBranch { name } => repository.delete_branch(&name).await?,
        Commands::Reset { commit } => repository.reset(&commit).await?,
        Commands::Merge { branch } => {
            repository.merge(&branch).await?;
        }
    }

    repository.writer().flush()?;
    drop(repository);

    if paged {
        minus::page_all(pager)?;
    }

    Ok(())
}

/// Print a failure the way its kind asks for and pick the exit code
///
/// Repository failures are informational: their message goes to stdout and the
/// process still succeeds. Malformed operands exit with 2, anything else with 1.
fn report(err: anyhow::Error) -> ExitCode {
    match err.downcast_ref::<RepositoryError>() {
        Some(repository_err) if repository_err.is_usage() => {
            eprintln!("{repository_err}");
            ExitCode::from(2)
        }
        Some(repository_err) => {
            println!("{repository_err}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("fatal: {err:#}");
            ExitCode::FAILURE
        }
    }
}
