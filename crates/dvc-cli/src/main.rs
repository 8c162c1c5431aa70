use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dvc_core::{
    add, branch, checkout, clone_repo, commit, diff, history, merge, AddOutcome, BranchOutcome,
    CheckoutOutcome, CloneOutcome, CommitOutcome, DiffOutcome, MergeOutcome, Repo, RepoLock,
};

#[derive(Parser)]
#[command(name = "dvc", version, about = "Minimal local version control")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a repository in the given directory
    Init {
        path: Option<PathBuf>,
    },
    /// Stage a file's content for the next commit
    Add {
        path: PathBuf,
    },
    /// Record staged changes as a commit on the current branch
    Commit {
        #[arg(short, long)]
        message: String,
    },
    /// Show the current branch's history, newest first
    Log,
    /// Create a branch as a copy of the current branch's history
    Branch {
        name: String,
    },
    /// Switch to a branch
    Checkout {
        name: String,
    },
    /// Compare the file maps of two commits on the current branch
    Diff {
        first: String,
        second: String,
    },
    /// Merge a branch into the current branch
    Merge {
        name: String,
    },
    /// Copy the internal store and metadata to a new location
    Clone {
        target: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => {
            let target = path.unwrap_or_else(|| PathBuf::from("."));
            dvc_core::init_repo(&target)?;
            println!("Repository initialized at {}", target.display());
        }
        Commands::Add { path } => {
            let repo = Repo::open(".")?;
            let _lock = RepoLock::acquire(repo.dvc_dir())?;
            let store = dvc_core::ObjectStore::new(repo.clone());
            match add(&repo, &store, &path)? {
                AddOutcome::Staged { path, digest } => println!("staged {path} ({digest})"),
                AddOutcome::Ignored { path } => println!("ignored {path}"),
            }
        }
        Commands::Commit { message } => {
            let repo = Repo::open(".")?;
            let _lock = RepoLock::acquire(repo.dvc_dir())?;
            let timestamp = time::OffsetDateTime::now_utc();
            match commit(&repo, message, timestamp)? {
                CommitOutcome::Created { id } => println!("{id}"),
                CommitOutcome::NoChanges => println!("nothing to commit"),
            }
        }
        Commands::Log => {
            let repo = Repo::open(".")?;
            for entry in history(&repo)? {
                let parent = entry.parent.as_deref().unwrap_or("None");
                println!("* {} {}", entry.id, entry.message);
                println!("  time: {}", entry.timestamp);
                println!("  parent: {parent}");
            }
        }
        Commands::Branch { name } => {
            let repo = Repo::open(".")?;
            let _lock = RepoLock::acquire(repo.dvc_dir())?;
            match branch(&repo, &name)? {
                BranchOutcome::Created { name } => println!("created branch '{name}'"),
                BranchOutcome::AlreadyExists { name } => {
                    println!("branch '{name}' already exists")
                }
            }
        }
        Commands::Checkout { name } => {
            let repo = Repo::open(".")?;
            let _lock = RepoLock::acquire(repo.dvc_dir())?;
            match checkout(&repo, &name)? {
                CheckoutOutcome::Switched { name, head } => {
                    let head = head.as_deref().unwrap_or("None");
                    println!("switched to '{name}' (head: {head})");
                }
                CheckoutOutcome::UnknownBranch { name } => {
                    println!("branch '{name}' does not exist")
                }
            }
        }
        Commands::Diff { first, second } => {
            let repo = Repo::open(".")?;
            match diff(&repo, &first, &second)? {
                DiffOutcome::Report(report) => println!("{report}"),
                DiffOutcome::UnknownCommit { id } => {
                    println!("commit '{id}' not found on the current branch")
                }
            }
        }
        Commands::Merge { name } => {
            let repo = Repo::open(".")?;
            let _lock = RepoLock::acquire(repo.dvc_dir())?;
            let timestamp = time::OffsetDateTime::now_utc();
            match merge(&repo, &name, timestamp)? {
                MergeOutcome::Merged { id } => println!("merged '{name}' ({id})"),
                MergeOutcome::Conflicts(paths) => {
                    for path in paths {
                        eprintln!("conflict: {path}");
                    }
                    anyhow::bail!("merge conflicts");
                }
                MergeOutcome::UnknownBranch { name } => {
                    println!("branch '{name}' does not exist")
                }
            }
        }
        Commands::Clone { target } => {
            let repo = Repo::open(".")?;
            match clone_repo(&repo, &target)? {
                CloneOutcome::Cloned => println!("cloned to {}", target.display()),
                CloneOutcome::TargetExists => {
                    println!("target {} already exists", target.display())
                }
            }
        }
    }

    Ok(())
}
