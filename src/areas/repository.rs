//! Repository aggregate
//!
//! A `Repository` is constructed once per command for the working directory it
//! runs in. It owns every store under `.twig/`:
//!
//! ```text
//! .twig/
//!   HEAD               active branch (ref: refs/heads/<name>)
//!   refs/heads/<name>  branch heads
//!   objects/           permanent blobs and commits
//!   staging/           blobs added since the last commit
//!   index              staged names and removal marks
//!   journal            commit IDs in creation order
//! ```
//!
//! Commands are implemented as `impl Repository` blocks under `commands::porcelain`.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::journal::Journal;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::config::Config;
use crate::artifacts::history::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Name of the repository directory inside the working directory
pub const REPOSITORY_DIR: &str = ".twig";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    config: Config,
    index: Arc<Mutex<Index>>,
    database: Database,
    staging: Database,
    workspace: Workspace,
    refs: Refs,
    journal: Journal,
}

impl Repository {
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>, config: Config) -> anyhow::Result<Self> {
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve working directory {}", path.display()))?;
        let twig_path = path.join(REPOSITORY_DIR);

        let index = Index::new(twig_path.join("index").into_boxed_path());
        let database = Database::new(twig_path.join("objects").into_boxed_path());
        let staging = Database::new(twig_path.join("staging").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(twig_path.clone().into_boxed_path());
        let journal = Journal::new(twig_path.join("journal").into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
            index: Arc::new(Mutex::new(index)),
            database,
            staging,
            workspace,
            refs,
            journal,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn twig_path(&self) -> Box<Path> {
        self.path.join(REPOSITORY_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    /// Permanent object store
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Store for blobs added since the last commit
    pub fn staging(&self) -> &Database {
        &self.staging
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn is_initialized(&self) -> bool {
        self.twig_path().is_dir()
    }

    /// Fail with `NotInitialized` outside a repository
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepositoryError::NotInitialized.into())
        }
    }

    /// Load every commit recorded in the journal
    pub fn load_history(&self) -> anyhow::Result<CommitGraph> {
        let mut graph = CommitGraph::new();

        for oid in self.journal.read_all()? {
            let commit = self
                .database
                .parse_object_as_commit(&oid)?
                .with_context(|| format!("object {oid} is not a commit"))?;
            graph.insert(oid, commit)?;
        }
        debug!(commits = graph.len(), "loaded history");

        Ok(graph)
    }

    /// Commit the active branch points at
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let head_oid = self.refs().read_head()?;

        self.database
            .parse_object_as_commit(&head_oid)?
            .with_context(|| format!("HEAD points at {head_oid}, which is not a commit"))
    }

    /// Resolve a full or abbreviated commit ID
    ///
    /// Abbreviations must be 6 to 40 hex characters; unknown, ambiguous or badly
    /// sized ones are all reported as `CommitNotFound`.
    pub fn resolve_commit(&self, graph: &CommitGraph, prefix: &str) -> anyhow::Result<ObjectId> {
        let not_found = || RepositoryError::CommitNotFound(prefix.to_string());

        if !ObjectId::is_valid_prefix(prefix) {
            return Err(not_found().into());
        }

        let matches = self
            .database
            .find_objects_by_prefix(prefix)?
            .into_iter()
            .filter(|oid| graph.contains(oid))
            .collect::<Vec<_>>();

        match matches.as_slice() {
            [oid] => Ok(oid.clone()),
            [] => Err(not_found().into()),
            ambiguous => {
                debug!(prefix, candidates = ambiguous.len(), "ambiguous commit prefix");
                Err(not_found().into())
            }
        }
    }

    /// Empty the staging index and the staging blob store
    pub fn clear_staging(&self, index: &mut Index) -> anyhow::Result<()> {
        index.clear();
        index.write_updates()?;
        self.staging.clear()
    }
}
