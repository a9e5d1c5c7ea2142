//! Split point finder for merges
//!
//! Every commit has at most one parent, so the history is a tree rooted at the
//! initial commit. The nearest common ancestor of two commits (their split point)
//! can therefore be found without any priority queue or visit marking.
//!
//! ## Algorithm Overview
//!
//! Given commits `A` and `B`:
//!
//! 1. Compute `depth(A)` and `depth(B)` by walking parent links to the root.
//! 2. Advance the deeper commit toward the root by `|depth(A) - depth(B)|` steps,
//!    producing a pointer pair at equal depth.
//! 3. If both pointers are the same commit, it is the split point.
//! 4. Otherwise walk both pointers toward the root in lock-step, returning the
//!    first parent they share.
//!
//! Two commits of the same history always meet, at the root at the latest. The
//! finder only reports "no split point" when the commits belong to different
//! trees, which a repository never produces.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = SplitPointFinder::new(|commit_id| graph.parent_of(commit_id));
//!
//! let split_point = finder.find_split_point(&head, &other)?;
//! ```
//!
//! ## Debug Logging
//!
//! Every step is traced at `debug` level; run with `RUST_LOG=twig=debug` to
//! follow the walk.

use crate::artifacts::objects::object_id::ObjectId;
use std::cmp::Ordering;
use tracing::debug;

/// Finds the split point of two commits in a single-parent history
///
/// # Type Parameters
///
/// * `ParentLoaderFn` - Returns the parent of a commit, `None` for the root.
///   Loading failures are propagated.
#[derive(Debug, Clone)]
pub struct SplitPointFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    parent_loader: ParentLoaderFn,
}

impl<ParentLoaderFn> SplitPointFinder<ParentLoaderFn>
where
    ParentLoaderFn: Fn(&ObjectId) -> anyhow::Result<Option<ObjectId>>,
{
    pub fn new(parent_loader: ParentLoaderFn) -> Self {
        Self { parent_loader }
    }

    /// Number of parent links between a commit and the root
    pub fn depth(&self, commit_id: &ObjectId) -> anyhow::Result<usize> {
        let mut depth = 0;
        let mut current = (self.parent_loader)(commit_id)?;

        while let Some(parent_id) = current {
            depth += 1;
            current = (self.parent_loader)(&parent_id)?;
        }

        Ok(depth)
    }

    /// Nearest common ancestor of `source` and `target`
    pub fn find_split_point(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let source_depth = self.depth(source)?;
        let target_depth = self.depth(target)?;
        debug!(
            source = %source.to_short_oid(),
            source_depth,
            target = %target.to_short_oid(),
            target_depth,
            "looking for split point"
        );

        let (mut source, mut target) = match source_depth.cmp(&target_depth) {
            Ordering::Greater => (
                self.advance(source, source_depth - target_depth)?,
                target.clone(),
            ),
            Ordering::Less => (
                source.clone(),
                self.advance(target, target_depth - source_depth)?,
            ),
            Ordering::Equal => (source.clone(), target.clone()),
        };

        if source == target {
            debug!(split_point = %source.to_short_oid(), "aligned pointers meet");
            return Ok(Some(source));
        }

        loop {
            let source_parent = (self.parent_loader)(&source)?;
            let target_parent = (self.parent_loader)(&target)?;

            match (source_parent, target_parent) {
                (Some(source_parent), Some(target_parent)) if source_parent == target_parent => {
                    debug!(split_point = %source_parent.to_short_oid(), "shared parent found");
                    return Ok(Some(source_parent));
                }
                (Some(source_parent), Some(target_parent)) => {
                    source = source_parent;
                    target = target_parent;
                }
                _ => {
                    debug!("reached distinct roots without a shared parent");
                    return Ok(None);
                }
            }
        }
    }

    fn advance(&self, commit_id: &ObjectId, steps: usize) -> anyhow::Result<ObjectId> {
        let mut current = commit_id.clone();

        for _ in 0..steps {
            current = (self.parent_loader)(&current)?.ok_or_else(|| {
                anyhow::anyhow!("history of {} ended before its depth", commit_id)
            })?;
        }

        Ok(current)
    }
}
