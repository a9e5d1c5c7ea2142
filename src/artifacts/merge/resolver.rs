//! Merge classification
//!
//! Every file name appearing in the split point, the current head or the other
//! head is classified by which side changed it relative to the split point
//! (addition, deletion and content change all count):
//!
//! | changed in | outcome |
//! |---|---|
//! | neither | kept as in the current head |
//! | current only | kept as in the current head |
//! | other only, present there | checked out from the other head and staged |
//! | other only, deleted there | deleted and marked for removal |
//! | both, same result | kept as in the current head |
//! | both, different results | conflict |

use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

bitflags! {
    /// Sides of the merge that changed a file relative to the split point
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modified: u8 {
        const NONE = 0b00;
        const IN_CURRENT = 0b01;
        const IN_OTHER = 0b10;
        const IN_BOTH = Self::IN_CURRENT.bits() | Self::IN_OTHER.bits();
    }
}

impl fmt::Debug for Modified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(Modified::IN_CURRENT) {
            flags.push("CURRENT");
        }
        if self.contains(Modified::IN_OTHER) {
            flags.push("OTHER");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl Modified {
    pub fn classify(
        split: Option<&ObjectId>,
        current: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        let mut modified = Modified::NONE;
        if current != split {
            modified |= Modified::IN_CURRENT;
        }
        if other != split {
            modified |= Modified::IN_OTHER;
        }
        modified
    }
}

/// Change the merge makes to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Write the other head's version and stage it
    Checkout { name: String, oid: ObjectId },
    /// Delete the file and mark it for removal
    Remove { name: String },
    /// Write a conflict block holding both versions; nothing is staged
    Conflict {
        name: String,
        current: Option<ObjectId>,
        other: Option<ObjectId>,
    },
}

impl MergeAction {
    pub fn name(&self) -> &str {
        match self {
            MergeAction::Checkout { name, .. }
            | MergeAction::Remove { name }
            | MergeAction::Conflict { name, .. } => name,
        }
    }
}

/// Every change a three-way merge makes, sorted by file name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: Vec<MergeAction>,
}

impl MergePlan {
    pub fn build(split: &Manifest, current: &Manifest, other: &Manifest) -> Self {
        let names = split
            .keys()
            .chain(current.keys())
            .chain(other.keys())
            .collect::<BTreeSet<_>>();

        let actions = names
            .into_iter()
            .filter_map(|name| {
                let split_oid = split.get(name);
                let current_oid = current.get(name);
                let other_oid = other.get(name);
                let modified = Modified::classify(split_oid, current_oid, other_oid);
                debug!(file = %name, ?modified, "classified");

                if modified == Modified::IN_OTHER {
                    match other_oid {
                        Some(oid) => Some(MergeAction::Checkout {
                            name: name.clone(),
                            oid: oid.clone(),
                        }),
                        None => Some(MergeAction::Remove { name: name.clone() }),
                    }
                } else if modified == Modified::IN_BOTH && current_oid != other_oid {
                    Some(MergeAction::Conflict {
                        name: name.clone(),
                        current: current_oid.cloned(),
                        other: other_oid.cloned(),
                    })
                } else {
                    None
                }
            })
            .collect();

        Self { actions }
    }

    pub fn actions(&self) -> &[MergeAction] {
        &self.actions
    }

    pub fn has_conflicts(&self) -> bool {
        self.conflicts().next().is_some()
    }

    /// Names of the conflicted files
    pub fn conflicts(&self) -> impl Iterator<Item = &str> {
        self.actions
            .iter()
            .filter(|action| matches!(action, MergeAction::Conflict { .. }))
            .map(MergeAction::name)
    }
}
