//! Talent system - page data, allocation rules and bonus aggregation

mod allocator;
mod bonuses;
mod build;
mod tree;

pub use allocator::{AllocationOutcome, Checkpoint, PageAllocation, TalentAllocator};
pub use bonuses::{compute_bonuses, TalentBonuses};
pub use build::TalentBuild;
pub use tree::{BonusStat, NodeEffect, NodeTier, Position, TalentBook, TalentNode, TalentPage};

use thiserror::Error;

/// Rejected talent operation; state is left unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TalentError {
    #[error("No talent page is open")]
    NoOpenPage,
    #[error("Unknown talent node: {0}")]
    UnknownNode(String),
    #[error("Unknown talent page: {0}")]
    UnknownPage(String),
    #[error("Talent node '{0}' is already at max points")]
    NodeMaxed(String),
    #[error("Talent node '{node}' requires '{requirement}' first")]
    MissingRequirement { node: String, requirement: String },
    #[error("Talent node '{node}' needs {required} points spent, have {spent}")]
    ColumnLocked {
        node: String,
        required: u32,
        spent: u32,
    },
    #[error("Talent node '{node}' needs '{connection}' maxed first")]
    ConnectionsNotMaxed { node: String, connection: String },
    #[error("Talent build already has {0} pages")]
    BuildFull(usize),
    #[error("Talent page '{0}' is already in the build")]
    DuplicatePage(String),
}
