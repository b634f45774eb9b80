//! TalentAllocator - Point allocation over one open talent page at a time

use super::bonuses::{compute_bonuses, TalentBonuses};
use super::tree::{TalentNode, TalentPage};
use super::TalentError;
use crate::config::TalentConstants;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Allocation state of one page: a working copy of its tree plus the allocated ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAllocation {
    pub page_id: String,
    pub talent_tree: Vec<TalentNode>,
    /// Ids of nodes holding at least one point
    pub allocated: BTreeSet<String>,
}

/// What a successful allocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    pub node_id: String,
    /// Points on the node after the allocation
    pub points: u32,
    /// Neighbours raised to their cap by the auto-cascade
    pub cascaded: Vec<String>,
}

/// One rung of the progress ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub points: u32,
    pub reached: bool,
}

impl PageAllocation {
    /// Zeroed working copy of a page template
    pub fn fresh(page: &TalentPage) -> Self {
        PageAllocation {
            page_id: page.id.clone(),
            talent_tree: page.fresh_tree(),
            allocated: BTreeSet::new(),
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&TalentNode> {
        self.talent_tree.iter().find(|n| n.id == node_id)
    }

    pub fn is_allocated(&self, node_id: &str) -> bool {
        self.allocated.contains(node_id)
    }

    /// Sum of points over the allocated nodes
    pub fn total_allocated_points(&self) -> u32 {
        self.talent_tree
            .iter()
            .filter(|n| self.allocated.contains(&n.id))
            .map(|n| n.current_points)
            .sum()
    }

    /// Aggregated stat bonuses of this page
    pub fn bonuses(&self) -> TalentBonuses {
        compute_bonuses(&self.talent_tree)
    }

    /// Zero every node and clear the allocated set
    pub fn reset(&mut self) {
        for node in &mut self.talent_tree {
            node.current_points = 0;
        }
        self.allocated.clear();
    }

    /// Whether `node_id` can take a point right now
    pub fn can_allocate(&self, node_id: &str, rules: &TalentConstants) -> bool {
        match self.node(node_id) {
            Some(node) if node.is_maxed() => false,
            Some(node) if node.current_points > 0 => true,
            Some(node) => self.check_unlock(node, rules).is_ok(),
            None => false,
        }
    }

    /// Gate for the first point of a node
    fn check_unlock(&self, node: &TalentNode, rules: &TalentConstants) -> Result<(), TalentError> {
        if let Some(missing) = node
            .requirements
            .iter()
            .find(|req| !self.allocated.contains(*req))
        {
            return Err(TalentError::MissingRequirement {
                node: node.id.clone(),
                requirement: missing.clone(),
            });
        }

        let spent = self.total_allocated_points();
        if spent < node.column_requirement {
            return Err(TalentError::ColumnLocked {
                node: node.id.clone(),
                required: node.column_requirement,
                spent,
            });
        }

        if rules.connection_gate && node.tier.is_keystone() {
            // Links to legendary nodes don't count
            for conn in &node.connections {
                if let Some(neighbour) = self.node(conn) {
                    if neighbour.tier.is_fillable() && !neighbour.is_maxed() {
                        return Err(TalentError::ConnectionsNotMaxed {
                            node: node.id.clone(),
                            connection: neighbour.id.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Add one point to `node_id`
    ///
    /// Only the first point is gated. A keystone's first point also maxes its
    /// minor/medium neighbours, one level deep and without gating them.
    pub fn allocate(
        &mut self,
        node_id: &str,
        rules: &TalentConstants,
    ) -> Result<AllocationOutcome, TalentError> {
        let index = self
            .talent_tree
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| TalentError::UnknownNode(node_id.to_string()))?;

        let node = &self.talent_tree[index];
        if node.is_maxed() {
            return Err(TalentError::NodeMaxed(node.id.clone()));
        }

        let first_point = node.current_points == 0;
        if first_point {
            self.check_unlock(node, rules)?;
        }

        let mut cascaded = Vec::new();
        if first_point && node.tier.is_keystone() {
            let connections = node.connections.clone();
            for conn in connections.iter().filter(|c| c.as_str() != node_id) {
                if let Some(neighbour) = self.talent_tree.iter_mut().find(|n| &n.id == conn) {
                    if neighbour.tier.is_fillable() && !neighbour.is_maxed() {
                        neighbour.current_points = neighbour.max_points;
                        self.allocated.insert(neighbour.id.clone());
                        cascaded.push(neighbour.id.clone());
                    }
                }
            }
        }

        let node = &mut self.talent_tree[index];
        node.current_points += 1;
        let points = node.current_points;
        self.allocated.insert(node_id.to_string());

        tracing::debug!(
            page = %self.page_id,
            node = node_id,
            points,
            cascaded = cascaded.len(),
            "talent point allocated"
        );

        Ok(AllocationOutcome {
            node_id: node_id.to_string(),
            points,
            cascaded,
        })
    }

    /// Ladder rungs and whether the current spend reaches each
    pub fn checkpoint_progress(&self, rules: &TalentConstants) -> Vec<Checkpoint> {
        let spent = self.total_allocated_points();
        rules
            .checkpoints
            .iter()
            .map(|points| Checkpoint {
                points: *points,
                reached: spent >= *points,
            })
            .collect()
    }
}

/// Allocation controller: one open page, with per-page progress kept across switches
#[derive(Debug, Clone, Default)]
pub struct TalentAllocator {
    rules: TalentConstants,
    saved: HashMap<String, PageAllocation>,
    current: Option<PageAllocation>,
}

impl TalentAllocator {
    pub fn new(rules: TalentConstants) -> Self {
        TalentAllocator {
            rules,
            saved: HashMap::new(),
            current: None,
        }
    }

    pub fn rules(&self) -> &TalentConstants {
        &self.rules
    }

    /// Open a page, resuming saved progress or starting from a zeroed copy
    ///
    /// Any page already open is committed first.
    pub fn open(&mut self, page: &TalentPage) -> &PageAllocation {
        self.commit();
        let allocation = match self.saved.get(&page.id) {
            Some(saved) => saved.clone(),
            None => PageAllocation::fresh(page),
        };
        tracing::debug!(
            page = %page.id,
            points = allocation.total_allocated_points(),
            "talent page opened"
        );
        self.current.insert(allocation)
    }

    /// Persist the open page into the per-page map, keeping it open
    pub fn commit(&mut self) {
        if let Some(current) = &self.current {
            self.saved.insert(current.page_id.clone(), current.clone());
        }
    }

    /// Persist and close the open page
    pub fn close(&mut self) {
        self.commit();
        self.current = None;
    }

    pub fn current(&self) -> Option<&PageAllocation> {
        self.current.as_ref()
    }

    /// Saved state for a page that is not necessarily open
    pub fn saved(&self, page_id: &str) -> Option<&PageAllocation> {
        self.saved.get(page_id)
    }

    /// Add one point to a node of the open page
    pub fn allocate(&mut self, node_id: &str) -> Result<AllocationOutcome, TalentError> {
        let current = self.current.as_mut().ok_or(TalentError::NoOpenPage)?;
        current.allocate(node_id, &self.rules)
    }

    pub fn can_allocate(&self, node_id: &str) -> bool {
        self.current
            .as_ref()
            .map(|c| c.can_allocate(node_id, &self.rules))
            .unwrap_or(false)
    }

    /// Zero the open page and persist the empty state
    pub fn reset(&mut self) -> Result<(), TalentError> {
        let current = self.current.as_mut().ok_or(TalentError::NoOpenPage)?;
        current.reset();
        self.commit();
        Ok(())
    }

    /// Points spent in the open page (0 with nothing open)
    pub fn total_allocated_points(&self) -> u32 {
        self.current
            .as_ref()
            .map(PageAllocation::total_allocated_points)
            .unwrap_or(0)
    }

    pub fn checkpoint_progress(&self) -> Vec<Checkpoint> {
        match &self.current {
            Some(current) => current.checkpoint_progress(&self.rules),
            None => Vec::new(),
        }
    }

    /// Bonuses for a page: the open copy if it's that page, else its saved state
    pub fn bonuses_for(&self, page_id: &str) -> TalentBonuses {
        match &self.current {
            Some(current) if current.page_id == page_id => current.bonuses(),
            _ => self
                .saved
                .get(page_id)
                .map(PageAllocation::bonuses)
                .unwrap_or_default(),
        }
    }

    /// Drop saved progress for a page
    pub fn forget(&mut self, page_id: &str) {
        self.saved.remove(page_id);
        if self.current.as_ref().is_some_and(|c| c.page_id == page_id) {
            self.current = None;
        }
    }
}
