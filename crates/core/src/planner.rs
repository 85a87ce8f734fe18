//! A* search over a [`Grid`] with a Manhattan heuristic and unit step cost.
//! This module exists to own the open/closed bookkeeping and the expansion loop.
//! It does not own grid validation or how callers present the resulting path.
//!
//! The frontier is an ordered set keyed by `(f, seq)`, where `seq` counts
//! insertions into the open set. Ties on `f` therefore go to the node that was
//! opened first, and neighbors are opened in west, east, north, south order, so
//! the same inputs always produce the same path.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use slotmap::{SlotMap, new_key_type};

use crate::config::SearchConfig;
use crate::error::{Endpoint, PlanError, PositionFault};
use crate::grid::Grid;
use crate::types::Pos;

new_key_type! {
    /// Arena key of a [`SearchNode`].
    pub struct NodeId;
}

/// Per-position search bookkeeping. `f == g + h` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pos: Pos,
    g: u32,
    h: u32,
    f: u32,
    parent: Option<NodeId>,
}

impl SearchNode {
    fn new(pos: Pos, g: u32, h: u32, parent: Option<NodeId>) -> Self {
        Self { pos, g, h, f: g + h, parent }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Cost from the start.
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Heuristic estimate to the goal.
    pub fn h(&self) -> u32 {
        self.h
    }

    pub fn f(&self) -> u32 {
        self.f
    }

    /// The node this one was reached from; `None` only for the start node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenKey {
    f: u32,
    seq: u64,
    node: NodeId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    /// Start to goal, both inclusive.
    pub path: Vec<Pos>,
    pub cost: u32,
    pub nodes_expanded: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(PathResult),
    /// The open set ran dry. This is a definitive answer, not a failure.
    NoPath { nodes_expanded: u32 },
    /// `SearchConfig::max_expansions` was reached first.
    BudgetExhausted { nodes_expanded: u32 },
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&[Pos]> {
        match self {
            SearchOutcome::Found(result) => Some(&result.path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Pos>> {
        match self {
            SearchOutcome::Found(result) => Some(result.path),
            _ => None,
        }
    }

    pub fn nodes_expanded(&self) -> u32 {
        match self {
            SearchOutcome::Found(result) => result.nodes_expanded,
            SearchOutcome::NoPath { nodes_expanded }
            | SearchOutcome::BudgetExhausted { nodes_expanded } => *nodes_expanded,
        }
    }
}

enum Step {
    Expanded,
    Finished(SearchOutcome),
}

/// One-shot A* search between two positions of a borrowed grid.
///
/// [`Planner::search`] consumes the planner; build a new one per query.
pub struct Planner<'a> {
    grid: &'a Grid,
    start: Pos,
    goal: Pos,
    config: SearchConfig,
    nodes: SlotMap<NodeId, SearchNode>,
    open: BTreeMap<Pos, OpenKey>,
    frontier: BTreeSet<OpenKey>,
    closed: BTreeMap<Pos, NodeId>,
    next_seq: u64,
    nodes_expanded: u32,
}

impl<'a> Planner<'a> {
    pub fn new(grid: &'a Grid, start: Pos, goal: Pos) -> Result<Self, PlanError> {
        Self::with_config(grid, start, goal, SearchConfig::default())
    }

    /// Fails with [`PlanError::InvalidPosition`] if either endpoint is outside the
    /// grid or on a blocked cell.
    pub fn with_config(
        grid: &'a Grid,
        start: Pos,
        goal: Pos,
        config: SearchConfig,
    ) -> Result<Self, PlanError> {
        check_endpoint(grid, Endpoint::Start, start)?;
        check_endpoint(grid, Endpoint::Goal, goal)?;

        let mut planner = Self {
            grid,
            start,
            goal,
            config,
            nodes: SlotMap::with_key(),
            open: BTreeMap::new(),
            frontier: BTreeSet::new(),
            closed: BTreeMap::new(),
            next_seq: 0,
            nodes_expanded: 0,
        };
        planner.open_node(SearchNode::new(start, 0, start.distance(goal), None));
        Ok(planner)
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// The open or closed node currently recorded for `pos`.
    pub fn node_at(&self, pos: Pos) -> Option<&SearchNode> {
        let id = match self.open.get(&pos) {
            Some(key) => key.node,
            None => *self.closed.get(&pos)?,
        };
        self.nodes.get(id)
    }

    pub fn search(mut self) -> SearchOutcome {
        trace!(
            "[Planner] search: start={} goal={} grid={}x{} budget={:?}",
            self.start,
            self.goal,
            self.grid.width(),
            self.grid.height(),
            self.config.max_expansions
        );
        loop {
            if let Step::Finished(outcome) = self.advance() {
                return outcome;
            }
        }
    }

    fn advance(&mut self) -> Step {
        let Some(key) = self.frontier.pop_first() else {
            debug!("[Planner] NoPath after expanding {} nodes", self.nodes_expanded);
            return Step::Finished(SearchOutcome::NoPath { nodes_expanded: self.nodes_expanded });
        };
        let current = self.nodes[key.node];
        self.open.remove(&current.pos);

        if current.pos == self.goal {
            let path = self.reconstruct_path(key.node);
            trace!(
                "[Planner] found path: {} steps, {} nodes expanded",
                current.g,
                self.nodes_expanded
            );
            return Step::Finished(SearchOutcome::Found(PathResult {
                path,
                cost: current.g,
                nodes_expanded: self.nodes_expanded,
            }));
        }

        if self.config.max_expansions.is_some_and(|limit| self.nodes_expanded >= limit) {
            debug!("[Planner] BudgetExhausted after expanding {} nodes", self.nodes_expanded);
            return Step::Finished(SearchOutcome::BudgetExhausted {
                nodes_expanded: self.nodes_expanded,
            });
        }

        self.closed.insert(current.pos, key.node);
        self.nodes_expanded += 1;
        self.expand(key.node, current);
        Step::Expanded
    }

    fn expand(&mut self, id: NodeId, current: SearchNode) {
        let grid = self.grid;
        for neighbor in grid.neighbors(current.pos) {
            if self.closed.contains_key(&neighbor) {
                continue;
            }
            let tentative_g = current.g + current.pos.distance(neighbor);
            let improves = match self.open.get(&neighbor) {
                Some(existing) => tentative_g < self.nodes[existing.node].g,
                None => true,
            };
            if !improves {
                continue;
            }
            let h = neighbor.distance(self.goal);
            self.open_node(SearchNode::new(neighbor, tentative_g, h, Some(id)));
        }
    }

    /// Inserts `node` into the open set, replacing any entry for the same position.
    /// A replaced node is dropped from the arena outright: only closed nodes are
    /// ever parents, so nothing can still point at it.
    fn open_node(&mut self, node: SearchNode) {
        if let Some(previous) = self.open.remove(&node.pos) {
            self.frontier.remove(&previous);
            self.nodes.remove(previous.node);
        }
        let pos = node.pos;
        let f = node.f;
        let id = self.nodes.insert(node);
        let key = OpenKey { f, seq: self.next_seq, node: id };
        self.next_seq += 1;
        self.frontier.insert(key);
        self.open.insert(pos, key);
    }

    /// Follows parent links from `end` back to the start node and returns the
    /// positions in start-to-end order.
    fn reconstruct_path(&self, end: NodeId) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut cursor = Some(end);
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            path.push(node.pos);
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

fn check_endpoint(grid: &Grid, endpoint: Endpoint, pos: Pos) -> Result<(), PlanError> {
    let fault = if !grid.is_in_bounds(pos) {
        PositionFault::OutOfBounds
    } else if !grid.is_passable(pos) {
        PositionFault::Blocked
    } else {
        return Ok(());
    };
    debug!("[Planner] rejected {endpoint} {pos}: {fault}");
    Err(PlanError::InvalidPosition { endpoint, pos, fault })
}

/// Unbounded search from `start` to `goal`. `Ok(None)` means no path exists.
pub fn find_path(grid: &Grid, start: Pos, goal: Pos) -> Result<Option<Vec<Pos>>, PlanError> {
    Ok(Planner::new(grid, start, goal)?.search().into_path())
}
