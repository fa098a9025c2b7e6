use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::board::{Board, Token};
use crate::error::ConfigError;
use crate::evaluation::Evaluation;
use crate::heuristic::Heuristic;
use crate::moves::{MoveRule, Swap};
use crate::pqueue::PriorityQueue;
use crate::zobrist::Zobrist;

/// Index of a node in the solver's arena.
pub type NodeId = usize;

/// Search bookkeeping for one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    /// Swaps taken from the initial board.
    pub g: usize,
    /// Heuristic estimate of the swaps remaining.
    pub h: usize,
    /// Frontier score.
    pub f: usize,
}

/// One board on a solution path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub board: Board,
    pub cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Expansions(usize),
    Time(Duration),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Expansions(n) => write!(f, "{} expansions", n),
            Limit::Time(limit) => write!(f, "{} ms", limit.as_millis()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// Path from the initial board to the goal, both inclusive.
    Solved(Vec<Step>),
    /// The frontier emptied without reaching the goal.
    Exhausted,
    /// A search limit was reached first.
    Cutoff(Limit),
}

/// Optional budgets; `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>,
    pub time_limit: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub evaluation: Evaluation,
    pub rule: MoveRule,
    pub limits: SearchLimits,
}

impl SearchConfig {
    pub fn new(evaluation: Evaluation, rule: MoveRule) -> Self {
        SearchConfig {
            evaluation,
            rule,
            limits: SearchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Counters accumulated by the most recent `solve` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards taken off the frontier and expanded, the goal included.
    pub expanded: usize,
    /// Children produced by the move generator.
    pub generated: usize,
    /// Swaps along the returned path; 0 unless solved.
    pub swaps: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Open,
    Closed,
    /// Replaced on the open list by a cheaper copy; skipped when popped.
    Superseded,
}

#[derive(Debug, Clone)]
struct Node {
    board: Board,
    hash: u64,
    cost: Cost,
    parent: Option<NodeId>,
    status: Status,
}

/// Content-keyed index from boards to arena nodes.
///
/// Lookups go through the Zobrist hash and confirm with full cell equality.
/// Boards whose hash is already taken by a different board are parked in
/// `overflow`, which stays empty unless two boards collide.
#[derive(Debug, Default)]
struct StateTable {
    primary: HashMap<u64, NodeId>,
    overflow: Vec<NodeId>,
}

impl StateTable {
    fn find(&self, hash: u64, board: &Board, nodes: &[Node]) -> Option<NodeId> {
        let &id = self.primary.get(&hash)?;
        if nodes[id].board == *board {
            return Some(id);
        }
        self.overflow
            .iter()
            .copied()
            .find(|&other| nodes[other].hash == hash && nodes[other].board == *board)
    }

    fn insert(&mut self, hash: u64, id: NodeId) {
        match self.primary.entry(hash) {
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
            Entry::Occupied(_) => self.overflow.push(id),
        }
    }

    fn remove(&mut self, hash: u64, id: NodeId, nodes: &[Node]) {
        if self.primary.get(&hash) == Some(&id) {
            // Promote a colliding board so overflow entries always have a
            // primary entry under the same hash.
            match self.overflow.iter().position(|&other| nodes[other].hash == hash) {
                Some(idx) => {
                    let promoted = self.overflow.swap_remove(idx);
                    self.primary.insert(hash, promoted);
                }
                None => {
                    self.primary.remove(&hash);
                }
            }
        } else if let Some(idx) = self.overflow.iter().position(|&other| other == id) {
            self.overflow.swap_remove(idx);
        }
    }

    fn len(&self) -> usize {
        self.primary.len() + self.overflow.len()
    }

    fn clear(&mut self) {
        self.primary.clear();
        self.overflow.clear();
    }
}

/// A* search over swap moves, with a pluggable heuristic and evaluation.
///
/// Closed boards are never reopened: a cheaper duplicate of an expanded board
/// is discarded. The result is optimal for `f = g + h` only when the heuristic
/// is consistent.
pub struct Solver<H: Heuristic> {
    initial: Board,
    goal: Board,
    heuristic: H,
    config: SearchConfig,
    zobrist: Zobrist,
    nodes: Vec<Node>,
    open: StateTable,
    closed: StateTable,
    frontier: PriorityQueue<NodeId>,
    stats: SearchStats,
}

impl<H: Heuristic> Solver<H> {
    pub fn new(
        initial: Board,
        goal: Board,
        heuristic: H,
        config: SearchConfig,
    ) -> Result<Self, ConfigError> {
        if initial.size() != goal.size() {
            return Err(ConfigError::DimensionMismatch {
                initial: initial.size(),
                goal: goal.size(),
            });
        }
        if config.rule == MoveRule::Blank {
            let blanks = initial.count(Token::BLANK);
            if blanks != 1 {
                return Err(ConfigError::BlankCount(blanks));
            }
        }

        let zobrist = Zobrist::new(initial.size(), &[&initial, &goal]);
        Ok(Solver {
            initial,
            goal,
            heuristic,
            config,
            zobrist,
            nodes: Vec::new(),
            open: StateTable::default(),
            closed: StateTable::default(),
            frontier: PriorityQueue::new(),
            stats: SearchStats::default(),
        })
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Run the search from scratch.
    pub fn solve(&mut self) -> SolveResult {
        self.reset();
        let start = Instant::now();
        debug!(
            "search start: size={} rule={:?} evaluation={:?}",
            self.initial.size(),
            self.config.rule,
            self.config.evaluation
        );

        let result = self.run(start);
        self.stats.elapsed = start.elapsed();
        if let SolveResult::Solved(path) = &result {
            self.stats.swaps = path.len() - 1;
        }

        debug!(
            "search finished: {} expanded={} generated={} swaps={}",
            match &result {
                SolveResult::Solved(_) => "solved".to_string(),
                SolveResult::Exhausted => "exhausted".to_string(),
                SolveResult::Cutoff(limit) => format!("cutoff at {}", limit),
            },
            self.stats.expanded,
            self.stats.generated,
            self.stats.swaps
        );
        result
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.open.clear();
        self.closed.clear();
        self.frontier.clear();
        self.stats = SearchStats::default();
    }

    fn run(&mut self, start: Instant) -> SolveResult {
        let hash = self.zobrist.hash(&self.initial);
        let h = self.heuristic.estimate(&self.initial);
        let cost = Cost {
            g: 0,
            h,
            f: self.config.evaluation.score(0, h),
        };
        self.push_open(self.initial.clone(), hash, cost, None);

        let mut swaps = Vec::new();
        while let Some(id) = self.frontier.pop_min() {
            if self.nodes[id].status != Status::Open {
                continue;
            }
            if let Some(limit) = self.limit_reached(start) {
                return SolveResult::Cutoff(limit);
            }

            let hash = self.nodes[id].hash;
            self.open.remove(hash, id, &self.nodes);
            self.closed.insert(hash, id);
            self.nodes[id].status = Status::Closed;
            self.stats.expanded += 1;

            let node = &self.nodes[id];
            trace!(
                "expand #{}: g={} h={} f={}\n{}",
                self.stats.expanded, node.cost.g, node.cost.h, node.cost.f, node.board
            );

            if node.board == self.goal {
                return SolveResult::Solved(self.reconstruct(id));
            }

            self.config.rule.swaps(&node.board, &mut swaps);
            for &swap in &swaps {
                self.relax(id, swap);
            }
        }

        SolveResult::Exhausted
    }

    fn limit_reached(&self, start: Instant) -> Option<Limit> {
        let limits = &self.config.limits;
        if let Some(max) = limits.max_expansions {
            if self.stats.expanded >= max {
                return Some(Limit::Expansions(max));
            }
        }
        if let Some(limit) = limits.time_limit {
            if start.elapsed() >= limit {
                return Some(Limit::Time(limit));
            }
        }
        None
    }

    /// Generate the child of `parent` produced by `swap` and merge it into
    /// the open list.
    fn relax(&mut self, parent: NodeId, swap: Swap) {
        let parent_node = &self.nodes[parent];
        let board = parent_node.board.swapped(swap.from, swap.to);
        let hash = self
            .zobrist
            .swap_hash(parent_node.hash, &parent_node.board, swap);
        let g = parent_node.cost.g + 1;
        self.stats.generated += 1;

        if self.closed.find(hash, &board, &self.nodes).is_some() {
            return;
        }

        let h = self.heuristic.estimate(&board);
        let f = self.config.evaluation.score(g, h);

        if let Some(existing) = self.open.find(hash, &board, &self.nodes) {
            if f >= self.nodes[existing].cost.f {
                return;
            }
            trace!(
                "replace open copy: f {} -> {}",
                self.nodes[existing].cost.f, f
            );
            self.open.remove(hash, existing, &self.nodes);
            self.nodes[existing].status = Status::Superseded;
        }

        self.push_open(board, hash, Cost { g, h, f }, Some(parent));
    }

    fn push_open(&mut self, board: Board, hash: u64, cost: Cost, parent: Option<NodeId>) {
        let id = self.nodes.len();
        self.nodes.push(Node {
            board,
            hash,
            cost,
            parent,
            status: Status::Open,
        });
        self.open.insert(hash, id);
        self.frontier.push(cost.f, id);
    }

    /// Walk predecessor links from `id` back to the initial board.
    fn reconstruct(&self, id: NodeId) -> Vec<Step> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            path.push(Step {
                board: node.board.clone(),
                cost: node.cost,
            });
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}
