use crate::game::{Board, Direction};
use crate::heuristic::{Heuristic, ManhattanHeuristic};
use crate::pqueue::PriorityQueue;
use crate::state::{SearchState, StateId, StateKey, successors};
use crate::zobrist::Zobrist;
use log::{debug, trace};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Budgets after which the search gives up with `SolveResult::Cutoff`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_nodes: Option<usize>,
    pub max_elapsed: Option<Duration>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    fn exceeded(&self, nodes_explored: usize, elapsed: Duration) -> bool {
        self.max_nodes.is_some_and(|max| nodes_explored >= max)
            || self.max_elapsed.is_some_and(|max| elapsed >= max)
    }
}

#[derive(Debug)]
pub enum SolveResult {
    Solved(Solution),
    /// A search budget ran out first.
    Cutoff,
    /// The frontier was exhausted: no solution exists.
    Impossible,
}

/// A solved search. Holds the arena so the move path can be recovered by
/// walking parent links back from the goal.
#[derive(Debug)]
pub struct Solution {
    states: Vec<SearchState>,
    goal: StateId,
    nodes_explored: usize,
    elapsed: Duration,
}

impl Solution {
    pub fn final_state(&self) -> &SearchState {
        &self.states[self.goal.0]
    }

    /// States from the initial board to the goal, inclusive.
    pub fn path(&self) -> Vec<&SearchState> {
        let mut path = Vec::new();
        let mut current = Some(self.goal);
        while let Some(id) = current {
            let state = &self.states[id.0];
            path.push(state);
            current = state.parent;
        }
        path.reverse();
        path
    }

    pub fn moves(&self) -> Vec<Direction> {
        self.path()
            .into_iter()
            .filter_map(|state| state.last_move)
            .collect()
    }

    /// Number of moves in the solution.
    pub fn len(&self) -> usize {
        self.final_state().g
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The moves as a `udlr` string.
    pub fn move_string(&self) -> String {
        self.moves().iter().map(Direction::symbol).collect()
    }
}

/// A* over player moves. Every step and every push costs one move.
///
/// The solver owns the board it searches and builds its heuristic from that
/// same board, so the estimate always refers to the right targets.
pub struct Solver<H: Heuristic> {
    board: Board,
    heuristic: H,
    limits: SearchLimits,
    nodes_explored: usize,
}

impl<H: Heuristic> Solver<H> {
    pub fn new(board: Board, limits: SearchLimits) -> Self {
        let heuristic = H::for_board(&board);
        Solver {
            board,
            heuristic,
            limits,
            nodes_explored: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Nodes expanded by the last call to `solve`.
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    pub fn solve(&mut self) -> SolveResult {
        let start = Instant::now();
        self.nodes_explored = 0;

        let Some(initial) = SearchState::initial(self.board.clone(), &self.heuristic) else {
            return SolveResult::Impossible;
        };
        debug!(
            "Starting search: {}x{} board, initial estimate {}",
            self.board.rows(),
            self.board.cols(),
            initial.h
        );

        let zobrist = Zobrist::for_board(&self.board);
        let mut frontier = PriorityQueue::new();
        let mut closed: HashSet<StateKey> = HashSet::new();
        frontier.push(initial.f(), StateId(0));
        let mut states = vec![initial];

        while let Some(id) = frontier.pop_min() {
            // Stale duplicates are dropped here rather than at insertion.
            if !closed.insert(states[id.0].key(&zobrist)) {
                continue;
            }

            if self.limits.exceeded(self.nodes_explored, start.elapsed()) {
                debug!(
                    "Search cut off after {} nodes, {} states queued",
                    self.nodes_explored,
                    frontier.len()
                );
                return SolveResult::Cutoff;
            }
            self.nodes_explored += 1;

            let current = &states[id.0];
            trace!(
                "Expanding node {}: g={}, h={}, player={}",
                self.nodes_explored, current.g, current.h, current.player
            );

            if current.is_goal() {
                let elapsed = start.elapsed();
                debug!(
                    "Solved in {} moves, {} nodes explored, {} states generated",
                    current.g,
                    self.nodes_explored,
                    states.len()
                );
                return SolveResult::Solved(Solution {
                    states,
                    goal: id,
                    nodes_explored: self.nodes_explored,
                    elapsed,
                });
            }

            for child in successors(id, current, &self.heuristic) {
                if closed.contains(&child.key(&zobrist)) {
                    continue;
                }
                let child_id = StateId(states.len());
                frontier.push(child.f(), child_id);
                states.push(child);
            }
        }

        debug!(
            "Frontier exhausted after {} nodes, no solution",
            self.nodes_explored
        );
        SolveResult::Impossible
    }
}

/// Solve with the Manhattan heuristic and no budget.
pub fn solve(board: &Board) -> SolveResult {
    Solver::<ManhattanHeuristic>::new(board.clone(), SearchLimits::unlimited()).solve()
}
