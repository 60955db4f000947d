use log::trace;
use petgraph::prelude::NodeIndex;
use crate::ai::game_tree::node::GameTreeNode;
use crate::ai::game_tree::GameTree;
use crate::ai::heuristic::Heuristic;
use crate::{Board, GameState, Player};

/// Value of a win found at the root; every ply of delay costs one point.
pub const WIN_SCORE: i32 = 1000;

/// Expands game trees for one searching side.
pub struct TreeBuilder<'a, B, H> where B: Board, H: Heuristic<B> {
    board: &'a B,
    heuristic: &'a H,
    searching_side: Player,
}

impl<'a, B, H> TreeBuilder<'a, B, H> where B: Board, H: Heuristic<B> {
    pub fn new(board: &'a B, heuristic: &'a H, searching_side: Player) -> Self {
        Self {
            board,
            heuristic,
            searching_side,
        }
    }

    /// Every line of play up to `depth` plies. Only leaves carry values.
    pub fn build_minimax_tree(&self, snapshot: &B::Snapshot, depth: u32) -> GameTree<B::Move> {
        let mut tree = GameTree::new(self.searching_side);
        let root = tree.root();
        self.expand_minimax(&mut tree, root, snapshot, depth);
        trace!("minimax tree of depth {depth} has {} nodes", tree.node_count());
        tree
    }

    /// Same expansion order as [TreeBuilder::build_minimax_tree], but
    /// siblings are cut off once `beta <= alpha`. Every node that gets
    /// generated also gets a value, exact or bounding.
    pub fn build_alpha_beta_tree(&self, snapshot: &B::Snapshot, depth: u32) -> GameTree<B::Move> {
        let mut tree = GameTree::new(self.searching_side);
        let root = tree.root();
        self.expand_alpha_beta(&mut tree, root, snapshot, depth, i32::MIN, i32::MAX);
        trace!("alpha-beta tree of depth {depth} has {} nodes", tree.node_count());
        tree
    }

    fn expand_minimax(&self, tree: &mut GameTree<B::Move>, node_idx: NodeIndex, snapshot: &B::Snapshot, depth: u32) {
        let GameTreeNode { ply, side_to_move, .. } = *tree.get_node(node_idx);

        if let Some(value) = self.leaf_value(snapshot, side_to_move, ply, depth) {
            tree.get_node_mut(node_idx).value = Some(value);
            return;
        }

        let moves = self.board.legal_moves(side_to_move, snapshot);
        if moves.is_empty() {
            tree.get_node_mut(node_idx).value = Some(0);
            return;
        }

        for mv in moves {
            let child = self.child_snapshot(side_to_move, &mv, snapshot);
            let child_idx = tree.add_child(node_idx, mv, GameTreeNode::new(ply + 1, side_to_move.other()));
            self.expand_minimax(tree, child_idx, &child, depth - 1);
        }
    }

    fn expand_alpha_beta(
        &self,
        tree: &mut GameTree<B::Move>,
        node_idx: NodeIndex,
        snapshot: &B::Snapshot,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        let GameTreeNode { ply, side_to_move, .. } = *tree.get_node(node_idx);

        if let Some(value) = self.leaf_value(snapshot, side_to_move, ply, depth) {
            tree.get_node_mut(node_idx).value = Some(value);
            return value;
        }

        let maximizing = side_to_move == self.searching_side;
        let mut best: Option<i32> = None;

        for mv in self.board.legal_moves(side_to_move, snapshot) {
            let child = self.child_snapshot(side_to_move, &mv, snapshot);
            let child_idx = tree.add_child(node_idx, mv, GameTreeNode::new(ply + 1, side_to_move.other()));
            let value = self.expand_alpha_beta(tree, child_idx, &child, depth - 1, alpha, beta);

            if maximizing {
                best = Some(best.map_or(value, |best| best.max(value)));
                alpha = alpha.max(value);
            } else {
                best = Some(best.map_or(value, |best| best.min(value)));
                beta = beta.min(value);
            }

            if beta <= alpha {
                trace!("cut off at ply {ply} with alpha {alpha} and beta {beta}");
                break;
            }
        }

        // an ongoing position without moves scores like a draw
        let value = best.unwrap_or(0);
        tree.get_node_mut(node_idx).value = Some(value);
        value
    }

    /// `None` while the node still has to be expanded.
    fn leaf_value(&self, snapshot: &B::Snapshot, side_to_move: Player, ply: u32, depth: u32) -> Option<i32> {
        let distance = WIN_SCORE - ply as i32;
        match self.board.terminal_state(side_to_move, snapshot) {
            GameState::Draw => Some(0),
            GameState::Winner(winner) if winner == self.searching_side => Some(distance),
            GameState::Winner(_) => Some(-distance),
            GameState::Ongoing if depth == 0 => {
                Some(self.heuristic.evaluate(self.board, snapshot, self.searching_side))
            }
            GameState::Ongoing => None,
        }
    }

    fn child_snapshot(&self, side: Player, mv: &B::Move, snapshot: &B::Snapshot) -> B::Snapshot {
        match self.board.apply_move(side, mv, snapshot) {
            Ok(child) => child,
            Err(err) => panic!("generated move {mv} was rejected by the board: {err}"),
        }
    }
}
