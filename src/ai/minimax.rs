use log::debug;
use petgraph::prelude::NodeIndex;
use crate::ai::game_tree::builder::TreeBuilder;
use crate::ai::game_tree::GameTree;
use crate::ai::heuristic::Heuristic;
use crate::{Board, Player};

/// Fills in the value of every internal node, maximizing where the searching
/// side moves and minimizing elsewhere, then picks the best root move.
pub fn search_tree<M: Clone>(tree: &mut GameTree<M>) -> Option<M> {
    let root = tree.root();
    let value = resolve(tree, root);
    debug!("minimax resolved the root to {value}");
    tree.best_move().cloned()
}

fn resolve<M>(tree: &mut GameTree<M>, node_idx: NodeIndex) -> i32 {
    if let Some(value) = tree.get_node(node_idx).value {
        return value;
    }

    let values: Vec<i32> = tree
        .node_children(node_idx)
        .into_iter()
        .map(|child_idx| resolve(tree, child_idx))
        .collect();

    let searching_side = tree.searching_side();
    let node = tree.get_node_mut(node_idx);
    let value = if node.is_maximizing(searching_side) {
        values.into_iter().max()
    } else {
        values.into_iter().min()
    };
    // unexpanded nodes only come from hand-built trees
    let value = value.unwrap_or(0);
    node.value = Some(value);
    value
}

/// Exhaustive search `depth` plies deep.
pub fn minimax<B, H>(board: &B, heuristic: &H, snapshot: &B::Snapshot, side: Player, depth: u32) -> Option<B::Move>
where
    B: Board,
    H: Heuristic<B>,
{
    let mut tree = TreeBuilder::new(board, heuristic, side).build_minimax_tree(snapshot, depth);
    search_tree(&mut tree)
}

/// Alpha-beta pruned search; the tree is already valued once it is built.
pub fn alpha_beta<B, H>(board: &B, heuristic: &H, snapshot: &B::Snapshot, side: Player, depth: u32) -> Option<B::Move>
where
    B: Board,
    H: Heuristic<B>,
{
    let tree = TreeBuilder::new(board, heuristic, side).build_alpha_beta_tree(snapshot, depth);
    tree.best_move().cloned()
}
