pub mod builder;
pub mod edge;
pub mod node;
pub mod score;

use petgraph::graph::EdgeReference;
use petgraph::prelude::*;
use crate::Player;
use crate::ai::game_tree::edge::GameTreeEdge;
use crate::ai::game_tree::node::GameTreeNode;

/// A search tree rooted at the position the searching side has to move in.
///
/// Nodes carry values, edges carry the moves between positions. Children are
/// always reported in the order they were added, which is the order the board
/// generated the moves in.
pub struct GameTree<M> {
    root_node_idx: NodeIndex,
    graph: Graph<GameTreeNode, GameTreeEdge<M>, Directed>,
    searching_side: Player,
}

impl<M> GameTree<M> {
    pub fn new(searching_side: Player) -> Self {
        let mut graph: Graph<GameTreeNode, GameTreeEdge<M>, Directed> = Graph::new();
        let root_node_idx = graph.add_node(GameTreeNode::new(0, searching_side));
        Self {
            root_node_idx,
            graph,
            searching_side,
        }
    }

    pub fn graph(&self) -> &Graph<GameTreeNode, GameTreeEdge<M>, Directed> {
        &self.graph
    }

    pub fn root(&self) -> NodeIndex {
        self.root_node_idx
    }

    pub fn searching_side(&self) -> Player {
        self.searching_side
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn add_child(&mut self, parent_idx: NodeIndex, mv: M, node: GameTreeNode) -> NodeIndex {
        let child_idx = self.graph.add_node(node);
        self.graph.add_edge(parent_idx, child_idx, GameTreeEdge::new(mv));
        child_idx
    }

    pub fn get_node(&self, node_idx: NodeIndex) -> &GameTreeNode {
        &self.graph[node_idx]
    }

    pub fn get_node_mut(&mut self, node_idx: NodeIndex) -> &mut GameTreeNode {
        &mut self.graph[node_idx]
    }

    pub fn node_children(&self, node_idx: NodeIndex) -> Vec<NodeIndex> {
        // petgraph walks outgoing edges newest first
        let mut edges: Vec<EdgeReference<GameTreeEdge<M>>> =
            self.graph.edges_directed(node_idx, Outgoing).collect();
        edges.sort_by_key(|edge| edge.id());
        edges.into_iter().map(|edge| edge.target()).collect()
    }

    pub fn edge_to_parent(&self, node_idx: NodeIndex) -> Option<EdgeReference<GameTreeEdge<M>>> {
        self.graph.edges_directed(node_idx, Incoming).next()
    }

    /// The move that leads into `node_idx`; `None` for the root.
    pub fn move_to(&self, node_idx: NodeIndex) -> Option<&M> {
        self.edge_to_parent(node_idx).map(|edge| &edge.weight().mv)
    }

    pub fn is_leaf_node(&self, node_idx: NodeIndex) -> bool {
        self.graph.edges_directed(node_idx, Outgoing).next().is_none()
    }

    /// The root move whose child holds the highest value; the first one
    /// wins ties. Children without a value are skipped.
    pub fn best_move(&self) -> Option<&M> {
        let mut best: Option<(i32, NodeIndex)> = None;
        for child_idx in self.node_children(self.root_node_idx) {
            let Some(value) = self.get_node(child_idx).value else {
                continue;
            };
            if best.map_or(true, |(best_value, _)| value > best_value) {
                best = Some((value, child_idx));
            }
        }

        best.and_then(|(_, child_idx)| self.move_to(child_idx))
    }
}
