use crate::Player;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameTreeNode {
    /// Score from the searching side's point of view. Internal nodes of a
    /// minimax tree stay `None` until the tree is resolved.
    pub value: Option<i32>,
    pub ply: u32,
    pub side_to_move: Player,
}

impl GameTreeNode {
    pub fn new(ply: u32, side_to_move: Player) -> Self {
        Self {
            value: None,
            ply,
            side_to_move,
        }
    }

    pub fn is_maximizing(&self, searching_side: Player) -> bool {
        self.side_to_move == searching_side
    }
}
