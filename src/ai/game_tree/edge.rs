/// The move leading from a parent position to its child.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameTreeEdge<M> {
    pub mv: M,
}

impl<M> GameTreeEdge<M> {
    pub fn new(mv: M) -> Self {
        Self { mv }
    }
}
