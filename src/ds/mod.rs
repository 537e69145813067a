pub mod rank_tree;
pub mod slot_arena;
pub mod top_k;

pub use rank_tree::RankTree;
pub use slot_arena::{SlotArena, SlotId};
pub use top_k::TopKSelector;
