// Skill matching core: pure functions over immutable snapshots, no I/O.
// Handlers fetch offers and profiles through `sources` and call in here.

pub mod catalog;
pub mod filter;
pub mod handlers;
pub mod matcher;
pub mod ranker;
pub mod skill_set;
