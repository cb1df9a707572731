// Skill profile lifecycle: load, toggle, debounced persistence.

pub mod handlers;
pub mod saver;
