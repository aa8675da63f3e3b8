//! Published reaction tables for hydrogen projectiles on an H2 target.

pub mod reactions;

pub use reactions::{Product, Reaction, ReactionDatabase};
