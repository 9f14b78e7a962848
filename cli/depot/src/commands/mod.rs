//! CLI command implementations.

pub mod add;
pub mod list;
pub mod pull;
pub mod purge;
pub mod push;
pub mod rm;
pub mod tag;
pub mod untag;
