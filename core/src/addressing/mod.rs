pub mod hashed;
pub mod pass_through;

use crate::error::CoreResult;

pub use hashed::{human_prefix, AddressingConfig, HashedScheme};
pub use pass_through::PassThroughScheme;

/// Maps a node path to an identifier candidate.
///
/// Implementations are pure: the same path always yields the same
/// candidate. Candidates are not validated or de-duplicated here.
pub trait AddressingScheme {
    fn name(&self) -> &'static str;
    fn allocate(&self, path: &[String]) -> CoreResult<String>;
}
