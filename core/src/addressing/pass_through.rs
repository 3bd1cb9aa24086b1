use crate::addressing::AddressingScheme;
use crate::error::{CoreError, CoreResult};

/// Concatenates the components verbatim. No fingerprint, so distinct paths
/// can produce the same candidate; useful for exercising collision handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughScheme;

impl AddressingScheme for PassThroughScheme {
    fn name(&self) -> &'static str {
        "pass_through"
    }

    fn allocate(&self, path: &[String]) -> CoreResult<String> {
        if path.is_empty() {
            return Err(CoreError::EmptyPath);
        }
        Ok(path.concat())
    }
}
