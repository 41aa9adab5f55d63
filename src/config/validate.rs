//! Config validation logic.

use tracing::debug;

use crate::errors::SymlinkError;

use super::types::Config;

impl Config {
    /// Reject settings the allocator cannot work with.
    pub fn validate(&self) -> Result<(), SymlinkError> {
        if self.max_attempts == 0 {
            return Err(SymlinkError::InvalidConfig(
                "max_attempts must be at least 1".into(),
            ));
        }
        if let Some(p) = &self.log_file
            && p.as_os_str().is_empty()
        {
            return Err(SymlinkError::InvalidConfig("log_file must not be empty".into()));
        }
        debug!(
            max_attempts = self.max_attempts,
            reseed_after = self.reseed_after,
            log_level = %self.log_level,
            "config validated"
        );
        Ok(())
    }
}
