//! Caller identity and ownership checks.
//!
//! Credentials are resolved upstream of this crate; operations receive only
//! the resolved [`CallerId`]. Every lesson mutation, every lesson single-read
//! and every forum mutation goes through [`assert_owner`]. There is no
//! administrator override.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Opaque resolved caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(pub Uuid);

impl CallerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Fails with [`AppError::Authorization`] unless `caller` owns the record.
pub fn assert_owner(owner: CallerId, caller: CallerId) -> AppResult<()> {
    if owner != caller {
        tracing::warn!(%owner, %caller, "ownership check failed");
        return Err(AppError::Authorization);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes_foreign_caller_fails() {
        let owner = CallerId::new();
        let other = CallerId::new();

        assert!(assert_owner(owner, owner).is_ok());
        assert!(matches!(
            assert_owner(owner, other),
            Err(AppError::Authorization)
        ));
    }
}
