//! Pagination utilities for service layer
//!
//! Offset based: `skip` rows are dropped, then at most `limit` are returned.

use serde::Deserialize;

use crate::errors::ServiceError;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Store offsets are signed 64-bit.
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    /// rows to skip
    #[serde(default)]
    pub skip: u64,
    /// rows per page
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 { DEFAULT_LIMIT }

impl Pagination {
    pub fn new(skip: u64, limit: u64) -> Self { Self { skip, limit } }

    /// Reject a zero limit or an out-of-range skip and clamp large limits;
    /// returns `(offset, limit)`.
    pub fn normalize(self) -> Result<(u64, u64), ServiceError> {
        if self.limit == 0 {
            return Err(ServiceError::BadRequest("limit must be a positive integer".into()));
        }
        if self.skip > MAX_SKIP {
            return Err(ServiceError::BadRequest(format!("skip must not exceed {MAX_SKIP}")));
        }
        Ok((self.skip, self.limit.min(MAX_LIMIT)))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { skip: 0, limit: DEFAULT_LIMIT } }
}
