// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User directory lookup trait.

use async_trait::async_trait;

use crate::error::GatehouseError;
use crate::types::UserProfile;

/// Read-only access to the portal's user directory.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Look up a profile by exact email match, filtered to approval state
    /// `Approved`. Returns `None` when no approved profile has that address.
    async fn find_approved_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserProfile>, GatehouseError>;
}
