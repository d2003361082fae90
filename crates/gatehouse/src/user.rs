// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `user` subcommand family: directory profile administration.
//!
//! The pipeline only ever reads profiles; these commands are the seeding
//! and inspection path for operators.

use std::str::FromStr;

use clap::{ArgAction, Subcommand};

use gatehouse_config::GatehouseConfig;
use gatehouse_core::{ApprovalStatus, GatehouseError};
use gatehouse_storage::{NewProfile, SqliteStore};

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Add a directory profile.
    Add {
        /// Email address the pipeline will match senders against.
        #[arg(long)]
        email: String,

        /// Full display name.
        #[arg(long)]
        name: String,

        /// Organization label.
        #[arg(long, default_value = "")]
        organization: String,

        /// Approval state: Pending, Approved, or Denied.
        #[arg(long, default_value = "Approved")]
        status: String,

        /// Create the profile with email processing disabled.
        #[arg(long)]
        disabled: bool,

        /// Daily processing ceiling; defaults to processing.default_daily_limit.
        #[arg(long)]
        max_daily: Option<i64>,
    },

    /// List all directory profiles.
    List,

    /// Update a profile's processing flag and daily ceiling.
    SetLimits {
        /// Profile id to update.
        #[arg(long)]
        user_id: String,

        /// Whether email processing is enabled for the user.
        #[arg(long, action = ArgAction::Set)]
        enabled: bool,

        /// Daily processing ceiling.
        #[arg(long)]
        max_daily: i64,
    },
}

pub async fn run(config: GatehouseConfig, command: UserCommand) -> Result<(), GatehouseError> {
    let store = SqliteStore::open(&config.storage).await?;

    match command {
        UserCommand::Add {
            email,
            name,
            organization,
            status,
            disabled,
            max_daily,
        } => {
            let authentication_status = ApprovalStatus::from_str(&status).map_err(|_| {
                GatehouseError::Config(format!(
                    "invalid status `{status}` (expected Pending, Approved, or Denied)"
                ))
            })?;

            let profile = NewProfile {
                user_id: uuid::Uuid::new_v4().to_string(),
                email,
                full_name: name,
                organization,
                authentication_status,
                email_processing_enabled: !disabled,
                max_daily_email_processing: max_daily
                    .unwrap_or(config.processing.default_daily_limit),
            };
            store.insert_profile(&profile).await?;
            println!(
                "created profile {} for {} ({})",
                profile.user_id, profile.email, profile.authentication_status
            );
        }

        UserCommand::List => {
            let profiles = store.list_profiles().await?;
            if profiles.is_empty() {
                println!("no profiles");
            }
            for profile in profiles {
                println!(
                    "{}  {:<30}  {:<8}  processing={}  max_daily={}",
                    profile.user_id,
                    profile.email,
                    profile.authentication_status,
                    profile.email_processing_enabled,
                    profile.max_daily_email_processing,
                );
            }
        }

        UserCommand::SetLimits {
            user_id,
            enabled,
            max_daily,
        } => {
            let updated = store.set_email_limits(&user_id, enabled, max_daily).await?;
            if updated {
                println!("updated limits for {user_id}: enabled={enabled} max_daily={max_daily}");
            } else {
                println!("no profile with id {user_id}");
            }
        }
    }

    store.close().await?;
    Ok(())
}
