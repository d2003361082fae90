// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `process` subcommand: run one email through the pipeline by hand and
//! print the result object. Useful for verifying directory and model
//! configuration before pointing a webhook or mailbox at the service.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use gatehouse_config::GatehouseConfig;
use gatehouse_core::{
    AuditLog, CompletionProvider, Directory, GatehouseError, GuestStore, RawEmail,
};
use gatehouse_gemini::GeminiProvider;
use gatehouse_pipeline::EmailProcessor;
use gatehouse_storage::SqliteStore;

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Sender, as a raw "From" header value.
    #[arg(long)]
    pub from: String,

    /// Email subject.
    #[arg(long, default_value = "")]
    pub subject: String,

    /// File containing the email body; reads stdin when omitted.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub async fn run(config: GatehouseConfig, args: ProcessArgs) -> Result<(), GatehouseError> {
    let content = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatehouseError::Config(format!("cannot read {}: {e}", path.display())))?,
        None => std::io::read_to_string(std::io::stdin())
            .map_err(|e| GatehouseError::Config(format!("cannot read stdin: {e}")))?,
    };

    let store = Arc::new(SqliteStore::open(&config.storage).await?);
    let provider = Arc::new(GeminiProvider::new(&config)?);
    let processor = EmailProcessor::new(
        Arc::clone(&store) as Arc<dyn Directory>,
        Arc::clone(&store) as Arc<dyn GuestStore>,
        Arc::clone(&store) as Arc<dyn AuditLog>,
        provider as Arc<dyn CompletionProvider>,
        config.gemini.model.clone(),
    );

    let report = processor
        .process(&RawEmail {
            from: args.from,
            subject: args.subject,
            content,
        })
        .await;

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| GatehouseError::Internal(format!("cannot render report: {e}")))?;
    println!("{rendered}");

    store.close().await?;

    if !report.success {
        std::process::exit(1);
    }
    Ok(())
}
