// SPDX-FileCopyrightText: 2026 Gatehouse Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `serve` subcommand: wires storage, the Gemini provider, the
//! orchestrator, the webhook gateway, and the mailbox poller together and
//! runs until ctrl-c.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use gatehouse_config::GatehouseConfig;
use gatehouse_core::{
    AuditLog, CompletionProvider, Directory, GatehouseError, GuestStore,
};
use gatehouse_gemini::GeminiProvider;
use gatehouse_mailbox::{GmailMailbox, MailboxPoller};
use gatehouse_pipeline::EmailProcessor;
use gatehouse_storage::SqliteStore;

pub async fn run(config: GatehouseConfig) -> Result<(), GatehouseError> {
    if !config.gateway.enabled && !config.mailbox.enabled {
        return Err(GatehouseError::Config(
            "nothing to serve: enable [gateway] or [mailbox] in gatehouse.toml".into(),
        ));
    }

    let store = Arc::new(SqliteStore::open(&config.storage).await?);
    let provider = Arc::new(GeminiProvider::new(&config)?);
    let processor = Arc::new(EmailProcessor::new(
        Arc::clone(&store) as Arc<dyn Directory>,
        Arc::clone(&store) as Arc<dyn GuestStore>,
        Arc::clone(&store) as Arc<dyn AuditLog>,
        provider as Arc<dyn CompletionProvider>,
        config.gemini.model.clone(),
    ));

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received, shutting down");
            signal_cancel.cancel();
        }
    });

    info!(portal = %config.portal.name, "gatehouse starting");

    let mut handles = Vec::new();

    if config.gateway.enabled {
        let gateway_config = config.gateway.clone();
        let gateway_processor = Arc::clone(&processor);
        let gateway_cancel = cancel.clone();
        handles.push(tokio::spawn(async move {
            if let Err(e) = gatehouse_gateway::start_server(
                &gateway_config,
                gateway_processor,
                gateway_cancel.clone(),
            )
            .await
            {
                error!(error = %e, "gateway failed");
                gateway_cancel.cancel();
            }
        }));
    }

    if config.mailbox.enabled {
        let token = config.mailbox.access_token.as_deref().ok_or_else(|| {
            GatehouseError::Config("mailbox.access_token is required to poll".into())
        })?;
        let mailbox = GmailMailbox::new(token)?;
        let poller = MailboxPoller::new(mailbox, Arc::clone(&processor), config.mailbox.clone());
        handles.push(tokio::spawn(poller.run(cancel.clone())));
    }

    for handle in handles {
        let _ = handle.await;
    }

    store.close().await?;
    info!("gatehouse stopped");
    Ok(())
}
