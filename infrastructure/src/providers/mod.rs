//! LLM transport adapters
//!
//! Each transport implements [`ChatTransport`]. The set is closed: the
//! binary selects one of them once at startup from [`TransportKind`].

pub mod bedrock;
pub mod openai;

use sealion_application::{ChatTransport, GatewayError};
use sealion_domain::{ChatConfig, TransportKind};
use std::sync::Arc;
use tracing::info;

/// Build the transport selected for this session.
pub async fn build_transport(
    kind: TransportKind,
    config: &ChatConfig,
) -> Result<Arc<dyn ChatTransport>, GatewayError> {
    let transport: Arc<dyn ChatTransport> = match kind {
        TransportKind::Bedrock => Arc::new(bedrock::connect(config).await),
        TransportKind::ChatCompletions => {
            let transport = openai::ChatCompletionsTransport::new(config)?;
            info!(url = %transport.url(), "Using chat-completions API");
            Arc::new(transport)
        }
    };

    info!(transport = transport.name(), "Transport ready");
    Ok(transport)
}
