//! Bedrock transport assembly
//!
//! Handles AWS client initialization and wires the ConverseStream call to
//! its invoke-model fallback.

use super::converse::ConverseStreamCall;
use super::invoke::InvokeModelTransport;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use sealion_application::FallbackTransport;
use sealion_domain::ChatConfig;
use std::sync::Arc;
use tracing::info;

/// ConverseStream with an InvokeModelWithResponseStream fallback.
pub type BedrockTransport = FallbackTransport<ConverseStreamCall, InvokeModelTransport>;

/// Create the Bedrock transport for the configured region and endpoint.
///
/// Credentials come from the default AWS provider chain.
pub async fn connect(config: &ChatConfig) -> BedrockTransport {
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;
    let client = Arc::new(BedrockClient::new(&aws_config));

    info!(region = %config.region, "Bedrock client initialized");

    FallbackTransport::new(
        ConverseStreamCall::new(client.clone(), &config.endpoint_id, config.inference),
        InvokeModelTransport::new(client, &config.endpoint_id, config.inference),
    )
}
