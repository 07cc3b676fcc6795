//! CLI command definitions

use clap::Parser;
use sealion_domain::TransportKind;

/// CLI arguments for sealion-chat
#[derive(Parser, Debug)]
#[command(name = "sealion-chat")]
#[command(author, version, about = "Streaming chat with SEA-LION models imported into AWS Bedrock")]
#[command(long_about = r#"
Sealion Chat relays your messages to an imported SEA-LION model and streams
the reply back as it is generated.

By default the Bedrock runtime API is used (ConverseStream, falling back to
InvokeModelWithResponseStream for models without Converse support).
With --api, an OpenAI-compatible chat-completions gateway is used instead.

Configuration is read from (in priority order):
1. Environment variables: AWS_REGION, ENDPOINT_ARN, API_URL,
   MAX_TOKENS, TEMPERATURE, TOP_K
2. ./sealion.toml       Project-level config
3. Built-in defaults

Type /bye (or an empty line) to end the session.

Example:
  ENDPOINT_ARN=arn:aws:bedrock:... API_URL=https://gateway/api/v1 sealion-chat
  sealion-chat --api
"#)]
pub struct Cli {
    /// Use the OpenAI-compatible chat-completions API instead of Bedrock
    #[arg(long)]
    pub api: bool,
}

impl Cli {
    pub fn transport_kind(&self) -> TransportKind {
        TransportKind::from_api_flag(self.api)
    }
}
