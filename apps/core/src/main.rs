// Respona V1 Gateway Entry Point
// Headless debug shell around the supervisor actor.

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{error, info};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use respona_core::actors::SupervisorHandle;
use respona_core::config::GatewayConfig;
use respona_core::models::GatewayRequest;
use respona_core::pipeline::QualityAnalyzer;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("respona-core".into(), std::io::stderr);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = GatewayConfig::from_env().context("loading gateway configuration")?;
    info!(provider = %config.provider_url, "starting gateway");

    let supervisor = SupervisorHandle::new(config);
    let quality = QualityAnalyzer::new();

    // Debug shell: one input per line, formatted response plus quality
    // summary on stdout. The HTTP layer drives the same supervisor handle.
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let input = line?;
        if input.trim().is_empty() {
            print!("> ");
            stdout.flush()?;
            continue;
        }

        let request = GatewayRequest {
            client_id: "repl".to_string(),
            input,
            context: None,
        };
        match supervisor.process_request(request).await {
            Ok(response) => {
                let report = quality.analyze(&response.content, response.content_type, None);
                println!("{}", response.content);
                println!(
                    "[{} | {} | score {:.2}]",
                    response.model,
                    response.content_type,
                    report.overall_score
                );
            }
            Err(e) => {
                error!("request failed: {}", e);
                println!("error: {}", e);
            }
        }

        print!("> ");
        stdout.flush()?;
    }

    Ok(())
}
