//! Serverless entry point: one proxy event JSON on stdin, one response JSON on stdout.
//! Logs go to stderr.

use qrdrop_api::{handle_event, FunctionEvent, FunctionResponse};
use qrdrop_core::config::log_format_from_lookup;
use qrdrop_core::AppError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    qrdrop_infra::init_telemetry(log_format_from_lookup(&env_lookup))
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    let response = match serde_json::from_str::<FunctionEvent>(&input) {
        Ok(event) => handle_event(event, env_lookup).await,
        Err(e) => {
            let err = AppError::Parse(format!("Invalid function event: {}", e));
            qrdrop_api::error::log_error(&err);
            FunctionResponse::from_error(&err)
        }
    };

    let mut output = serde_json::to_vec(&response)?;
    output.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&output).await?;
    stdout.flush().await?;

    qrdrop_infra::shutdown_telemetry().await;
    Ok(())
}
