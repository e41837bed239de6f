use telemetry::custom_subscriber::TelemetrySubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for command output
    TelemetrySubscriber::init(std::io::stderr)?;

    cli::run().await?;

    Ok(())
}
