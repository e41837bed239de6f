use primitives::LogSettings;
use thiserror::Error;
use tracing_subscriber::{
    fmt::MakeWriter,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

const DEFAULT_LOG_DIRECTIVES: &str = "info";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to initialize: {0}")]
    Init(#[from] TryInitError),
}

type Result<T> = std::result::Result<T, TelemetryError>;

#[derive(Debug)]
pub struct TelemetrySubscriber {}

impl TelemetrySubscriber {
    /// Installs the global subscriber. Log levels follow `RUST_LOG`, falling
    /// back to `info`.
    pub fn init<W>(out: W) -> Result<()>
    where
        W: for<'s> MakeWriter<'s> + 'static + Sync + Send,
    {
        let settings = LogSettings::from_env();
        let annotate = settings.annotate_source;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES));

        if settings.pretty {
            let sub = tracing_subscriber::fmt()
                .with_writer(out)
                .with_env_filter(filter)
                .with_file(annotate)
                .with_line_number(annotate)
                .with_target(annotate)
                .compact()
                .finish();

            sub.try_init()?;
        } else {
            let sub = tracing_subscriber::fmt()
                .with_writer(out)
                .with_env_filter(filter)
                .with_file(annotate)
                .with_line_number(annotate)
                .json()
                .with_current_span(false)
                .flatten_event(true)
                .with_span_list(false)
                .finish();

            sub.try_init()?;
        }

        Ok(())
    }
}
