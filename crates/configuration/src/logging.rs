use crate::settings::{LogFormat, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level`. When `logging.directory` is set, a
/// second, ANSI-free layer writes to a daily rolling file. The returned guard
/// must be held for the life of the process or buffered file logs are lost.
pub fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers: Vec<BoxedLayer> = vec![stdout_layer(config.format)];

    let guard = config.directory.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_timer(LocalTime::rfc_3339())
                .with_writer(writer)
                .boxed(),
        );
        guard
    });

    if let Err(e) = tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
    {
        // A subscriber is already installed (e.g. by a test harness).
        eprintln!("Tracing already initialised: {}", e);
    }

    guard
}

fn stdout_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Full => fmt::layer()
            .with_timer(LocalTime::rfc_3339())
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_timer(LocalTime::rfc_3339())
            .with_target(false)
            .boxed(),
    }
}
