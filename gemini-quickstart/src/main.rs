use std::io;

use gemini_quickstart::{quickstart, Client};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> gemini_quickstart::Result<()> {
    init_logging();
    let client = Client::from_env()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    quickstart::run(&client, &mut out).await
}
