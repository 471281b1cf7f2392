//! teclado: run one shortcut-interception pass against the local
//! browser.
//!
//! No flags; the run is fully determined by [`tecla::HarnessConfig`]
//! defaults. Per-case outcomes stream to stdout as JSON lines, the full
//! array follows at the end, and a
//! `results_<browser>_<version>_<platform>.json` file lands in the
//! working directory.

use std::process::ExitCode;
use std::sync::Arc;
use tecla::{
    CdpDriver, EnigoInput, Harness, HarnessConfig, SignalMailbox, StaticServer, SystemFocusOracle,
    TeclaResult,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tecla=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn run() -> TeclaResult<()> {
    let config = HarnessConfig::new();

    let server = StaticServer::start(config.port, config.public_dir.clone()).await?;
    tracing::info!(url = %config.url, "running");

    let mailbox = Arc::new(SignalMailbox::new());
    let driver = CdpDriver::launch(&config, mailbox.clone()).await?;
    let input = EnigoInput::new()?;

    let harness = Harness::new(driver, input, SystemFocusOracle::new(), mailbox, config);
    let result = harness.run().await;

    server.shutdown();
    result.map(|_| ())
}
