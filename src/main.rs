use std::net::{IpAddr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;

use sqldesk::kernel::services::adapters::{load_settings, CompletionConfig, HttpCompletionService};
use sqldesk::server::{self, ServerState};

mod logging;

fn main() -> ExitCode {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    let log_guard = logging::init();
    let settings = load_settings();

    let host: IpAddr = match settings.server.host.parse() {
        Ok(host) => host,
        Err(e) => {
            tracing::error!(error = %e, host = %settings.server.host, "invalid server host");
            eprintln!("invalid server host {:?}: {}", settings.server.host, e);
            return ExitCode::FAILURE;
        }
    };
    let addr = SocketAddr::new(host, settings.server.port);
    tracing::info!(
        addr = %addr,
        log_dir = ?log_guard.as_ref().map(|guard| guard.log_dir()),
        "starting sqldesk"
    );

    let config = CompletionConfig::from_settings(&settings.assistant);
    if config.api_key.is_none() {
        tracing::warn!(
            var = %config.api_key_env,
            "no API key set; assistant replies will use fallbacks"
        );
    }
    let completion = Arc::new(HttpCompletionService::new(config));
    let state = ServerState::new(completion, settings.assistant.temperature);

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "failed to create tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(server::serve(addr, state, async {
        let _ = tokio::signal::ctrl_c().await;
    }));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "http server failed");
            eprintln!("failed to serve on {}: {}", addr, e);
            ExitCode::FAILURE
        }
    }
}
