mod common;
mod config;
mod network;
mod storage;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use network::{ApiClient, ApiWorker, Gateway, HttpTransport, ReqwestTransport};
use storage::{ChatCache, SessionStore};
use tokio::sync::mpsc;
use ui::{AppState, TutorApp};

#[derive(Parser)]
#[command(
    name = "tutor_chat",
    version,
    about = "Desktop client for the English tutor chat"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Backend base URL, overrides the config file
    #[arg(long, env = "TUTOR_API_URL", value_name = "URL")]
    api_url: Option<String>,
    /// SQLite file used as local storage, overrides the config file
    #[arg(long, value_name = "FILE")]
    storage: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    if let Some(api_url) = cli.api_url {
        app_config.api_base_url = api_url;
    }
    if let Some(storage) = cli.storage {
        app_config.storage_path = storage;
    }

    let store = match storage::open_local_store(&app_config.storage_path) {
        Ok(store) => store,
        Err(err) => {
            log::error!("Local storage unavailable: {err}");
            return Ok(());
        }
    };
    let session = SessionStore::new(store.clone());
    let cache = ChatCache::new(store);

    let transport: Arc<dyn HttpTransport> =
        match ReqwestTransport::new(&app_config.api_base_url, app_config.request_timeout()) {
            Ok(transport) => Arc::new(transport),
            Err(err) => {
                log::error!("{err}");
                return Ok(());
            }
        };

    // UI -> Network
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let gateway = Gateway::new(transport, session.clone(), event_tx.clone());
    let worker = ApiWorker::new(ApiClient::new(gateway), event_tx, cmd_rx);
    tokio::spawn(worker.run());

    log::info!("Tutor backend at {}", app_config.api_base_url);

    let state = AppState::new(session, cache, app_config.scroll_threshold_px);
    let options = eframe::NativeOptions::default();
    let mut startup = Some((state, event_rx));

    eframe::run_native(
        "Tutor Chat",
        options,
        Box::new(move |cc| {
            let (state, event_receiver) = startup
                .take()
                .expect("TutorApp should only be initialized once");

            Ok(Box::new(TutorApp::new(cc, state, cmd_tx.clone(), event_receiver)))
        }),
    )
}
