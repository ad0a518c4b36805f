use std::fs::File;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use predicta::backend::{ChatBackend, HttpBackend};
use predicta::core::action::Action;
use predicta::core::config::{self, CliOverrides};
use predicta::core::prefs;
use predicta::core::state::App;
use predicta::dispatch::{self, Dispatcher};
use predicta::{speech, tui};

/// How long pending cleanup requests may delay exit.
const EXIT_GRACE: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "predicta", about = "Terminal chat client for the Predicta assistant")]
struct Args {
    /// Server root, e.g. http://localhost:8000
    #[arg(long)]
    base_url: Option<String>,

    /// Conversation to list in the sidebar (repeatable, first is opened)
    #[arg(short, long = "conversation")]
    conversations: Vec<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to predicta.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("predicta.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let config = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            conversations: &args.conversations,
        },
    );
    log::info!("Predicta starting up against {}", config.base_url);

    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::from_config(&config));
    let recognizer = speech::build(&config);

    let seeded = dispatch::fetch_startup(backend.as_ref(), &config.conversations).await;
    log::info!(
        "Resuming {} of {} configured conversation(s)",
        seeded.len(),
        config.conversations.len()
    );

    let (tx, rx) = mpsc::channel();
    // The receiver is alive, so this cannot fail
    let _ = tx.send(Action::Started(seeded));

    let app = App::from_config(&config, prefs::load_prefs(), recognizer.is_supported(), Instant::now());
    let mut dispatcher = Dispatcher::new(backend, recognizer, tx);

    let result = tui::run(app, &mut dispatcher, rx);
    dispatcher.finish(EXIT_GRACE).await;
    log::info!("Predicta shut down");
    result
}
