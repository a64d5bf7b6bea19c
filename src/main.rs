use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use faq_chat::app::ViewLayout;
use faq_chat::handler::Dispatcher;
use faq_chat::{logging, tui, ui};
use faq_chat::{App, ChatClient, Config, Variant};

#[derive(Parser)]
#[command(name = "faq-chat")]
#[command(version)]
#[command(about = "Terminal FAQ chatbot that talks to a /chat backend")]
struct Cli {
    /// Full URL of the chat endpoint
    #[arg(long, env = "FAQ_CHAT_ENDPOINT")]
    endpoint: Option<String>,

    /// Run the classic widget: no autoscroll, loading state, dark mode or autofocus
    #[arg(long)]
    classic: bool,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    /// Give up on a request after this many seconds (default: no limit)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Where to write the log
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save the effective settings to the config file before starting
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    fn overrides(&self) -> Config {
        Config {
            endpoint: self.endpoint.clone(),
            variant: self.classic.then_some(Variant::Classic),
            dark_mode: self.dark.then_some(true),
            request_timeout_secs: self.timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = logging::init(cli.log_file.clone())?;

    let file_config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load config, using defaults");
        Config::new()
    });
    let config = file_config.merged(cli.overrides());
    if cli.save_config {
        config.save()?;
    }

    let endpoint = config.endpoint();
    let client = ChatClient::with_timeout(&endpoint, config.request_timeout())?;
    tracing::info!(
        %endpoint,
        variant = ?config.variant(),
        log = %log_path.display(),
        "starting faq-chat"
    );

    let app = App::new(config.variant(), config.dark_mode());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, app, client).await;
    tui::restore()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "faq-chat exited with an error");
    }
    result
}

async fn run(terminal: &mut tui::Tui, mut app: App, client: ChatClient) -> Result<()> {
    let mut events = tui::EventHandler::new();
    // Dropping the dispatcher aborts any request still in flight
    let mut dispatcher = Dispatcher::new(client, events.sender());

    while !app.should_quit {
        let mut layout = ViewLayout::default();
        terminal.draw(|frame| layout = ui::render(&app, frame))?;
        app.set_layout(layout);

        let Some(event) = events.next().await else {
            break;
        };
        dispatcher.dispatch(&mut app, event);
    }

    Ok(())
}
