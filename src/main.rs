// Entrypoint for the CLI application.
// - Keeps `main` small: resolve config, build the API client and hand both
//   to the read loop.
// - Logs go to stderr so the report on stdout stays readable.

use std::io::IsTerminal;

use headline_topics::{
    api::ApiClient,
    config::Config,
    ui::{self, LineReader, TerminalPrompt},
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("headline_topics=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let api = ApiClient::new(&config)?;
    let mut stdout = std::io::stdout().lock();

    // Use the dialoguer prompt for a person at a terminal, plain line reads
    // when input is piped in.
    if std::io::stdin().is_terminal() {
        ui::run(&api, &config.topics, &mut TerminalPrompt, &mut stdout)?;
    } else {
        let mut reader = LineReader::new(std::io::stdin().lock());
        ui::run(&api, &config.topics, &mut reader, &mut stdout)?;
    }
    Ok(())
}
