//! FEEDWALK CLI
//!
//! Walks an Event Store stream in causal order from the command line.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use feedwalk_core::{FeedConfig, StreamId};
use feedwalk_http::HttpFeedClient;
use feedwalk_log::{EventCursor, EventSource, EventStream, FeedSource};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feedwalk")]
#[command(about = "FEEDWALK - walk Event Store streams oldest first", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every event currently in the stream, then exit
    Read {
        #[command(flatten)]
        feed: FeedArgs,
    },
    /// Print events as they are appended
    Follow {
        #[command(flatten)]
        feed: FeedArgs,
        /// Delay between polls in milliseconds
        #[arg(long)]
        poll_ms: Option<u64>,
        /// Stop after this many events
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Args)]
struct FeedArgs {
    /// Stream to read
    #[arg(short, long)]
    stream: String,
    /// Sequence number of the first event
    #[arg(short, long, default_value_t = 0)]
    from: u64,
    /// Entries per feed page
    #[arg(short, long)]
    page_size: Option<usize>,
    /// Base URL of the server
    #[arg(short, long)]
    base_url: Option<String>,
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Request timeout in milliseconds (0 disables)
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Download and print each event body
    #[arg(long)]
    bodies: bool,
}

impl FeedArgs {
    /// Configuration file values with command-line overrides applied
    fn config(&self) -> Result<FeedConfig> {
        let mut config = match &self.config {
            Some(path) => FeedConfig::from_json_file(path)?,
            None => FeedConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Write one line per event, stopping at the end of the known log, or with
/// `poll` set, waiting for new events until `limit` is reached.
fn walk<S, W>(
    cursor: EventCursor<S>,
    out: &mut W,
    bodies: bool,
    poll: Option<Duration>,
    limit: Option<usize>,
) -> Result<usize>
where
    S: FeedSource + EventSource + Clone,
    W: Write,
{
    let mut events = EventStream::new(cursor);
    let mut written = 0;

    while limit.is_none_or(|limit| written < limit) {
        let position = match poll {
            Some(interval) => events.wait_next(interval)?,
            None => match events.next() {
                Some(position) => position?,
                None => break,
            },
        };
        writeln!(out, "{}", render(&position, bodies)?)?;
        written += 1;
    }

    tracing::info!(written, "done");
    Ok(written)
}

fn render<S: EventSource>(position: &EventCursor<S>, bodies: bool) -> Result<String> {
    let mut line = match position.entry().and_then(|e| e.title.as_deref()) {
        Some(title) => format!("{}\t{}", title, position.event_url()),
        None => position.event_url().to_string(),
    };
    if bodies {
        let body = position.download_event()?;
        line.push('\t');
        line.push_str(&String::from_utf8_lossy(&body));
    }
    Ok(line)
}

fn open(feed: &FeedArgs) -> Result<(EventCursor<HttpFeedClient>, FeedConfig)> {
    let config = feed.config()?;
    let stream = StreamId::new(feed.stream.as_str())?;
    let client = HttpFeedClient::new(&config)?;
    let cursor = EventCursor::open(client, &config.endpoint()?, &stream, feed.from, config.page_size)?;
    Ok((cursor, config))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feedwalk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Read { feed } => {
            let (cursor, _) = open(&feed)?;
            walk(cursor, &mut out, feed.bodies, None, None)?;
            Ok(())
        }
        Commands::Follow { feed, poll_ms, limit } => {
            let (cursor, config) = open(&feed)?;
            let poll = poll_ms.map_or_else(|| config.poll_interval(), Duration::from_millis);
            walk(cursor, &mut out, feed.bodies, Some(poll), limit)?;
            Ok(())
        }
    }
}
