mod config;
mod input;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{DispatchOutcome, HttpCatalogClient, Intent, NavigationController};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::input::{
    adjacent_page, concerns, parse_command, random_pick, Command, InputError, HELP,
};

#[derive(Parser, Debug)]
#[command(name = "movie-browser", about = "Browse a movie catalog from the terminal")]
struct Args {
    /// Base URL of the catalog API, e.g. http://localhost:8080/api
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file (defaults to ./movie_browser.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Probe the API health endpoint and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref())?;
    if let Some(url) = args.api_url {
        settings.api_base_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client = HttpCatalogClient::new(settings.api_config()?)?;
    info!(base_url = %client.config().base_url(), "catalog client ready");

    if args.check {
        let health = client.health().await?;
        if !health.is_ok() {
            bail!("catalog API reports status '{}'", health.status);
        }
        println!("catalog API at {} is healthy", client.config().base_url());
        return Ok(());
    }

    let nav = NavigationController::new(Arc::new(client));
    let mut events = nav.subscribe_events();
    {
        let nav = Arc::clone(&nav);
        tokio::spawn(async move {
            nav.start().await;
        });
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => handle_command(&nav, command).await,
                    Ok(None) => {}
                    Err(err @ InputError::Unknown(_)) => println!("{err}\n{HELP}"),
                    Err(err) => println!("{err}"),
                }
            }
            event = events.recv() => match event {
                Ok(event) => {
                    let state = nav.view_state().await;
                    if concerns(&event, &state) {
                        print_view(&nav).await;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "fell behind on client events");
                    print_view(&nav).await;
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    info!("bye");
    Ok(())
}

async fn print_view(nav: &NavigationController) {
    println!("{}", render::render(&nav.active_view().await));
}

async fn handle_command(nav: &Arc<NavigationController>, command: Command) {
    let intent = match command {
        Command::Open(Some(id)) => Intent::SelectMovie(id),
        Command::Open(None) => match random_pick(&nav.active_view().await) {
            Some(id) => Intent::SelectMovie(id),
            None => {
                println!("usage: open <id>");
                return;
            }
        },
        Command::Random => Intent::RequestRandom,
        Command::Again => Intent::Reroll,
        Command::Back => Intent::Back,
        Command::Page(page) => Intent::ChangePage(page),
        Command::Next | Command::Prev => {
            let forward = command == Command::Next;
            match adjacent_page(&nav.active_view().await, forward) {
                Some(page) => Intent::ChangePage(page),
                None => {
                    println!("no more pages that way");
                    return;
                }
            }
        }
        Command::Sort(sort) => Intent::ChangeSort(sort),
        Command::SortOptions => {
            print!("{}", render::render_sort_options());
            return;
        }
        Command::Refresh => Intent::Refresh,
        Command::Show => {
            print_view(nav).await;
            return;
        }
        Command::Help => {
            println!("{HELP}");
            return;
        }
        Command::Quit => return,
    };

    let nav = Arc::clone(nav);
    tokio::spawn(async move {
        let label = format!("{intent:?}");
        match nav.dispatch(intent).await {
            DispatchOutcome::Ignored => println!("'{label}' does not apply to this view"),
            outcome => debug!(intent = %label, ?outcome, "intent handled"),
        }
    });
}
