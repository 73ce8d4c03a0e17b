use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use eloelo_client::{
    connect_ui_stream, load_settings, ClientEvent, ClientSettings, CommandTransport,
    HttpCommandTransport, ViewStore,
};
use eloelo_shared::{
    domain::{GameId, PlayerId, Side, WinScale},
    duration::{parse_duration_string, serialize_duration_seconds},
    protocol::{FinishMatch, UiCommand},
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod options;
mod render;

#[derive(Parser, Debug)]
#[command(name = "eloelo", about = "Operator console for an EloElo backend")]
struct Cli {
    /// Backend base url, e.g. http://127.0.0.1:3000/ui/
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the backend to publish a fresh snapshot.
    InitializeUi,
    ChangeGame {
        id: String,
    },
    RefreshElo,
    StartMatch,
    ShuffleTeams,
    /// Report a match result. Without --winner the running match is cancelled.
    FinishMatch {
        #[arg(long)]
        winner: Option<Side>,
        #[arg(long, default_value = "even")]
        scale: WinScale,
        #[arg(long, default_value = "45m")]
        duration: String,
        #[arg(long)]
        fake: bool,
    },
    AddNewPlayer {
        name: String,
        #[arg(long)]
        discord_username: Option<String>,
    },
    RemovePlayer {
        id: String,
    },
    AddPlayerToTeam {
        id: String,
        team: Side,
    },
    RemovePlayerFromTeam {
        id: String,
    },
    MovePlayerToOtherTeam {
        id: String,
    },
    PresentInLobbyChange {
        id: String,
        #[arg(action = ArgAction::Set)]
        present: bool,
    },
    CallPlayer {
        id: String,
    },
    CallToLobby,
    ClearLobby,
    FillLobby,
    /// Edit backend settings, e.g. `--set elo.pityBonusFactor=0.9`.
    Options {
        #[arg(long = "set", value_name = "GROUP.KEY=VALUE", required = true)]
        assignments: Vec<String>,
    },
    /// Follow the ui stream and print every snapshot until Ctrl-C.
    Watch,
}

impl Command {
    /// One-shot commands. `Options` and `Watch` need the stream and are
    /// handled separately.
    fn into_ui_command(self) -> Result<Option<UiCommand>> {
        let command = match self {
            Command::InitializeUi => UiCommand::InitializeUi,
            Command::ChangeGame { id } => UiCommand::ChangeGame { id: GameId::from(id) },
            Command::RefreshElo => UiCommand::RefreshElo,
            Command::StartMatch => UiCommand::StartMatch,
            Command::ShuffleTeams => UiCommand::ShuffleTeams,
            Command::FinishMatch {
                winner: None, ..
            } => UiCommand::FinishMatch(FinishMatch::Cancelled),
            Command::FinishMatch {
                winner: Some(winner),
                scale,
                duration,
                fake,
            } => {
                let seconds = parse_duration_string(&duration)
                    .with_context(|| format!("invalid match duration {duration:?}"))?;
                UiCommand::FinishMatch(FinishMatch::Finished {
                    winner,
                    scale,
                    duration: serialize_duration_seconds(seconds),
                    fake,
                })
            }
            Command::AddNewPlayer {
                name,
                discord_username,
            } => {
                let name = name.trim();
                anyhow::ensure!(!name.is_empty(), "player name must not be empty");
                UiCommand::AddNewPlayer {
                    name: name.to_string(),
                    discord_username,
                }
            }
            Command::RemovePlayer { id } => UiCommand::RemovePlayer { id: PlayerId::from(id) },
            Command::AddPlayerToTeam { id, team } => UiCommand::AddPlayerToTeam {
                id: PlayerId::from(id),
                team,
            },
            Command::RemovePlayerFromTeam { id } => UiCommand::RemovePlayerFromTeam {
                id: PlayerId::from(id),
            },
            Command::MovePlayerToOtherTeam { id } => UiCommand::MovePlayerToOtherTeam {
                id: PlayerId::from(id),
            },
            Command::PresentInLobbyChange { id, present } => UiCommand::PresentInLobbyChange {
                id: PlayerId::from(id),
                present,
            },
            Command::CallPlayer { id } => UiCommand::CallPlayer { id: PlayerId::from(id) },
            Command::CallToLobby => UiCommand::CallToLobby,
            Command::ClearLobby => UiCommand::ClearLobby,
            Command::FillLobby => UiCommand::FillLobby,
            Command::Options { .. } | Command::Watch => return Ok(None),
        };
        Ok(Some(command))
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn send(settings: &ClientSettings, command: &UiCommand) -> Result<()> {
    let transport = HttpCommandTransport::from_settings(settings)?;
    transport
        .invoke(command)
        .await
        .with_context(|| format!("failed to send {}", command.name()))?;
    println!("sent {}", command.name());
    Ok(())
}

async fn watch(settings: &ClientSettings) -> Result<()> {
    let base_url = settings.base_url()?;
    let (events, mut rx) = broadcast::channel(64);
    let subscription = connect_ui_stream(&base_url, events).await?;
    HttpCommandTransport::from_settings(settings)?
        .invoke(&UiCommand::InitializeUi)
        .await?;

    let mut store = ViewStore::new();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, closing ui stream");
                break;
            }
            event = rx.recv() => match event {
                Ok(event) => {
                    let printable = match &event {
                        ClientEvent::Error(message) => {
                            eprintln!("stream error: {message}");
                            None
                        }
                        ClientEvent::UiState(_) => Some(true),
                        ClientEvent::DiscordInfo(_) | ClientEvent::Avatars(_) => Some(false),
                    };
                    store.apply(event);
                    match printable {
                        Some(true) => println!("{}\n", render::render_snapshot(store.state(), store.avatars())),
                        Some(false) => println!("{}", render::render_discord_summary(store.discord_info(), store.avatars())),
                        None => {}
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "ui stream consumer lagged"),
                Err(RecvError::Closed) => {
                    info!("ui stream ended");
                    break;
                }
            }
        }
    }
    subscription.close();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings().with_server_url_override(cli.server_url.clone());
    init_tracing(&settings.log_filter);
    info!(server_url = %settings.server_url, "eloelo operator console");

    match cli.command {
        Command::Watch => watch(&settings).await,
        Command::Options { assignments } => options::update_options(&settings, &assignments).await,
        other => match other.into_ui_command()? {
            Some(command) => send(&settings, &command).await,
            None => Ok(()),
        },
    }
}
