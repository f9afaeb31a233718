//! Heroes CLI - composition root binary.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use heroes_client::infrastructure::{
    clock::SystemClock, http_transport::HttpTransport, in_memory_transport::InMemoryTransport,
    message_log::InMemoryMessageLog,
};
use heroes_client::{Backend, ClientConfig, Hero, HeroId, HeroService, NewHero, TransportPort};

/// Query and edit heroes through the hero API
#[derive(Debug, Parser)]
#[command(name = "heroes", version)]
struct Cli {
    /// Transport backend (overrides HEROES_BACKEND)
    #[arg(long, global = true)]
    backend: Option<Backend>,

    /// Hero collection URL (overrides HEROES_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all heroes
    List,
    /// Show a single hero
    Get { id: HeroId },
    /// Create a hero; the store assigns the id
    Add { name: String },
    /// Rename an existing hero
    Update { id: HeroId, name: String },
    /// Delete a hero
    Delete { id: HeroId },
    /// Search heroes by name
    Search { term: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heroes_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?.with_overrides(cli.backend, cli.base_url)?;
    tracing::debug!(backend = %config.backend, api_url = %config.api_url, "configuration loaded");

    let transport: Arc<dyn TransportPort> = match config.backend {
        Backend::Http => Arc::new(HttpTransport::new(&config.api_url)),
        Backend::Memory => Arc::new(InMemoryTransport::seeded()),
    };
    let messages = Arc::new(InMemoryMessageLog::new(Arc::new(SystemClock::new())));
    let heroes = HeroService::new(transport, messages.clone());

    match cli.command {
        Command::List => print_heroes(&heroes.get_heroes().await),
        Command::Get { id } => {
            if let Some(hero) = heroes.get_hero(id).await {
                print_heroes(&[hero]);
            }
        }
        Command::Add { name } => {
            if let Some(hero) = heroes.add_hero(&NewHero::new(name)).await {
                print_heroes(&[hero]);
            }
        }
        Command::Update { id, name } => {
            heroes.update_hero(&Hero::new(id, name)).await;
        }
        Command::Delete { id } => {
            heroes.delete_hero(id).await;
        }
        Command::Search { term } => print_heroes(&heroes.search_heroes(&term).await),
    }

    println!();
    println!("Messages:");
    for entry in messages.messages() {
        println!("  [{}] {}", entry.at.format("%H:%M:%S"), entry.text);
    }

    Ok(())
}

fn print_heroes(heroes: &[Hero]) {
    for hero in heroes {
        println!("{:>4}  {}", hero.id.value(), hero.name);
    }
}

fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
