//! Terminal front end for a mudengine world.
//!
//! Several players can share one console. Input runs as the current
//! player; `@name` switches to that player (creating them on first use)
//! and `@name <command>` switches and runs the command. Notices are shown
//! to every local player they reach, prefixed with that player's name.
//!
//! ```text
//! mud-console --config demos/console/config.toml --role builder
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mudengine::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mud-console")]
#[command(about = "Explore a mudengine world from the terminal")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// World seed (JSON); overrides `world.seed_path`
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Name of the first player
    #[arg(short, long, default_value = "Wanderer")]
    name: String,

    /// Roles given to every console player, comma separated
    #[arg(short, long, value_delimiter = ',')]
    role: Vec<String>,
}

/// Local players, keyed by lowercase name.
struct Console {
    engine: Engine<MemoryStore>,
    roles: Vec<String>,
    players: BTreeMap<String, Actor>,
    current: String,
    next_id: u64,
}

impl Console {
    fn new(engine: Engine<MemoryStore>, roles: Vec<String>) -> Self {
        Self {
            engine,
            roles,
            players: BTreeMap::new(),
            current: String::new(),
            next_id: 0,
        }
    }

    /// Makes `name` the current player, entering them if they are new.
    async fn switch_to(&mut self, name: &str) -> Result<(), MudError> {
        let key = name.to_lowercase();
        if !self.players.contains_key(&key) {
            self.next_id += 1;
            let id = PlayerId::new(format!("console-{}", self.next_id));
            let mut actor = self.engine.actor(id, name, self.roles.as_slice())?;
            let outcome = self.engine.enter(&mut actor).await?;
            self.players.insert(key.clone(), actor);
            self.show(&outcome);
        }
        self.current = key;
        Ok(())
    }

    async fn run(&mut self, input: &str) {
        let Some(actor) = self.players.get_mut(&self.current) else {
            return;
        };
        let outcome = self.engine.execute(actor, input).await;
        self.show(&outcome);
        if outcome.quit {
            self.drop_current().await;
        }
    }

    async fn drop_current(&mut self) {
        if let Some(actor) = self.players.remove(&self.current) {
            let outcome = self.engine.leave(&actor.id).await;
            self.show(&outcome);
        }
        self.current = self.players.keys().next().cloned().unwrap_or_default();
    }

    async fn shutdown(&mut self) {
        while !self.players.is_empty() {
            self.drop_current().await;
        }
    }

    fn show(&self, outcome: &Outcome) {
        print!("{}", outcome.reply);
        for (audience, text) in &outcome.notices {
            for actor in self.players.values() {
                if audience.reaches(&actor.id, &actor.current_room) {
                    println!("[{}] {text}", actor.name);
                }
            }
        }
    }

    fn prompt(&self) -> String {
        match self.players.get(&self.current) {
            Some(actor) => format!("{}> ", actor.name),
            None => "> ".to_string(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).await?,
        None => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let seed = match cli.seed.as_ref().or(config.world.seed_path.as_ref()) {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading world seed");
            WorldSeed::load(path).await?
        }
        None => WorldSeed::starter(),
    };
    let store = MemoryStore::from_seed(seed).await?;
    let engine = EngineBuilder::new().config(config).build(Arc::new(store)).await?;

    for degraded in &engine.load_report().degraded {
        tracing::warn!(room_id = %degraded.room_id, reason = %degraded.reason, "room loaded without exits");
    }

    let mut console = Console::new(engine, cli.role);
    console.switch_to(&cli.name).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !console.players.is_empty() {
        print!("{}", console.prompt());
        std::io::stdout().flush()?;

        let Some(input) = lines.next_line().await? else {
            println!();
            break;
        };
        let input = input.trim();

        let Some(rest) = input.strip_prefix('@') else {
            console.run(input).await;
            continue;
        };
        let (name, command) = match rest.split_once(char::is_whitespace) {
            Some((name, command)) => (name, command.trim()),
            None => (rest, ""),
        };
        if name.is_empty() {
            println!("Usage: @<name> [command]");
            continue;
        }
        console.switch_to(name).await?;
        if !command.is_empty() {
            console.run(command).await;
        }
    }

    console.shutdown().await;
    Ok(())
}
