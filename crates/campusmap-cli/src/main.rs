use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campusmap_lib::{
    require_token, CampusMap, Category, FileSession, HttpDirectory, LocationCandidate, Position,
    SessionProvider, SessionToken,
};

mod auth;

/// Env override for the session token directory. Lets tests and scripted
/// use avoid touching the real user config directory.
const CONFIG_DIR_ENV: &str = "CAMPUSMAP_CONFIG_DIR";

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus map client")]
struct Cli {
    /// Base URL of the campus map API.
    #[arg(long, env = "CAMPUSMAP_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account on the backend.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and cache the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the cached session token.
    Logout,
    /// Map operations (require a session).
    #[command(subcommand)]
    Map(MapCommand),
}

#[derive(Subcommand, Debug)]
enum MapCommand {
    /// List known locations and the derived route graph.
    Show,
    /// Add a location at the given canvas coordinate.
    Add {
        /// Location name (unique, case-insensitively).
        #[arg(long)]
        name: String,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        /// One of: building, library, cafeteria, gym, hostel.
        #[arg(long)]
        category: String,
    },
    /// Print the connection between two named locations.
    Route {
        /// Starting location name.
        #[arg(long)]
        from: String,
        /// Destination location name.
        #[arg(long)]
        to: String,
    },
    /// Look up a location by name (case-insensitive).
    Find { name: String },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Signup {
            name,
            email,
            password,
        } => handle_signup(&cli.api_url, &name, &email, &password),
        Command::Login { email, password } => handle_login(&cli.api_url, &email, &password),
        Command::Logout => handle_logout(),
        Command::Map(command) => handle_map(&cli.api_url, command),
    }
}

fn handle_signup(api_url: &str, name: &str, email: &str, password: &str) -> Result<()> {
    auth::register(api_url, name, email, password)?;
    println!("Account created. Log in with `campusmap-cli login`.");
    Ok(())
}

fn handle_login(api_url: &str, email: &str, password: &str) -> Result<()> {
    let token = auth::login(api_url, email, password)?;
    open_session()?
        .store(&token)
        .context("failed to cache the session token")?;
    println!("Logged in.");
    Ok(())
}

fn handle_logout() -> Result<()> {
    let mut session = open_session()?;
    session.clear();
    println!("Logged out.");
    Ok(())
}

/// Map command with its inputs fully parsed. Building this up front keeps
/// an invalid category from costing a credential check or a network call.
#[derive(Debug)]
enum MapAction {
    Show,
    Add(LocationCandidate),
    Route { from: String, to: String },
    Find { name: String },
}

impl TryFrom<MapCommand> for MapAction {
    type Error = anyhow::Error;

    fn try_from(command: MapCommand) -> Result<Self> {
        Ok(match command {
            MapCommand::Show => MapAction::Show,
            MapCommand::Add {
                name,
                x,
                y,
                category,
            } => {
                let category = category.parse::<Category>()?;
                MapAction::Add(LocationCandidate::new(name, Position::new(x, y), category))
            }
            MapCommand::Route { from, to } => MapAction::Route { from, to },
            MapCommand::Find { name } => MapAction::Find { name },
        })
    }
}

fn handle_map(api_url: &str, command: MapCommand) -> Result<()> {
    let action = MapAction::try_from(command)?;

    let session = open_session()?;
    let token =
        require_token(&session).context("no active session; run `campusmap-cli login` first")?;

    let directory = HttpDirectory::new(api_url)?;
    let mut map = CampusMap::new();
    map.refresh(&directory, &token)
        .context("failed to fetch the location directory")?;

    match action {
        MapAction::Show => handle_show(&map),
        MapAction::Add(candidate) => handle_add(&mut map, &directory, &token, candidate),
        MapAction::Route { from, to } => handle_route(&map, &from, &to),
        MapAction::Find { name } => handle_find(&map, &name),
    }
}

fn handle_show(map: &CampusMap) -> Result<()> {
    println!("Locations ({}):", map.locations().len());
    for location in map.locations() {
        println!(
            "- {} [{}] at ({}, {}) ({})",
            location.name, location.category, location.position.x, location.position.y, location.id
        );
    }

    println!("Routes ({}):", map.routes().len());
    for route in map.routes() {
        println!(
            "- #{} {} <-> {} ({:.1} units)",
            route.id,
            route.from,
            route.to,
            route.path.length()
        );
    }
    Ok(())
}

fn handle_add(
    map: &mut CampusMap,
    directory: &HttpDirectory,
    token: &SessionToken,
    candidate: LocationCandidate,
) -> Result<()> {
    let record = map.add_location(candidate, directory, token)?;
    println!(
        "Added {} [{}] at ({}, {}) with id {}",
        record.name, record.category, record.position.x, record.position.y, record.id
    );
    Ok(())
}

fn handle_route(map: &CampusMap, from: &str, to: &str) -> Result<()> {
    let start = map
        .find_location_by_name(from)
        .with_context(|| format!("unknown location: {from}"))?;
    let goal = map
        .find_location_by_name(to)
        .with_context(|| format!("unknown location: {to}"))?;

    match map.find_route_between(&start.id, &goal.id) {
        Some(route) => println!(
            "Route #{} connects {} and {} ({:.1} units)",
            route.id,
            start.name,
            goal.name,
            route.path.length()
        ),
        None => println!("No route between {} and {}", start.name, goal.name),
    }
    Ok(())
}

fn handle_find(map: &CampusMap, name: &str) -> Result<()> {
    match map.find_location_by_name(name) {
        Some(location) => println!(
            "Location found: {} [{}] at ({}, {})",
            location.name, location.category, location.position.x, location.position.y
        ),
        None => println!("Location not found"),
    }
    Ok(())
}

fn open_session() -> Result<FileSession> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Ok(FileSession::at(Path::new(&dir)));
    }
    FileSession::open().context("failed to resolve the session store")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
