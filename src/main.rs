use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hero_tour::config::ClientConfig;
use hero_tour::messages::MessageLog;
use hero_tour::models::Hero;
use hero_tour::nav::{Location, Route, RouteParams};
use hero_tour::service::HeroService;
use hero_tour::views::{DashboardView, HeroDetailView, HeroSearchView, HeroesView};
use hero_tour::{api, db};

#[derive(Parser)]
#[command(name = "heroes")]
#[command(about = "Manage the hero roster")]
struct Cli {
    /// Backend base URL (overrides HERO_TOUR_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the in-memory hero backend
    Serve {
        /// Port for the HTTP API
        #[arg(short, long, default_value = "17020")]
        port: u16,

        /// SQLite file to use instead of the default data directory
        #[arg(long, conflicts_with = "memory")]
        db: Option<PathBuf>,

        /// Keep heroes in memory only
        #[arg(long)]
        memory: bool,
    },
    #[command(flatten)]
    Client(ClientCommands),
}

#[derive(Subcommand)]
enum ClientCommands {
    /// List every hero
    List,
    /// Show the featured heroes
    Top,
    /// Show one hero
    Show { id: String },
    /// Search heroes by name
    Search { term: String },
    /// Add a hero
    Add { name: String },
    /// Rename a hero and save it
    Rename { id: String, name: String },
    /// Delete a hero
    Delete { id: i64 },
}

/// Initialize tracing with output to stderr (client commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "hero_tour=info,tower_http=info".into()),
    );

    if use_stderr {
        // Client commands print results on stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, Commands::Serve { .. });
    init_tracing(use_stderr);

    match cli.command {
        Commands::Serve { port, db, memory } => serve(port, db, memory).await,
        Commands::Client(command) => run_client(command, cli.url).await,
    }
}

async fn run_client(command: ClientCommands, url: Option<String>) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = url {
        config.base_url = url;
    }
    let messages = MessageLog::new();
    let service = HeroService::new(&config, messages.clone());
    let location = Location::new();

    match command {
        ClientCommands::List => {
            location.go(Route::Heroes.path());
            let mut view = HeroesView::new(service);
            view.activate();
            view.settle().await;
            print_heroes(&view.heroes());
        }
        ClientCommands::Top => {
            location.go(Route::Dashboard.path());
            let mut view = DashboardView::new(service);
            view.activate();
            view.settle().await;
            print_heroes(&view.top_heroes());
        }
        ClientCommands::Show { id } => {
            let mut view = open_detail(service, &location, &id);
            view.activate();
            view.settle().await;
            match view.hero() {
                Some(hero) => print_heroes(&[hero]),
                None => println!("Hero {id} could not be loaded"),
            }
        }
        ClientCommands::Search { term } => {
            let mut view = HeroSearchView::new(service, config.search_debounce);
            view.search(term);
            view.settle().await;
            print_heroes(&view.results());
        }
        ClientCommands::Add { name } => {
            location.go(Route::Heroes.path());
            let mut view = HeroesView::new(service);
            view.activate();
            view.settle().await;
            if !view.add(&name) {
                println!("A hero needs a name");
            }
            view.settle().await;
            print_heroes(&view.heroes());
        }
        ClientCommands::Rename { id, name } => {
            location.go(Route::Heroes.path());
            let mut view = open_detail(service, &location, &id);
            view.activate();
            view.settle().await;
            view.set_name(name);
            if view.save() {
                view.settle().await;
            } else {
                println!("Hero {id} could not be loaded");
            }
            if let Some(path) = location.path() {
                println!("Now at {path}");
            }
        }
        ClientCommands::Delete { id } => {
            location.go(Route::Heroes.path());
            let mut view = HeroesView::new(service);
            view.activate();
            view.settle().await;
            match view.heroes().into_iter().find(|h| h.id == Some(id)) {
                Some(hero) => {
                    view.delete(&hero);
                    view.settle().await;
                }
                None => println!("No hero with id {id}"),
            }
            print_heroes(&view.heroes());
        }
    }

    print_messages(&messages);
    Ok(())
}

async fn serve(port: u16, path: Option<PathBuf>, memory: bool) -> anyhow::Result<()> {
    let db = match (path, memory) {
        (_, true) => db::Database::open_memory()?,
        (Some(path), false) => db::Database::open(path)?,
        (None, false) => db::Database::open_default()?,
    };
    db.migrate()?;
    db.seed_mock_heroes()?;

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Hero backend listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn open_detail(service: HeroService, location: &Location, id: &str) -> HeroDetailView {
    let params = RouteParams::new().with("id", id);
    location.go(Route::Detail(params.clone()).path());
    HeroDetailView::new(service, params, location.clone())
}

fn print_heroes(heroes: &[Hero]) {
    for hero in heroes {
        match hero.id {
            Some(id) => println!("{id:>4}  {}", hero.name),
            None => println!("   -  {}", hero.name),
        }
    }
}

fn print_messages(messages: &MessageLog) {
    if messages.is_empty() {
        return;
    }
    println!();
    println!("Messages");
    for message in messages.messages() {
        println!("  {message}");
    }
}
