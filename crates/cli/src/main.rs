use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use movie_data::{EnrichedMovie, MovieId, DEFAULT_IMAGE_BASE_URL};
use server::{BrowserState, MovieBrowser, MovieService, VisibleView};
use tmdb_client::config::{
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_LANGUAGE, IMAGE_BASE_URL_ENV, LANGUAGE_ENV,
};
use tmdb_client::TmdbConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Movie Browser - popular movies, search, and recommendations
#[derive(Parser)]
#[command(name = "movie-browser")]
#[command(about = "Browse movies with their director and lead actor", long_about = None)]
struct Cli {
    /// TMDB API key
    #[arg(long, global = true, env = API_KEY_ENV, default_value = "", hide_env_values = true)]
    api_key: String,

    /// API root to send requests to
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Response language
    #[arg(long, global = true, env = LANGUAGE_ENV, default_value = DEFAULT_LANGUAGE)]
    language: String,

    /// Image host that poster paths are resolved against
    #[arg(long, global = true, env = IMAGE_BASE_URL_ENV, default_value = DEFAULT_IMAGE_BASE_URL)]
    image_base_url: String,

    /// Print movies as JSON instead of a formatted list
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List popular movies
    Popular,

    /// Search movies by title
    Search {
        /// Title to search for; blank falls back to popular movies
        #[arg(long)]
        title: String,
    },

    /// List recommendations for a movie
    Recommend {
        /// Movie ID to get recommendations for
        #[arg(long)]
        movie_id: MovieId,
    },

    /// Interactive session: search, select, back, home
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = TmdbConfig::new(cli.api_key)
        .with_base_url(cli.base_url)
        .with_language(cli.language)
        .with_image_base_url(cli.image_base_url);
    if !config.has_api_key() {
        warn!("No API key given (--api-key or {}); requests will fail", API_KEY_ENV);
    }
    let image_base = config.image_base_url().to_string();
    let service = MovieService::from_config(config).context("Failed to build TMDB client")?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Popular => {
            let movies = service.catalog("").await.context("Failed to fetch movies")?;
            print_movies("Popular movies", &movies, &image_base, cli.json)?;
        }
        Commands::Search { title } => {
            let movies = service.catalog(&title).await.context("Failed to fetch movies")?;
            print_movies(&format!("Search results for '{}'", title.trim()), &movies, &image_base, cli.json)?;
        }
        Commands::Recommend { movie_id } => {
            let movies = service
                .recommendations(movie_id)
                .await
                .context("Failed to fetch recommended movies")?;
            print_movies(&format!("Recommended movies for {}", movie_id), &movies, &image_base, cli.json)?;
        }
        Commands::Browse => handle_browse(service, &image_base).await?,
    }

    Ok(())
}

/// A line typed in the interactive session
#[derive(Debug, PartialEq, Eq)]
enum BrowseCommand {
    Search(String),
    Select(usize),
    Back,
    Home,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "search" | "s" => Some(BrowseCommand::Search(rest.to_string())),
        "select" | "open" => rest.parse().ok().filter(|&n| n > 0).map(BrowseCommand::Select),
        "back" | "b" => Some(BrowseCommand::Back),
        "home" | "h" => Some(BrowseCommand::Home),
        "help" | "?" => Some(BrowseCommand::Help),
        "quit" | "exit" | "q" => Some(BrowseCommand::Quit),
        _ => None,
    }
}

/// Handle the 'browse' command
async fn handle_browse(service: MovieService, image_base: &str) -> Result<()> {
    let browser = MovieBrowser::new(service);

    // Print a loading line whenever the visible view starts loading
    let mut changes = browser.subscribe();
    let watcher = tokio::spawn(async move {
        let mut was_loading = false;
        while changes.changed().await.is_ok() {
            let loading = changes.borrow_and_update().is_loading();
            if loading && !was_loading {
                println!("{}", LOADING_LINE.dimmed());
            }
            was_loading = loading;
        }
    });

    if let Err(err) = browser.get_catalog("").await {
        debug!("Initial catalog load failed: {}", err);
    }
    render(&browser.snapshot(), image_base);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                println!("{} Unknown command. Type 'help' for options.", "?".yellow());
            }
            continue;
        };

        let result = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                print_help();
                continue;
            }
            BrowseCommand::Search(term) => {
                if !browser.can_search() {
                    println!("Search is available from the movie list; use 'back' or 'home' first.");
                    continue;
                }
                browser.get_catalog(&term).await.map(|_| ())
            }
            BrowseCommand::Select(n) => {
                let Some(movie) = visible_movie(&browser.snapshot(), n) else {
                    println!("{} No movie number {} on screen.", "?".yellow(), n);
                    continue;
                };
                browser.select_movie(movie).await.map(|_| ())
            }
            BrowseCommand::Back => {
                browser.back_to_catalog();
                Ok(())
            }
            BrowseCommand::Home => browser.return_home().await.map(|_| ()),
        };

        if let Err(err) = result {
            debug!("Browser operation failed: {}", err);
        }
        render(&browser.snapshot(), image_base);
    }

    watcher.abort();
    Ok(())
}

/// The `n`th (1-based) movie of whichever grid is visible
fn visible_movie(state: &BrowserState, n: usize) -> Option<EnrichedMovie> {
    let movies = match state.visible() {
        VisibleView::MovieGrid(movies) => movies,
        VisibleView::RecommendationGrid { movies, .. } => movies,
        VisibleView::Loading | VisibleView::Error(_) => return None,
    };
    movies.get(n.checked_sub(1)?).cloned()
}

/// Printed by the state watcher when a load starts
const LOADING_LINE: &str = "Loading movies...";

/// Message line for views without a grid. Loading has none here because the
/// watcher already printed it.
fn status_line(view: &VisibleView<'_>) -> Option<&'static str> {
    match view {
        VisibleView::Error(failure) => Some(failure.message()),
        VisibleView::Loading | VisibleView::MovieGrid(_) | VisibleView::RecommendationGrid { .. } => None,
    }
}

fn render(state: &BrowserState, image_base: &str) {
    println!();
    println!("{}", "Movie Recommendation App".bold().blue());
    let view = state.visible();
    if let Some(line) = status_line(&view) {
        println!("{}", line.red());
    }
    match view {
        VisibleView::Loading => {}
        VisibleView::Error(failure) => debug!("{}", failure.detail),
        VisibleView::MovieGrid(movies) => {
            let heading = match state.search_term().trim() {
                "" => "Popular movies".to_string(),
                term => format!("Search results for '{}'", term),
            };
            println!("{}", "Select a movie for recommendations".dimmed());
            print_grid(&heading, movies, image_base);
        }
        VisibleView::RecommendationGrid { selected, movies } => {
            print_grid(
                &format!("Recommended Movies for \"{}\"", selected.title()),
                movies,
                image_base,
            );
        }
    }
}

fn print_help() {
    println!(
        "{}",
        "Commands: search <title> | select <n> | back | home | help | quit".dimmed()
    );
}

/// Helper function to format and print movies, or dump them as JSON
fn print_movies(heading: &str, movies: &[EnrichedMovie], image_base: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(movies)?);
    } else {
        print_grid(heading, movies, image_base);
    }
    Ok(())
}

fn print_grid(heading: &str, movies: &[EnrichedMovie], image_base: &str) {
    println!("{}", format!("{}:", heading).bold());
    if movies.is_empty() {
        println!("  (no movies)");
        return;
    }

    for (i, movie) in movies.iter().enumerate() {
        println!(
            "{}. {} ({}) [id {}]",
            (i + 1).to_string().green(),
            movie.title().bold(),
            movie.summary.release_date().unwrap_or("unknown date"),
            movie.id()
        );
        println!(
            "   Starring: {} | Director: {}",
            movie.lead_actor_name().unwrap_or("N/A"),
            movie.director_name().unwrap_or("N/A")
        );
        if let Some(url) = movie.poster_url(image_base) {
            println!("   {}", url.dimmed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        assert_eq!(
            parse_command("search  The Matrix "),
            Some(BrowseCommand::Search("The Matrix".to_string()))
        );
        assert_eq!(parse_command("search"), Some(BrowseCommand::Search(String::new())));
    }

    #[test]
    fn test_parse_select() {
        assert_eq!(parse_command("select 3"), Some(BrowseCommand::Select(3)));
        assert_eq!(parse_command("select 0"), None);
        assert_eq!(parse_command("select x"), None);
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_command("BACK"), Some(BrowseCommand::Back));
        assert_eq!(parse_command(" home"), Some(BrowseCommand::Home));
        assert_eq!(parse_command("q"), Some(BrowseCommand::Quit));
        assert_eq!(parse_command("dance"), None);
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "movie-browser",
            "--api-key",
            "k",
            "recommend",
            "--movie-id",
            "603",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Recommend { movie_id: 603 }));
    }

    #[test]
    fn test_loading_is_not_printed_twice() {
        assert_eq!(status_line(&VisibleView::Loading), None);
        assert_eq!(status_line(&VisibleView::MovieGrid(&[])), None);
    }

    #[test]
    fn test_connection_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "movie-browser",
            "popular",
            "--api-key",
            "k",
            "--base-url",
            "http://127.0.0.1:9/3/",
            "--language",
            "fr-FR",
            "--image-base-url",
            "http://img.local/t/p",
        ])
        .unwrap();

        assert_eq!(cli.api_key, "k");
        assert_eq!(cli.base_url, "http://127.0.0.1:9/3/");
        assert_eq!(cli.language, "fr-FR");
        assert_eq!(cli.image_base_url, "http://img.local/t/p");
        assert!(matches!(cli.command, Commands::Popular));
    }
}
