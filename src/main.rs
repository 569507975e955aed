use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use headlines::cli::{Cli, Commands};
use headlines::config::Config;
use headlines::domain::{Headline, ScrapeRequest};
use headlines::errors::{HeadlinesError, HeadlinesResult};
use headlines::fetch::{build_client, HttpFetcher, RobotsGate};
use headlines::services::{ExportService, ScrapeService};
use headlines::sources::SourceRegistry;
use headlines::storage::{HeadlineQuery, HeadlineRepository, SqliteHeadlineRepository, SqliteStorage};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("loading configuration")?;

    if let Commands::Sources = cli.command {
        cmd_sources();
        return Ok(());
    }

    // Initialize storage
    let storage = SqliteStorage::initialize(&config.db_path, config.seed_on_init)
        .context("initializing headline store")?;

    match cli.command {
        Commands::Scrape {
            sources,
            keyword,
            format,
        } => cmd_scrape(&config, storage, sources, keyword, &format)?,
        Commands::Recent {
            sources,
            keyword,
            limit,
        } => cmd_recent(storage, sources, keyword, limit)?,
        Commands::Reset => cmd_reset(&config, &storage)?,
        Commands::Sources => {}
    }

    Ok(())
}

fn cmd_sources() {
    let registry = SourceRegistry::new();

    println!("Configured sources:\n");
    for source in registry.iter() {
        println!("  {} - {}", source.key, source.name);
        println!("    URL: {}", source.listing_url);
    }
}

fn cmd_scrape(
    config: &Config,
    storage: SqliteStorage,
    sources: Vec<String>,
    keyword: Option<String>,
    format: &str,
) -> HeadlinesResult<()> {
    let client = build_client(&config.scrape)?;
    let service = ScrapeService::new(
        HttpFetcher::new(client.clone(), &config.scrape),
        RobotsGate::new(client),
        SqliteHeadlineRepository::new(storage),
        SourceRegistry::new(),
        config.scrape.clone(),
    )
    .with_exporter(ExportService::new(&config.data_dir));

    let selected = if sources.is_empty() {
        service.registry().keys()
    } else {
        sources
    };
    let request = ScrapeRequest::new(selected)
        .with_keyword(keyword)
        .with_export_format(format);

    println!("Scraping {} sources...\n", request.source_keys.len());

    let result = service.scrape(&request);

    for notice in &result.notices {
        println!("! {}", notice);
    }
    println!("{}\n", result.provenance.message());

    print_headlines(&result.items);

    if let Some(path) = &result.export_path {
        println!("\nSaved {} headlines to {}", result.items.len(), path.display());
    }

    Ok(())
}

fn cmd_recent(
    storage: SqliteStorage,
    sources: Vec<String>,
    keyword: Option<String>,
    limit: usize,
) -> HeadlinesResult<()> {
    let registry = SourceRegistry::new();
    if let Some(unknown) = sources.iter().find(|key| !registry.contains(key)) {
        return Err(HeadlinesError::UnknownSource(unknown.clone()));
    }

    let mut query = HeadlineQuery::new(limit).with_keyword(keyword.as_deref());
    if !sources.is_empty() {
        query = query.with_sources(sources);
    }

    let repository = SqliteHeadlineRepository::new(storage);
    let rows = repository.query(&query)?;

    if rows.is_empty() {
        println!("No saved headlines.");
        return Ok(());
    }

    println!("{} saved headlines:\n", rows.len());
    let items: Vec<Headline> = rows.into_iter().map(|row| row.into_headline()).collect();
    print_headlines(&items);

    Ok(())
}

fn cmd_reset(config: &Config, storage: &SqliteStorage) -> HeadlinesResult<()> {
    storage.reset(config.seed_on_init)?;
    let count = SqliteHeadlineRepository::new(storage.clone()).count()?;
    println!(
        "Database reset at {} ({} headlines).",
        storage.path().display(),
        count
    );
    Ok(())
}

fn print_headlines(items: &[Headline]) {
    for item in items {
        println!("  [{}] {}", item.source, item.title);
        println!("    {}", item.url);
        if !item.published_at.is_empty() {
            println!("    Published: {}", item.published_at);
        }
    }
}
