use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "headlines")]
#[command(about = "Scrape news headlines politely, with a cached fallback")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape the selected sources, falling back to saved headlines
    Scrape {
        /// Source key to scrape (repeatable; defaults to every source)
        #[arg(short, long = "source", value_name = "KEY")]
        sources: Vec<String>,

        /// Only keep headlines whose title or timestamp contains this text
        #[arg(short, long)]
        keyword: Option<String>,

        /// Export format for the results (json or csv)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// List the configured news sources
    Sources,

    /// Show recently saved headlines without scraping
    Recent {
        /// Source key to include (repeatable; defaults to every source)
        #[arg(short, long = "source", value_name = "KEY")]
        sources: Vec<String>,

        /// Only keep headlines whose title or timestamp contains this text
        #[arg(short, long)]
        keyword: Option<String>,

        /// Maximum number of headlines to show
        #[arg(short = 'n', long, default_value_t = 30)]
        limit: usize,
    },

    /// Delete all saved headlines and recreate the database
    Reset,
}
