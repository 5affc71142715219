use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recap_cloud::{PastelPalette, WordCloud};
use recap_core::{pipeline, Layout};
use recap_index::TfIdfIndex;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "recap")]
#[command(about = "Index announcement posts, search them, and draw word clouds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the raw corpus, write the post store and build a fresh search index
    #[command(alias = "index")]
    Build,
    /// Search the index and print the matching post titles
    Search {
        /// The value to search for
        #[arg(long, default_value = "")]
        q: String,
    },
    /// Draw a word cloud from all posts, or only those matching a query
    Cloud {
        /// The value to search for
        #[arg(long, default_value = "")]
        q: String,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    // Every file lives under a fixed name in the working directory.
    let layout = Layout::default();
    tracing::debug!(corpus = %layout.raw_corpus().display(), index = %layout.index_dir().display(), "using fixed paths");

    match cli.command {
        Commands::Build => build(&layout),
        Commands::Search { q } => search(&layout, &q),
        Commands::Cloud { q } => cloud(&layout, &q),
    }
}

fn build(layout: &Layout) -> Result<()> {
    let report = pipeline::build::<TfIdfIndex>(layout)
        .with_context(|| format!("failed to build from {}", layout.raw_corpus().display()))?;
    println!(
        "indexed {} of {} posts ({} failed), store written to {}",
        report.index.indexed,
        report.stored,
        report.index.failed,
        layout.post_store().display()
    );
    Ok(())
}

fn search(layout: &Layout, q: &str) -> Result<()> {
    println!("Searching for {q:?}");
    let results = pipeline::search::<TfIdfIndex>(layout, q).context("search failed")?;
    println!("{results}");
    Ok(())
}

fn cloud(layout: &Layout, q: &str) -> Result<()> {
    if !q.is_empty() {
        println!("creating filtered word cloud: {q:?}");
    }
    let report = pipeline::cloud::<TfIdfIndex, _, _>(layout, q, &PastelPalette::new(), &WordCloud::new())
        .context("failed to create word cloud")?;
    println!("created word cloud from {} posts ({} distinct words): {}", report.posts, report.terms, report.output.display());
    Ok(())
}
