use clap::{Parser, Subcommand, ValueEnum};
use simple_blog::progress::{ScrollMetrics, compute_progress};
use simple_blog::search::{self, TagOrder};
use simple_blog::{config, generate, output, scan, toc};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-blog")]
#[command(about = "Static blog generator with search, tags and reading progress")]
#[command(long_about = "\
Static blog generator with search, tags and reading progress

Articles are structured documents: JSON files carrying typed content blocks,
or markdown files with TOML front matter. A numeric filename prefix fixes
the order of the collection.

Content structure:

  content/
  ├── config.toml                    # Site config (optional)
  ├── authors.toml                   # [id] tables: name, bio, avatar, socialLinks
  └── articles/
      ├── 010-modern-css.json        # Structured article (slug: modern-css)
      ├── 020-react-performance.md   # Markdown with +++ TOML front matter
      ├── series/
      │   └── 030-bootloader.md      # Subdirectories are walked too
      └── web-trends.json            # Unnumbered: sorted after numbered files

Front matter fields:
  title, excerpt, author, publishedAt   required
  slug, id, updatedAt, readingTime      derived when absent
  tags, coverImage, featured            optional

Run 'simple-blog gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".simple-blog-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Search articles by text and tags
    Search {
        /// Free-text query (matches title, excerpt, body, author, tags)
        #[arg(default_value = "")]
        query: String,
        /// Require a tag; repeat to require several
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List tags with article counts
    Tags {
        /// Ordering; defaults to the configured cloud order
        #[arg(long, value_enum)]
        order: Option<OrderArg>,
    },
    /// Print an article's table of contents
    Toc {
        slug: String,
    },
    /// Compute reading progress for a scroll position
    Progress {
        slug: String,
        /// Pixels scrolled from the top of the article
        #[arg(long, default_value_t = 0.0)]
        offset: f64,
        /// Total article height in pixels
        #[arg(long, default_value_t = 4000.0)]
        content_height: f64,
        /// Viewport height in pixels
        #[arg(long, default_value_t = 900.0)]
        viewport: f64,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Collection,
    Alphabetical,
    Popularity,
    Shuffled,
}

impl From<OrderArg> for TagOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Collection => TagOrder::Collection,
            OrderArg::Alphabetical => TagOrder::Alphabetical,
            OrderArg::Popularity => TagOrder::Popularity,
            OrderArg::Shuffled => TagOrder::Shuffled,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let content = std::fs::read_to_string(&manifest_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&content)?;
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate_site(&manifest, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate_site(&manifest, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::Search { query, tags } => {
            let manifest = scan::scan(&cli.source)?;
            let results = search::filter(&manifest.articles, &query, &tags);
            output::print_search_results(&results, &query, &tags);
        }
        Command::Tags { order } => {
            let manifest = scan::scan(&cli.source)?;
            let order = order
                .map(TagOrder::from)
                .unwrap_or(manifest.config.tags.cloud_order);
            let index = search::aggregate_tags(&manifest.articles);
            output::print_tag_index(&index.sorted(order));
        }
        Command::Toc { slug } => {
            let manifest = scan::scan(&cli.source)?;
            let article = search::find_by_slug(&manifest.articles, &slug)
                .ok_or_else(|| format!("no article with slug '{slug}'"))?;
            output::print_toc(article, &toc::extract_toc(article));
        }
        Command::Progress {
            slug,
            offset,
            content_height,
            viewport,
        } => {
            let manifest = scan::scan(&cli.source)?;
            let article = search::find_by_slug(&manifest.articles, &slug)
                .ok_or_else(|| format!("no article with slug '{slug}'"))?;
            let metrics = ScrollMetrics {
                scroll_offset: offset,
                content_height,
                viewport_height: viewport,
            };
            let progress = compute_progress(
                metrics,
                article.word_count(),
                manifest.config.reading.words_per_minute,
            );
            output::print_progress(article, &progress);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`) so stdout stays
/// clean for command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
/// Returns false when a global pool already exists.
fn init_thread_pool(processing: &config::ProcessingConfig) -> bool {
    let threads = config::effective_threads(processing);
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        Ok(()) => {
            debug!(threads, "rayon pool initialized");
            true
        }
        Err(e) => {
            debug!("keeping existing rayon pool: {e}");
            false
        }
    }
}
