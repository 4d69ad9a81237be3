//! PostViews
//!
//! Renders zones, sections, and archive listings from a JSON post list.
//!
//! Usage:
//!   cargo run -p postviews-kernel -- --posts posts.json zone home

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use postviews_kernel::tap::HOME_ZONE;
use postviews_kernel::{
    Bootstrap, CatalogTranslator, Config, IdentityTranslator, Registry, RenderContext,
    PagerLabels, SectionOptions, StaticQueryProvider, TapContext, ThemeEngine, Translator,
    render_posts,
};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of posts.
    #[arg(long)]
    posts: Option<PathBuf>,

    /// JSON translation catalog (`{"source": "translation"}`) for the text domain.
    #[arg(long)]
    translations: Option<PathBuf>,

    /// Templates directory (overrides TEMPLATES_DIR).
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Page the main query is positioned on.
    #[arg(long, default_value = "1")]
    page: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every enabled section of a zone.
    Zone {
        #[arg(default_value = HOME_ZONE)]
        id: String,
    },
    /// Render a single registered section.
    Section { id: String },
    /// Render a one-off archive listing.
    Archive {
        /// Display type.
        #[arg(long = "type", default_value = "traditional")]
        display_type: String,
        /// Number of posts (default: POSTS_PER_PAGE).
        #[arg(long)]
        count: Option<u32>,
        /// Heading above the listing.
        #[arg(long)]
        title: Option<String>,
        /// Skip page navigation.
        #[arg(long)]
        no_nav: bool,
    },
    /// List zones and their sections in render order.
    List,
    /// List registered display types.
    DisplayTypes,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(dir) = args.templates.clone() {
        config.templates_dir = dir;
    }
    info!(
        posts_per_page = config.posts_per_page,
        templates = %config.templates_dir.display(),
        "Configuration loaded"
    );

    let translator: Box<dyn Translator> = match &args.translations {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Box::new(
                CatalogTranslator::from_json(&config.text_domain, &json)
                    .context("invalid translation catalog")?,
            )
        }
        None => Box::new(IdentityTranslator),
    };

    let mut registry = Registry::new();
    Bootstrap::with_defaults().run(
        &mut registry,
        TapContext::new(translator.as_ref(), &config.text_domain),
    );

    let queries = match &args.posts {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            StaticQueryProvider::from_json(&json).context("invalid post list")?
        }
        None => StaticQueryProvider::default(),
    }
    .with_page(args.page);
    info!(posts = queries.len(), page = args.page, "Posts loaded");

    let theme = ThemeEngine::new(&config.templates_dir)?.with_pager_labels(
        PagerLabels::translated(translator.as_ref(), &config.text_domain),
    );
    let ctx = RenderContext::new(&theme, &queries, &theme, &config);

    let mut out = String::new();
    match args.command {
        Command::Zone { id } => {
            let rendered = registry.render_zone(&id, ctx, &mut out);
            info!(zone = %id, rendered, "Zone rendered");
        }
        Command::Section { id } => {
            if registry.render_section(&id, ctx, &mut out).is_none() {
                info!(section = %id, "Section rendered nothing");
            }
        }
        Command::Archive {
            display_type,
            count,
            title,
            no_nav,
        } => {
            let mut options = SectionOptions::default().with_display_type(display_type);
            options.count = count;
            options.title = title;
            let archive = render_posts(ctx, options, !no_nav, &mut out);
            info!(nav = archive.nav_rendered, "Archive rendered");
        }
        Command::List => {
            for zone in registry.zones() {
                out.push_str(&format!("{} ({})\n", zone.id(), zone.label));
                for section in zone.sections(&registry) {
                    out.push_str(&format!(
                        "  {:>3}  {:<18} {:<12} {}\n",
                        section.priority,
                        section.id(),
                        section.display_type,
                        if section.enabled { "" } else { "(disabled)" }
                    ));
                }
            }
        }
        Command::DisplayTypes => {
            for (id, label) in registry.display_types().choices() {
                out.push_str(&format!("{id:<12} {label}\n"));
            }
        }
    }

    print!("{out}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
