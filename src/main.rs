// SPDX-License-Identifier: MPL-2.0
use gallery_lens::application::{Collaborators, GallerySection};
use gallery_lens::config;
use gallery_lens::domain::gallery::StoreId;
use gallery_lens::infrastructure::{
    InMemoryGalleryService, NoopImageCache, NoopShareSheet, TracingAnalytics,
};
use gallery_lens::ui::state::Size;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const USAGE: &str = "\
Usage: gallery_lens --fixture <FILE> [OPTIONS]

Options:
  --fixture <FILE>    TOML fixture with [[items]] (and optional [[categories]])
  --store <ID>        Store identifier [default: demo]
  --category <NAME>   Select a category before opening the viewer
  --tag <TAG>         Toggle a tag (repeatable)
  --open <INDEX>      Index to open the viewer at [default: 0]
  -h, --help          Print this help";

/// Phone-sized media area used by the demo.
const DEMO_VIEWPORT: Size = Size::new(390.0, 844.0);

struct Args {
    fixture: PathBuf,
    store: String,
    category: Option<String>,
    tags: Vec<String>,
    open: usize,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    Ok(Some(Args {
        fixture: args.value_from_str("--fixture")?,
        store: args
            .opt_value_from_str("--store")?
            .unwrap_or_else(|| "demo".to_string()),
        category: args.opt_value_from_str("--category")?,
        tags: args.values_from_str("--tag")?,
        open: args.opt_value_from_str("--open")?.unwrap_or(0),
    }))
}

async fn run(args: Args) -> gallery_lens::error::Result<()> {
    let config = config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to load settings, using defaults");
        config::Config::default()
    });

    let service = InMemoryGalleryService::from_fixture_path(&args.fixture)?;
    let collaborators = Collaborators::new(
        Arc::new(service),
        Arc::new(NoopShareSheet),
        Arc::new(NoopImageCache),
    )
    .with_analytics(Arc::new(TracingAnalytics));

    let mut section = GallerySection::new(StoreId::new(args.store), collaborators, &config)
        .with_viewport(DEMO_VIEWPORT);
    section.load().await?;

    if let Some(category) = &args.category {
        section.select_category(category);
    }
    for tag in &args.tags {
        section.toggle_tag(tag);
    }

    println!(
        "{} of {} items ({} categories, tags: {})",
        section.filtered_indices().len(),
        section.items().len(),
        section.categories().len(),
        section.tag_universe().join(", ")
    );
    for item in section.filtered_items() {
        println!(
            "  {:<8} {:<12} {:<8} {}",
            item.id().as_str(),
            item.category(),
            item.views(),
            item.title().unwrap_or(item.url())
        );
    }

    let mut viewer = section.open_viewer(args.open)?;
    while viewer.next() {}
    tokio::task::yield_now().await;
    viewer.process_pending();

    if let Some(summary) = viewer.close() {
        println!("viewed {} of {} items", summary.viewed, summary.total);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gallery_lens=info")),
        )
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
