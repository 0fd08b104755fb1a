/// # notion-pages CLI Interface (Module)
///
/// This module implements the CLI interface for notion-pages: command parsing,
/// argument validation and the async entrypoint.
///
/// All rendering and publishing logic lives in the [`notion-pages-core`] crate.
/// This module is strictly CLI glue: it loads the config, wires a [`NotionClient`]
/// and the templates into a [`PageAssembler`], and routes to the subcommand.
///
/// ## Commands
/// - `build --config <file>`: render every configured page and publish the site.
/// - `render --config <file> --page <id>`: render one page and print its HTML to stdout.
///
/// ## How To Use
/// - For command-line users: use the installed `notion-pages` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`notion-pages-core`]: ../../notion-pages-core/
/// [`Cli`]: struct.Cli.html
/// [`run`]: fn.run.html
use crate::load_config::{load_config, load_stylesheet, CliConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use notion_pages_core::model::PageId;
use notion_pages_core::notion::NotionClient;
use notion_pages_core::site::{publish_site, DirectoryPublisher};
use notion_pages_core::template::MiniJinjaTemplates;
use notion_pages_core::PageAssembler;
use std::path::PathBuf;

/// CLI for notion-pages: mirror Notion pages into a static HTML site.
#[derive(Parser)]
#[clap(
    name = "notion-pages",
    version,
    about = "Render Notion pages to static HTML and publish them as a site"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render all configured pages and publish them with an index
    Build {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
    /// Render a single page and print the HTML to stdout
    Render {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Notion page id
        #[clap(long)]
        page: String,
    },
}

fn assembler(config: &CliConfig) -> Result<PageAssembler<NotionClient, MiniJinjaTemplates>> {
    let client = match &config.site.notion.base_url {
        Some(base_url) => NotionClient::with_base_url(&config.notion_token, base_url),
        None => NotionClient::new(&config.notion_token),
    };
    let templates = match &config.site.templates_dir {
        Some(dir) => MiniJinjaTemplates::from_dir(dir),
        None => MiniJinjaTemplates::builtin(),
    };

    let assembler = PageAssembler::new(client, templates);
    Ok(match load_stylesheet(&config.site)? {
        Some(css) => assembler.with_stylesheet(css),
        None => assembler,
    })
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Build { config } => {
            let config = load_config(config)?;
            tracing::info!(command = "build", "Starting site build");
            let assembler = assembler(&config)?;
            let publisher = DirectoryPublisher::new(&config.site.output_dir);

            match publish_site(
                &assembler,
                &config.site.pages,
                &publisher,
                &config.site.site_title,
            )
            .await
            {
                Ok(report) => {
                    tracing::info!(command = "build", ?report, "Site build complete");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "build", error = %e, "Site build failed");
                    Err(anyhow::Error::new(e))
                }
            }
        }
        Commands::Render { config, page } => {
            let config = load_config(config)?;
            tracing::info!(command = "render", page_id = %page, "Rendering single page");
            let assembler = assembler(&config)?;

            let rendered = assembler
                .render_page_by_id(&PageId::new(page))
                .await
                .map_err(|e| {
                    tracing::error!(command = "render", error = %e, "Page render failed");
                    anyhow::Error::new(e)
                })?;
            println!("{}", rendered.markup);
            Ok(())
        }
    }
}
