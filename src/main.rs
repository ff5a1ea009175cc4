use clap::Parser;
use patent_analysis::{cli, client, config, error, export, logging, render, workflow};
use cli::{Cli, Commands};
use client::{ApiClient, UploadFile};
use config::Config;
use error::Result;
use patent_analysis_common::{AnalyzeOptions, ColumnField};
use std::time::Duration;
use workflow::{ColumnOverrides, Session};

fn print_selection(session: &Session) {
    for field in ColumnField::ALL {
        println!("  {:<16} {}", field.label(), session.column(field).unwrap_or("-"));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::load()?;
    let api_base = config.api_base(cli.api_url.as_deref());
    let api = ApiClient::new(&api_base, Duration::from_secs(config.timeout_seconds))?;
    tracing::debug!(%api_base, "backend");

    match cli.command {
        Commands::Columns { file } => {
            println!("📑 patent-analysis - columns\n");

            let upload = UploadFile::read(&file)?;
            let mut session = Session::with_prompt(config.prompt());
            workflow::discover_columns(&api, &mut session, upload).await?;

            println!("✔ {} columns", session.columns().len());
            for column in session.columns() {
                println!("  - {}", column);
            }
            println!("\nAuto-selected:");
            print_selection(&session);
        }

        Commands::Analyze {
            file,
            title_col,
            abstract_col,
            claims_col,
            prompt,
            prompt_file,
            interactive,
            output,
            export_dir,
            format,
            view,
            page,
            page_size,
            sort_by,
            sort_order,
            search,
        } => {
            println!("🔬 patent-analysis - analyze\n");

            let options = AnalyzeOptions { page, page_size, sort_by, sort_order, search };
            options.validate()?;
            let prompt = workflow::resolve_prompt(prompt, prompt_file.as_deref(), config.prompt())?;

            // 1. Columns
            println!("[1/3] Loading columns...");
            let upload = UploadFile::read(&file)?;
            let mut session = Session::with_prompt(prompt);
            workflow::discover_columns(&api, &mut session, upload).await?;
            println!("✔ {} columns\n", session.columns().len());

            // 2. Selection
            println!("[2/3] Selecting columns...");
            let overrides = ColumnOverrides {
                title: title_col,
                abstract_col,
                claims: claims_col,
            };
            workflow::apply_column_overrides(&mut session, &overrides)?;
            if interactive {
                workflow::choose_columns_interactively(&mut session)?;
                workflow::edit_prompt_interactively(&mut session)?;
            }
            print_selection(&session);
            println!();

            // 3. Analysis
            println!("[3/3] Analyzing...");
            workflow::run_analysis(&api, &mut session, &options).await?;
            println!("✔ Analysis complete\n");

            if let Some(meta) = session.metadata() {
                println!(
                    "Page {}/{} ({} items)\n",
                    meta.page, meta.total_pages, meta.total_items
                );
            }

            match render::render_results(&session, view) {
                Some(text) => println!("{}", text),
                None => println!("No results."),
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(session.results())?;
                std::fs::write(&path, json)?;
                println!("✔ Results saved: {}", path.display());
            }

            if let Some(dir) = export_dir {
                if session.results().is_empty() {
                    println!("Nothing to export.");
                } else {
                    export::export_results(session.results(), format, &dir)?;
                }
            }

            println!("\n✅ Done");
        }

        Commands::Export { input, output, format } => {
            println!("📄 patent-analysis - export\n");

            let records = export::load_results(&input)?;
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            export::export_results(&records, format, &output_dir)?;

            println!("\n✅ Export complete");
        }

        Commands::Ping => {
            if api.ping().await? {
                println!("✔ Backend reachable: {}", api.base_url());
            } else {
                println!("Backend at {} answered without status \"ok\"", api.base_url());
            }
        }

        Commands::Config { set_api_url, show } => {
            let mut config = config;

            if let Some(url) = set_api_url {
                config.set_api_base(url)?;
                println!("✔ Backend URL saved");
            }

            if show {
                println!("Settings:");
                println!("  Backend URL: {}", config.api_base(cli.api_url.as_deref()));
                println!("  Timeout: {}s", config.timeout_seconds);
                println!(
                    "  Prompt: {}",
                    if config.default_prompt.is_some() { "custom" } else { "default" }
                );
            }
        }
    }

    Ok(())
}
