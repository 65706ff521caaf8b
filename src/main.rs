mod config;
mod error;
mod handlers;
mod interpreter;
mod models;
mod services;
#[cfg(feature = "web-server")]
mod server; // HTTP upload front end

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use config::Config;
use handlers::AnalysisHandler;
use models::{CalorieEstimate, MealAnalysis, NO_CONTENT_MESSAGE};
use services::GeminiService;

#[derive(Debug, Parser)]
#[command(name = "meal-calorie-estimator", version, about = "Estimate meal calories from a photo with Gemini")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze a single meal photo
    Analyze(AnalyzeArgs),
    /// Serve the upload API
    #[cfg(feature = "web-server")]
    Serve(ServeArgs),
}

#[derive(Debug, Parser)]
struct AnalyzeArgs {
    /// Path to the meal photo
    image: Option<PathBuf>,
    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[cfg(feature = "web-server")]
#[derive(Debug, Parser)]
struct ServeArgs {
    /// Listen address, overrides SERVER_ADDR
    #[arg(long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logger
    env_logger::init();

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let gemini = Arc::new(GeminiService::new(config.api_key.clone(), config.endpoint.clone()));
    let handler = Arc::new(AnalysisHandler::new(gemini, config.prompt.clone()));
    log::info!("✅ Gemini service initialized: {}", config.endpoint);

    match cli.command {
        Command::Analyze(args) => run_analyze(&handler, args).await,
        #[cfg(feature = "web-server")]
        Command::Serve(args) => {
            run_server(handler, &config, args).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_analyze(handler: &AnalysisHandler, args: AnalyzeArgs) -> Result<ExitCode> {
    println!("⏳ Przetwarzanie obrazu i wysyłanie zapytania do Gemini AI…");

    match handler.analyze_file(args.image.as_deref()).await {
        Ok(analysis) if args.json => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(analysis) => {
            print!("{}", render_analysis(&analysis));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::error!("❌ Analysis failed: {:?}", e);
            println!("\n🔥 {}", CalorieEstimate::PLACEHOLDER);
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Terminal rendering: calorie line, then one block per paragraph
fn render_analysis(analysis: &MealAnalysis) -> String {
    let mut out = format!("\n🔥 {}\n\n", analysis.calorie_display);

    if analysis.paragraphs.is_empty() {
        out.push_str(NO_CONTENT_MESSAGE);
        out.push('\n');
        return out;
    }

    for paragraph in &analysis.paragraphs {
        out.push_str(&paragraph.to_plain_text());
        out.push_str("\n\n");
    }
    out
}

#[cfg(feature = "web-server")]
async fn run_server(handler: Arc<AnalysisHandler>, config: &Config, args: ServeArgs) -> Result<()> {
    let addr = args.addr.unwrap_or_else(|| config.server_addr.clone());
    let app = server::create_router(handler, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("🌐 Upload server listening on {}", addr);
    println!("\n🍽️ Serwer analizy posiłków działa: http://{}", addr);
    println!("   POST /api/analyze - zdjęcie posiłku w treści żądania");
    println!("\n🛑 Aby zatrzymać, naciśnij Ctrl+C\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            log::info!("🛑 Shutting down...");
        })
        .await?;

    Ok(())
}
