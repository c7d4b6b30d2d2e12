//! LLM comparison service
//!
//! This application runs a prompt against the OpenAI and Gemini APIs side
//! by side and serves the results, with a bounded history of past
//! comparisons, over a small HTTP API.

use llm_compare::api::endpoints::{create_router, AppState};
use llm_compare::core::comparator::{Comparator, Credentials};
use llm_compare::core::config::Config;
use llm_compare::core::history::HistoryStore;
use llm_compare::core::logging::init_logging;
use llm_compare::core::providers::{ChatGptClient, GeminiClient};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Check for --help flag
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // Load configuration
    let config = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.log_level);

    // Print startup banner
    print_startup_banner(&config);

    // Create the provider clients and the comparator
    let chatgpt = Arc::new(ChatGptClient::new(
        config.openai_api_url.clone(),
        config.request_timeout,
    ));
    let gemini = Arc::new(GeminiClient::new(
        config.gemini_api_url.clone(),
        config.request_timeout,
    ));
    let comparator = Arc::new(Comparator::new(
        chatgpt,
        gemini,
        Credentials {
            openai_api_key: config.openai_api_key.clone(),
            google_api_key: config.google_api_key.clone(),
        },
    ));

    // Load persisted comparison history
    let history = Arc::new(HistoryStore::load(&config.history_path));
    info!("Loaded {} stored comparisons", history.len().await);

    // Create application state
    let app_state = AppState {
        config: config.clone(),
        comparator,
        history,
    };

    // Create router
    let app = create_router(app_state);

    // Bind to address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🚀 LLM Compare v{}", env!("CARGO_PKG_VERSION"));
    println!("✅ Configuration loaded successfully");
    println!("   OpenAI Endpoint: {}", config.openai_api_url);
    println!(
        "   OpenAI API Key: {}",
        if config.openai_api_key.is_empty() {
            "Not configured"
        } else {
            "Configured"
        }
    );
    println!("   Gemini Endpoint: {}", config.gemini_api_url);
    println!(
        "   Google API Key: {}",
        if config.google_api_key.is_empty() {
            "Not configured"
        } else {
            "Configured"
        }
    );
    println!("   Request Timeout: {}s", config.request_timeout);
    println!("   History File: {}", config.history_path.display());
    println!("   Server: {}:{}", config.host, config.port);
    println!();
}

/// Print help message
fn print_help() {
    println!("LLM Compare v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: llm-compare [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables:");
    println!("  OPENAI_API_KEY - OpenAI API key");
    println!("  OPENAI_API_URL - Chat-completions endpoint URL");
    println!("                   (default: https://api.openai.com/v1/chat/completions)");
    println!("  GOOGLE_API_KEY - Google API key");
    println!("  GEMINI_API_URL - generateContent endpoint URL");
    println!("                   (default: https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent)");
    println!("  CONFIG_PATH    - TOML configuration file (default: config.toml)");
    println!();
    println!("Keys may also be supplied per request in the POST body;");
    println!("an empty key makes that provider report a configuration error");
    println!("while the other provider still runs.");
}
