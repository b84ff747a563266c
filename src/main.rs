use clap::Parser;
use gemini_prompt::{respond, ClientConfig, GeminiClient};
use tracing_subscriber::EnvFilter;

/// Send a text prompt to Gemini and print the generated text.
#[derive(Debug, Parser)]
#[command(name = "gemini-prompt", version, about)]
struct Args {
    /// Prompt to send
    #[arg(default_value = "Hello Gemini.")]
    prompt: String,

    /// Model identifier (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// API host (overrides GEMINI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

impl Args {
    /// Layer non-blank flags over the environment-derived config.
    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(model) = self.model.as_deref().filter(|m| !m.trim().is_empty()) {
            config = config.with_model(model);
        }
        if let Some(base_url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = args.apply(ClientConfig::from_env());

    let output = match GeminiClient::with_config(config) {
        Ok(client) => respond(&client, &args.prompt).await,
        Err(error) => error.to_string(),
    };

    // Failures are reported in the printed text; the exit code stays 0.
    println!("{output}");
}
