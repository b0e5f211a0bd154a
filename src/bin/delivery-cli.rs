use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "delivery-cli")]
#[command(about = "Query a running pincode relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    /// Origin header to send, for exercising the CORS policy.
    #[arg(short, long)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check delivery to a pincode
    Check {
        /// Six-digit destination pincode
        pincode: String,
    },
    /// Show relay health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut request = match &cli.command {
        Commands::Check { pincode } => client
            .post(format!("{}/api/check-delivery", cli.url))
            .json(&json!({ "pincode": pincode })),
        Commands::Health => client.get(format!("{}/health", cli.url)),
    };
    if let Some(origin) = &cli.origin {
        request = request.header(reqwest::header::ORIGIN, origin);
    }

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(origin) = res.headers().get(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN) {
        eprintln!("access-control-allow-origin: {}", origin.to_str().unwrap_or("<binary>"));
    }

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
