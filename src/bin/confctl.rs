use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "confctl")]
#[command(about = "Client for a confserver instance", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:6666")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at PATH
    Get {
        path: String,
        /// Block until PATH is triggered
        #[arg(long)]
        wait: bool,
    },
    /// Fill TEMPLATE_FILE with the value at PATH
    Render {
        path: String,
        template_file: PathBuf,
        /// Block until PATH is triggered
        #[arg(long)]
        wait: bool,
    },
    /// Release every request waiting on PATH
    Trigger { path: String },
}

fn endpoint(base: &str, path: &str, wait: bool) -> String {
    let path = path.trim_start_matches('/');
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path);
    if wait {
        url.push_str("?wait");
    }
    url
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::Get { path, wait } => client.get(endpoint(&cli.url, &path, wait)).send().await?,
        Commands::Render {
            path,
            template_file,
            wait,
        } => {
            let template = tokio::fs::read(&template_file).await?;
            client
                .post(endpoint(&cli.url, &path, wait))
                .body(template)
                .send()
                .await?
        }
        Commands::Trigger { path } => client.put(endpoint(&cli.url, &path, false)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: confserver returned status {}", status);
        if !body.is_empty() {
            eprintln!("Response: {}", body);
        }
        std::process::exit(1);
    }

    if !body.is_empty() {
        println!("{}", body);
    }
    Ok(())
}
