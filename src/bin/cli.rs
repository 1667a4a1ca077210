//! SnapKV CLI Client
//!
//! Command-line interface for interacting with a SnapKV server.

use clap::{Parser, Subcommand};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

/// SnapKV CLI
#[derive(Parser, Debug)]
#[command(name = "snapkv-cli")]
#[command(about = "CLI for the SnapKV JSON store")]
struct Args {
    /// Server base URL
    #[arg(short, long, default_value = "http://127.0.0.1:4820")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all entries
    List,

    /// Get an entry by id
    Get {
        /// The entry id
        id: String,
    },

    /// Create an entry from a JSON value
    Create {
        /// The document, as JSON (e.g. '"hi"' or '{"a":1}')
        data: String,
    },

    /// Replace the document of an entry
    Update {
        /// The entry id
        id: String,

        /// The new document, as JSON
        data: String,
    },

    /// Delete an entry
    Delete {
        /// The entry id
        id: String,
    },
}

fn main() {
    let args = Args::parse();
    let client = Client::new();
    let base = args.server.trim_end_matches('/');

    let request = match build_request(&client, base, args.command) {
        Ok(request) => request,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(2);
        }
    };

    let response = match request.send() {
        Ok(response) => response,
        Err(e) => {
            eprintln!("error: request failed: {}", e);
            std::process::exit(1);
        }
    };

    let status = response.status();
    println!("Status code: {}", status.as_u16());

    let body = response.text().unwrap_or_default();
    match serde_json::from_str::<Value>(&body) {
        Ok(json) => match serde_json::to_string_pretty(&json) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => print!("{}", body),
        },
        Err(_) => print!("{}", body),
    }

    if !status.is_success() {
        std::process::exit(1);
    }
}

fn build_request(
    client: &Client,
    base: &str,
    command: Commands,
) -> Result<RequestBuilder, String> {
    let request = match command {
        Commands::List => client.get(format!("{}/db", base)),
        Commands::Get { id } => client.get(format!("{}/db/{}", base, id)),
        Commands::Create { data } => client.post(format!("{}/db", base)).json(&parse_json(&data)?),
        Commands::Update { id, data } => client
            .put(format!("{}/db/{}", base, id))
            .json(&parse_json(&data)?),
        Commands::Delete { id } => client.delete(format!("{}/db/{}", base, id)),
    };
    Ok(request)
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("data is not valid JSON: {}", e))
}
