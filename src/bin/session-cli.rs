use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use immersa_gateway::session::{MemorySessionStore, SessionId, SessionStore};

#[derive(Parser)]
#[command(name = "session-cli")]
#[command(about = "Manage the gateway's session persistence file", long_about = None)]
struct Cli {
    /// Session store JSON file (same as `session.store_path`).
    #[arg(short, long, default_value = "sessions.json")]
    store: PathBuf,

    /// Session key holding the token list.
    #[arg(short = 'k', long, default_value = "oauth")]
    token_key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List session ids and whether each carries a token
    List,
    /// Store a token under a session id (generated when omitted)
    Add {
        #[arg(long)]
        token: String,
        #[arg(long)]
        id: Option<String>,
    },
    /// Print one session's contents
    Show { id: String },
    /// Delete a session
    Remove { id: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let store = MemorySessionStore::load_from_file(&cli.store)?;

    match cli.command {
        Commands::List => {
            for id in store.ids() {
                let has_token = store
                    .load(&id)
                    .and_then(|r| r.token(&cli.token_key))
                    .is_some();
                println!("{}\ttoken={}", id, has_token);
            }
        }
        Commands::Add { token, id } => {
            let id = id.map(SessionId::new).unwrap_or_else(SessionId::generate);
            let mut record = store.load(&id).unwrap_or_default();
            record.insert(&cli.token_key, Value::Array(vec![Value::String(token)]));
            store.insert(id.clone(), record);
            store.save()?;
            println!("{}", id);
        }
        Commands::Show { id } => match store.load(&SessionId::new(id.as_str())) {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => {
                eprintln!("Error: no session {}", id);
                std::process::exit(1);
            }
        },
        Commands::Remove { id } => {
            if store.remove(&SessionId::new(id.as_str())).is_none() {
                eprintln!("Error: no session {}", id);
                std::process::exit(1);
            }
            store.save()?;
        }
    }

    Ok(())
}
