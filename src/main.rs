//! Textdex CLI - analyze, store and query strings from the command line

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use textdex::config;
use textdex::filter::Filter;
use textdex::store::{MemoryStore, SqliteStore, ValueStore};
use textdex::{analyze, Error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "textdex")]
#[command(version)]
#[command(about = "String analysis and deduplication store")]
#[command(long_about = r#"
Textdex analyzes strings (length, palindrome status, character diversity,
word count, SHA-256 content hash, character frequencies) and stores each
distinct string exactly once, retrievable by text or by hash.

Example usage:
  textdex add --text "racecar"
  textdex get --value racecar
  textdex query --query "single word palindromes"
  textdex serve --port 3000
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file
    Init {
        /// Path for the config file
        #[arg(short, long, default_value = "textdex.toml")]
        config: PathBuf,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Keep everything in process memory instead of SQLite
        #[arg(short, long)]
        memory: bool,

        /// Path to the config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Analyze a string and print the result without storing it
    Analyze {
        /// The string to analyze
        #[arg(short, long)]
        text: String,
    },

    /// Analyze a string and store it
    Add {
        /// The string to store
        #[arg(short, long)]
        text: String,

        /// Path to the database file
        #[arg(short, long, default_value = "textdex.db")]
        database: PathBuf,
    },

    /// Look up a stored string by text or by hash id
    Get {
        /// Text or hash id to look up
        #[arg(short = 'V', long)]
        value: String,

        /// Path to the database file
        #[arg(short, long, default_value = "textdex.db")]
        database: PathBuf,
    },

    /// List stored strings, optionally filtered
    List {
        /// Path to the database file
        #[arg(short, long, default_value = "textdex.db")]
        database: PathBuf,

        /// Keep only palindromes (or non-palindromes with false)
        #[arg(long)]
        is_palindrome: Option<bool>,

        /// Minimum length in chars
        #[arg(long)]
        min_length: Option<usize>,

        /// Maximum length in chars
        #[arg(long)]
        max_length: Option<usize>,

        /// Exact word count
        #[arg(long)]
        word_count: Option<usize>,

        /// Substring the text must contain
        #[arg(long)]
        contains: Option<String>,
    },

    /// Filter stored strings with a natural-language phrase
    Query {
        /// Free-text phrase, e.g. "single word palindromes longer than 5"
        #[arg(short, long)]
        query: String,

        /// Path to the database file
        #[arg(short, long, default_value = "textdex.db")]
        database: PathBuf,
    },

    /// Delete a stored string by its text
    Delete {
        /// Text of the string to delete
        #[arg(short = 'V', long)]
        value: String,

        /// Path to the database file
        #[arg(short, long, default_value = "textdex.db")]
        database: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Init { config: path, force } => {
            let config = config::TextdexConfig {
                database: Some(config::default_database_path().display().to_string()),
                port: Some(3000),
                memory: Some(false),
            };
            config::write_config(&path, &config, force)?;
            println!("📝 Wrote config to {}", path.display());
        }

        Commands::Serve { port, database, memory, config: config_path } => {
            let file = config::load_config(config_path.as_deref())?.unwrap_or_default();
            let port = port.or(file.port).unwrap_or(3000);
            let use_memory = memory || file.memory.unwrap_or(false);

            let store: Arc<dyn ValueStore> = if use_memory {
                tracing::info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            } else {
                let db_path = database
                    .or(file.database.map(PathBuf::from))
                    .unwrap_or_else(config::default_database_path);
                config::ensure_db_dir(&db_path)?;
                tracing::info!("Using SQLite store at {}", db_path.display());
                println!("🗄️  Database: {}", db_path.display());
                Arc::new(SqliteStore::open(&db_path)?)
            };

            textdex::server::start_server(port, store).await?;
        }

        Commands::Analyze { text } => {
            let value = analyze(text.trim());
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Add { text, database } => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                anyhow::bail!("refusing to store an empty string");
            }
            let store = SqliteStore::open(&database)?;
            let value = analyze(trimmed);
            match store.save(value.clone()) {
                Ok(()) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(Error::AlreadyExists) => {
                    anyhow::bail!("string already exists (id {})", value.id)
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Get { value, database } => {
            let store = SqliteStore::open(&database)?;
            let found = match store.get_by_value(&value)? {
                Some(v) => Some(v),
                None => store.get_by_hash(&value)?,
            };
            match found {
                Some(v) => println!("{}", serde_json::to_string_pretty(&v)?),
                None => anyhow::bail!("string not found"),
            }
        }

        Commands::List {
            database,
            is_palindrome,
            min_length,
            max_length,
            word_count,
            contains,
        } => {
            let filter = Filter {
                is_palindrome,
                min_length,
                max_length,
                word_count,
                contains_character: contains,
            };
            let store = SqliteStore::open(&database)?;
            let matched: Vec<_> = store
                .get_all()?
                .into_iter()
                .filter(|v| filter.matches(v))
                .collect();
            println!("{}", serde_json::to_string_pretty(&matched)?);
            tracing::debug!("{} of {} strings matched", matched.len(), store.count()?);
        }

        Commands::Query { query, database } => {
            let filter = Filter::from_natural_query(&query);
            if filter.is_empty() {
                anyhow::bail!("unable to parse natural language query: {:?}", query);
            }
            tracing::debug!("interpreted {:?} as {:?}", query, filter);
            let store = SqliteStore::open(&database)?;
            let matched: Vec<_> = store
                .get_all()?
                .into_iter()
                .filter(|v| filter.matches(v))
                .collect();
            println!("{}", serde_json::to_string_pretty(&matched)?);
        }

        Commands::Delete { value, database } => {
            let store = SqliteStore::open(&database)?;
            match store.delete_by_value(&value) {
                Ok(()) => println!("🗑️  Deleted {:?}", value),
                Err(Error::NotFound) => anyhow::bail!("string not found"),
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
