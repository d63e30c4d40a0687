use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use eyre::{Result, WrapErr};
use serde::Serialize;
use shici_core::document::Searchable;
use shici_core::ids;
use shici_core::models::{PoemDocument, PoetDocument};
use shici_search::Searcher;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DocType {
    Poem,
    Poet,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty index
    CreateIndex { index: String },

    /// Delete an index and all its documents
    DeleteIndex { index: String },

    /// Report whether an index exists
    IndexExists { index: String },

    /// Put the field mapping for a document type
    CreateMapping {
        index: String,
        #[arg(long = "type", value_enum)]
        doc_type: DocType,
    },

    /// Search with up to three pre-segmented tokens
    Search {
        index: String,
        #[arg(long = "type", value_enum)]
        doc_type: DocType,
        #[arg(long, default_value_t = 20)]
        max: usize,
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Fetch one document
    Get {
        index: String,
        #[arg(long = "type", value_enum)]
        doc_type: DocType,
        id: String,
    },

    /// Index a document read from a JSON file
    Put {
        index: String,
        #[arg(long = "type", value_enum)]
        doc_type: DocType,
        file: PathBuf,
    },

    /// Delete one document
    Delete {
        index: String,
        #[arg(long = "type", value_enum)]
        doc_type: DocType,
        id: String,
    },

    /// Print a fresh document id
    NewId,
}

impl Command {
    fn doc_type(&self) -> Option<DocType> {
        match self {
            Command::CreateMapping { doc_type, .. }
            | Command::Search { doc_type, .. }
            | Command::Get { doc_type, .. }
            | Command::Put { doc_type, .. }
            | Command::Delete { doc_type, .. } => Some(*doc_type),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct HitView<'a, T> {
    id: Option<&'a str>,
    score: Option<f64>,
    document: &'a T,
}

pub fn run(searcher: &Searcher, command: Command) -> Result<()> {
    match command.doc_type() {
        Some(DocType::Poem) => return run_typed::<PoemDocument>(searcher, command),
        Some(DocType::Poet) => return run_typed::<PoetDocument>(searcher, command),
        None => {}
    }

    match command {
        Command::CreateIndex { index } => {
            searcher.create_index(&index)?;
            info!(index = %index, "index created");
        }
        Command::DeleteIndex { index } => {
            searcher.delete_index(&index)?;
            info!(index = %index, "index deleted");
        }
        Command::IndexExists { index } => {
            let exists = searcher.index_exists(&index)?;
            print_json(&serde_json::json!({ "index": index, "exists": exists }))?;
        }
        Command::NewId => new_id()?,
        other => eyre::bail!("{other:?} needs a document type"),
    }
    Ok(())
}

pub fn new_id() -> Result<()> {
    println!("{}", ids::next_id());
    Ok(())
}

fn run_typed<T: Searchable>(searcher: &Searcher, command: Command) -> Result<()> {
    match command {
        Command::CreateMapping { index, .. } => {
            searcher.create_mapping::<T>(&index)?;
            info!(index = %index, doc_type = T::TYPE_NAME, "mapping applied");
        }
        Command::Search {
            index, max, tokens, ..
        } => {
            let hits = searcher.search_hits::<T, _>(&index, tokens.as_slice(), max)?;
            let views: Vec<_> = hits
                .iter()
                .map(|hit| HitView {
                    id: hit.id.as_deref(),
                    score: hit.score,
                    document: &hit.document,
                })
                .collect();
            print_json(&views)?;
        }
        Command::Get { index, id, .. } => {
            let doc = searcher.get_document::<T>(&index, &id)?;
            print_json(&doc)?;
        }
        Command::Put { index, file, .. } => {
            let contents = std::fs::read_to_string(&file)
                .wrap_err_with(|| format!("failed to read {}", file.display()))?;
            let doc: T = serde_json::from_str(&contents)
                .wrap_err_with(|| format!("{} is not a {} document", file.display(), T::TYPE_NAME))?;
            searcher.create_document(&index, &doc)?;
            info!(index = %index, doc_type = T::TYPE_NAME, id = doc.id(), "document indexed");
        }
        Command::Delete { index, id, .. } => {
            searcher.delete_document::<T>(&index, &id)?;
            info!(index = %index, doc_type = T::TYPE_NAME, id = %id, "document deleted");
        }
        other => eyre::bail!("{other:?} does not take a document type"),
    }
    Ok(())
}

fn print_json<V: Serialize + ?Sized>(value: &V) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
