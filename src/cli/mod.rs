//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

use output::OutputFormat;

/// notes - manage notes and categories on a notes server
#[derive(Parser, Debug)]
#[command(name = "notes", version, about, long_about = None)]
pub struct Cli {
    /// Server base URL (overrides NOTES_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List notes, optionally filtered by category and search text
    #[command(name = "ls")]
    List(ListArgs),

    /// Search notes by title, description, category or tag
    Search(SearchArgs),

    /// Show a single note
    Show(ShowArgs),

    /// Create a new note
    Add(AddArgs),

    /// Change a note's title, description, category or tags
    Edit(EditArgs),

    /// Delete a note
    #[command(name = "rm")]
    Remove(RemoveArgs),

    /// List categories
    Categories(CategoriesArgs),

    /// Create, change or delete a category
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `ls` command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Category id, name, or "all"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only show notes containing this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to look for
    pub query: String,

    /// Restrict the search to a category (id, name, or "all")
    #[arg(short, long)]
    pub category: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note id
    pub id: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `add` command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Note title
    pub title: String,

    /// Note description
    #[arg(short = 'D', long = "desc", default_value = "")]
    pub description: String,

    /// Category id or name (defaults to the fallback category)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Tag for the note (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note id
    pub id: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(short = 'D', long = "desc")]
    pub description: Option<String>,

    /// New category id or name
    #[arg(short, long)]
    pub category: Option<String>,

    /// Replace the note's tags (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Remove all tags from the note
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Note id
    pub id: String,
}

/// Arguments for the `categories` command
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    /// Show note counts for each category
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Create a category
    Add(CategoryAddArgs),

    /// Rename or recolor a category
    Edit(CategoryEditArgs),

    /// Delete a category
    #[command(name = "rm")]
    Remove(CategoryRemoveArgs),
}

/// Arguments for the `category add` command
#[derive(Parser, Debug)]
pub struct CategoryAddArgs {
    /// Category name (unique, case-insensitive)
    pub name: String,

    /// Display color, e.g. "#4caf50"
    #[arg(long)]
    pub color: Option<String>,
}

/// Arguments for the `category edit` command
#[derive(Parser, Debug)]
pub struct CategoryEditArgs {
    /// Category id or name
    pub category: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New color
    #[arg(long)]
    pub color: Option<String>,
}

/// Arguments for the `category rm` command
#[derive(Parser, Debug)]
pub struct CategoryRemoveArgs {
    /// Category id or name
    pub category: String,

    /// Move the category's notes to this category (id or name)
    #[arg(long)]
    pub reassign_to: Option<String>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
