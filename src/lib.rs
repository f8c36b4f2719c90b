//! notekeeper - client data layer and CLI for a notes server

pub mod backend;
pub mod cli;
pub mod domain;
pub mod filter;
pub mod logging;
pub mod store;
pub mod workspace;

use anyhow::Result;

use cli::{
    CategoryCommand, Cli, Command,
    config::Config,
    handlers::{
        handle_add, handle_categories, handle_category_add, handle_category_edit,
        handle_category_rm, handle_completions, handle_edit, handle_list, handle_rm,
        handle_search, handle_show, open_workspace,
    },
};

/// Runs one CLI command to completion.
pub async fn run(cli: &Cli) -> Result<()> {
    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load()?;
    dispatch(cli, &config).await
}

async fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    let api_url = config.api_url(cli.api_url.as_deref());
    let mut workspace = open_workspace(config, &api_url)?;
    let workspace = &mut workspace;

    match &cli.command {
        Command::List(args) => handle_list(args, workspace).await,
        Command::Search(args) => handle_search(args, workspace).await,
        Command::Show(args) => handle_show(args, workspace).await,
        Command::Add(args) => handle_add(args, workspace).await,
        Command::Edit(args) => handle_edit(args, workspace).await,
        Command::Remove(args) => handle_rm(args, workspace).await,
        Command::Categories(args) => handle_categories(args, workspace).await,
        Command::Category(CategoryCommand::Add(args)) => handle_category_add(args, workspace).await,
        Command::Category(CategoryCommand::Edit(args)) => {
            handle_category_edit(args, workspace).await
        }
        Command::Category(CategoryCommand::Remove(args)) => {
            handle_category_rm(args, workspace).await
        }
        Command::Completions(args) => handle_completions(args),
    }
}
