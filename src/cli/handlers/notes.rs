//! Note command handlers: ls, search, show, add, edit, rm.

use anyhow::{Context, Result};

use super::resolve::{parse_note_id, resolve_category, resolve_category_filter};
use super::{load_workspace, truncate_str};
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::cli::{AddArgs, EditArgs, ListArgs, RemoveArgs, SearchArgs, ShowArgs};
use crate::domain::{Note, NoteDraft};
use crate::workspace::Workspace;

pub async fn handle_list(args: &ListArgs, workspace: &mut Workspace) -> Result<()> {
    load_workspace(workspace).await?;

    let category = resolve_category_filter(args.category.as_deref(), workspace.categories())?;
    workspace.select_category(category);
    workspace.set_query(args.search.clone().unwrap_or_default());

    print_visible(workspace, args.format)
}

pub async fn handle_search(args: &SearchArgs, workspace: &mut Workspace) -> Result<()> {
    load_workspace(workspace).await?;

    let category = resolve_category_filter(args.category.as_deref(), workspace.categories())?;
    workspace.select_category(category);
    workspace.set_query(args.query.as_str());

    print_visible(workspace, args.format)
}

pub async fn handle_show(args: &ShowArgs, workspace: &mut Workspace) -> Result<()> {
    let id = parse_note_id(&args.id)?;
    load_workspace(workspace).await?;

    let note = workspace
        .notes()
        .get_by_id(id)
        .with_context(|| format!("note not found: {id}"))?;
    let listing = NoteListing::new(note, workspace.categories());

    match args.format {
        OutputFormat::Human => {
            println!("{}", listing.title);
            println!("  id:       {}", listing.id);
            println!("  category: {}", listing.category);
            if let Some(created) = note.created_at() {
                println!("  created:  {}", created.format("%Y-%m-%d %H:%M"));
            }
            println!("  updated:  {}", note.updated_at().format("%Y-%m-%d %H:%M"));
            if !listing.tags.is_empty() {
                println!("  tags:     {}", listing.tags.join(", "));
            }
            if !listing.description.is_empty() {
                println!();
                println!("{}", listing.description);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(listing))?);
        }
    }

    Ok(())
}

pub async fn handle_add(args: &AddArgs, workspace: &mut Workspace) -> Result<()> {
    let mut draft = NoteDraft::new(args.title.as_str(), args.description.as_str())
        .with_tags(args.tags.clone());
    if let Some(raw) = &args.category {
        draft = draft.with_category(resolve_category(raw, workspace).await?);
    }

    let note = workspace
        .add_note(draft)
        .await
        .context("failed to add note")?;

    print_saved("Created", &note, workspace, args.format)
}

pub async fn handle_edit(args: &EditArgs, workspace: &mut Workspace) -> Result<()> {
    let id = parse_note_id(&args.id)?;
    workspace
        .refresh_notes()
        .await
        .context("failed to fetch notes")?;

    let mut draft = workspace
        .notes()
        .get_by_id(id)
        .map(Note::to_draft)
        .with_context(|| format!("note not found: {id}"))?;

    if let Some(title) = &args.title {
        draft.title = title.clone();
    }
    if let Some(description) = &args.description {
        draft.description = description.clone();
    }
    if args.clear_tags {
        draft.tags.clear();
    } else if !args.tags.is_empty() {
        draft.tags = args.tags.clone();
    }
    if let Some(raw) = &args.category {
        draft.category_id = Some(resolve_category(raw, workspace).await?);
    }

    let note = workspace
        .update_note(id, draft)
        .await
        .with_context(|| format!("failed to update note {id}"))?;

    print_saved("Updated", &note, workspace, args.format)
}

pub async fn handle_rm(args: &RemoveArgs, workspace: &mut Workspace) -> Result<()> {
    let id = parse_note_id(&args.id)?;
    workspace
        .delete_note(id)
        .await
        .with_context(|| format!("failed to delete note {id}"))?;
    println!("Deleted note {id}");
    Ok(())
}

fn print_saved(
    verb: &str,
    note: &Note,
    workspace: &Workspace,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{verb}: {note}"),
        OutputFormat::Json => {
            let listing = NoteListing::new(note, workspace.categories());
            println!("{}", serde_json::to_string_pretty(&Output::new(listing))?);
        }
    }
    Ok(())
}

fn print_visible(workspace: &mut Workspace, format: OutputFormat) -> Result<()> {
    let visible: Vec<Note> = workspace.visible_notes().into_iter().cloned().collect();
    let listings: Vec<NoteListing> = visible
        .iter()
        .map(|n| NoteListing::new(n, workspace.categories()))
        .collect();

    match format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No notes found.");
                return Ok(());
            }

            println!("{:<6}  {:<40}  {:<16}  {:>10}", "ID", "Title", "Category", "Updated");
            println!(
                "{:<6}  {:<40}  {:<16}  {:>10}",
                "------",
                "----------------------------------------",
                "----------------",
                "----------"
            );
            for (listing, note) in listings.iter().zip(&visible) {
                println!(
                    "{:<6}  {:<40}  {:<16}  {:>10}",
                    listing.id,
                    truncate_str(&listing.title, 40),
                    truncate_str(&listing.category, 16),
                    note.updated_at().format("%Y-%m-%d").to_string()
                );
            }
            println!();
            println!("{} note(s)", listings.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }

    Ok(())
}
