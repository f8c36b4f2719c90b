//! Category command handlers.

use anyhow::{Context, Result, bail};

use super::resolve::existing_category;
use super::{load_workspace, truncate_str};
use crate::cli::output::{CategoryListing, Output, OutputFormat};
use crate::cli::{CategoriesArgs, CategoryAddArgs, CategoryEditArgs, CategoryRemoveArgs};
use crate::domain::{CategoryDraft, CategoryPatch};
use crate::store::StoreError;
use crate::workspace::Workspace;

pub async fn handle_categories(args: &CategoriesArgs, workspace: &mut Workspace) -> Result<()> {
    if args.counts {
        load_workspace(workspace).await?;
    } else if let Err(err) = workspace.refresh_categories().await {
        eprintln!("warning: failed to fetch categories ({err}); using defaults");
    }

    let listings: Vec<CategoryListing> = workspace
        .categories()
        .categories()
        .iter()
        .map(|category| {
            let count = args
                .counts
                .then(|| workspace.notes().get_by_category(category.id()).len());
            CategoryListing::new(category, count)
        })
        .collect();

    match args.format {
        OutputFormat::Human => {
            if args.counts {
                println!("{:<6}  {:<24}  {:<8}  {:>6}", "ID", "Name", "Color", "Notes");
                println!(
                    "{:<6}  {:<24}  {:<8}  {:>6}",
                    "------",
                    "-".repeat(24),
                    "--------",
                    "------"
                );
            } else {
                println!("{:<6}  {:<24}  {:<8}", "ID", "Name", "Color");
                println!("{:<6}  {:<24}  {:<8}", "------", "-".repeat(24), "--------");
            }
            for listing in &listings {
                let id = listing.id.to_string();
                let name = truncate_str(&listing.name, 24);
                match listing.count {
                    Some(count) => {
                        println!("{:<6}  {:<24}  {:<8}  {:>6}", id, name, listing.color, count)
                    }
                    None => println!("{:<6}  {:<24}  {:<8}", id, name, listing.color),
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }

    Ok(())
}

pub async fn handle_category_add(
    args: &CategoryAddArgs,
    workspace: &mut Workspace,
) -> Result<()> {
    // Duplicate names are caught locally, so the current set is needed first.
    workspace
        .refresh_categories()
        .await
        .context("failed to fetch categories")?;

    let mut draft = CategoryDraft::new(args.name.as_str());
    if let Some(color) = &args.color {
        draft = draft.with_color(color.as_str());
    }

    let category = workspace
        .add_category(draft)
        .await
        .context("failed to add category")?;
    println!("Created category: {category}");
    Ok(())
}

pub async fn handle_category_edit(
    args: &CategoryEditArgs,
    workspace: &mut Workspace,
) -> Result<()> {
    let patch = CategoryPatch {
        name: args.name.clone(),
        color: args.color.clone(),
    };
    if patch.is_empty() {
        bail!("nothing to change: pass --name and/or --color");
    }

    workspace
        .refresh_categories()
        .await
        .context("failed to fetch categories")?;
    let category = existing_category(&args.category, workspace.categories())?;

    let updated = workspace
        .update_category(category.id(), patch)
        .await
        .with_context(|| format!("failed to update category {}", category.name()))?;
    println!("Updated category: {updated}");
    Ok(())
}

pub async fn handle_category_rm(
    args: &CategoryRemoveArgs,
    workspace: &mut Workspace,
) -> Result<()> {
    workspace
        .refresh_categories()
        .await
        .context("failed to fetch categories")?;

    let category = existing_category(&args.category, workspace.categories())?;
    let target = match &args.reassign_to {
        Some(raw) => Some(existing_category(raw, workspace.categories())?),
        None => None,
    };

    match workspace
        .delete_category(category.id(), target.as_ref().map(|t| t.id()))
        .await
    {
        Ok(()) => {}
        Err(err @ StoreError::Conflict { .. }) => {
            let notes = match err.note_count() {
                Some(count) => format!("{count} note(s)"),
                None => "notes".to_string(),
            };
            bail!(
                "category {} still has {notes}; pass --reassign-to <CATEGORY> to move them first",
                category.name()
            );
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to delete category {}", category.name()));
        }
    }

    match target {
        Some(target) => println!(
            "Deleted category {}; notes moved to {}",
            category.name(),
            target.name()
        ),
        None => println!("Deleted category {}", category.name()),
    }
    Ok(())
}
