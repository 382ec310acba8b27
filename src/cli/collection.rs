//! Collection commands
//!
//! Each command opens the project, builds an [`OrderedCollectionManager`]
//! over the project's [`FileStore`] and drives it the way a UI would.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Utc;

use super::output::Output;
use crate::domain::{reorder, DragEvent, Item, ItemId};
use crate::manager::{DropOutcome, OrderedCollectionManager};
use crate::storage::{FileStore, KeyValueStore, Project};

/// A named collection inside the current project
struct Collection {
    project: Project,
    name: String,
}

impl Collection {
    fn open(name: &str) -> Result<Self> {
        validate_name(name)?;
        let project = Project::open_current()?;
        Ok(Self {
            project,
            name: name.to_string(),
        })
    }

    fn key(&self) -> String {
        self.project.config().project.storage_key(&self.name)
    }

    fn defaults_key(&self) -> String {
        self.project.config().project.defaults_key(&self.name)
    }

    /// Manager persisting to the collection's key
    fn manager(&self) -> OrderedCollectionManager<FileStore> {
        OrderedCollectionManager::with_storage_key(self.project.store(), self.key())
    }

    /// Manager that computes orders without writing them
    fn dry_run_manager(&self) -> OrderedCollectionManager<FileStore> {
        OrderedCollectionManager::new(self.project.store())
    }

    fn defaults_manager(&self) -> OrderedCollectionManager<FileStore> {
        OrderedCollectionManager::with_storage_key(self.project.store(), self.defaults_key())
    }

    fn exists(&self) -> Result<bool> {
        Ok(self.project.store().get(&self.key())?.is_some())
    }

    fn defaults(&self) -> Result<Vec<Item>> {
        Ok(self.defaults_manager().load(Vec::new())?)
    }

    /// Current items, falling back to the recorded defaults
    fn items(&self) -> Result<Vec<Item>> {
        let items = self.manager().load(self.defaults()?)?;
        if let Some(duplicate) = reorder::first_duplicate(&items) {
            tracing::warn!(
                collection = %self.name,
                id = %duplicate,
                "duplicate item id; moves resolve to its first occurrence"
            );
        }
        Ok(items)
    }
}

/// Collection names become part of storage keys
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Collection name must not be empty");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        bail!(
            "Invalid collection name '{}': use letters, digits, '-', '_' or '.'",
            name
        );
    }
    if name.ends_with(".defaults") {
        bail!("Collection name must not end with '.defaults'");
    }
    Ok(())
}

fn parse_id(value: &str) -> Result<ItemId> {
    value
        .parse()
        .with_context(|| format!("Invalid item id '{}'", value))
}

/// Creates a collection from display names
pub fn seed(output: &Output, collection: &str, names: &[String], force: bool) -> Result<()> {
    let collection = Collection::open(collection)?;

    if names.is_empty() {
        bail!("At least one item name is required");
    }
    if collection.exists()? && !force {
        bail!(
            "Collection '{}' already exists. Use --force to replace it.",
            collection.name
        );
    }

    let now = Utc::now();
    let items: Vec<Item> = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            Item::new(ItemId::generate(name, now, index), index as u32).with_name(name.as_str())
        })
        .collect();

    collection.defaults_manager().save(&items)?;
    collection.manager().save(&items)?;
    tracing::debug!(collection = %collection.name, count = items.len(), "collection seeded");

    if output.is_json() {
        output.data(&serde_json::json!({
            "collection": collection.name,
            "items": items,
        }));
    } else {
        output.success(&format!(
            "Seeded '{}' with {} item(s)",
            collection.name,
            items.len()
        ));
        output.items(&items);
    }
    Ok(())
}

/// Prints a collection in order
pub fn list(output: &Output, collection: &str) -> Result<()> {
    let collection = Collection::open(collection)?;
    let items = collection.items()?;
    output.items(&items);
    Ok(())
}

/// Drags `dragged` onto `target`
pub fn move_item(
    output: &Output,
    collection: &str,
    dragged: &str,
    target: &str,
    dry_run: bool,
) -> Result<()> {
    let collection = Collection::open(collection)?;
    let dragged = parse_id(dragged)?;
    let target = parse_id(target)?;
    let items = collection.items()?;

    let mut manager = if dry_run {
        collection.dry_run_manager()
    } else {
        collection.manager()
    };

    manager.begin_drag(dragged.clone());
    manager.drag_over(target.clone());
    let outcome = manager.drop(&items, &target)?;

    match &outcome {
        DropOutcome::Reordered(next) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "moved": true,
                    "dry_run": dry_run,
                    "items": next,
                }));
            } else {
                let verb = if dry_run { "Would move" } else { "Moved" };
                output.success(&format!(
                    "{} {} to position {}",
                    verb,
                    dragged,
                    position(next, &dragged)
                ));
                output.items(next);
            }
        }
        DropOutcome::Unchanged { items, reason } => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "moved": false,
                    "reason": reason,
                    "items": items,
                }));
            } else {
                output.success(&format!("No change: {}", reason.describe()));
            }
        }
    }
    Ok(())
}

fn position(items: &[Item], id: &ItemId) -> usize {
    reorder::position_of(items, id).unwrap_or_default()
}

/// Sets or clears the locked flag on one item
pub fn set_locked(output: &Output, collection: &str, id: &str, locked: bool) -> Result<()> {
    let collection = Collection::open(collection)?;
    let id = parse_id(id)?;
    let mut items = collection.items()?;

    let Some(index) = reorder::position_of(&items, &id) else {
        bail!("Item '{}' not found in '{}'", id, collection.name);
    };
    items[index].locked = locked;
    collection.manager().save(&items)?;

    let state = if locked { "Locked" } else { "Unlocked" };
    output.success(&format!("{} {} in '{}'", state, id, collection.name));
    Ok(())
}

/// Restores the order recorded at seed time
pub fn reset(output: &Output, collection: &str) -> Result<()> {
    let collection = Collection::open(collection)?;
    let defaults = collection.defaults()?;
    if defaults.is_empty() {
        bail!("No defaults recorded for '{}'", collection.name);
    }

    let items = collection.manager().reset(defaults)?;

    if output.is_json() {
        output.data(&items);
    } else {
        output.success(&format!("Reset '{}' to its default order", collection.name));
        output.items(&items);
    }
    Ok(())
}

/// Feeds a JSONL script of drag events through one manager
pub fn replay(output: &Output, collection: &str, script: &Path, dry_run: bool) -> Result<()> {
    let collection = Collection::open(collection)?;
    let content = fs::read_to_string(script)
        .with_context(|| format!("Failed to read event script: {}", script.display()))?;

    let mut events = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: DragEvent = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse event at line {}", line_num + 1))?;
        events.push(event);
    }

    let mut items = collection.items()?;
    let mut manager = if dry_run {
        collection.dry_run_manager()
    } else {
        collection.manager()
    };

    let mut reorders = 0;
    for event in &events {
        tracing::debug!(event = %event, "replaying");
        if let Some(outcome) = manager.apply(&items, event.clone())? {
            if outcome.is_reordered() {
                reorders += 1;
                // The caller owns the canonical list
                items = outcome.into_items();
            }
        }
    }

    if !manager.session().is_idle() {
        tracing::warn!("script ended with a drag still in progress");
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "events": events.len(),
            "reorders": reorders,
            "dry_run": dry_run,
            "session": manager.session(),
            "items": items,
        }));
    } else {
        output.success(&format!(
            "Replayed {} event(s), {} reorder(s)",
            events.len(),
            reorders
        ));
        output.items(&items);
    }
    Ok(())
}

/// Lists stored collections
pub fn status(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let config = &project.config().project;
    let entries = project.store().entries()?;

    let mut rows = Vec::new();
    for (key, stored) in &entries {
        let Some(name) = config.collection_for_key(key) else {
            continue;
        };
        let count = match serde_json::from_str::<Vec<serde_json::Value>>(&stored.value) {
            Ok(values) => Some(values.len()),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "stored value is not an item list");
                None
            }
        };
        rows.push((name, count, stored.updated_at));
    }

    if output.is_json() {
        let collections: Vec<_> = rows
            .iter()
            .map(|(name, count, updated_at)| {
                serde_json::json!({
                    "collection": name,
                    "items": count,
                    "updated_at": updated_at,
                })
            })
            .collect();
        output.data(&collections);
    } else if rows.is_empty() {
        println!("No collections yet. Create one with 'reorder seed'.");
    } else {
        println!("{:<24} {:<6} UPDATED", "COLLECTION", "ITEMS");
        for (name, count, updated_at) in &rows {
            let count = count.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string());
            println!(
                "{:<24} {:<6} {}",
                name,
                count,
                updated_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }
    Ok(())
}
