//! Mold command handlers

use anyhow::{bail, Result};

use polycrete_core::MoldStore;

use crate::output::Output;

/// Add a mold and report the stored record
pub fn add(store: &mut MoldStore, name: &str, volume_ml: f64, output: &Output) -> Result<()> {
    store.add_mold(name, volume_ml);
    if let Some(mold) = store.molds().last() {
        output.print_added(mold);
    }
    Ok(())
}

/// List molds with the derived batch totals
pub fn list(store: &MoldStore, output: &Output) -> Result<()> {
    output.print_molds(store.molds(), store.total_volume_ml(), store.total_mass_g());
    Ok(())
}

/// Toggle whether a mold counts toward the batch
pub fn toggle(store: &mut MoldStore, id: &str, output: &Output) -> Result<()> {
    let id = resolve_id(store, id)?;
    store.toggle_mold(&id);

    if let Some(mold) = store.molds().iter().find(|m| m.id == id) {
        let state = if mold.active { "counted" } else { "excluded" };
        output.message(&format!("{} is now {}", mold.name, state));
    }
    Ok(())
}

/// Delete a mold
pub fn delete(store: &mut MoldStore, id: &str, output: &Output) -> Result<()> {
    let id = resolve_id(store, id)?;
    store.delete_mold(&id);
    output.message(&format!("Deleted mold {}", id));
    Ok(())
}

/// Delete every mold
pub fn clear(store: &mut MoldStore, output: &Output) -> Result<()> {
    let count = store.molds().len();
    store.clear_all();
    output.message(&format!("Cleared {} molds", count));
    Ok(())
}

/// Resolve a full id or unique prefix to a stored mold id
fn resolve_id(store: &MoldStore, prefix: &str) -> Result<String> {
    let matches: Vec<&str> = store
        .molds()
        .iter()
        .filter(|m| m.id.starts_with(prefix))
        .map(|m| m.id.as_str())
        .collect();

    match matches.as_slice() {
        [id] => Ok((*id).to_string()),
        [] => bail!("No mold matches id '{}'", prefix),
        _ => bail!("Id '{}' matches more than one mold", prefix),
    }
}
