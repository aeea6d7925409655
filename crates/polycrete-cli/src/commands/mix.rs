//! Mixture command handler

use anyhow::Result;

use polycrete_core::MoldStore;

use crate::output::Output;

/// Show the mixture breakdown for the active molds
pub fn show(store: &MoldStore, output: &Output) -> Result<()> {
    output.print_mixture(&store.mixture(), store.total_mass_g());
    Ok(())
}
