//! CLI command implementations.

pub mod add;
pub mod cart;
pub mod config;
pub mod pick;

use clap::Args;
use turbo_cart::{CartControl, MutationOutcome, PendingSubmission};

use crate::output::{button_badge, Output};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Variant ID to add.
    pub variant: String,

    /// Units to add.
    #[arg(short, long, default_value_t = 1)]
    pub quantity: u32,
}

/// Arguments for the pick command.
#[derive(Args)]
pub struct PickArgs {
    /// Product handle.
    pub handle: String,

    /// Variant title to select instead of the default.
    #[arg(long)]
    pub variant: Option<String>,

    /// Only show the picker, don't add to cart.
    #[arg(long)]
    pub no_add: bool,
}

/// Wait for a submission's outcome, show the control in that state, then
/// wait for its reset so the runtime never drops a live cycle.
pub(crate) async fn finish(
    mut pending: PendingSubmission,
    control: &CartControl,
    output: &Output,
) -> Option<MutationOutcome> {
    let outcome = pending.outcome().await;
    output.debug(&button_badge(control.state(), &control.label()));
    let settled = pending.settled().await;
    outcome.or(settled)
}
