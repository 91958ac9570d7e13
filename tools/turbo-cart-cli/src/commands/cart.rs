//! Cart summary command.

use anyhow::{Context as _, Result};

use crate::context::Context;

/// Run the cart command.
pub async fn run(ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront();
    let summary = storefront
        .refresher()
        .refresh()
        .await
        .context("Failed to fetch cart")?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    if summary.is_empty() {
        ctx.output.info("Cart is empty");
    }
    Ok(())
}
