//! Direct add-to-cart command.

use anyhow::{bail, Result};
use turbo_cart::{CartControl, MutationOutcome};
use turbo_commerce::AddToCartPayload;

use super::{finish, AddArgs};
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    if args.quantity == 0 {
        bail!("Quantity must be at least 1");
    }

    let storefront = ctx.storefront();
    let control = CartControl::new("cli-add", "Add to Cart");
    let payload = AddToCartPayload::single(args.variant.as_str()).with_quantity(args.quantity);

    ctx.output.debug(&format!(
        "Adding {} x {} via {}",
        payload.quantity,
        payload.id,
        ctx.config.base_url
    ));

    let pending = storefront.mutations().spawn(&control, payload)?;

    match finish(pending, &control, &ctx.output).await {
        Some(MutationOutcome::Added(item)) => {
            if ctx.output.is_json() {
                ctx.output.json(&item);
            } else {
                ctx.output.success(&format!("Added {} to cart", args.variant));
            }
            Ok(())
        }
        Some(MutationOutcome::Failed(message)) => bail!(message),
        None => bail!("Submission ended without an outcome"),
    }
}
