//! Variant picker command.

use anyhow::{bail, Result};
use turbo_cart::picker::Selection;
use turbo_cart::{MutationOutcome, OpenOutcome};
use turbo_commerce::ProductHandle;

use super::{finish, PickArgs};
use crate::context::Context;

/// Run the pick command.
pub async fn run(args: PickArgs, ctx: &Context) -> Result<()> {
    let storefront = ctx.storefront();
    let picker = storefront.picker();

    match picker.open(ProductHandle::new(args.handle.as_str())).await {
        OpenOutcome::Ready => {}
        OpenOutcome::Failed => bail!("Could not load product '{}'", args.handle),
        OpenOutcome::Stale => bail!("Picker was closed before '{}' loaded", args.handle),
    }

    if let Some(title) = &args.variant {
        let view = picker.view();
        let Some(chip) = view
            .variants
            .iter()
            .find(|chip| chip.label.eq_ignore_ascii_case(title))
        else {
            let known: Vec<&str> = view.variants.iter().map(|c| c.label.as_str()).collect();
            bail!("No variant '{}'. Options: {}", title, known.join(", "));
        };

        match picker.select_variant(&chip.id) {
            Selection::Selected => {}
            Selection::Unavailable => bail!("Variant '{}' is sold out", chip.label),
            Selection::Unknown => bail!("Variant '{}' is not selectable", chip.label),
        }
    }

    ctx.output.picker(&picker.view());

    if args.no_add {
        picker.close();
        return Ok(());
    }

    let Some(pending) = picker.handle_add_to_cart().await else {
        bail!("Nothing selected");
    };

    match finish(pending, picker.add_control(), &ctx.output).await {
        Some(MutationOutcome::Added(_)) => {
            ctx.output.success("Added to cart");
            Ok(())
        }
        Some(MutationOutcome::Failed(message)) => bail!(message),
        None => bail!("Submission ended without an outcome"),
    }
}
