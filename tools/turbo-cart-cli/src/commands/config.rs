//! Configuration display.

use anyhow::{Context as _, Result};

use crate::context::Context;

/// Print the effective configuration as TOML (or JSON with `--json`).
pub fn run(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.header(&format!("Config ({})", path.display())),
        None => ctx.output.header("Config (defaults)"),
    }
    let rendered = toml::to_string_pretty(&ctx.config).context("Failed to render config")?;
    println!("{}", rendered);
    Ok(())
}
