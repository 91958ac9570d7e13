//! Output formatting for the CLI.

use console::style;
use turbo_cart::{ButtonState, PickerView, VariantChip};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print the picker as it would appear on the page.
    pub fn picker(&self, view: &PickerView) {
        if self.json {
            self.json(view);
            return;
        }

        self.header(&view.title);
        self.kv("Price", &view.price);
        if let Some(image) = &view.image {
            self.kv("Image", image);
        }
        if !view.dots.is_empty() {
            let dots: String = view
                .dots
                .iter()
                .map(|active| if *active { '●' } else { '○' })
                .collect();
            self.kv("Images", &dots);
        }
        if view.size_chart_visible {
            self.kv("Size chart", "available");
        }

        println!("  {}:", style(&view.option_label).dim());
        for chip in &view.variants {
            self.list_item(&chip_label(chip));
        }
        self.kv("Button", &button_badge(view.add_control.state, &view.add_control.label));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn chip_label(chip: &VariantChip) -> String {
    let label = if chip.available {
        style(chip.label.as_str()).to_string()
    } else {
        style(format!("{} (sold out)", chip.label)).dim().to_string()
    };
    if chip.selected {
        format!("{} {}", style("◉").green(), label)
    } else {
        format!("○ {}", label)
    }
}

/// Styled control label for a button state.
pub fn button_badge(state: ButtonState, label: &str) -> String {
    match state {
        ButtonState::Idle => label.to_string(),
        ButtonState::Loading => style(format!("{label} …")).yellow().to_string(),
        ButtonState::Success => style(format!("{label} ✓")).green().to_string(),
        ButtonState::Error => style(format!("{label} ✗")).red().to_string(),
    }
}
