use crate::cli::Policy;
use crate::error::{Result, ResultExt};
use crate::ui;
use notification::{Assembler, NotifyConfig};
use std::fs;
use std::path::Path;

pub fn execute(file: &Path, policy: Policy, categories: bool) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    if categories {
        print_categories(&content);
        return Ok(());
    }

    let mut config = NotifyConfig::default();
    config.changes.policy = policy.into();
    println!("{}", Assembler::new(config).render_changes(&content));

    Ok(())
}

fn print_categories(content: &str) {
    let blocks = changelog::categorize(content);
    if blocks.is_empty() {
        ui::warning_message("No category headings found, the raw text would be used");
        return;
    }

    ui::section_header("Categories");
    for block in &blocks {
        ui::info_message(&format!("{} ({} items)", block.name, block.items.len()));
        for item in &block.items {
            println!("    - {item}");
        }
    }
}
