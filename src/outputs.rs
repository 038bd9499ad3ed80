use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, ResultExt};

const DELIMITER: &str = "RELEASE_NOTIFY_EOF";

/// Appends `name=value` step outputs to the runner's output file
pub fn write_step_outputs(path: &Path, outputs: &[(&str, &str)]) -> Result<()> {
    let content: String = outputs
        .iter()
        .map(|(name, value)| format_output(name, value))
        .collect();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write output file {}", path.display()))?;

    Ok(())
}

/// Multi-line values use the `name<<DELIMITER` form
fn format_output(name: &str, value: &str) -> String {
    if !value.contains(&['\n', '\r'][..]) {
        return format!("{name}={value}\n");
    }

    let delimiter = unique_delimiter(value);
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

fn unique_delimiter(value: &str) -> String {
    let mut delimiter = DELIMITER.to_string();
    let mut suffix = 0;
    while value.contains(&delimiter) {
        suffix += 1;
        delimiter = format!("{DELIMITER}_{suffix}");
    }
    delimiter
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_single_line_output() {
        assert_eq!(format_output("color_hex", "0a0b0c"), "color_hex=0a0b0c\n");
    }

    #[test]
    fn test_multi_line_output() {
        assert_eq!(
            format_output("changes", "*Added*:\n- x"),
            "changes<<RELEASE_NOTIFY_EOF\n*Added*:\n- x\nRELEASE_NOTIFY_EOF\n"
        );
    }

    #[test]
    fn test_delimiter_never_appears_in_value() {
        let value = "a\nRELEASE_NOTIFY_EOF\nRELEASE_NOTIFY_EOF_1";
        assert_eq!(unique_delimiter(value), "RELEASE_NOTIFY_EOF_2");
    }

    #[test]
    fn test_outputs_are_appended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        fs::write(&path, "earlier=1\n").unwrap();

        write_step_outputs(&path, &[("changes", "- one\n- two"), ("color_hex", "00ff00")]).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "earlier=1\nchanges<<RELEASE_NOTIFY_EOF\n- one\n- two\nRELEASE_NOTIFY_EOF\ncolor_hex=00ff00\n"
        );
    }
}
