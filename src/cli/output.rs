//! Colored output helpers for CLI

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the startup banner
    pub fn banner(&self) {
        let title = "Lifeware Collective";
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {} {}",
                "♥".bright_red().bold(),
                title.bright_white().bold(),
                version.dimmed()
            );
            println!("   {}\n", "Blood donors & Thalassemia support".red());
        } else {
            println!("\n   {} {}", title, version);
            println!("   Blood donors & Thalassemia support\n");
        }
    }

    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a file creation message
    pub fn created(&self, path: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), path.bright_white());
        } else {
            println!("  [CREATED] {}", path);
        }
    }

    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "○".yellow(),
                path.dimmed(),
                format!("({})", reason).yellow()
            );
        } else {
            println!("  [SKIPPED] {} ({})", path, reason);
        }
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {}", message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Print a table; column widths fit the widest cell
    pub fn table(&self, columns: &[&str], rows: &[Vec<String>]) {
        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                rows.iter()
                    .filter_map(|r| r.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(c.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header = format_row(columns.iter().copied(), &widths);
        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(rule_len).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(rule_len));
        }

        for row in rows {
            println!("    {}", format_row(row.iter().map(String::as_str), &widths));
        }
    }

    pub fn newline(&self) {
        println!();
    }
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_default_is_colored() {
        assert!(Output::default().colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_format_row_pads_to_width() {
        let row = format_row(["O+", "Sarah"].into_iter(), &[5, 8]);
        assert_eq!(row, "O+     Sarah");
    }

    #[test]
    fn test_table_handles_ragged_rows() {
        let output = Output::no_color();
        output.table(
            &["Name", "Group"],
            &[
                vec!["David Kim".to_string(), "AB+".to_string()],
                vec!["Lisa".to_string()],
            ],
        );
        output.table(&[], &[]);
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::new(), Output::no_color()] {
            output.banner();
            output.success("ok");
            output.info("info");
            output.warning("warn");
            output.error("error");
            output.created("lifeware.toml");
            output.skipped(".gitignore", "already exists");
            output.header("Header");
            output.kv("key", "value");
            output.hint("hint");
            output.command("lifeware-server");
            output.newline();
        }
    }
}
