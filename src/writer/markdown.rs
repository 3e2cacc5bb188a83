/*!
 * Markdown report with fenced code blocks
 */

use std::io::Write;

use super::tree::render_tree;
use super::{FileBody, FormatWriter};
use crate::error::Result;
use crate::types::{ScanEntry, ScanResult};

/// Markdown report: same layout as the text report, contents fenced
pub struct MarkdownWriter<W: Write> {
    out: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FormatWriter for MarkdownWriter<W> {
    fn begin(&mut self, result: &ScanResult) -> Result<()> {
        writeln!(self.out, "# Hidden File Analysis")?;
        writeln!(self.out)?;
        writeln!(
            self.out,
            "**Path:** {}",
            code_span(&result.root.display().to_string())
        )?;
        if result.dry_run {
            writeln!(self.out)?;
            writeln!(self.out, "_Dry run: contents not read._")?;
        }
        writeln!(self.out)?;

        let tree = render_tree(result);
        let fence = fence_for(&tree);
        writeln!(self.out, "## Directory Structure")?;
        writeln!(self.out)?;
        writeln!(self.out, "{}text", fence)?;
        writeln!(self.out, "{}", tree)?;
        writeln!(self.out, "{}", fence)?;
        writeln!(self.out)?;

        writeln!(self.out, "## File Contents")?;
        Ok(())
    }

    fn write_file(&mut self, entry: &ScanEntry, body: &FileBody) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "### {}", code_span(&entry.rel_path))?;
        match body {
            FileBody::Text(text) => {
                let fence = fence_for(text);
                writeln!(self.out)?;
                writeln!(self.out, "{}{}", fence, language_hint(entry.name()))?;
                self.out.write_all(text.as_bytes())?;
                if !text.is_empty() && !text.ends_with('\n') {
                    writeln!(self.out)?;
                }
                writeln!(self.out, "{}", fence)?;
            }
            FileBody::Skipped(reason) => {
                writeln!(self.out)?;
                writeln!(self.out, "> Skipped: {}", reason)?;
            }
            FileBody::NotRead => {}
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// A backtick fence longer than any backtick run inside `content`
pub fn fence_for(content: &str) -> String {
    "`".repeat((longest_backtick_run(content) + 1).max(3))
}

/// Inline code span that survives backticks inside `text`
pub fn code_span(text: &str) -> String {
    let ticks = "`".repeat(longest_backtick_run(text) + 1);
    let pad = if text.starts_with('`') || text.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{ticks}{pad}{text}{pad}{ticks}")
}

fn longest_backtick_run(text: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Code block language for a file name, empty when unknown
pub fn language_hint(name: &str) -> &'static str {
    if name == ".env" || name.starts_with(".env.") || name.ends_with(".env") {
        return "dotenv";
    }
    if matches!(name, ".bashrc" | ".zshrc" | ".profile" | ".bash_profile") {
        return "sh";
    }
    if matches!(name, ".gitignore" | ".dockerignore") {
        return "gitignore";
    }
    if matches!(name, ".editorconfig" | ".gitconfig") {
        return "ini";
    }
    if matches!(name, "Cargo.lock" | "poetry.lock") {
        return "toml";
    }
    if matches!(name, ".eslintrc" | ".prettierrc") {
        return "json";
    }

    let ext = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => return "",
    };
    match ext {
        "toml" => "toml",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "ini" | "cfg" | "conf" => "ini",
        "sh" | "bash" | "zsh" => "sh",
        "log" | "out" => "log",
        _ => "",
    }
}
