/*!
 * Box-drawing directory tree of the reported entries
 */

use std::collections::BTreeMap;

use crate::types::{Disposition, ExcludeReason, ScanResult};

#[derive(Debug, Default)]
struct TreeNode {
    is_dir: bool,
    note: Option<&'static str>,
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    fn insert(&mut self, rel_path: &str, is_dir: bool, note: Option<&'static str>) {
        let mut node = self;
        let mut parts = rel_path.split('/').peekable();
        while let Some(part) = parts.next() {
            node = node.children.entry(part.to_string()).or_default();
            if parts.peek().is_some() {
                node.is_dir = true;
            }
        }
        node.is_dir |= is_dir;
        node.note = note;
    }

    fn render(&self, prefix: &str, lines: &mut Vec<String>) {
        let count = self.children.len();
        for (i, (name, child)) in self.children.iter().enumerate() {
            let last = i + 1 == count;
            let mut line = format!("{}{}{}", prefix, if last { "└── " } else { "├── " }, name);
            if child.is_dir {
                line.push('/');
            }
            if let Some(note) = child.note {
                line.push_str(&format!(" [{}]", note));
            }
            lines.push(line);

            let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
            child.render(&next, lines);
        }
    }
}

/// Render candidate files, their parent directories and pruned directories.
///
/// Skipped files and pruned directories carry a short `[note]`. Output has
/// no trailing newline.
pub fn render_tree(result: &ScanResult) -> String {
    let mut root = TreeNode::default();

    for entry in &result.entries {
        if entry.is_candidate() {
            let note = match &entry.disposition {
                Disposition::Skipped(reason) => Some(reason.tag()),
                _ => None,
            };
            root.insert(&entry.rel_path, false, note);
        } else if entry.is_pruned_dir() {
            let note = match &entry.disposition {
                Disposition::Excluded(ExcludeReason::SymlinkCycle) => "symlink cycle",
                Disposition::Excluded(ExcludeReason::SystemPath) => "system path",
                _ => "excluded",
            };
            root.insert(&entry.rel_path, true, Some(note));
        }
    }

    let mut top = result.root_name();
    if !top.ends_with('/') {
        top.push('/');
    }
    let mut lines = vec![top];
    root.render("", &mut lines);
    lines.join("\n")
}
