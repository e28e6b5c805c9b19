use similar::{ChangeTag, TextDiff};
use terminal_size::{terminal_size, Width};
use crate::services::session_store::SessionStore;
use crate::structs::diff::diff_row::DiffRow;
use crate::structs::github::tree_entry::TreeEntry;
use crate::structs::issue::Issue;

const SIDE_BY_SIDE_MIN_WIDTH: usize = 100;
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub struct SessionLogger;

impl SessionLogger {
    pub fn print_tree(entries: &[TreeEntry]) {
        println!("\n📂 REPOSITORY TREE ({} entries)", entries.len());
        println!("{}", RULE);

        for (i, entry) in entries.iter().enumerate() {
            println!(
                "{:>4}. {}{} {}",
                i + 1,
                "  ".repeat(entry.depth()),
                entry.kind.marker(),
                entry.file_name()
            );
        }

        println!("{}", RULE);
    }

    /// Shows the issue under review with its lines from the analysed snapshot.
    pub fn print_current_issue(store: &SessionStore, context_lines: usize) {
        let Some((id, issue)) = store.current_issue() else {
            return;
        };

        let checkbox = if store.is_selected(id) { "[x]" } else { "[ ]" };
        println!("\n🔎 Issue {}/{} {} [{}] {}", id.0 + 1, store.issues().len(), checkbox, issue.tag, issue.line_label());
        println!("    ❔  {}", issue.description);

        let Some(snapshot) = store.snapshot() else {
            return;
        };

        let first = issue.start_line.saturating_sub(context_lines).max(1);
        let last = issue.end_line.saturating_add(context_lines);

        println!("{}", RULE);
        for (number, line) in Issue::numbered_lines(snapshot, first, last) {
            if number >= issue.start_line && number <= issue.end_line {
                println!("\x1b[33m> {:<4} | {}\x1b[0m", number, line);
            } else {
                println!("  {:<4} | {}", number, line);
            }
        }
        println!("{}", RULE);

        if store.buffer_diverged() {
            println!("⚠️ The buffer was edited after detection; lines refer to the analysed version.");
        }
    }

    pub fn print_diff(file_path: &str, original: &str, optimized: &str) {
        println!("\n📄 Diff preview for {}:", file_path);
        println!("{}", RULE);

        let width = terminal_size().map(|(Width(w), _)| w as usize).unwrap_or(80);
        let rows = Self::diff_rows(original, optimized);

        if rows.iter().all(|row| row.tag == ChangeTag::Equal) {
            println!("(no changes)");
        } else if width >= SIDE_BY_SIDE_MIN_WIDTH {
            for line in Self::side_by_side(&rows, width) {
                println!("{}", line);
            }
        } else {
            for line in Self::unified(&rows) {
                println!("{}", line);
            }
        }

        println!("{}", RULE);
    }

    pub fn diff_rows(original: &str, optimized: &str) -> Vec<DiffRow> {
        let diff = TextDiff::from_lines(original, optimized);

        diff.iter_all_changes()
            .map(|change| DiffRow {
                tag: change.tag(),
                old_line: change.old_index().map(|i| i + 1),
                new_line: change.new_index().map(|i| i + 1),
                text: change.value().trim_end_matches(['\r', '\n']).to_string(),
            })
            .collect()
    }

    pub fn unified(rows: &[DiffRow]) -> Vec<String> {
        rows.iter()
            .map(|row| match row.tag {
                ChangeTag::Delete => format!("\x1b[31m- {:<4} | {}\x1b[0m", row.old_line.unwrap_or_default(), row.text),
                ChangeTag::Insert => format!("\x1b[32m+ {:<4} | {}\x1b[0m", row.new_line.unwrap_or_default(), row.text),
                ChangeTag::Equal => format!("  {:<4} | {}", row.old_line.unwrap_or_default(), row.text),
            })
            .collect()
    }

    /// Two columns, original on the left. Deletions and insertions that
    /// follow each other share rows.
    pub fn side_by_side(rows: &[DiffRow], width: usize) -> Vec<String> {
        let column = width.saturating_sub(3) / 2;
        let mut lines = Vec::new();
        let mut deleted: Vec<&DiffRow> = Vec::new();
        let mut inserted: Vec<&DiffRow> = Vec::new();

        for row in rows {
            match row.tag {
                ChangeTag::Delete => deleted.push(row),
                ChangeTag::Insert => inserted.push(row),
                ChangeTag::Equal => {
                    Self::flush_pairs(&mut deleted, &mut inserted, &mut lines, column);
                    let cell = Self::cell(row, column);
                    lines.push(format!("{} │ {}", cell, cell));
                }
            }
        }
        Self::flush_pairs(&mut deleted, &mut inserted, &mut lines, column);

        lines
    }

    fn flush_pairs(deleted: &mut Vec<&DiffRow>, inserted: &mut Vec<&DiffRow>, lines: &mut Vec<String>, column: usize) {
        for i in 0..deleted.len().max(inserted.len()) {
            let left = deleted
                .get(i)
                .map(|row| format!("\x1b[31m{}\x1b[0m", Self::cell(row, column)))
                .unwrap_or_else(|| " ".repeat(column));
            let right = inserted
                .get(i)
                .map(|row| format!("\x1b[32m{}\x1b[0m", Self::cell(row, column)))
                .unwrap_or_default();
            lines.push(format!("{} │ {}", left, right));
        }
        deleted.clear();
        inserted.clear();
    }

    fn cell(row: &DiffRow, column: usize) -> String {
        let number = row.old_line.or(row.new_line).unwrap_or_default();
        let text: String = format!("{:<4} {}", number, row.text).chars().take(column).collect();
        format!("{:<width$}", text, width = column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_rows_mark_replaced_line() {
        let rows = SessionLogger::diff_rows("var x=1", "let x=1");
        let tags: Vec<ChangeTag> = rows.iter().map(|row| row.tag).collect();
        assert_eq!(tags, vec![ChangeTag::Delete, ChangeTag::Insert]);
        assert_eq!(rows[0].text, "var x=1");
        assert_eq!(rows[1].text, "let x=1");
    }

    #[test]
    fn unified_prefixes_changes() {
        let rows = SessionLogger::diff_rows("a\nvar x=1\nb\n", "a\nlet x=1\nb\n");
        let lines = SessionLogger::unified(&rows);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("- 2") && lines[1].contains("var x=1"));
        assert!(lines[2].contains("+ 2") && lines[2].contains("let x=1"));
    }

    #[test]
    fn side_by_side_pairs_replacements_on_one_row() {
        let rows = SessionLogger::diff_rows("a\nvar x=1\n", "a\nlet x=1\n");
        let lines = SessionLogger::side_by_side(&rows, 100);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("var x=1") && lines[1].contains("let x=1"));
    }
}
