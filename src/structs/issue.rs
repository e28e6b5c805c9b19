use serde::{Deserialize, Serialize};

/// Position of an issue in the detection result that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IssueId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub start_line: usize,
    pub end_line: usize,
    pub tag: String,
    pub description: String,
}

impl Issue {
    /// Lines `start_line..=end_line` of `content` (1-based). Out-of-range
    /// bounds are clamped; an inverted range yields nothing.
    pub fn snippet<'a>(&self, content: &'a str) -> Vec<(usize, &'a str)> {
        Self::numbered_lines(content, self.start_line, self.end_line)
    }

    pub fn numbered_lines(content: &str, first: usize, last: usize) -> Vec<(usize, &str)> {
        let start = first.max(1);
        if last < start {
            return Vec::new();
        }

        content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .skip(start - 1)
            .take(last - start + 1)
            .collect()
    }

    pub fn line_label(&self) -> String {
        if self.start_line == self.end_line {
            format!("line {}", self.start_line)
        } else {
            format!("lines {}-{}", self.start_line, self.end_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(start_line: usize, end_line: usize) -> Issue {
        Issue {
            start_line,
            end_line,
            tag: "style".to_string(),
            description: "use let".to_string(),
        }
    }

    #[test]
    fn snippet_returns_numbered_lines() {
        let content = "a\nb\nc\nd";
        assert_eq!(issue(2, 3).snippet(content), vec![(2, "b"), (3, "c")]);
    }

    #[test]
    fn snippet_clamps_past_end_of_file() {
        let content = "a\nb";
        assert_eq!(issue(2, 10).snippet(content), vec![(2, "b")]);
        assert!(issue(5, 6).snippet(content).is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(issue(3, 1).snippet("a\nb\nc").is_empty());
    }

    #[test]
    fn issue_json_uses_snake_case_fields() {
        let parsed: Issue = serde_json::from_str(
            r#"{"start_line":1,"end_line":1,"tag":"style","description":"use let"}"#,
        )
        .unwrap();
        assert_eq!(parsed, issue(1, 1));
        assert_eq!(parsed.line_label(), "line 1");
    }
}
