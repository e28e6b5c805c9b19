use once_cell::sync::Lazy;
use regex::Regex;
use crate::errors::{CodeHackError, CodeHackResult};
use crate::structs::github::blob_ref::BlobRef;
use crate::structs::github::repo_ref::RepoRef;
use crate::structs::github::tree_entry::TreeEntry;

static REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([^/?#\s]+)/([^/?#\s]+)(?:[/?#]\S*)?$")
        .expect("repository URL pattern is valid")
});

static BLOB_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/repos/([^/?#\s]+)/([^/?#\s]+)/git/blobs/[0-9A-Za-z]+/?$")
        .expect("blob URL pattern is valid")
});

/// Resolves `github.com/<owner>/<repo>` to its owner and name. The
/// segments are taken verbatim from the input.
pub fn parse_repo_url(url: &str) -> CodeHackResult<RepoRef> {
    let trimmed = url.trim();
    let captures = REPO_URL.captures(trimmed).ok_or_else(|| {
        CodeHackError::invalid_input(
            url,
            "a repository URL like https://github.com/<owner>/<repo>",
            "Copy the repository URL from the GitHub address bar",
        )
    })?;

    Ok(RepoRef::new(&captures[1], &captures[2]))
}

/// Derives the repository a tree entry belongs to from its blob API URL.
pub fn parse_blob_url(entry: &TreeEntry) -> CodeHackResult<BlobRef> {
    let captures = BLOB_URL.captures(entry.url.trim()).ok_or_else(|| {
        CodeHackError::invalid_input(
            &entry.url,
            "a blob URL like https://api.github.com/repos/<owner>/<repo>/git/blobs/<sha>",
            "Reload the repository tree and select the file again",
        )
    })?;

    Ok(BlobRef {
        repo: RepoRef::new(&captures[1], &captures[2]),
        path: entry.path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::tree_entry_kind::TreeEntryKind;
    use proptest::prelude::*;

    fn blob(url: &str, path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: TreeEntryKind::Blob,
            url: url.to_string(),
            mode: "100644".to_string(),
            sha: "abc123".to_string(),
            size: Some(7),
        }
    }

    #[test]
    fn accepts_common_repository_url_shapes() {
        for url in [
            "https://github.com/acme/widgets",
            "http://github.com/acme/widgets/",
            "github.com/acme/widgets",
            "https://www.github.com/acme/widgets",
            "https://github.com/acme/widgets/tree/main/src",
            "https://github.com/acme/widgets?tab=readme",
            "  https://github.com/acme/widgets#readme  ",
        ] {
            assert_eq!(parse_repo_url(url).unwrap(), RepoRef::new("acme", "widgets"), "{}", url);
        }
    }

    #[test]
    fn rejects_urls_without_owner_and_repo() {
        for url in [
            "",
            "https://github.com/acme",
            "https://github.com/",
            "https://gitlab.com/acme/widgets",
            "https://notgithub.com/acme/widgets",
            "acme/widgets",
            "https://github.com/ac me/widgets",
        ] {
            let error = parse_repo_url(url).unwrap_err();
            assert!(error.is_invalid_input(), "{}", url);
        }
    }

    #[test]
    fn blob_url_yields_owner_repo_and_entry_path() {
        let entry = blob("https://api.github.com/repos/acme/widgets/git/blobs/3f1e2d", "src/a.js");
        let blob_ref = parse_blob_url(&entry).unwrap();
        assert_eq!(blob_ref.repo, RepoRef::new("acme", "widgets"));
        assert_eq!(blob_ref.path, "src/a.js");
    }

    #[test]
    fn blob_url_pattern_ignores_host() {
        let entry = blob("http://127.0.0.1:40123/repos/acme/widgets/git/blobs/3f1e2d", "README.md");
        assert_eq!(parse_blob_url(&entry).unwrap().repo, RepoRef::new("acme", "widgets"));
    }

    #[test]
    fn tree_urls_are_not_blob_urls() {
        let entry = blob("https://api.github.com/repos/acme/widgets/git/trees/3f1e2d", "src");
        assert!(parse_blob_url(&entry).unwrap_err().is_invalid_input());
    }

    proptest! {
        #[test]
        fn owner_and_repo_are_byte_identical(
            owner in "[A-Za-z0-9][A-Za-z0-9-]{0,38}",
            repo in "[A-Za-z0-9_.-]{1,100}",
            suffix in prop_oneof![Just(""), Just("/"), Just("/tree/main"), Just("?tab=code"), Just("#readme")],
        ) {
            let url = format!("https://github.com/{}/{}{}", owner, repo, suffix);
            let parsed = parse_repo_url(&url).unwrap();
            prop_assert_eq!(parsed.owner, owner);
            prop_assert_eq!(parsed.name, repo);
        }

        #[test]
        fn urls_off_github_are_rejected(host in "[a-z]{3,10}\\.(org|net|io)", owner in "[a-z]{1,10}", repo in "[a-z]{1,10}") {
            let url = format!("https://{}/{}/{}", host, owner, repo);
            prop_assert!(parse_repo_url(&url).unwrap_err().is_invalid_input());
        }
    }
}
