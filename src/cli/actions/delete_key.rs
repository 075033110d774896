//! DeleteKey action.
//!
//! Deletes unused keys from dictionary files. Used by the `locscan prune` command.

use std::collections::BTreeMap;

use super::{operation::Operation, traits::Action};
use crate::core::scanner::UnusedKeyIssue;

/// Action to delete keys from dictionary files, one operation per file.
pub struct DeleteKey;

impl Action<UnusedKeyIssue> for DeleteKey {
    fn to_operations(issues: &[UnusedKeyIssue]) -> Vec<Operation> {
        let mut by_file: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for issue in issues {
            by_file
                .entry(issue.location.file_path.as_str())
                .or_default()
                .push(issue.key.clone());
        }
        by_file
            .into_iter()
            .map(|(file_path, keys)| Operation::DeleteKeys {
                file_path: file_path.to_string(),
                keys,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locales::MessageLocation;

    fn issue(locale: &str, key: &str) -> UnusedKeyIssue {
        let file_path = format!("_locales/{}/messages.json", locale);
        UnusedKeyIssue {
            locale: locale.to_string(),
            key: key.to_string(),
            location: MessageLocation::new(file_path, 2),
        }
    }

    #[test]
    fn test_groups_keys_per_file() {
        let ops = DeleteKey::to_operations(&[issue("fr", "a"), issue("en", "a"), issue("fr", "b")]);

        assert_eq!(
            ops,
            vec![
                Operation::DeleteKeys {
                    file_path: "_locales/en/messages.json".to_string(),
                    keys: vec!["a".to_string()],
                },
                Operation::DeleteKeys {
                    file_path: "_locales/fr/messages.json".to_string(),
                    keys: vec!["a".to_string(), "b".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_no_issues_no_operations() {
        assert!(DeleteKey::to_operations(&[]).is_empty());
    }
}
