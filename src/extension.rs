//! Language label to file extension mapping.

/// Extension used when nothing is known about the code.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Lowercase language token to dotted extension.
pub const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("text", ".txt"),
    ("plain", ".txt"),
    ("javascript", ".js"),
    ("js", ".js"),
    ("typescript", ".ts"),
    ("ts", ".ts"),
    ("python", ".py"),
    ("py", ".py"),
    ("html", ".html"),
    ("css", ".css"),
    ("json", ".json"),
    ("bash", ".sh"),
    ("sh", ".sh"),
    ("shell", ".sh"),
    ("rust", ".rs"),
    ("go", ".go"),
    ("java", ".java"),
    ("cpp", ".cpp"),
    ("c", ".c"),
    ("ruby", ".rb"),
    ("php", ".php"),
    ("markdown", ".md"),
    ("md", ".md"),
    ("yaml", ".yml"),
    ("yml", ".yml"),
    ("sql", ".sql"),
    ("xml", ".xml"),
];

/// Resolve a language label to a dotted extension.
///
/// Known labels are matched case-insensitively. An unknown label is taken as
/// a literal extension and keeps its casing, so `"COBOL"` becomes `".COBOL"`.
/// An empty label yields [`DEFAULT_EXTENSION`].
pub fn resolve_extension(label: &str) -> String {
    let lower = label.to_lowercase();
    if let Some((_, ext)) = EXTENSION_TABLE.iter().find(|(lang, _)| *lang == lower) {
        return (*ext).to_string();
    }

    if label.is_empty() {
        DEFAULT_EXTENSION.to_string()
    } else {
        format!(".{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(resolve_extension("rust"), ".rs");
        assert_eq!(resolve_extension("Python"), ".py");
        assert_eq!(resolve_extension("SHELL"), ".sh");
        assert_eq!(resolve_extension("yaml"), ".yml");
        assert_eq!(resolve_extension("plain"), ".txt");
    }

    #[test]
    fn test_unknown_label_keeps_case() {
        assert_eq!(resolve_extension("COBOL"), ".COBOL");
        assert_eq!(resolve_extension("kt"), ".kt");
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(resolve_extension(""), DEFAULT_EXTENSION);
    }

    #[test]
    fn test_table_keys_are_lowercase() {
        for (lang, ext) in EXTENSION_TABLE {
            assert_eq!(*lang, lang.to_lowercase());
            assert!(ext.starts_with('.'));
        }
    }

    proptest! {
        #[test]
        fn prop_resolve_is_total(label in ".*") {
            let ext = resolve_extension(&label);
            prop_assert!(ext.starts_with('.'));
            prop_assert!(ext.len() > 1);
        }

        #[test]
        fn prop_known_labels_ignore_case(idx in 0..EXTENSION_TABLE.len(), upper in any::<bool>()) {
            let (lang, ext) = EXTENSION_TABLE[idx];
            let label = if upper { lang.to_uppercase() } else { lang.to_string() };
            prop_assert_eq!(resolve_extension(&label), ext);
        }
    }
}
