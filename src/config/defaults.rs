//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn posts_dir() -> PathBuf {
        "posts".into()
    }
}

// ============================================================================
// [notebook] Section Defaults
// ============================================================================

pub mod notebook {
    use super::super::NotebookEngine;

    pub fn engine() -> NotebookEngine {
        NotebookEngine::default()
    }

    pub fn ext() -> String {
        "ipynb".into()
    }

    pub fn page_attribute_prefix() -> String {
        String::new()
    }

    pub fn command() -> Vec<String> {
        vec!["jupyter".into(), "nbconvert".into()]
    }

    pub fn template() -> String {
        "basic".into()
    }

    pub fn safe() -> Option<String> {
        None
    }
}
