//! Field status types for config validation.
//!
//! Used to check if users set fields with special status
//! (experimental, not_implemented, deprecated).

use super::FieldPath;
use crate::config::ConfigDiagnostics;

/// Field status for validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Experimental,
    NotImplemented,
    Deprecated,
}

impl FieldStatus {
    /// Get status label for display.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Experimental => "experimental",
            Self::NotImplemented => "not implemented",
            Self::Deprecated => "deprecated",
        }
    }
}

/// Check field status and report diagnostics
///
/// Called by generated `validate_field_status` methods when a field
/// with special status differs from its default value
pub fn check_field_status(field_path: &str, status: FieldStatus, diag: &mut ConfigDiagnostics) {
    if status == FieldStatus::Experimental && diag.allow_experimental {
        return;
    }

    let path = FieldPath::new(Box::leak(field_path.to_string().into_boxed_str()));
    report(path, status, "field", diag);
}

/// Check section-level status and report diagnostics
///
/// Called when a section (struct) has a special status and any of its
/// fields are set to non-default values
pub fn check_section_status(section: &str, status: FieldStatus, diag: &mut ConfigDiagnostics) {
    if status == FieldStatus::Experimental && diag.allow_experimental {
        return;
    }

    let path = FieldPath::new(Box::leak(format!("[{section}]").into_boxed_str()));
    report(path, status, "section", diag);
}

fn report(path: FieldPath, status: FieldStatus, kind: &str, diag: &mut ConfigDiagnostics) {
    match status {
        FieldStatus::NotImplemented => {
            diag.error_with_hint(
                path,
                format!("this {kind} is {}", status.label()),
                format!("remove this {kind}"),
            );
        }
        FieldStatus::Deprecated => {
            diag.warn(
                path,
                format!("this {kind} is {} and will be removed", status.label()),
            );
        }
        FieldStatus::Experimental => {
            diag.experimental_hint(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experimental_is_hint_not_error() {
        let mut diag = ConfigDiagnostics::new();
        check_field_status("media.renditions", FieldStatus::Experimental, &mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.hints().len(), 1);
    }

    #[test]
    fn test_experimental_suppressed_when_allowed() {
        let mut diag = ConfigDiagnostics::with_allow_experimental(true);
        check_field_status("media.renditions", FieldStatus::Experimental, &mut diag);
        assert!(diag.hints().is_empty());
    }

    #[test]
    fn test_not_implemented_is_error() {
        let mut diag = ConfigDiagnostics::new();
        check_section_status("media", FieldStatus::NotImplemented, &mut diag);
        assert!(diag.has_errors());
        assert_eq!(diag.errors()[0].field.as_str(), "[media]");
    }
}
