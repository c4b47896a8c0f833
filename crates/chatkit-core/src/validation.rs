//! Upload candidate validation.
//!
//! The validator gates candidates before any network call. Both rules are
//! evaluated, not short-circuited, so a caller can surface every
//! violation for a file at once.

use serde::Serialize;

use crate::mime::AllowLists;
use crate::models::UploadCandidate;

/// Outcome of validating one candidate. The candidate is acceptable iff
/// `violations` is empty. Never persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Size and content-type gate for upload candidates. No side effects.
pub struct Validator {
    max_size_bytes: usize,
    allow: AllowLists,
}

impl Validator {
    pub fn new(max_size_bytes: usize, allow: AllowLists) -> Self {
        Self {
            max_size_bytes,
            allow,
        }
    }

    pub fn max_size_bytes(&self) -> usize {
        self.max_size_bytes
    }

    /// Validate a candidate against the size ceiling and the allow-list
    /// union.
    pub fn validate(&self, candidate: &UploadCandidate) -> ValidationReport {
        let mut violations = Vec::new();

        if candidate.size_bytes() > self.max_size_bytes {
            violations.push(format!(
                "File size exceeds limit of {} MB",
                self.max_size_bytes / (1024 * 1024)
            ));
        }

        if !self.allow.is_allowed(&candidate.content_type) {
            violations.push(format!(
                "Unsupported file type: {}",
                candidate.content_type
            ));
        }

        ValidationReport { violations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_validator() -> Validator {
        Validator::new(50 * 1024 * 1024, AllowLists::default())
    }

    fn candidate(name: &str, content_type: &str, size: usize) -> UploadCandidate {
        UploadCandidate::new(name, content_type, vec![0u8; size])
    }

    #[test]
    fn test_valid_candidate() {
        let report = test_validator().validate(&candidate("photo.jpg", "image/jpeg", 2 * 1024 * 1024));
        assert!(report.is_valid());
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_oversized_candidate() {
        let report = test_validator().validate(&candidate("big.mp4", "video/mp4", 60 * 1024 * 1024));
        assert!(!report.is_valid());
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].contains("50 MB"));
    }

    #[test]
    fn test_size_violation_regardless_of_content_type() {
        // Oversized files report the size violation even when the type is fine
        let report = test_validator().validate(&candidate("big.jpg", "image/jpeg", 60 * 1024 * 1024));
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].contains("exceeds limit"));
    }

    #[test]
    fn test_unsupported_type() {
        let report = test_validator().validate(&candidate("a.bin", "application/x-unknown", 1024));
        assert!(!report.is_valid());
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].contains("Unsupported file type"));
    }

    #[test]
    fn test_violations_co_occur() {
        let report =
            test_validator().validate(&candidate("a.bin", "application/x-unknown", 60 * 1024 * 1024));
        assert_eq!(report.violations.len(), 2);
        assert!(report.violations[0].contains("exceeds limit"));
        assert!(report.violations[1].contains("Unsupported file type"));
    }

    #[test]
    fn test_boundary_size_is_valid() {
        let validator = Validator::new(1024, AllowLists::default());
        let report = validator.validate(&candidate("a.jpg", "image/jpeg", 1024));
        assert!(report.is_valid());
    }
}
