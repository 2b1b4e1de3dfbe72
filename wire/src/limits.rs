//! Configurable limits for bounded decoding.

/// Framing limits for record stream decoding.
///
/// These limits are enforced while framing records to bound memory use on
/// hostile input. Record body parsing belongs to higher layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum size of a whole sprite body in bytes.
    pub max_body_bytes: usize,

    /// Maximum number of records in one stream, `End` excluded.
    pub max_records: usize,

    /// Maximum length of a single record body in bytes.
    pub max_record_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // Sprites embedding large bitmaps or sound blocks run to a few MB
            max_body_bytes: 16 * 1024 * 1024,
            max_records: 1 << 20,
            max_record_len: 8 * 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_body_bytes: 4096,
            max_records: 64,
            max_record_len: 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_body_bytes: usize::MAX,
            max_records: usize::MAX,
            max_record_len: usize::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testing_limits_smaller() {
        let test_limits = Limits::for_testing();
        let default_limits = Limits::default();

        assert!(test_limits.max_body_bytes < default_limits.max_body_bytes);
        assert!(test_limits.max_records < default_limits.max_records);
        assert!(test_limits.max_record_len < default_limits.max_record_len);
    }

    #[test]
    fn unlimited_limits() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_body_bytes, usize::MAX);
        assert_eq!(limits.max_records, usize::MAX);
        assert_eq!(limits.max_record_len, usize::MAX);
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_records, 64);
    }
}
