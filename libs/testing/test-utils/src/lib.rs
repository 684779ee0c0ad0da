//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied and automatic cleanup
//! - `TestDataBuilder`: deterministic test data derived from the test name
//! - `assertions`: custom assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.name("widget", "main");
//! }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic values
///
/// Names embed a seed derived from the test name so rows created by different
/// tests never collide when they share a database.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("widget", "main"), "test-widget-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Deterministic stock level in `0..1000`
    pub fn stock(&self) -> i32 {
        (self.seed % 1000) as i32
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `id` is a six digit product identifier without a leading zero
    pub fn assert_product_id(id: &str) {
        assert_eq!(id.len(), 6, "product id {:?} should have 6 digits", id);
        assert!(
            id.chars().all(|c| c.is_ascii_digit()),
            "product id {:?} should be numeric",
            id
        );
        assert!(!id.starts_with('0'), "product id {:?} has a leading zero", id);
    }
}
