//! Core trait definition for the repository pattern
//!
//! The repository abstracts where rules live so the SDK can run against an
//! in-memory store in tests and a durable backend in production without
//! touching the evaluation path.

use async_trait::async_trait;
use intelliclaim_core::Rule;

use crate::RepositoryResult;

/// Storage interface for claim rules
///
/// # Implementation Notes
///
/// - All operations are async for non-blocking I/O
/// - `put` is an upsert keyed on `rule_id`
/// - `list` must return rules in insertion order; rule order is the
///   evaluation order reported back to reviewers
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Load a rule by ID
    ///
    /// # Errors
    /// Returns [`RepositoryError::NotFound`](crate::RepositoryError::NotFound)
    /// when no rule has the given ID.
    async fn get(&self, rule_id: &str) -> RepositoryResult<Rule>;

    /// Save or update a rule, keyed on `rule_id`
    async fn put(&self, rule: Rule) -> RepositoryResult<()>;

    /// List all rules in insertion order
    async fn list(&self) -> RepositoryResult<Vec<Rule>>;

    /// List only active rules, in insertion order
    async fn list_active(&self) -> RepositoryResult<Vec<Rule>> {
        let rules = self.list().await?;
        Ok(rules.into_iter().filter(|rule| rule.is_active).collect())
    }

    /// Check whether a rule with the given ID exists
    async fn exists(&self, rule_id: &str) -> RepositoryResult<bool>;

    /// Delete a rule by ID
    ///
    /// # Errors
    /// Returns [`RepositoryError::NotFound`](crate::RepositoryError::NotFound)
    /// when no rule has the given ID.
    async fn delete(&self, rule_id: &str) -> RepositoryResult<()>;
}
