//! In-memory rule repository
//!
//! Backing store is a `Vec` rather than a map so that insertion order, which
//! doubles as evaluation order, is preserved exactly.

use async_trait::async_trait;
use intelliclaim_core::Rule;
use tokio::sync::RwLock;

use crate::{RepositoryError, RepositoryResult, RuleRepository};

/// In-memory repository, suitable for tests and single-process deployments
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    rules: RwLock<Vec<Rule>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an initial rule set
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        InMemoryRepository {
            rules: RwLock::new(rules),
        }
    }

    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rules.read().await.is_empty()
    }
}

#[async_trait]
impl RuleRepository for InMemoryRepository {
    async fn get(&self, rule_id: &str) -> RepositoryResult<Rule> {
        let rules = self.rules.read().await;
        rules
            .iter()
            .find(|rule| rule.rule_id == rule_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(rule_id.to_string()))
    }

    async fn put(&self, rule: Rule) -> RepositoryResult<()> {
        let mut rules = self.rules.write().await;
        match rules.iter_mut().find(|existing| existing.rule_id == rule.rule_id) {
            Some(existing) => {
                tracing::debug!(rule_id = %rule.rule_id, "rule updated");
                *existing = rule;
            }
            None => {
                tracing::debug!(rule_id = %rule.rule_id, "rule stored");
                rules.push(rule);
            }
        }
        Ok(())
    }

    async fn list(&self) -> RepositoryResult<Vec<Rule>> {
        Ok(self.rules.read().await.clone())
    }

    async fn exists(&self, rule_id: &str) -> RepositoryResult<bool> {
        let rules = self.rules.read().await;
        Ok(rules.iter().any(|rule| rule.rule_id == rule_id))
    }

    async fn delete(&self, rule_id: &str) -> RepositoryResult<()> {
        let mut rules = self.rules.write().await;
        let before = rules.len();
        rules.retain(|rule| rule.rule_id != rule_id);
        if rules.len() == before {
            return Err(RepositoryError::NotFound(rule_id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intelliclaim_core::Severity;

    fn rule(id: &str) -> Rule {
        Rule::new(id, "Patient", "PatientAge < 18", Severity::Warning, "tester")
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let repo = InMemoryRepository::new();
        repo.put(rule("R-001")).await.unwrap();

        let loaded = repo.get("R-001").await.unwrap();
        assert_eq!(loaded.rule_id, "R-001");
        assert!(repo.exists("R-001").await.unwrap());
        assert!(!repo.exists("R-999").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_rule() {
        let repo = InMemoryRepository::new();
        let err = repo.get("R-404").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(id) if id == "R-404"));
    }

    #[tokio::test]
    async fn test_put_is_upsert() {
        let repo = InMemoryRepository::new();
        repo.put(rule("R-001")).await.unwrap();

        let mut updated = rule("R-001");
        updated.category = "Policy".to_string();
        repo.put(updated).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.get("R-001").await.unwrap().category, "Policy");
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let repo = InMemoryRepository::new();
        repo.put(rule("R-002")).await.unwrap();
        repo.put(rule("R-001")).await.unwrap();
        repo.put(rule("R-003")).await.unwrap();

        let ids: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.rule_id)
            .collect();
        assert_eq!(ids, vec!["R-002", "R-001", "R-003"]);
    }

    #[tokio::test]
    async fn test_list_active_filters_inactive() {
        let repo = InMemoryRepository::new();
        let mut active = rule("R-001");
        active.is_active = true;
        repo.put(active).await.unwrap();
        repo.put(rule("R-002")).await.unwrap();

        let active = repo.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].rule_id, "R-001");
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryRepository::new();
        repo.put(rule("R-001")).await.unwrap();
        repo.delete("R-001").await.unwrap();
        assert!(repo.is_empty().await);

        let err = repo.delete("R-001").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }
}
