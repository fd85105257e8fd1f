// Repository trait for data source hierarchy lookups
use crate::domain::attribute::{Attribute, DataSource};
use async_trait::async_trait;

#[async_trait]
pub trait HierarchyRepository: Send + Sync {
    /// Hierarchy levels a user may drill into from `attribute` within `data_source`.
    /// Timeouts and retries are the implementation's concern.
    async fn fetch_hierarchy_levels(
        &self,
        attribute: &Attribute,
        data_source: &DataSource,
    ) -> anyhow::Result<Vec<Attribute>>;
}
