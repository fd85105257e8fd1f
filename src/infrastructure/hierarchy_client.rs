// Hierarchy service client - HTTP implementation of HierarchyRepository
use crate::application::hierarchy_repository::HierarchyRepository;
use crate::domain::attribute::{Attribute, DataSource};
use crate::infrastructure::config::HierarchySettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpHierarchyRepository {
    host: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct HierarchyDto {
    #[allow(dead_code)]
    title: String,
    #[serde(default)]
    levels: Vec<HierarchyLevelDto>,
}

#[derive(Debug, Deserialize)]
struct HierarchyLevelDto {
    dim: String,
    title: String,
}

impl HttpHierarchyRepository {
    pub fn new(settings: &HierarchySettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build hierarchy HTTP client")?;

        Ok(Self {
            host: settings.host.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            client,
        })
    }

    fn build_hierarchies_url(&self, attribute: &Attribute, data_source: &DataSource) -> String {
        format!(
            "{}/api/elasticubes/{}/hierarchies?dim={}&alwaysIncluded=true",
            self.host,
            urlencoding::encode(data_source.identity()),
            urlencoding::encode(&attribute.expression)
        )
    }

    async fn fetch_hierarchies(&self, url: &str) -> Result<Vec<HierarchyDto>> {
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to hierarchy service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Hierarchy query failed with status {}: {}", status, body);
        }

        response
            .json::<Vec<HierarchyDto>>()
            .await
            .context("Failed to parse hierarchy response")
    }
}

/// Levels below `attribute` in every hierarchy that contains it, without
/// repeats and in hierarchy order
fn levels_below(hierarchies: &[HierarchyDto], attribute: &Attribute, data_source: &DataSource) -> Vec<Attribute> {
    let mut levels: Vec<Attribute> = Vec::new();

    for hierarchy in hierarchies {
        let Some(position) = hierarchy
            .levels
            .iter()
            .position(|level| level.dim == attribute.expression)
        else {
            continue;
        };

        for level in &hierarchy.levels[position + 1..] {
            if levels.iter().any(|l| l.expression == level.dim) {
                continue;
            }
            levels.push(
                Attribute::new(level.dim.clone(), level.title.clone())
                    .with_data_source(data_source.clone()),
            );
        }
    }

    levels
}

#[async_trait]
impl HierarchyRepository for HttpHierarchyRepository {
    async fn fetch_hierarchy_levels(
        &self,
        attribute: &Attribute,
        data_source: &DataSource,
    ) -> Result<Vec<Attribute>> {
        let url = self.build_hierarchies_url(attribute, data_source);
        tracing::debug!("Fetching hierarchies: {}", url);

        let hierarchies = self.fetch_hierarchies(&url).await?;
        let levels = levels_below(&hierarchies, attribute, data_source);

        tracing::debug!(
            "Found {} drill levels below {} in {} hierarchies",
            levels.len(),
            attribute.expression,
            hierarchies.len()
        );
        Ok(levels)
    }
}
