use async_trait::async_trait;
use anyhow::Result;
use crate::models::DataPoint;
use crate::series::registry::SourceType;

pub mod fred;
pub mod local;

#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;
    fn kind(&self) -> SourceType;
    async fn fetch_data(&self, series_id: &str) -> Result<Vec<DataPoint>>;
}
