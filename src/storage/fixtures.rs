use anyhow::Result;

use super::{
    entities::Dataset,
    loader::{CsvDatasetLoader, DatasetLoader},
};

/// Users 10 and 11 with a handful of days in September 2013.
pub const TEST_DATA_CSV: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/test_data.csv");

pub async fn test_dataset() -> Result<Dataset> {
    CsvDatasetLoader::new(TEST_DATA_CSV).load().await
}
