//! Repository adapters for persistence layer

use std::path::PathBuf;
use std::sync::Arc;

use packgauge_domain::model::NumberFieldTable;
use packgauge_infra::number_field_loader::load_number_fields;
use packgauge_infra::persistence::FileContainerRepository;
use packgauge_types::Result;

use crate::app::PackingService;
use crate::config::Config;

/// Open file-based container repository
pub fn open_container_repo(config: &Config) -> Result<FileContainerRepository> {
    let store_dir = config.store_dir()?;
    FileContainerRepository::open(store_dir)
}

/// Open file-based container repository at a custom directory
pub fn open_container_repo_at(store_dir: PathBuf) -> Result<FileContainerRepository> {
    FileContainerRepository::open(store_dir)
}

/// Build the number field table once for the process
pub fn load_field_table(config: &Config) -> Result<Arc<NumberFieldTable>> {
    load_number_fields(config.fields_path.as_deref()).map(Arc::new)
}

/// Wire a packing service from config
pub fn open_packing_service(config: &Config) -> Result<PackingService<FileContainerRepository>> {
    let repo = open_container_repo(config)?;
    let fields = load_field_table(config)?;
    Ok(PackingService::new(repo, fields))
}
