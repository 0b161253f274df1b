//! File-based container repository implementation

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use packgauge_domain::model::{ContainedItem, Container, ContainerKind, ContentLink, Item};
use packgauge_domain::repository::ContainerRepository;
use packgauge_types::{Error, Result, ValidationError};

const STORE_FILE: &str = "packing.json";
const LOCK_FILE: &str = "packing.lock";

/// Container as stored: contents are links into the item catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContainerRecord {
    id: String,
    name: String,
    #[serde(default)]
    kind: ContainerKind,
    max_capacity: f64,
    max_weight: f64,
    #[serde(default)]
    tare_weight: f64,
    #[serde(default)]
    contents: Vec<ContentLink>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PackingData {
    #[serde(default)]
    containers: HashMap<String, ContainerRecord>,
    #[serde(default)]
    items: HashMap<String, Item>,
}

/// File-based implementation of ContainerRepository
///
/// Stores containers and the item catalogue in a single JSON file. Several
/// handles, in this process or in others, may share one store: every call
/// takes an advisory lock on `packing.lock` (shared for reads, exclusive for
/// writes) and reloads the file under it, so a write never overwrites one it
/// has not seen. Every write is persisted before the call returns.
pub struct FileContainerRepository {
    store_path: PathBuf,
    lock_path: PathBuf,
    data: Mutex<PackingData>,
}

impl FileContainerRepository {
    /// Create or load a repository in `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let repo = Self {
            store_path: store_dir.join(STORE_FILE),
            lock_path: store_dir.join(LOCK_FILE),
            data: Mutex::new(PackingData::default()),
        };

        // Fails early on a corrupt store
        repo.read(|_| Ok(()))?;
        tracing::debug!(path = %repo.store_path.display(), "opened container store");
        Ok(repo)
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    fn lock(&self) -> Result<MutexGuard<'_, PackingData>> {
        self.data
            .lock()
            .map_err(|_| Error::Store("container store lock poisoned".to_string()))
    }

    fn lock_file(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;
        Ok(file)
    }

    fn load(&self) -> Result<PackingData> {
        if !self.store_path.exists() {
            return Ok(PackingData::default());
        }
        let reader = BufReader::new(File::open(&self.store_path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Run `f` on the current on-disk state under a shared lock
    fn read<T>(&self, f: impl FnOnce(&PackingData) -> Result<T>) -> Result<T> {
        let mut data = self.lock()?;
        let lock_file = self.lock_file()?;
        FileExt::lock_shared(&lock_file)?;
        *data = self.load()?;
        f(&data)
    }

    /// Run `f` on the current on-disk state under an exclusive lock.
    /// The lock is held until `f` has persisted its change.
    fn write<T>(&self, f: impl FnOnce(&mut PackingData) -> Result<T>) -> Result<T> {
        let mut data = self.lock()?;
        let lock_file = self.lock_file()?;
        FileExt::lock_exclusive(&lock_file)?;
        *data = self.load()?;
        f(&mut data)
    }

    /// Write to a sibling temp file, then rename over the store
    fn persist(&self, data: &PackingData) -> Result<()> {
        let tmp_path = self.store_path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, data)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.store_path)?;
        tracing::debug!(path = %self.store_path.display(), "persisted container store");
        Ok(())
    }

    /// Swap in a container record, rolling back if the write fails
    fn replace_record(&self, data: &mut PackingData, record: ContainerRecord) -> Result<()> {
        let id = record.id.clone();
        let previous = data.containers.insert(id.clone(), record);
        if let Err(err) = self.persist(data) {
            match previous {
                Some(prev) => data.containers.insert(id, prev),
                None => data.containers.remove(&id),
            };
            return Err(err);
        }
        Ok(())
    }

    fn record(data: &PackingData, container_id: &str) -> Result<ContainerRecord> {
        data.containers
            .get(container_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("container {}", container_id)))
    }

    fn resolve(record: &ContainerRecord, items: &HashMap<String, Item>) -> Container {
        let contents = record
            .contents
            .iter()
            .filter_map(|link| match items.get(&link.item_id) {
                Some(item) => Some(ContainedItem::new(item.clone(), link.quantity)),
                None => {
                    tracing::warn!(
                        container = %record.id,
                        item = %link.item_id,
                        "skipping link to missing item"
                    );
                    None
                }
            })
            .collect();

        Container {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: record.kind,
            max_capacity: record.max_capacity,
            max_weight: record.max_weight,
            tare_weight: record.tare_weight,
            contents,
        }
    }
}

impl ContainerRepository for FileContainerRepository {
    fn find_container(&self, id: &str) -> Result<Option<Container>> {
        self.read(|data| {
            Ok(data
                .containers
                .get(id)
                .map(|record| Self::resolve(record, &data.items)))
        })
    }

    fn find_all_containers(&self) -> Result<Vec<Container>> {
        self.read(|data| {
            let mut containers: Vec<_> = data
                .containers
                .values()
                .map(|record| Self::resolve(record, &data.items))
                .collect();
            containers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            Ok(containers)
        })
    }

    fn save_container(&self, container: &Container) -> Result<()> {
        self.write(|data| {
            let contents = data
                .containers
                .get(&container.id)
                .map(|existing| existing.contents.clone())
                .unwrap_or_default();

            let record = ContainerRecord {
                id: container.id.clone(),
                name: container.name.clone(),
                kind: container.kind,
                max_capacity: container.max_capacity,
                max_weight: container.max_weight,
                tare_weight: container.tare_weight,
                contents,
                updated_at: Utc::now(),
            };
            self.replace_record(data, record)
        })
    }

    fn find_item(&self, id: &str) -> Result<Option<Item>> {
        self.read(|data| Ok(data.items.get(id).cloned()))
    }

    fn find_all_items(&self) -> Result<Vec<Item>> {
        self.read(|data| {
            let mut items: Vec<_> = data.items.values().cloned().collect();
            items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
            Ok(items)
        })
    }

    fn save_item(&self, item: &Item) -> Result<()> {
        self.write(|data| {
            let previous = data.items.insert(item.id.clone(), item.clone());
            if let Err(err) = self.persist(data) {
                match previous {
                    Some(prev) => data.items.insert(item.id.clone(), prev),
                    None => data.items.remove(&item.id),
                };
                return Err(err);
            }
            Ok(())
        })
    }

    fn add_contents(
        &self,
        container_id: &str,
        links: &[ContentLink],
        admit: &dyn Fn(&Container) -> Result<()>,
    ) -> Result<()> {
        self.write(|data| {
            let mut record = Self::record(data, container_id)?;

            if let Some(missing) = links.iter().find(|l| !data.items.contains_key(&l.item_id)) {
                return Err(Error::NotFound(format!("item {}", missing.item_id)));
            }

            admit(&Self::resolve(&record, &data.items))?;

            for link in links {
                match record.contents.iter_mut().find(|c| c.item_id == link.item_id) {
                    Some(existing) => {
                        existing.quantity = existing.quantity.checked_add(link.quantity).ok_or_else(|| {
                            ValidationError::QuantityOverflow {
                                item: link.item_id.clone(),
                            }
                        })?;
                    }
                    None => record.contents.push(link.clone()),
                }
            }
            record.updated_at = Utc::now();
            self.replace_record(data, record)
        })
    }

    fn remove_contents(&self, container_id: &str, link: &ContentLink) -> Result<bool> {
        self.write(|data| {
            let mut record = Self::record(data, container_id)?;

            let Some(position) = record.contents.iter().position(|c| c.item_id == link.item_id) else {
                return Ok(false);
            };

            let held = &mut record.contents[position];
            if link.quantity >= held.quantity {
                record.contents.remove(position);
            } else {
                held.quantity -= link.quantity;
            }
            record.updated_at = Utc::now();
            self.replace_record(data, record)?;
            Ok(true)
        })
    }
}
