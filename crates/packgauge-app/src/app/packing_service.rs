//! Packing Service - add/remove items under the admission gate
//!
//! This service orchestrates every packing mutation:
//! 1. Validate the request against the number field table
//! 2. Load the container and candidate items through the repository
//! 3. Ask the admission controller about the prospective state
//! 4. Write only on acceptance
//! 5. Reload and return freshly computed metrics
//!
//! Steps 3 and 4 run inside the repository write, against the container as
//! stored at that moment, so two requests against the same container cannot
//! both pass the check on a stale total.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use packgauge_domain::model::{
    ContainedItem, Container, ContainerKind, ContainerMetrics, ContentLink, Item, LoadStatus,
    NumberFieldTable, NumberRangeValue,
};
use packgauge_domain::repository::ContainerRepository;
use packgauge_domain::service::{
    can_admit, convert_volume, convert_weight, evaluate, Admission, RangeFilterValidator,
};
use packgauge_types::{
    Entity, Error, FieldKey, Metric, Result, ValidationError, VolumeUnit, WeightUnit,
};

/// Container together with metrics computed at read time
#[derive(Debug, Clone, Serialize)]
pub struct ContainerReport {
    pub container: Container,
    pub metrics: ContainerMetrics,
    pub status: LoadStatus,
}

impl ContainerReport {
    pub fn new(container: Container) -> Self {
        let metrics = evaluate(&container);
        Self {
            status: metrics.status(),
            container,
            metrics,
        }
    }
}

/// Request to create a container
#[derive(Debug, Clone)]
pub struct NewContainer {
    pub name: String,
    pub kind: ContainerKind,
    pub max_weight: f64,
    pub max_capacity: f64,
    pub tare_weight: f64,
}

/// Request to create a catalogue item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub volume: f64,
    pub volume_unit: VolumeUnit,
}

pub struct PackingService<R> {
    repo: R,
    fields: Arc<NumberFieldTable>,
}

impl<R: ContainerRepository> PackingService<R> {
    pub fn new(repo: R, fields: Arc<NumberFieldTable>) -> Self {
        Self { repo, fields }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn fields(&self) -> &NumberFieldTable {
        &self.fields
    }

    fn load_container(&self, container_id: &str) -> Result<Container> {
        self.repo
            .find_container(container_id)?
            .ok_or_else(|| Error::NotFound(format!("container {}", container_id)))
    }

    /// Strict domain check; fields without a configured bound pass through
    fn check_field(&self, entity: Entity, metric: Metric, value: f64) -> Result<f64> {
        let key = FieldKey::new(entity, metric);
        match self.fields.get(key) {
            Some(config) => Ok(config.check(&key.to_string(), value)?),
            None if value.is_finite() => Ok(value),
            None => Err(ValidationError::NotFinite {
                field: key.to_string(),
            }
            .into()),
        }
    }

    fn check_quantity(&self, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity.into());
        }
        self.check_field(Entity::Item, Metric::Quantity, f64::from(quantity))?;
        Ok(())
    }

    fn resolve_candidates(&self, requests: &[ContentLink]) -> Result<Vec<ContainedItem>> {
        if requests.is_empty() {
            return Err(ValidationError::EmptyBatch.into());
        }
        requests
            .iter()
            .map(|link| {
                self.check_quantity(link.quantity)?;
                let item = self
                    .repo
                    .find_item(&link.item_id)?
                    .ok_or_else(|| Error::NotFound(format!("item {}", link.item_id)))?;
                Ok(ContainedItem::new(item, link.quantity))
            })
            .collect()
    }

    /// Container with metrics computed now
    pub fn report(&self, container_id: &str) -> Result<ContainerReport> {
        Ok(ContainerReport::new(self.load_container(container_id)?))
    }

    pub fn list_reports(&self) -> Result<Vec<ContainerReport>> {
        Ok(self
            .repo
            .find_all_containers()?
            .into_iter()
            .map(ContainerReport::new)
            .collect())
    }

    pub fn list_items(&self) -> Result<Vec<Item>> {
        self.repo.find_all_items()
    }

    /// Dry run: would this batch be admitted right now?
    pub fn check_admission(&self, container_id: &str, requests: &[ContentLink]) -> Result<Admission> {
        let container = self.load_container(container_id)?;
        let candidates = self.resolve_candidates(requests)?;
        Ok(can_admit(&container, &candidates))
    }

    /// Admit and store a batch, all or nothing
    pub fn add_items(&self, container_id: &str, requests: &[ContentLink]) -> Result<ContainerReport> {
        self.load_container(container_id)?;
        let candidates = self.resolve_candidates(requests)?;

        self.repo.add_contents(container_id, requests, &|current: &Container| {
            can_admit(current, &candidates).into_result()?;
            Ok(())
        })?;
        tracing::info!(container = %container_id, items = requests.len(), "items added");
        self.report(container_id)
    }

    /// Remove up to `quantity` units of an item. Removal needs no admission.
    pub fn remove_item(&self, container_id: &str, item_id: &str, quantity: u32) -> Result<ContainerReport> {
        if quantity == 0 {
            return Err(ValidationError::ZeroQuantity.into());
        }

        self.load_container(container_id)?;
        let removed = self
            .repo
            .remove_contents(container_id, &ContentLink::new(item_id, quantity))?;
        if !removed {
            return Err(Error::NotFound(format!(
                "item {} in container {}",
                item_id, container_id
            )));
        }
        tracing::info!(container = %container_id, item = %item_id, quantity, "item removed");
        self.report(container_id)
    }

    pub fn create_container(&self, request: NewContainer) -> Result<Container> {
        let entity = request.kind.entity();
        let container = Container {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name,
            kind: request.kind,
            max_weight: self.check_field(entity, Metric::MaxWeight, request.max_weight)?,
            max_capacity: self.check_field(entity, Metric::MaxCapacity, request.max_capacity)?,
            tare_weight: self.check_field(entity, Metric::TareWeight, request.tare_weight)?,
            contents: Vec::new(),
        };
        self.repo.save_container(&container)?;
        tracing::info!(container = %container.id, kind = container.kind.label(), "container created");
        Ok(container)
    }

    /// Validate an item's canonical weight and volume, then store it
    pub fn create_item(&self, request: NewItem) -> Result<Item> {
        let item = Item {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name,
            weight: request.weight,
            weight_unit: request.weight_unit,
            volume: request.volume,
            volume_unit: request.volume_unit,
        };
        self.save_item(&item)?;
        Ok(item)
    }

    /// Store a batch of catalogue items, stopping at the first invalid one
    pub fn import_items(&self, items: &[Item]) -> Result<usize> {
        for item in items {
            self.save_item(item)?;
        }
        Ok(items.len())
    }

    fn save_item(&self, item: &Item) -> Result<()> {
        self.check_field(
            Entity::Item,
            Metric::Weight,
            convert_weight(item.weight, &item.weight_unit),
        )?;
        self.check_field(
            Entity::Item,
            Metric::Volume,
            convert_volume(item.volume, &item.volume_unit),
        )?;
        self.repo.save_item(item)?;
        tracing::debug!(item = %item.id, name = %item.name, "item saved");
        Ok(())
    }

    /// Validate a raw `{min, max}` search filter for (entity, metric)
    pub fn parse_filter(&self, entity: Entity, metric: Metric, input: &Value) -> Result<NumberRangeValue> {
        let key = FieldKey::new(entity, metric);
        let validator = RangeFilterValidator::for_field(&self.fields, key)
            .ok_or_else(|| Error::NotFound(format!("number field {}", key)))?;
        Ok(validator.parse_json(input)?)
    }
}
