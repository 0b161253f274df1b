//! CSV loader for the item catalogue

use std::io::Read;
use std::path::Path;

use packgauge_domain::model::Item;
use packgauge_types::{Result, VolumeUnit, WeightUnit};

/// Load items from a CSV file
///
/// Expected columns (header optional):
/// name, weight, weight_unit, volume, volume_unit
pub fn load_items_from_csv(path: &Path) -> Result<Vec<Item>> {
    let file = std::fs::File::open(path)?;
    load_items_from_reader(file)
}

pub fn load_items_from_reader<R: Read>(reader: R) -> Result<Vec<Item>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut items = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if index == 0 && is_header(&record) {
            continue;
        }
        match parse_record(&record) {
            Some(item) => items.push(item),
            None => {
                tracing::warn!(row = index + 1, "skipping malformed item row");
            }
        }
    }
    Ok(items)
}

fn is_header(record: &csv::StringRecord) -> bool {
    record.iter().any(|h| {
        let h = h.to_lowercase();
        h == "name" || h.contains("weight") || h.contains("volume")
    })
}

fn parse_record(record: &csv::StringRecord) -> Option<Item> {
    if record.len() < 4 {
        return None;
    }
    let name = record.get(0).filter(|s| !s.is_empty())?.to_string();
    let weight: f64 = record.get(1)?.parse().ok()?;
    let weight_unit = WeightUnit::parse(record.get(2)?);
    let volume: f64 = record.get(3)?.parse().ok()?;
    let volume_unit = record
        .get(4)
        .filter(|s| !s.is_empty())
        .map(VolumeUnit::parse)
        .unwrap_or_default();

    Some(Item {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        weight,
        weight_unit,
        volume,
        volume_unit,
    })
}
