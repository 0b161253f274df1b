//! Command handlers

use std::path::PathBuf;

use packgauge_app::app::{NewContainer, NewItem, PackingService};
use packgauge_app::config::Config;
use packgauge_app::repository::open_packing_service;
use packgauge_domain::model::ContentLink;
use packgauge_infra::item_csv::load_items_from_csv;
use packgauge_infra::persistence::FileContainerRepository;
use packgauge_types::{Entity, Error, FieldKey, Metric, OutputFormat, Result, VolumeUnit, WeightUnit};
use serde_json::json;

use crate::cli::{Cli, Commands, ContainerCommand, ItemCommand, StoreCommand};
use crate::output::{
    output_admission, output_filter, output_items, output_report, output_report_list,
};

type Service = PackingService<FileContainerRepository>;

pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        // Manages the config file itself, no store needed
        Commands::Config {
            show,
            set_store_dir,
            set_fields,
            set_output,
            reset,
        } => cmd_config(show, set_store_dir, set_fields, set_output, reset),

        Commands::Store(command) => {
            let mut config = Config::load()?;

            // Override from CLI args
            if cli.store_dir.is_some() {
                config.store_dir = cli.store_dir;
            }
            let output_format = cli.format.unwrap_or(config.output_format);

            let service = open_packing_service(&config)?;
            tracing::debug!(store = %service.repository().store_path().display(), "store opened");
            run(&service, command, output_format)
        }
    }
}

fn run(service: &Service, command: StoreCommand, output_format: OutputFormat) -> Result<()> {
    match command {
        StoreCommand::Container(command) => cmd_container(service, command, output_format),
        StoreCommand::Item(command) => cmd_item(service, command, output_format),

        StoreCommand::Add {
            container,
            items,
            quantity,
        } => {
            let report = service.add_items(&container, &links(&items, quantity))?;
            output_report(output_format, &report)
        }

        StoreCommand::Check {
            container,
            items,
            quantity,
        } => {
            let admission = service.check_admission(&container, &links(&items, quantity))?;
            output_admission(output_format, &admission)
        }

        StoreCommand::Remove {
            container,
            item,
            quantity,
        } => {
            let report = service.remove_item(&container, &item, quantity)?;
            output_report(output_format, &report)
        }

        StoreCommand::Filter {
            entity,
            metric,
            min,
            max,
        } => cmd_filter(service, entity, metric, min, max, output_format),
    }
}

fn links(item_ids: &[String], quantity: u32) -> Vec<ContentLink> {
    item_ids
        .iter()
        .map(|id| ContentLink::new(id.as_str(), quantity))
        .collect()
}

fn cmd_container(service: &Service, command: ContainerCommand, output_format: OutputFormat) -> Result<()> {
    match command {
        ContainerCommand::Create {
            name,
            kind,
            max_weight,
            max_capacity,
            tare,
        } => {
            let container = service.create_container(NewContainer {
                name,
                kind: kind.into(),
                max_weight,
                max_capacity,
                tare_weight: tare,
            })?;
            let report = service.report(&container.id)?;
            output_report(output_format, &report)
        }
        ContainerCommand::Show { id } => output_report(output_format, &service.report(&id)?),
        ContainerCommand::List => output_report_list(output_format, &service.list_reports()?),
    }
}

fn cmd_item(service: &Service, command: ItemCommand, output_format: OutputFormat) -> Result<()> {
    match command {
        ItemCommand::Create {
            name,
            weight,
            weight_unit,
            volume,
            volume_unit,
        } => {
            let item = service.create_item(NewItem {
                name,
                weight,
                weight_unit: WeightUnit::parse(&weight_unit),
                volume,
                volume_unit: VolumeUnit::parse(&volume_unit),
            })?;
            if !item.weight_unit.is_recognized() || !item.volume_unit.is_recognized() {
                eprintln!(
                    "Warning: unrecognized unit ({} / {}), value taken as kg / L",
                    item.weight_unit, item.volume_unit
                );
            }
            output_items(output_format, std::slice::from_ref(&item))
        }
        ItemCommand::List => output_items(output_format, &service.list_items()?),
        ItemCommand::Import { file, dry_run } => cmd_import(service, file, dry_run, output_format),
    }
}

fn cmd_import(service: &Service, file: PathBuf, dry_run: bool, output_format: OutputFormat) -> Result<()> {
    if !file.exists() {
        return Err(Error::NotFound(format!("CSV file {}", file.display())));
    }

    let items = load_items_from_csv(&file)?;
    eprintln!("Loaded {} items from {}", items.len(), file.display());

    if dry_run {
        return output_items(output_format, &items);
    }

    let imported = service.import_items(&items)?;
    eprintln!("Imported {} items", imported);
    Ok(())
}

fn cmd_filter(
    service: &Service,
    entity: Entity,
    metric: Metric,
    min: Option<f64>,
    max: Option<f64>,
    output_format: OutputFormat,
) -> Result<()> {
    let range = service.parse_filter(entity, metric, &json!({ "min": min, "max": max }))?;
    output_filter(output_format, FieldKey::new(entity, metric), &range)
}

fn cmd_config(
    show: bool,
    set_store_dir: Option<PathBuf>,
    set_fields: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        modified = true;
    }

    if let Some(path) = set_fields {
        // Fail now rather than on the next command
        packgauge_infra::number_field_loader::load_number_fields(Some(&path))?;
        config.fields_path = Some(path);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
