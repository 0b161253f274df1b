//! Output formatting module

use packgauge_app::app::ContainerReport;
use packgauge_domain::model::{ContainerMetrics, Item, NumberRangeValue};
use packgauge_domain::service::Admission;
use packgauge_types::{FieldKey, OutputFormat, Result};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

/// Percentages are already rounded to one decimal
fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn print_metrics(metrics: &ContainerMetrics) {
    println!(
        "Weight:          {:.2} kg ({} of limit, {:.2} kg left)",
        metrics.current_weight,
        percent(metrics.weight_percentage),
        metrics.remaining_weight
    );
    println!(
        "Capacity:        {:.2} L ({} of limit, {:.2} L left)",
        metrics.current_capacity,
        percent(metrics.capacity_percentage),
        metrics.remaining_capacity
    );
    println!("Total weight:    {:.2} kg (with tare)", metrics.total_weight);
    println!("Items:           {}", metrics.item_count);
}

pub fn output_report(output_format: OutputFormat, report: &ContainerReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(report);
    }

    let container = &report.container;
    println!("\n{} ({})", container.name, container.kind.label());
    println!("{}", "=".repeat(container.name.chars().count() + container.kind.label().len() + 3));
    println!("ID:              {}", container.id);
    println!(
        "Limits:          {:.1} kg / {:.1} L (tare {:.2} kg)",
        container.max_weight, container.max_capacity, container.tare_weight
    );
    print_metrics(&report.metrics);
    println!("Status:          {}", report.status.label());

    if !container.contents.is_empty() {
        println!("\nContents:");
        for held in &container.contents {
            println!(
                "  {:>4} x {:<24} {} {} / {} {}",
                held.quantity,
                truncate(&held.item.name, 24),
                held.item.weight,
                held.item.weight_unit,
                held.item.volume,
                held.item.volume_unit
            );
        }
    }

    Ok(())
}

pub fn output_report_list(output_format: OutputFormat, reports: &[ContainerReport]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(reports);
    }

    if reports.is_empty() {
        println!("No containers yet");
        return Ok(());
    }

    println!(
        "{:<36}  {:<16}  {:<8}  {:>8}  {:>8}  {}",
        "ID", "Name", "Kind", "Weight%", "Volume%", "Status"
    );
    println!("{}", "-".repeat(96));
    for report in reports {
        println!(
            "{:<36}  {:<16}  {:<8}  {:>8}  {:>8}  {}",
            report.container.id,
            truncate(&report.container.name, 16),
            report.container.kind.label(),
            percent(report.metrics.weight_percentage),
            percent(report.metrics.capacity_percentage),
            report.status.label()
        );
    }

    Ok(())
}

pub fn output_admission(output_format: OutputFormat, admission: &Admission) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(admission);
    }

    match admission {
        Admission::Accepted { .. } => println!("\nFits: yes"),
        Admission::Rejected { violations, .. } => {
            println!("\nFits: no");
            for violation in violations {
                println!("  - {} (over by {:.2})", violation, violation.excess());
            }
        }
    }
    println!("\nAfter adding:");
    print_metrics(admission.metrics());
    println!("Status:          {}", admission.metrics().status().label());

    Ok(())
}

pub fn output_items(output_format: OutputFormat, items: &[Item]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(items);
    }

    if items.is_empty() {
        println!("No items in the catalogue");
        return Ok(());
    }

    println!(
        "{:<36}  {:<24}  {:>12}  {:>12}",
        "ID", "Name", "Weight", "Volume"
    );
    println!("{}", "-".repeat(90));
    for item in items {
        println!(
            "{:<36}  {:<24}  {:>12}  {:>12}",
            item.id,
            truncate(&item.name, 24),
            format!("{} {}", item.weight, item.weight_unit),
            format!("{} {}", item.volume, item.volume_unit)
        );
    }

    Ok(())
}

pub fn output_filter(output_format: OutputFormat, key: FieldKey, range: &NumberRangeValue) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(range);
    }

    let bound = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
    println!("{}: min {} / max {}", key, bound(range.min), bound(range.max));
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
