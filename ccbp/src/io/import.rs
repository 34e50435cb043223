use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use log::{debug, warn};

use crate::entities::{CCBPInstance, Item};
use crate::io::ext_repr::ExtCCBPInstance;

/// Reads an instance from a text file, see [`parse_instance`] for the format.
/// The instance is named after the file.
pub fn read_instance(path: &Path) -> Result<CCBPInstance> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read instance file: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_instance(&name, &text)
        .with_context(|| format!("could not parse instance file: {}", path.display()))
}

/// Parses an instance from its text representation:
///
/// ```text
/// <number of items>
/// <bin capacity>
/// <max colors per bin>
/// <size> <color>    (one line per item)
/// ```
///
/// Blank lines are ignored. The three header values may be written as decimals, they are truncated.
/// Lines beyond the announced number of items are ignored.
pub fn parse_instance(name: &str, text: &str) -> Result<CCBPInstance> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let mut header = |field: &str| -> Result<u64> {
        let line = lines
            .next()
            .with_context(|| format!("instance ends before the {field}"))?;
        let value: f64 = line
            .parse()
            .with_context(|| format!("invalid {field}: {line:?}"))?;
        ensure!(
            value.is_finite() && value >= 0.0,
            "invalid {field}: {line:?}"
        );
        Ok(value.trunc() as u64)
    };

    let n_items = header("number of items")? as usize;
    let capacity = header("bin capacity")?;
    let max_colors = header("number of colors per bin")? as usize;

    ensure!(capacity > 0, "bin capacity must be positive");
    ensure!(max_colors > 0, "bins must allow at least one color");

    let mut items = vec![];
    for i in 0..n_items {
        let Some(line) = lines.next() else {
            bail!("expected {n_items} items, found only {i}");
        };
        items.push(parse_item(line).with_context(|| format!("invalid item {i}: {line:?}"))?);
    }

    if lines.next().is_some() {
        warn!("[IMP] instance {name} has lines beyond its {n_items} items, ignoring them");
    }

    let instance = CCBPInstance::new(name, capacity, max_colors, items);
    debug!(
        "[IMP] parsed instance {name}: {n_items} items with a total size of {}",
        instance.total_item_size()
    );
    let n_oversized = instance.oversized_items().count();
    if n_oversized > 0 {
        debug!("[IMP] instance {name} contains {n_oversized} items larger than the bin capacity");
    }

    Ok(instance)
}

/// Imports an instance from its external representation
pub fn import(ext_instance: &ExtCCBPInstance) -> Result<CCBPInstance> {
    ensure!(ext_instance.capacity > 0, "bin capacity must be positive");
    ensure!(ext_instance.max_colors > 0, "bins must allow at least one color");

    Ok(CCBPInstance::new(
        ext_instance.name.clone(),
        ext_instance.capacity,
        ext_instance.max_colors,
        ext_instance.items.clone(),
    ))
}

fn parse_item(line: &str) -> Result<Item> {
    let mut tokens = line.split_whitespace();
    let size = tokens.next().context("missing size")?.parse::<u64>()?;
    let color = tokens.next().context("missing color")?.parse::<u32>()?;
    Ok(Item::new(size, color))
}
