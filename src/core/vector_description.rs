//! Human readable descriptions of simulator summary vector mnemonics.
//!
//! A mnemonic is a category letter (`F`ield, `G`roup, `W`ell, ...) followed by
//! a quantity code, optionally suffixed with `:<node>` naming the well,
//! group or region. Derived vectors carry a `PER_DAY_` or `PER_INTVL_`
//! prefix and depend on the resample frequency they were computed with.

use crate::core::Frequency;

const PER_DAY_PREFIX: &str = "PER_DAY_";
const PER_INTERVAL_PREFIX: &str = "PER_INTVL_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedVectorKind {
    PerDay,
    PerInterval,
}

/// Splits a derived vector name into its kind and source vector.
#[must_use]
pub fn derived_vector_source(vector_name: &str) -> Option<(DerivedVectorKind, &str)> {
    if let Some(source) = vector_name.strip_prefix(PER_DAY_PREFIX) {
        return Some((DerivedVectorKind::PerDay, source));
    }
    vector_name
        .strip_prefix(PER_INTERVAL_PREFIX)
        .map(|source| (DerivedVectorKind::PerInterval, source))
}

#[must_use]
pub fn is_derived_vector(vector_name: &str) -> bool {
    derived_vector_source(vector_name).is_some()
}

/// Describes `vector_name`; derived vectors include the frequency label.
///
/// The node name, if any, always comes last.
#[must_use]
pub fn vector_description(vector_name: &str, frequency: Option<Frequency>) -> String {
    let Some((kind, source)) = derived_vector_source(vector_name) else {
        return base_description(vector_name);
    };

    let (mnemonic, node) = split_node(source);
    let Some(source_description) = mnemonic_description(mnemonic) else {
        return vector_name.to_owned();
    };
    let mut description = match kind {
        DerivedVectorKind::PerDay => format!("Average {source_description} Per day"),
        DerivedVectorKind::PerInterval => format!("Interval {source_description}"),
    };
    if let Some(frequency) = frequency {
        description = format!("{description} ({})", frequency.label());
    }
    with_node(description, node)
}

fn base_description(vector_name: &str) -> String {
    let (mnemonic, node) = split_node(vector_name);
    match mnemonic_description(mnemonic) {
        Some(description) => with_node(description, node),
        None => vector_name.to_owned(),
    }
}

fn split_node(vector_name: &str) -> (&str, Option<&str>) {
    match vector_name.split_once(':') {
        Some((mnemonic, node)) => (mnemonic, Some(node)),
        None => (vector_name, None),
    }
}

fn mnemonic_description(mnemonic: &str) -> Option<String> {
    let mut chars = mnemonic.chars();
    let category = chars.next().and_then(category_label)?;
    let quantity = quantity_label(chars.as_str())?;
    Some(format!("{category} {quantity}"))
}

fn with_node(description: String, node: Option<&str>) -> String {
    match node {
        Some(node) => format!("{description}, {node}"),
        None => description,
    }
}

fn category_label(letter: char) -> Option<&'static str> {
    match letter {
        'F' => Some("Field"),
        'G' => Some("Group"),
        'W' => Some("Well"),
        'R' => Some("Region"),
        'B' => Some("Block"),
        'C' => Some("Connection"),
        'A' => Some("Aquifer"),
        _ => None,
    }
}

fn quantity_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "OPR" => "Oil Production Rate",
        "OPT" => "Oil Production Total",
        "WPR" => "Water Production Rate",
        "WPT" => "Water Production Total",
        "GPR" => "Gas Production Rate",
        "GPT" => "Gas Production Total",
        "LPR" => "Liquid Production Rate",
        "LPT" => "Liquid Production Total",
        "OIR" => "Oil Injection Rate",
        "OIT" => "Oil Injection Total",
        "WIR" => "Water Injection Rate",
        "WIT" => "Water Injection Total",
        "GIR" => "Gas Injection Rate",
        "GIT" => "Gas Injection Total",
        "WCT" => "Water Cut",
        "GOR" => "Gas-Oil Ratio",
        "GLR" => "Gas-Liquid Ratio",
        "PR" => "Pressure",
        "BHP" => "Bottom Hole Pressure",
        "THP" => "Tubing Head Pressure",
        "OIP" => "Oil In Place",
        "WIP" => "Water In Place",
        "GIP" => "Gas In Place",
        "OPRH" => "Oil Production Rate History",
        "OPTH" => "Oil Production Total History",
        "WPRH" => "Water Production Rate History",
        "WPTH" => "Water Production Total History",
        "GPRH" => "Gas Production Rate History",
        "GPTH" => "Gas Production Total History",
        _ => return None,
    };
    Some(label)
}
