//! Header detection and alias mapping onto canonical fields.

use std::collections::{BTreeMap, BTreeSet};

use awb_model::{IngestConfig, RawField};
use tracing::debug;

/// Exports sometimes carry a title or blank-ish row above the headers.
pub const HEADER_PROBE_ROWS: usize = 3;

/// Lower-cased header with internal whitespace collapsed.
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Where each canonical field lives in the source table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the header row within the table.
    pub header_row: usize,
    pub columns: BTreeMap<RawField, usize>,
    /// Source headers no alias matched.
    pub unmapped: Vec<String>,
}

impl ColumnMap {
    pub fn fields(&self) -> BTreeSet<RawField> {
        self.columns.keys().copied().collect()
    }

    pub fn column(&self, field: RawField) -> Option<usize> {
        self.columns.get(&field).copied()
    }
}

struct AliasTable {
    aliases: Vec<(RawField, BTreeSet<String>)>,
}

impl AliasTable {
    fn new(config: &IngestConfig) -> Self {
        let aliases = RawField::ALL
            .iter()
            .map(|field| {
                let names = config
                    .aliases_for(*field)
                    .iter()
                    .map(|alias| normalize_header(alias))
                    .collect();
                (*field, names)
            })
            .collect();
        Self { aliases }
    }

    fn field_for(&self, header: &str) -> Option<RawField> {
        let header = normalize_header(header);
        self.aliases
            .iter()
            .find(|(_, names)| names.contains(&header))
            .map(|(field, _)| *field)
    }

    /// Maps one candidate header row. The first column matching a field wins.
    fn map_row(&self, header_row: usize, row: &[String]) -> ColumnMap {
        let mut map = ColumnMap {
            header_row,
            ..ColumnMap::default()
        };
        for (index, header) in row.iter().enumerate() {
            match self.field_for(header) {
                Some(field) if !map.columns.contains_key(&field) => {
                    map.columns.insert(field, index);
                }
                Some(field) => {
                    debug!(header = %header, field = %field, "ignoring repeated column");
                }
                None if !header.is_empty() => map.unmapped.push(header.clone()),
                None => {}
            }
        }
        map
    }
}

/// Finds the header row among the first [`HEADER_PROBE_ROWS`] rows: the
/// first one in which at least one cell names a known field.
pub fn detect_columns(rows: &[Vec<String>], config: &IngestConfig) -> Option<ColumnMap> {
    let aliases = AliasTable::new(config);
    let map = rows
        .iter()
        .take(HEADER_PROBE_ROWS)
        .enumerate()
        .map(|(index, row)| aliases.map_row(index, row))
        .find(|map| !map.columns.is_empty())?;
    for header in &map.unmapped {
        debug!(header = %header, "unmapped column");
    }
    Some(map)
}
