//! Translation tables.
//!
//! Four fixed layouts exist, see [`TableSchema`]. Every table starts with a
//! header row, even when it has no data rows. Rows end with CRLF.
use crate::types::*;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::io::{Read, Write};

/// Drops repeated units, keeping the first occurrence.
///
/// File agnostic schemas key on the source text alone, the others on
/// `(file, name, source)`.
pub fn dedupe(units: Vec<TextUnit>, schema: TableSchema) -> Vec<TextUnit> {
    let mut seen = HashSet::new();
    units
        .into_iter()
        .filter(|u| {
            let key = if schema.is_file_agnostic() {
                (String::new(), String::new(), u.source.clone())
            } else {
                (u.file.clone(), u.name.clone(), u.source.clone())
            };
            seen.insert(key)
        })
        .collect()
}

/// Stable sort: by source for file agnostic schemas, else by `(file, idx)`.
pub fn sort_units(units: &mut [TextUnit], schema: TableSchema) {
    if schema.is_file_agnostic() {
        units.sort_by(|a, b| a.source.cmp(&b.source));
    } else {
        units.sort_by(|a, b| a.file.cmp(&b.file).then(a.idx.cmp(&b.idx)));
    }
}

/// A dumper for translation tables.
pub struct CsvDumper {}

impl CsvDumper {
    /// Dedupes (optionally), sorts and writes `units`. Returns the row count.
    ///
    /// With `identity` set, every target is overwritten with its source first.
    pub fn dump<W: Write>(
        mut units: Vec<TextUnit>,
        opts: &ExportOptions,
        writer: W,
    ) -> Result<usize> {
        if opts.dedupe {
            units = dedupe(units, opts.schema);
        }
        sort_units(&mut units, opts.schema);
        if opts.identity {
            for u in units.iter_mut() {
                u.target = u.source.clone();
            }
        }
        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);
        w.write_record(opts.schema.header())?;
        for u in units.iter() {
            let code = u.code.to_string();
            let idx = u.idx.to_string();
            match opts.schema {
                TableSchema::Source => w.write_record([u.file.as_str(), u.source.as_str()])?,
                TableSchema::Apply => {
                    w.write_record([u.file.as_str(), u.source.as_str(), u.target.as_str()])?
                }
                TableSchema::Full => w.write_record([
                    u.file.as_str(),
                    u.name.as_str(),
                    code.as_str(),
                    idx.as_str(),
                    u.indent.as_str(),
                    u.source.as_str(),
                    u.target.as_str(),
                ])?,
                TableSchema::Pairs => w.write_record([u.source.as_str(), u.target.as_str()])?,
            }
        }
        w.flush()?;
        Ok(units.len())
    }

    /// Writes `(source, target)` rows as they are, under a `source,target` header.
    pub fn dump_pairs<W: Write>(pairs: &[(String, String)], writer: W) -> Result<()> {
        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);
        w.write_record(TableSchema::Pairs.header())?;
        for (src, tgt) in pairs {
            w.write_record([src, tgt])?;
        }
        w.flush()?;
        Ok(())
    }
}

const APPLY_COLUMNS: [&str; 3] = ["file", "source", "target"];

/// Replacement pairs for one asset file, in table order.
#[derive(Debug, PartialEq, Eq)]
pub struct FileGroup {
    pub file: String,
    pub pairs: Vec<(String, String)>,
}

/// A parser for apply-ready tables (`file`, `source` and `target` columns).
pub struct CsvParser {}

impl CsvParser {
    /// Groups rows by file in order of first appearance.
    ///
    /// Rows with an empty or missing target are left out. Extra columns are
    /// ignored.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<FileGroup>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = reader.headers()?;
        let mut cols = [0usize; 3];
        for (i, col) in APPLY_COLUMNS.iter().enumerate() {
            cols[i] = headers
                .iter()
                .position(|h| h == *col)
                .ok_or_else(|| anyhow::anyhow!("Missing column \"{}\" in table", col))?;
        }
        let [file_col, source_col, target_col] = cols;
        let mut groups: Vec<FileGroup> = Vec::new();
        let mut index = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let target = record.get(target_col).unwrap_or("");
            if target.is_empty() {
                continue;
            }
            let file = record.get(file_col).unwrap_or("");
            let source = record.get(source_col).unwrap_or("");
            let i = *index.entry(file.to_string()).or_insert_with(|| {
                groups.push(FileGroup {
                    file: file.to_string(),
                    pairs: Vec::new(),
                });
                groups.len() - 1
            });
            groups[i].pairs.push((source.to_string(), target.to_string()));
        }
        Ok(groups)
    }
}
