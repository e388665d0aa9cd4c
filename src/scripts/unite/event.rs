//! RPG Maker Unite event asset (`Storage/Event/SO/Event/*.asset`).
//!
//! The file is a Unity YAML dump. Only the `MonoBehaviour:` payload is
//! parsed; the `%YAML`/`%TAG`/`--- !u!` preamble in front of it is dropped.
//! Event commands live at `MonoBehaviour.dataModel.eventCommands`.
use super::value::AssetValue;
use crate::scripts::base::*;
use crate::types::*;
use crate::utils::escape::*;
use anyhow::Result;
use std::collections::BTreeSet;
use std::io::Write;

pub const MARKER: &str = "MonoBehaviour:";

#[derive(Debug)]
pub struct EventAssetBuilder {}

impl EventAssetBuilder {
    pub const fn new() -> Self {
        Self {}
    }
}

impl ScriptBuilder for EventAssetBuilder {
    fn build_script(
        &self,
        buf: Vec<u8>,
        filename: &str,
        config: &ExtraConfig,
    ) -> Result<Box<dyn Script>> {
        Ok(Box::new(EventAsset::new(buf, filename, config)?))
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["asset"]
    }
}

/// One entry of `eventCommands`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCommand<'a> {
    pub idx: usize,
    pub code: i64,
    pub indent: String,
    pub parameters: Option<&'a AssetValue>,
}

/// Parses the payload after [`MARKER`] and returns the `MonoBehaviour` body.
///
/// Returns `None` when the marker is missing, the payload is not valid YAML,
/// or the root is not a mapping holding a `MonoBehaviour` mapping.
pub fn load_mono(text: &str) -> Option<AssetValue> {
    let idx = text.find(MARKER)?;
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&text[idx..]).ok()?;
    match AssetValue::from(value) {
        AssetValue::Mapping(entries) => entries
            .into_iter()
            .find(|(k, _)| k.as_str() == Some("MonoBehaviour"))
            .map(|(_, v)| v)
            .filter(|v| v.is_mapping()),
        _ => None,
    }
}

/// Lists the commands of `mono` whose code is in `codes`.
///
/// Entries that are not mappings or carry no integer `code` are skipped.
pub fn commands<'a>(mono: &'a AssetValue, codes: &BTreeSet<i64>) -> Vec<EventCommand<'a>> {
    let cmds = match mono
        .get("dataModel")
        .and_then(|dm| dm.get("eventCommands"))
        .and_then(|c| c.as_sequence())
    {
        Some(cmds) => cmds,
        None => return Vec::new(),
    };
    let mut result = Vec::new();
    for (idx, cmd) in cmds.iter().enumerate() {
        if !cmd.is_mapping() {
            continue;
        }
        let code = match cmd.get("code").and_then(|c| c.as_i64()) {
            Some(code) => code,
            None => continue,
        };
        if !codes.contains(&code) {
            continue;
        }
        result.push(EventCommand {
            idx,
            code,
            indent: cmd.get("indent").map(|i| i.to_cell()).unwrap_or_default(),
            parameters: cmd.get("parameters"),
        });
    }
    result
}

/// Takes the strings of one command according to `mode`.
pub fn command_texts<'a>(cmd: &EventCommand<'a>, mode: ExtractMode) -> Vec<&'a str> {
    let mut out = Vec::new();
    let params = match cmd.parameters {
        Some(p) => p,
        None => return out,
    };
    match mode {
        ExtractMode::First => {
            if let Some(s) = params
                .as_sequence()
                .and_then(|seq| seq.first())
                .and_then(|v| v.as_str())
            {
                out.push(s);
            }
        }
        ExtractMode::All => params.collect_strings(&mut out),
    }
    out
}

#[derive(Debug)]
pub struct EventAsset {
    filename: String,
    text: String,
    codes: BTreeSet<i64>,
    mode: ExtractMode,
    escape: bool,
    min_len: usize,
}

impl EventAsset {
    pub fn new(buf: Vec<u8>, filename: &str, config: &ExtraConfig) -> Result<Self> {
        let text = String::from_utf8(buf)
            .map_err(|e| anyhow::anyhow!("{} is not valid UTF-8: {}", filename, e))?;
        Ok(Self {
            filename: crate::utils::files::table_path(filename),
            text,
            codes: config.codes.clone(),
            mode: config.mode,
            escape: config.escape,
            min_len: config.min_len,
        })
    }

    /// Returns the text with every `- "source"` replaced by `- "target"`,
    /// pair by pair in order. Line endings are normalized to LF first.
    pub fn apply_pairs(&self, pairs: &[(String, String)]) -> String {
        let mut s = normalize_newlines(&self.text);
        for (src, tgt) in pairs {
            s = s.replace(&format!("- \"{}\"", src), &format!("- \"{}\"", tgt));
        }
        s
    }
}

impl Script for EventAsset {
    fn extract_messages(&self) -> Result<Vec<TextUnit>> {
        let mono = match load_mono(&self.text) {
            Some(mono) => mono,
            None => return Ok(Vec::new()),
        };
        let name = mono.get("m_Name").map(|n| n.to_cell()).unwrap_or_default();
        let mut units = Vec::new();
        for cmd in commands(&mono, &self.codes) {
            for s in command_texts(&cmd, self.mode) {
                let norm = normalize_newlines(s);
                if norm.trim().chars().count() < self.min_len {
                    continue;
                }
                let source = if self.escape {
                    escape_visible(&norm)
                } else {
                    norm
                };
                units.push(TextUnit {
                    file: self.filename.clone(),
                    name: name.clone(),
                    code: cmd.code,
                    idx: cmd.idx,
                    indent: cmd.indent.clone(),
                    source,
                    target: String::new(),
                });
            }
        }
        Ok(units)
    }

    fn import_messages<'a>(
        &'a self,
        pairs: &[(String, String)],
        mut file: Box<dyn Write + 'a>,
    ) -> Result<()> {
        let s = self.apply_pairs(pairs);
        file.write_all(s.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
