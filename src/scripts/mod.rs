pub mod base;
pub mod unite;

pub use base::{Script, ScriptBuilder};

lazy_static::lazy_static! {
    pub static ref BUILDER: Vec<Box<dyn ScriptBuilder + Sync + Send>> = vec![
        Box::new(unite::event::EventAssetBuilder::new()),
    ];
    pub static ref ALL_EXTS: Vec<String> =
        BUILDER.iter().flat_map(|b| b.extensions()).map(|s| s.to_string()).collect();
}

/// Finds the builder responsible for `filename` by extension.
pub fn find_builder(filename: &str) -> Option<&'static Box<dyn ScriptBuilder + Sync + Send>> {
    let lower = filename.to_lowercase();
    BUILDER.iter().find(|builder| {
        builder
            .extensions()
            .iter()
            .any(|ext| lower.ends_with(&format!(".{}", ext)))
    })
}

/// Builds a script for `filename`, falling back to the first builder for
/// unknown extensions.
pub fn parse_script(
    filename: &str,
    config: &crate::types::ExtraConfig,
) -> anyhow::Result<Box<dyn Script>> {
    let builder = find_builder(filename)
        .or_else(|| BUILDER.first())
        .ok_or_else(|| anyhow::anyhow!("Unsupported script type"))?;
    builder.build_script_from_file(filename, config)
}
