use crate::types::*;
use anyhow::Result;
use std::io::Write;

pub trait ScriptBuilder: std::fmt::Debug {
    fn build_script(
        &self,
        buf: Vec<u8>,
        filename: &str,
        config: &ExtraConfig,
    ) -> Result<Box<dyn Script>>;

    fn build_script_from_file(
        &self,
        filename: &str,
        config: &ExtraConfig,
    ) -> Result<Box<dyn Script>> {
        let data = crate::utils::files::read_file(filename)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", filename, e))?;
        self.build_script(data, filename, config)
    }

    fn extensions(&self) -> &'static [&'static str];
}

pub trait Script: std::fmt::Debug {
    /// Extracts translatable strings in document order.
    fn extract_messages(&self) -> Result<Vec<TextUnit>>;

    /// Writes the script with every `(source, target)` pair applied in order.
    fn import_messages<'a>(
        &'a self,
        _pairs: &[(String, String)],
        _file: Box<dyn Write + 'a>,
    ) -> Result<()> {
        Err(anyhow::anyhow!(
            "This script type does not support importing messages."
        ))
    }

    fn import_messages_filename(&self, pairs: &[(String, String)], filename: &str) -> Result<()> {
        let f = crate::utils::files::write_file(filename)?;
        self.import_messages(pairs, f)
    }
}
