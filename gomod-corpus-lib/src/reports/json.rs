use crate::Result;
use crate::crawl::Entry;
use serde_json::json;
use std::io::Write;

pub fn generate<W: Write>(entries: &[Entry], mut writer: W) -> Result<()> {
    let output = json!({
        "modules": entries,
    });

    serde_json::to_writer_pretty(&mut writer, &output)?;
    writeln!(writer)?;
    Ok(())
}
