use crate::Result;
use crate::crawl::Entry;
use std::io::Write;

const HEADER: [&str; 4] = ["module", "version", "source", "score"];

pub fn generate<W: Write>(entries: &[Entry], writer: W) -> Result<()> {
    let mut tsv = csv::WriterBuilder::new().delimiter(b'\t').has_headers(false).from_writer(writer);

    tsv.write_record(HEADER)?;
    for entry in entries {
        tsv.serialize(entry)?;
    }

    tsv.flush()?;
    Ok(())
}
