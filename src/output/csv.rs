use std::path::Path;

use anyhow::Result;

use crate::paginator::PageLink;

pub fn write_links(path: &Path, links: &[PageLink]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["page", "href", "active"])?;
    for link in links {
        writer.write_record([
            link.page.to_string(),
            link.href.clone(),
            link.active.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
