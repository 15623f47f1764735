use std::path::Path;

use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use tracing::info;

use crate::error::{Error, Result};

/// Write `year` into the primary tag layer of `path`, creating the layer when
/// the file has none. Both the recording date and the plain year field are
/// set; formats without a year field silently keep only the date.
pub fn write_year(path: &Path, year: i32) -> Result<()> {
    let fail = |what: &str, err: &dyn std::fmt::Display| {
        Error::TagWrite(format!("{what} {}: {err}", path.display()))
    };

    let mut tagged = Probe::open(path)
        .map_err(|e| fail("failed to open", &e))?
        .read()
        .map_err(|e| fail("failed to parse tags for", &e))?;

    let tag_type = tagged.primary_tag_type();
    if tagged.tag_mut(tag_type).is_none() {
        tagged.insert_tag(Tag::new(tag_type));
    }

    let tag = tagged
        .tag_mut(tag_type)
        .ok_or_else(|| fail("failed to access primary tag of", &"missing"))?;

    let value = year.to_string();
    tag.insert_text(ItemKey::RecordingDate, value.clone());
    tag.insert_text(ItemKey::Year, value);

    tagged
        .save_to_path(path, WriteOptions::default())
        .map_err(|e| fail("failed to write tags for", &e))?;

    info!(path = %path.display(), year, "wrote year tag");
    Ok(())
}
