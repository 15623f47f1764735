use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;
use tracing::warn;

/// Copy `src` to `dest`, returning the number of bytes written. The source
/// modification time is carried over when `preserve_mtime` is set; failing to
/// do so is logged and otherwise ignored.
pub(super) fn copy_file(src: &Path, dest: &Path, preserve_mtime: bool) -> io::Result<u64> {
    let bytes = fs::copy(src, dest)?;

    if preserve_mtime {
        let mtime = fs::metadata(src).map(|m| FileTime::from_last_modification_time(&m));
        if let Err(err) = mtime.and_then(|t| filetime::set_file_mtime(dest, t)) {
            warn!(path = %dest.display(), error = %err, "could not preserve modification time");
        }
    }

    Ok(bytes)
}

/// Whether `src` was modified after `dest`.
pub(super) fn is_newer(src: &Path, dest: &Path) -> io::Result<bool> {
    let src_time = FileTime::from_last_modification_time(&fs::metadata(src)?);
    let dest_time = FileTime::from_last_modification_time(&fs::metadata(dest)?);
    Ok(src_time > dest_time)
}
