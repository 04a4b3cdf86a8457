use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::{BAGIT_TXT, BAGIT_VERSION, BAG_INFO_TXT, TAG_FILE_ENCODING};
use crate::metadata::BagInfo;
use crate::types::BagError;

/// Fixed `bagit.txt` content.
pub fn declaration() -> String {
    format!(
        "BagIt-Version: {}\nTag-File-Character-Encoding: {}\n",
        BAGIT_VERSION, TAG_FILE_ENCODING
    )
}

pub fn write_bagit_txt(bag_root: &Path) -> Result<PathBuf, BagError> {
    let path = bag_root.join(BAGIT_TXT);
    info!(path = %path.display(), "writing bagit.txt");
    write_tag_file(&path, declaration().as_bytes())?;
    Ok(path)
}

pub fn write_bag_info(bag_root: &Path, info: &BagInfo) -> Result<PathBuf, BagError> {
    let path = bag_root.join(BAG_INFO_TXT);
    info!(path = %path.display(), headers = info.len(), "writing bag-info.txt");
    let file = File::create(&path).map_err(|e| BagError::write(&path, e))?;
    info.write_to(file).map_err(|e| BagError::write(&path, e))?;
    Ok(path)
}

fn write_tag_file(path: &Path, contents: &[u8]) -> Result<(), BagError> {
    let mut file = File::create(path).map_err(|e| BagError::write(path, e))?;
    file.write_all(contents).map_err(|e| BagError::write(path, e))?;
    file.flush().map_err(|e| BagError::write(path, e))
}
