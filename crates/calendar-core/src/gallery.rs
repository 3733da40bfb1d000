//! Gallery naming rules: stored file names, upload checks and archive entries

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::entities::EventImage;

/// Directory under the media root holding all gallery images
pub const IMAGE_ROOT: &str = "event_images";

/// Extension used when the upload has none
pub const DEFAULT_EXTENSION: &str = "jpg";

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "heic", "heif", "avif",
];

/// Lower-cased extension of an uploaded file name, `jpg` when absent
pub fn file_extension(original_name: &str) -> String {
    let base = original_name.rsplit(['/', '\\']).next().unwrap_or(original_name);
    match base.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// Random file name keeping the original extension
pub fn stored_file_name(original_name: &str) -> String {
    format!("{:032x}.{}", rand::random::<u128>(), file_extension(original_name))
}

/// Date-partitioned relative path: `event_images/YYYY/MM/DD/<name>`
pub fn storage_path(date: NaiveDate, file_name: &str) -> String {
    format!("{}/{}/{}", IMAGE_ROOT, date.format("%Y/%m/%d"), file_name)
}

/// Whether an upload looks like an image.
///
/// A declared `image/*` content type is accepted; any other specific type is
/// rejected. Without a useful content type the extension decides.
pub fn is_image_upload(content_type: Option<&str>, original_name: &str) -> bool {
    match content_type.map(str::trim) {
        Some(ct) if ct.starts_with("image/") => true,
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => false,
        _ => {
            let has_ext = original_name.contains('.');
            has_ext && IMAGE_EXTENSIONS.contains(&file_extension(original_name).as_str())
        }
    }
}

/// Unique archive entry names for the given images, in input order.
///
/// A name already taken gets the image id as prefix (`<id>_<name>`).
pub fn archive_entry_names(images: &[EventImage]) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut names = Vec::with_capacity(images.len());

    for image in images {
        let base = image.file_name().to_string();
        let mut name = base.clone();
        let mut round = 0u32;
        while taken.contains(&name) {
            round += 1;
            name = if round == 1 {
                format!("{}_{}", image.id, base)
            } else {
                format!("{}_{}_{}", image.id, round, base)
            };
        }
        taken.insert(name.clone());
        names.push(name);
    }

    names
}
