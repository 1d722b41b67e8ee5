use once_cell::sync::Lazy;
use regex::Regex;

use super::{RECIPE_IMAGE_FOLDER, RECIPE_IMAGE_PUBLIC_PREFIX};

static ACCEPTED_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpeg|jpg|gif|png)$").expect("valid extension regex"));

/// Normalized extension if `name` ends in an accepted image extension
pub fn accepted_extension(name: &str) -> Option<&'static str> {
    let captures = ACCEPTED_EXTENSION.captures(name)?;
    match captures.get(1)?.as_str().to_ascii_lowercase().as_str() {
        "jpeg" => Some("jpeg"),
        "jpg" => Some("jpg"),
        "gif" => Some("gif"),
        "png" => Some("png"),
        _ => None,
    }
}

fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// True when `url` references a file held by the image store rather than an
/// external address
pub fn is_uploaded_image(url: Option<&str>) -> bool {
    match url {
        Some(url) if !url.is_empty() => !is_external(url) && accepted_extension(url).is_some(),
        _ => false,
    }
}

/// Public URL for a stored image path, served under `api_url`
pub fn public_url(api_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        api_url.trim_end_matches('/'),
        path.replacen(RECIPE_IMAGE_FOLDER, RECIPE_IMAGE_PUBLIC_PREFIX, 1)
    )
}

/// URL to display for a persisted `image_url`: uploads are mapped to their
/// public path, external URLs pass through
pub fn display_url(api_url: &str, image_url: Option<&str>) -> Option<String> {
    match image_url {
        None | Some("") => None,
        Some(url) if is_uploaded_image(Some(url)) => Some(public_url(api_url, url)),
        Some(url) => Some(url.to_string()),
    }
}
