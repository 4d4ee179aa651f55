use url::Url;

/// Parses a service base URL so that relative joins extend its path.
///
/// `Url::join` replaces the last path segment unless the base ends in `/`,
/// so a missing trailing slash is added here.
///
/// # Errors
///
/// Returns an error if `raw` is not an absolute URL.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
