/// Parse and normalize the URL argument.
///
/// Blank input is rejected. Input without a scheme is treated as an https
/// host (`example.com` -> `https://example.com`); `about:`, `data:` and
/// `file:` URLs pass through unchanged.
pub fn parse_url(s: &str) -> Result<String, String> {
    let url = s.trim();

    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if url.chars().any(char::is_whitespace) {
        return Err(format!("URL '{}' contains whitespace", url));
    }

    let has_scheme = url.contains("://")
        || ["about:", "data:", "file:"]
            .iter()
            .any(|scheme| url.starts_with(scheme));

    if has_scheme {
        Ok(url.to_string())
    } else {
        Ok(format!("https://{}", url))
    }
}
