//! URL helpers for endpoint construction.

/// Strip trailing slashes so endpoint joins never produce double slashes.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use plume::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://chat.example/", "/api/files/upload"),
///     "https://chat.example/api/files/upload"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        normalize_base_url(base_url),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_any_number_of_trailing_slashes() {
        assert_eq!(normalize_base_url("https://chat.example"), "https://chat.example");
        assert_eq!(normalize_base_url("https://chat.example/"), "https://chat.example");
        assert_eq!(normalize_base_url("https://chat.example///"), "https://chat.example");
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn join_is_insensitive_to_slash_placement() {
        for (base, endpoint) in [
            ("https://chat.example", "api/files/upload"),
            ("https://chat.example/", "api/files/upload"),
            ("https://chat.example", "/api/files/upload"),
            ("https://chat.example//", "//api/files/upload"),
        ] {
            assert_eq!(
                construct_api_url(base, endpoint),
                "https://chat.example/api/files/upload"
            );
        }
    }
}
