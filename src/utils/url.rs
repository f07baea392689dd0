//! URL helpers for building API endpoints from a configured base URL.

/// Strip trailing slashes so endpoints can be appended without doubling them.
///
/// ```
/// use sessionchat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://api.groq.com/openai/v1/"), "https://api.groq.com/openai/v1");
/// ```
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// ```
/// use sessionchat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://api.groq.com/openai/v1/", "/chat/completions"),
///     "https://api.groq.com/openai/v1/chat/completions"
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
    fn joins_with_single_slash() {
        for base in [
            "http://127.0.0.1:8080/v1",
            "http://127.0.0.1:8080/v1/",
            "http://127.0.0.1:8080/v1///",
        ] {
            for endpoint in ["chat/completions", "/chat/completions"] {
                assert_eq!(
                    construct_api_url(base, endpoint),
                    "http://127.0.0.1:8080/v1/chat/completions",
                    "base={base} endpoint={endpoint}"
                );
            }
        }
    }

    #[test]
    fn root_url_keeps_host() {
        assert_eq!(
            construct_api_url("https://example.com/", "models"),
            "https://example.com/models"
        );
    }
}
