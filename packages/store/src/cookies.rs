//! CSRF cookie access for cookie-session mode.
//!
//! The backend sets `csrftoken`; unsafe requests must echo it back in the
//! `X-CSRFToken` header.

/// Name of the CSRF cookie set by the backend.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
/// Header carrying the CSRF token on unsafe requests.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Find `name` in a `document.cookie` style string (`"a=1; b=2"`).
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Read the CSRF token from the page's cookies.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn csrf_token() -> Option<String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?.document()?;
    let html = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
    let cookies = html.cookie().ok()?;
    cookie_value(&cookies, CSRF_COOKIE_NAME)
}

/// Native builds have no cookie jar to read from.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub fn csrf_token() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_finds_named_cookie() {
        let cookies = "sessionid=xyz; csrftoken=tok123; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("tok123"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_cookie_value_missing_or_empty() {
        assert!(cookie_value("", "csrftoken").is_none());
        assert!(cookie_value("a=1", "csrftoken").is_none());
        assert!(cookie_value("csrftoken=", "csrftoken").is_none());
    }

    #[test]
    fn test_cookie_value_does_not_match_prefix() {
        assert!(cookie_value("xcsrftoken=1", "csrftoken").is_none());
    }
}
