use crate::domain_port::{CookieError, CookieSource};
use crate::infra::parse_cookie_header;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;

/// Reads cookies the transport's jar holds for one URL (the API base).
pub struct JarCookieSource {
    jar: Arc<Jar>,
    url: Url,
}

impl JarCookieSource {
    pub fn new(jar: Arc<Jar>, url: Url) -> Self {
        JarCookieSource { jar, url }
    }
}

impl CookieSource for JarCookieSource {
    fn cookie(&self, name: &str) -> Result<Option<String>, CookieError> {
        let Some(header) = self.jar.cookies(&self.url) else {
            return Ok(None);
        };
        let header = header
            .to_str()
            .map_err(|e| CookieError::Malformed(e.to_string()))?;
        parse_cookie_header(header, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_cookie_set_for_the_origin() {
        let jar = Arc::new(Jar::default());
        let url: Url = "http://netback.local/api".parse().unwrap();
        jar.add_cookie_str("XSRF-TOKEN=abc; Path=/", &url);
        jar.add_cookie_str("refresh=r1; Path=/; HttpOnly", &url);

        let source = JarCookieSource::new(jar, url);
        assert_eq!(source.cookie("XSRF-TOKEN").unwrap(), Some("abc".to_string()));
        assert_eq!(source.cookie("other").unwrap(), None);
    }

    #[test]
    fn empty_jar_has_no_cookies() {
        let url: Url = "http://netback.local/api".parse().unwrap();
        let source = JarCookieSource::new(Arc::new(Jar::default()), url);
        assert_eq!(source.cookie("XSRF-TOKEN").unwrap(), None);
    }
}
