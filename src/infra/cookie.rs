use crate::domain_port::CookieError;
use percent_encoding::percent_decode_str;

/// Finds `name` in a `Cookie`-style header (`a=1; b=2`) and percent-decodes
/// its value. Fragments without `=`, and other cookies whose names do not
/// decode, are skipped. Only the matching cookie's value can be `Malformed`.
pub fn parse_cookie_header(header: &str, name: &str) -> Result<Option<String>, CookieError> {
    for part in header.split(';') {
        let Some((key, value)) = part.trim().split_once('=') else {
            continue;
        };
        let key = key.trim();
        let matches = key == name || decode(key).is_ok_and(|decoded| decoded == name);
        if matches {
            return decode(value.trim()).map(Some);
        }
    }
    Ok(None)
}

fn decode(raw: &str) -> Result<String, CookieError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| CookieError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_named_cookie() {
        let header = "refresh=r1; XSRF-TOKEN=abc123; theme=dark";
        assert_eq!(
            parse_cookie_header(header, "XSRF-TOKEN").unwrap(),
            Some("abc123".to_string())
        );
        assert_eq!(parse_cookie_header(header, "missing").unwrap(), None);
    }

    #[test]
    fn decodes_percent_encoding() {
        let header = "XSRF-TOKEN=a%2Fb%3Dc";
        assert_eq!(
            parse_cookie_header(header, "XSRF-TOKEN").unwrap(),
            Some("a/b=c".to_string())
        );
    }

    #[test]
    fn skips_fragments_without_value() {
        let header = "; flag ;XSRF-TOKEN=t;";
        assert_eq!(
            parse_cookie_header(header, "XSRF-TOKEN").unwrap(),
            Some("t".to_string())
        );
    }

    #[test]
    fn undecodable_neighbour_is_ignored() {
        let header = "bad%FF=1; XSRF-TOKEN=abc";
        assert_eq!(
            parse_cookie_header(header, "XSRF-TOKEN").unwrap(),
            Some("abc".to_string())
        );
        assert_eq!(parse_cookie_header(header, "other").unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        assert!(parse_cookie_header("XSRF-TOKEN=%FF", "XSRF-TOKEN").is_err());
    }
}
