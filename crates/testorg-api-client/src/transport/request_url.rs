use crate::errors::{
    Error,
    Result,
};
use url::Url;

/// Append `segments` to `base`, percent-encoding each one, then append the query
pub(crate) fn build(base: &Url, segments: &[&str], query: &[(String, String)]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::ConfigError(format!("Base URL '{base}' cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);

    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

/// Path as shown in error messages, e.g. `/movies/abc`
pub(crate) fn display_path(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    #[case("https://api.testorg.com", "https://api.testorg.com/movies/create-movie")]
    #[case("https://api.testorg.com/", "https://api.testorg.com/movies/create-movie")]
    #[case("http://localhost:8080/api/v1", "http://localhost:8080/api/v1/movies/create-movie")]
    #[case("http://localhost:8080/api/v1/", "http://localhost:8080/api/v1/movies/create-movie")]
    fn test_build_joins_with_single_slash(#[case] base: &str, #[case] expected: &str) {
        let base = Url::parse(base).unwrap();
        let url = build(&base, &["movies", "create-movie"], &[]).unwrap();
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn test_build_encodes_segments() {
        let base = Url::parse("https://api.testorg.com").unwrap();
        let url = build(&base, &["movies", "a/b c"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.testorg.com/movies/a%2Fb%20c");
    }

    #[test]
    fn test_build_appends_query_in_order() {
        let base = Url::parse("https://api.testorg.com").unwrap();
        let url = build(
            &base,
            &["movies"],
            &query(&[("b", "2"), ("a", "1"), ("a", "x y")]),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.testorg.com/movies?b=2&a=1&a=x+y");
    }

    #[test]
    fn test_build_without_query_has_no_question_mark() {
        let base = Url::parse("https://api.testorg.com").unwrap();
        let url = build(&base, &["movies"], &[]).unwrap();
        assert!(url.query().is_none());
    }

    #[test]
    fn test_display_path() {
        assert_eq!(display_path(&["movies", "abc"]), "/movies/abc");
    }
}
