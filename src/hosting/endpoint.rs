use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::{header::HeaderValue, StatusCode};
use url::Url;

use super::{Error, Result};

/// Create a URL from the given base, path parts, and parameters.
///
/// The path parts should not contain slashes.
pub fn url_from_path_parts_and_params(
    base_url: Url,
    path_parts: &[&str],
    params: &[(&str, &str)],
) -> Result<Url> {
    if base_url.cannot_be_a_base() {
        return Err(Error::UrlBaseError(base_url));
    }

    let mut buf = base_url.path().to_string();
    if !buf.ends_with('/') {
        buf.push('/');
    }

    for (i, p) in path_parts.iter().enumerate() {
        if p.contains('/') {
            return Err(Error::UrlSlashError(p.to_string()));
        }
        if i > 0 {
            // the first part must not get a leading slash, or it is treated as an absolute path
            // and the base URL's own path is dropped
            buf.push('/');
        }
        buf.push_str(p);
    }
    let url = base_url.join(&buf)?;
    let url = if params.is_empty() {
        Url::parse(url.as_str())
    } else {
        Url::parse_with_params(url.as_str(), params)
    }?;
    Ok(url)
}

/// Turn a rate-limiting response into `Error::RateLimited`; pass any other response through.
///
/// GitHub signals rate limiting with a 403 and either a `Retry-After` header or
/// `x-ratelimit-remaining: 0` (with the window end in `x-ratelimit-reset`, in UTC epoch seconds).
/// Bitbucket uses a plain 429.
pub async fn check_rate_limit(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return Ok(response);
    }

    let headers = response.headers();
    let wait = if let Some(retry_after) = headers.get("Retry-After") {
        atoi::atoi::<i64>(retry_after.as_bytes()).and_then(Duration::try_seconds)
    } else if let Some(b"0") = headers.get("x-ratelimit-remaining").map(HeaderValue::as_bytes) {
        || -> Option<Duration> {
            let date = headers.get("date")?.to_str().ok()?;
            let date = DateTime::parse_from_rfc2822(date).ok()?.with_timezone(&Utc);

            let reset_time = headers
                .get("x-ratelimit-reset")?
                .to_str()
                .ok()?
                .parse::<i64>()
                .ok()?;
            let reset_time = Utc.timestamp_opt(reset_time, 0).single()?;

            Some(reset_time - date)
        }()
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        None
    } else {
        // an ordinary 403
        return Ok(response);
    };

    let message = response.text().await?;
    Err(Error::RateLimited { message, wait })
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_url(base_url: &str, path_parts: &[&str], params: &[(&str, &str)]) -> Result<Url> {
        let base_url = Url::parse(base_url).unwrap();
        url_from_path_parts_and_params(base_url, path_parts, params)
    }

    fn testcase_ok(inputs: (&str, &[&str], &[(&str, &str)]), expected: &str) {
        let (base_url, path_parts, params) = inputs;
        let actual = make_url(base_url, path_parts, params).unwrap();
        let expected = Url::parse(expected).unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn empty_path() {
        testcase_ok(("https://api.github.com", &[], &[]), "https://api.github.com/");
    }

    #[test]
    fn base_with_path_and_no_trailing_slash() {
        testcase_ok(
            ("https://api.bitbucket.org/2.0", &["repositories", "ws", "repo", "commits"], &[]),
            "https://api.bitbucket.org/2.0/repositories/ws/repo/commits",
        );
    }

    #[test]
    fn base_with_path_and_trailing_slash() {
        testcase_ok(
            ("https://github.example.com/api/v3/", &["repos", "octocat", "octocat", "readme"], &[]),
            "https://github.example.com/api/v3/repos/octocat/octocat/readme",
        );
    }

    #[test]
    fn query_params() {
        testcase_ok(
            (
                "https://api.github.com",
                &["repos", "octocat", "hello", "commits"],
                &[("sha", "feature/x"), ("per_page", "100"), ("page", "2")],
            ),
            "https://api.github.com/repos/octocat/hello/commits?sha=feature%2Fx&per_page=100&page=2",
        );
    }

    #[test]
    fn slash_in_path_part() {
        let res = make_url("https://api.github.com", &["repos", "some/bogus/part"], &[]);
        // `Error` has no `PartialEq`, so match instead
        match res {
            Err(Error::UrlSlashError(p)) if p == "some/bogus/part" => (),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn cannot_be_a_base() {
        let res = make_url("mailto:someone@example.com", &[], &[]);
        match res {
            Err(Error::UrlBaseError(u)) if u.as_str() == "mailto:someone@example.com" => (),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
