//! The URLs of the nekos.best API.
//!
//! Every function here appends to a caller supplied base, so a
//! [`crate::api::NekosClient`] can target a mirror or a test server.

use std::sync::LazyLock;

use reqwest::Url;

use crate::api::data::{Category, Format};
use crate::error::{Error, Result};

/// The root of the nekos.best v2 API.
pub const BASE_URL: &str = "https://nekos.best/api/v2/";

/// [`BASE_URL`], parsed.
pub static API_URL: LazyLock<Url> = LazyLock::new(|| Url::parse(BASE_URL).unwrap());

/// Append `segment` as the last path segment of `base`, percent-encoding it.
fn endpoint(base: &Url, segment: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::InvalidBaseUrl(base.clone()))?
        // a trailing `/` in the base leaves an empty segment behind
        .pop_if_empty()
        .push(segment);
    // the base may carry its own query, which none of the endpoints accept
    url.set_query(None);
    Ok(url)
}

/// `GET {base}/endpoints`: the list of categories.
pub fn categories(base: &Url) -> Result<Url> {
    endpoint(base, "endpoints")
}

/// `GET {base}/{category}?amount={amount}`: a page of random results of a category.
///
/// `amount` is expected to be validated already.
pub fn category(base: &Url, name: &str, amount: u32) -> Result<Url> {
    let mut url = endpoint(base, name)?;
    url.query_pairs_mut()
        .append_pair("amount", &amount.to_string());
    Ok(url)
}

/// `GET {base}/search?query=..&type=..&amount=..[&category=..]`: a text search.
///
/// `query` is form-urlencoded, so spaces become `+`.
pub fn search(
    base: &Url,
    query: &str,
    amount: u32,
    format: Format,
    category: Option<&Category>,
) -> Result<Url> {
    let mut url = endpoint(base, "search")?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("query", query)
            .append_pair("type", &format.code().to_string())
            .append_pair("amount", &amount.to_string());
        if let Some(category) = category {
            pairs.append_pair("category", &category.name);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_url() -> Result<()> {
        let url = categories(&API_URL)?;
        assert_eq!(url.as_str(), "https://nekos.best/api/v2/endpoints");
        Ok(())
    }

    #[test]
    fn test_category_url() -> Result<()> {
        let url = category(&API_URL, "neko", 15)?;
        assert_eq!(url.as_str(), "https://nekos.best/api/v2/neko?amount=15");
        Ok(())
    }

    #[test]
    fn test_search_url_encodes_query() -> Result<()> {
        let url = search(&API_URL, "hi there", 5, Format::Image, None)?;
        assert_eq!(
            url.as_str(),
            "https://nekos.best/api/v2/search?query=hi+there&type=1&amount=5"
        );
        assert!(!url.query_pairs().any(|(key, _)| key == "category"));

        let url = search(&API_URL, "a&b=c", 5, Format::Image, None)?;
        let query = url.query_pairs().find(|(key, _)| key == "query").unwrap().1;
        assert_eq!(query, "a&b=c");
        Ok(())
    }

    #[test]
    fn test_search_url_with_category() -> Result<()> {
        let kiss = Category::new("kiss", Format::Animation);
        let url = search(&API_URL, "cats", 3, Format::Animation, Some(&kiss))?;
        assert_eq!(
            url.as_str(),
            "https://nekos.best/api/v2/search?query=cats&type=2&amount=3&category=kiss"
        );
        Ok(())
    }

    #[test]
    fn test_base_without_trailing_slash() -> Result<()> {
        let base = Url::parse("http://localhost:8080/api/v2").unwrap();
        let url = category(&base, "kiss", 1)?;
        assert_eq!(url.as_str(), "http://localhost:8080/api/v2/kiss?amount=1");
        Ok(())
    }

    #[test]
    fn test_cannot_be_a_base() {
        let base = Url::parse("data:text/plain,nekos").unwrap();
        let err = categories(&base).expect_err("`data:` urls have no path segments");
        assert!(matches!(err, Error::InvalidBaseUrl(_)));
    }
}
