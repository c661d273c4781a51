//! Turns response bodies into [`data`](crate::api::data) types.
//!
//! A body maps as a whole or not at all: if any element of `results`
//! lacks a field, no partial list is returned.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::data::{AnimationSource, CategoryList, Format, ImageSource, Media, Source};
use crate::error::DecodeError;

/// One element of `results`, with the source fields of format `S`.
#[derive(Deserialize)]
struct Entry<S> {
    url: String,
    #[serde(flatten)]
    source: S,
}

/// The body of the category and search endpoints.
#[derive(Deserialize)]
struct Results<S> {
    results: Vec<Entry<S>>,
}

/// Parse `body` as a single JSON value of type `T`.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| DecodeError::new(err.path().to_string(), err.into_inner()))?;
    // reject trailing data, like `serde_json::from_slice` does
    deserializer
        .end()
        .map_err(|err| DecodeError::new(".", err))?;
    Ok(value)
}

fn lift<S>(body: &[u8], source: impl Fn(S) -> Source) -> Result<Vec<Media>, DecodeError>
where
    S: DeserializeOwned,
{
    let Results { results } = decode::<Results<S>>(body)?;
    Ok(results
        .into_iter()
        .map(|Entry { url, source: inner }| Media {
            url,
            source: source(inner),
        })
        .collect())
}

/// Map the body of the `endpoints` endpoint.
///
/// # Errors
///
/// If the body is not a JSON object, or an entry has no string `format`,
/// this function will return an error.
pub fn categories(body: &[u8]) -> Result<CategoryList, DecodeError> {
    decode(body)
}

/// Map the body of a category fetch or a search.
///
/// `format` is the one of the request: the API never mixes formats in a response.
///
/// # Errors
///
/// If `results` is missing or not an array, or an element lacks `url` or
/// one of the source fields of `format`, this function will return an error.
pub fn results(body: &[u8], format: Format) -> Result<Vec<Media>, DecodeError> {
    match format {
        Format::Image => lift::<ImageSource>(body, Source::Image),
        Format::Animation => lift::<AnimationSource>(body, Source::Animation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_categories_keeps_server_order() -> anyhow::Result<()> {
        let body = br#"{"neko":{"format":"png"},"kiss":{"format":"gif"}}"#;

        let categories = categories(body)?;
        let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["neko", "kiss"]);
        assert_eq!(categories.find("neko").unwrap().format, Format::Image);
        assert_eq!(categories.find("kiss").unwrap().format, Format::Animation);
        Ok(())
    }

    #[test]
    fn test_map_categories_unknown_format_is_animation() -> anyhow::Result<()> {
        let categories = categories(br#"{"dance":{"format":"webm"}}"#)?;
        assert_eq!(categories.find("dance").unwrap().format, Format::Animation);
        Ok(())
    }

    #[test]
    fn test_map_categories_malformed() {
        let cases: [&[u8]; 6] = [
            b"not json",
            br#"["neko", "kiss"]"#,
            br#"{"neko":{}}"#,
            br#"{"neko":{"format":1}}"#,
            br#"{"":{"format":"png"}}"#,
            br#"{"neko":{"format":"png"}} trailing"#,
        ];
        for body in cases {
            categories(body).expect_err("malformed categories body");
        }
    }

    #[test]
    fn test_map_animation_results() -> anyhow::Result<()> {
        let body = br#"{"results":[{"url":"u1","anime_name":"A"}]}"#;

        let results = results(body, Format::Animation)?;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "u1");
        assert_eq!(results[0].format(), Format::Animation);
        match &results[0].source {
            Source::Animation(source) => assert_eq!(source.anime_name, "A"),
            Source::Image(_) => panic!("animation request mapped to an image"),
        }
        Ok(())
    }

    #[test]
    fn test_map_image_results() -> anyhow::Result<()> {
        let body = br#"{"results":[
            {"url":"u1","artist_name":"n1","artist_href":"h1","source_url":"s1"},
            {"url":"u2","artist_name":"n2","artist_href":"h2","source_url":"s2","extra":0}
        ]}"#;

        let results = results(body, Format::Image)?;
        let urls: Vec<_> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, ["u1", "u2"]);
        match &results[1].source {
            Source::Image(source) => {
                assert_eq!(source.artist_name, "n2");
                assert_eq!(source.artist_href, "h2");
                assert_eq!(source.source_url, "s2");
            }
            Source::Animation(_) => panic!("image request mapped to an animation"),
        }
        Ok(())
    }

    #[test]
    fn test_map_empty_results() -> anyhow::Result<()> {
        assert!(results(br#"{"results":[]}"#, Format::Image)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_map_results_missing_results() {
        let err = results(br#"{"items":[]}"#, Format::Animation).expect_err("no `results` field");
        assert!(err.to_string().contains("results"));

        results(br#"{"results":{}}"#, Format::Animation).expect_err("`results` is not an array");
    }

    #[test]
    fn test_map_results_fails_as_a_whole() {
        // the second element lacks `source_url`
        let body = br#"{"results":[
            {"url":"u1","artist_name":"n1","artist_href":"h1","source_url":"s1"},
            {"url":"u2","artist_name":"n2","artist_href":"h2"}
        ]}"#;
        results(body, Format::Image).expect_err("missing source field");

        // format is taken from the request, not guessed from the fields
        let body = br#"{"results":[{"url":"u1","anime_name":"A"}]}"#;
        results(body, Format::Image).expect_err("animation body for an image request");

        let body = br#"{"results":[{"anime_name":"A"}]}"#;
        results(body, Format::Animation).expect_err("missing url");

        let body = br#"{"results":[{"url":1,"anime_name":"A"}]}"#;
        results(body, Format::Animation).expect_err("url is not a string");
    }
}
