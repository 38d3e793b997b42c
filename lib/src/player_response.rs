//! Extract `quality` / `url` pairs from a youtube "player response" document.

/**
 * MIT License
 *
 * ytlinks - Copyright (c) 2021 Larry Hao
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */
use std::collections::BTreeMap;

use serde_json::{Map, Value};

const KEY_STREAMING_DATA: &str = "streamingData";
const KEY_ADAPTIVE_FORMATS: &str = "adaptiveFormats";
const KEY_QUALITY: &str = "quality";
const KEY_URL: &str = "url";

/// A single extracted link, always containing exactly the keys `quality` and `url`.
///
/// This is kept as a plain string map (instead of a struct) because consumers treat it like any other raw info record.
pub type LinkRecord = BTreeMap<String, String>;

/// Errors that can happen while extracting links, in the order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("Unable to convert response to UTF8 data")]
    BadDataFormat,
    #[error("Unable to parse player response")]
    ResponseTypeError,
    #[error("Unable to parse streaming data")]
    MissingStreamingData,
    #[error("Unable to parse adaptive formats")]
    MissingAdaptiveFormats,
}

/// Same as [`extract_links`], but for a body that has not been decoded as UTF-8 yet.
pub fn extract_links_from_bytes(data: &[u8]) -> Result<Vec<LinkRecord>, ExtractError> {
    let text = std::str::from_utf8(data).map_err(|_| ExtractError::BadDataFormat)?;

    extract_links(text)
}

/// Extract all `quality` / `url` pairs from `streamingData.adaptiveFormats`, in document order.
///
/// Entries that do not have both `quality` and `url` as strings are skipped.
/// An empty `adaptiveFormats` array results in an empty list, not an error.
///
/// The document is parsed with `serde_json`'s default recursion limit (about 128 nested arrays / objects),
/// anything nesting deeper (even in fields that are not looked at) is a [`ExtractError::ResponseTypeError`].
///
/// # Example
///
/// ```rust
/// let links = ytlinkslib::player_response::extract_links(
///     r#"{"streamingData":{"adaptiveFormats":[{"quality":"720p","url":"http://a"}]}}"#,
/// )
/// .unwrap();
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0]["quality"], "720p");
/// assert_eq!(links[0]["url"], "http://a");
/// ```
pub fn extract_links(data: &str) -> Result<Vec<LinkRecord>, ExtractError> {
    let value = serde_json::from_str::<Value>(data).map_err(|_| ExtractError::ResponseTypeError)?;
    let root = value.as_object().ok_or(ExtractError::ResponseTypeError)?;

    let streaming_data = root
        .get(KEY_STREAMING_DATA)
        .and_then(Value::as_object)
        .ok_or(ExtractError::MissingStreamingData)?;

    let formats = adaptive_formats(streaming_data).ok_or(ExtractError::MissingAdaptiveFormats)?;

    Ok(formats.into_iter().filter_map(parse_format).collect())
}

/// Get `adaptiveFormats` as a list of objects, if any element is not a object, the whole list is rejected
fn adaptive_formats(streaming_data: &Map<String, Value>) -> Option<Vec<&Map<String, Value>>> {
    streaming_data
        .get(KEY_ADAPTIVE_FORMATS)?
        .as_array()?
        .iter()
        .map(Value::as_object)
        .collect()
}

fn parse_format(format: &Map<String, Value>) -> Option<LinkRecord> {
    let quality = format.get(KEY_QUALITY)?.as_str()?;
    let url = format.get(KEY_URL)?.as_str()?;

    Some(LinkRecord::from([
        (KEY_QUALITY.to_owned(), quality.to_owned()),
        (KEY_URL.to_owned(), url.to_owned()),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(quality: &str, url: &str) -> LinkRecord {
        LinkRecord::from([
            ("quality".to_string(), quality.to_string()),
            ("url".to_string(), url.to_string()),
        ])
    }

    #[test]
    fn should_extract_all_links() {
        let links = extract_links(
            r#"{"streamingData":{"adaptiveFormats":[{"quality":"720p","url":"http://a"},{"quality":"480p","url":"http://b"}]}}"#,
        )
        .unwrap();
        assert_eq!(
            links,
            vec![record("720p", "http://a"), record("480p", "http://b")]
        );
    }

    #[test]
    fn should_skip_entry_without_url() {
        let links = extract_links(
            r#"{"streamingData":{"adaptiveFormats":[{"quality":"720p"},{"quality":"480p","url":"http://b"}]}}"#,
        )
        .unwrap();
        assert_eq!(links, vec![record("480p", "http://b")]);
    }

    #[test]
    fn should_skip_malformed_entries() {
        let links = extract_links(
            r#"{"streamingData":{"adaptiveFormats":[
                {"url":"http://no-quality"},
                {},
                {"quality":720,"url":"http://number"},
                {"quality":"hd","url":null},
                {"quality":"tiny","url":"http://ok","itag":140,"mimeType":"audio/mp4"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(links, vec![record("tiny", "http://ok")]);
        // extra fields are not carried over
        assert_eq!(links[0].len(), 2);
    }

    #[test]
    fn should_keep_input_order() {
        let forward = extract_links(
            r#"{"streamingData":{"adaptiveFormats":[{"quality":"a","url":"1"},{"quality":"b"},{"quality":"c","url":"3"}]}}"#,
        )
        .unwrap();
        let reversed = extract_links(
            r#"{"streamingData":{"adaptiveFormats":[{"quality":"c","url":"3"},{"quality":"b"},{"quality":"a","url":"1"}]}}"#,
        )
        .unwrap();

        assert_eq!(forward, vec![record("a", "1"), record("c", "3")]);
        assert_eq!(reversed, vec![record("c", "3"), record("a", "1")]);
    }

    #[test]
    fn should_be_repeatable() {
        let data = r#"{"streamingData":{"adaptiveFormats":[{"quality":"720p","url":"http://a"}]}}"#;
        assert_eq!(extract_links(data), extract_links(data));
    }

    #[test]
    fn should_accept_empty_formats() {
        let links = extract_links(r#"{"streamingData":{"adaptiveFormats":[]}}"#).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn should_keep_values_verbatim() {
        let links = extract_links(
            r#"{"streamingData":{"adaptiveFormats":[{"quality":"","url":"https://r1.googlevideo.com/videoplayback?expire=1&itag=251&mime=audio%2Fwebm"}]}}"#,
        )
        .unwrap();
        assert_eq!(
            links,
            vec![record(
                "",
                "https://r1.googlevideo.com/videoplayback?expire=1&itag=251&mime=audio%2Fwebm"
            )]
        );
    }

    #[test]
    fn error_missing_adaptive_formats() {
        assert_eq!(
            extract_links(r#"{"streamingData":{}}"#),
            Err(ExtractError::MissingAdaptiveFormats)
        );
        assert_eq!(
            extract_links(r#"{"streamingData":{"adaptiveFormats":{"quality":"720p"}}}"#),
            Err(ExtractError::MissingAdaptiveFormats)
        );
        assert_eq!(
            extract_links(r#"{"streamingData":{"adaptiveFormats":null}}"#),
            Err(ExtractError::MissingAdaptiveFormats)
        );
    }

    #[test]
    fn error_adaptive_formats_with_non_object() {
        assert_eq!(
            extract_links(
                r#"{"streamingData":{"adaptiveFormats":[{"quality":"720p","url":"http://a"},"http://b"]}}"#
            ),
            Err(ExtractError::MissingAdaptiveFormats)
        );
    }

    #[test]
    fn error_missing_streaming_data() {
        assert_eq!(extract_links("{}"), Err(ExtractError::MissingStreamingData));
        assert_eq!(
            extract_links(r#"{"streamingData":[]}"#),
            Err(ExtractError::MissingStreamingData)
        );
        assert_eq!(
            extract_links(r#"{"adaptiveFormats":[]}"#),
            Err(ExtractError::MissingStreamingData)
        );
    }

    #[test]
    fn error_response_type() {
        assert_eq!(
            extract_links("not json at all"),
            Err(ExtractError::ResponseTypeError)
        );
        assert_eq!(extract_links(""), Err(ExtractError::ResponseTypeError));
        // valid json, but not a object at the top
        assert_eq!(
            extract_links(r#""streamingData""#),
            Err(ExtractError::ResponseTypeError)
        );
        assert_eq!(extract_links("42"), Err(ExtractError::ResponseTypeError));
        assert_eq!(
            extract_links(r#"[{"streamingData":{"adaptiveFormats":[]}}]"#),
            Err(ExtractError::ResponseTypeError)
        );
    }

    #[test]
    fn error_response_type_before_shape() {
        // truncated document that would otherwise be missing "adaptiveFormats"
        assert_eq!(
            extract_links(r#"{"streamingData":{}"#),
            Err(ExtractError::ResponseTypeError)
        );
    }

    /// Build a document with a `depth` deep nested array under a unrelated key
    fn nested_document(depth: usize) -> String {
        format!(
            r#"{{"other":{}{},"streamingData":{{"adaptiveFormats":[{{"quality":"720p","url":"http://a"}}]}}}}"#,
            "[".repeat(depth),
            "]".repeat(depth)
        )
    }

    #[test]
    fn should_allow_nesting_within_limit() {
        let links = extract_links(&nested_document(100)).unwrap();
        assert_eq!(links, vec![record("720p", "http://a")]);
    }

    #[test]
    fn error_nesting_over_limit() {
        assert_eq!(
            extract_links(&nested_document(200)),
            Err(ExtractError::ResponseTypeError)
        );
    }

    #[test]
    fn bytes_should_extract() {
        let links = extract_links_from_bytes(
            br#"{"streamingData":{"adaptiveFormats":[{"quality":"720p","url":"http://a"}]}}"#,
        )
        .unwrap();
        assert_eq!(links, vec![record("720p", "http://a")]);
    }

    #[test]
    fn bytes_error_bad_data_format() {
        assert_eq!(
            extract_links_from_bytes(b"{\"streamingData\":\xff\xfe}"),
            Err(ExtractError::BadDataFormat)
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ExtractError::BadDataFormat.to_string(),
            "Unable to convert response to UTF8 data"
        );
        assert_eq!(
            ExtractError::ResponseTypeError.to_string(),
            "Unable to parse player response"
        );
        assert_eq!(
            ExtractError::MissingStreamingData.to_string(),
            "Unable to parse streaming data"
        );
        assert_eq!(
            ExtractError::MissingAdaptiveFormats.to_string(),
            "Unable to parse adaptive formats"
        );
    }
}
