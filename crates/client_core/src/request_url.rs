//! Request URL construction: `{base_endpoint}/{sentence}`.

use url::Url;

use crate::{config::PathEncoding, error::CompressionError};

pub fn parse_base_endpoint(base_endpoint: &str) -> Result<Url, CompressionError> {
    let base = Url::parse(base_endpoint.trim()).map_err(|err| {
        CompressionError::InvalidEndpoint(format!("'{base_endpoint}': {err}"))
    })?;
    if base.cannot_be_a_base() {
        return Err(CompressionError::InvalidEndpoint(format!(
            "'{base_endpoint}' cannot carry a path segment"
        )));
    }
    Ok(base)
}

/// Appends `sentence` as the final path segment of `base`.
///
/// `PathEncoding::Raw` concatenates the text unescaped, so a `?` or `#`
/// in the sentence turns the tail into a query or fragment.
///
/// A sentence of exactly `.` or `..` has no URL form: dot segments are
/// resolved away whether or not they are percent-encoded. Percent mode
/// rejects those instead of requesting the base path.
pub fn build_request_url(
    base: &Url,
    sentence: &str,
    encoding: PathEncoding,
) -> Result<Url, CompressionError> {
    match encoding {
        PathEncoding::Percent => {
            if matches!(sentence, "." | "..") {
                return Err(CompressionError::UnaddressableSentence(sentence.to_string()));
            }
            let mut url = base.clone();
            url.set_query(None);
            url.set_fragment(None);
            url.path_segments_mut()
                .map_err(|()| {
                    CompressionError::InvalidEndpoint(format!(
                        "'{base}' cannot carry a path segment"
                    ))
                })?
                .pop_if_empty()
                .push(sentence);
            Ok(url)
        }
        PathEncoding::Raw => {
            let raw = format!("{}/{}", base.as_str().trim_end_matches('/'), sentence);
            Url::parse(&raw)
                .map_err(|err| CompressionError::InvalidEndpoint(format!("'{raw}': {err}")))
        }
    }
}
