/// Describes which configuration rule matched a group entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupMatchMetadata<'a> {
    pub match_key: Option<&'a str>,
    pub match_source: Option<&'a str>,
}

impl GroupMatchMetadata<'_> {
    pub fn is_empty(&self) -> bool {
        self.match_key.is_none() && self.match_source.is_none()
    }
}

/// Appends a `(matchKey=… matchSource=…)` descriptor to `message`.
///
/// Returns `message` unchanged when neither field is present.
pub fn append_match_metadata(message: &str, metadata: GroupMatchMetadata<'_>) -> String {
    if metadata.is_empty() {
        return message.to_string();
    }
    let mut parts = Vec::new();
    if let Some(match_key) = metadata.match_key {
        parts.push(format!("matchKey={match_key}"));
    }
    if let Some(match_source) = metadata.match_source {
        parts.push(format!("matchSource={match_source}"));
    }
    format!("{message} ({})", parts.join(" "))
}
