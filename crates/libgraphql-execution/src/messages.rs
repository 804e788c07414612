use crate::loc::SourceLocation;
use crate::response_path::ResponsePath;
use std::sync::Arc;

/// How serious a [`GraphMessage`] is.
///
/// A [`MessageSeverity::Critical`] message always cancels the execution
/// context that recorded it.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageSeverity {
    Info,
    Warning,
    Critical,
}

/// Where a [`GraphMessage`] came from: a position in the query document, a
/// path in the response tree, or both.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
pub struct SourceOrigin {
    pub location: Option<SourceLocation>,
    pub path: Option<ResponsePath>,
}
impl SourceOrigin {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn at_location(location: SourceLocation) -> Self {
        Self {
            location: Some(location),
            path: None,
        }
    }

    pub fn at_path(path: ResponsePath, location: Option<SourceLocation>) -> Self {
        Self {
            location,
            path: Some(path),
        }
    }
}
impl std::fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.path, &self.location) {
            (Some(path), Some(loc)) => write!(f, "{path} ({loc})"),
            (Some(path), None) => write!(f, "{path}"),
            (None, Some(loc)) => write!(f, "{loc}"),
            (None, None) => write!(f, "<unknown>"),
        }
    }
}

/// A single diagnostic produced while constructing or executing a query.
#[derive(Clone, Debug, serde::Serialize)]
pub struct GraphMessage {
    pub(crate) code: String,
    #[serde(skip)]
    pub(crate) exception: Option<Arc<anyhow::Error>>,
    pub(crate) message: String,
    pub(crate) origin: SourceOrigin,
    pub(crate) severity: MessageSeverity,
}
impl GraphMessage {
    pub fn new(
        severity: MessageSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
        origin: SourceOrigin,
    ) -> Self {
        Self {
            code: code.into(),
            exception: None,
            message: message.into(),
            origin,
            severity,
        }
    }

    pub fn critical(
        code: impl Into<String>,
        message: impl Into<String>,
        origin: SourceOrigin,
    ) -> Self {
        Self::new(MessageSeverity::Critical, code, message, origin)
    }

    pub fn warning(
        code: impl Into<String>,
        message: impl Into<String>,
        origin: SourceOrigin,
    ) -> Self {
        Self::new(MessageSeverity::Warning, code, message, origin)
    }

    pub fn info(
        code: impl Into<String>,
        message: impl Into<String>,
        origin: SourceOrigin,
    ) -> Self {
        Self::new(MessageSeverity::Info, code, message, origin)
    }

    /// Attach the error that caused this message. It is kept for logging and
    /// is never serialized.
    pub fn with_exception(mut self, exception: Arc<anyhow::Error>) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    pub fn exception(&self) -> Option<&anyhow::Error> {
        self.exception.as_deref()
    }

    pub fn is_critical(&self) -> bool {
        self.severity == MessageSeverity::Critical
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    pub fn severity(&self) -> MessageSeverity {
        self.severity
    }
}
impl PartialEq for GraphMessage {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.message == other.message
            && self.origin == other.origin
            && self.severity == other.severity
            && self.exception.is_some() == other.exception.is_some()
    }
}
impl std::fmt::Display for GraphMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:?}] {}: {} (at {})",
            self.severity,
            self.code,
            self.message,
            self.origin,
        )
    }
}

/// An append-only, ordered list of [`GraphMessage`]s.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct MessageCollection {
    messages: Vec<GraphMessage>,
}
impl MessageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: GraphMessage) {
        self.messages.push(message);
    }

    pub fn append(&mut self, other: MessageCollection) {
        self.messages.extend(other.messages);
    }

    pub fn critical(&self) -> impl Iterator<Item = &GraphMessage> {
        self.messages.iter().filter(|msg| msg.is_critical())
    }

    pub fn has_critical(&self) -> bool {
        self.messages.iter().any(|msg| msg.is_critical())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GraphMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// The highest severity recorded so far, if any message was recorded.
    pub fn max_severity(&self) -> Option<MessageSeverity> {
        self.messages.iter().map(|msg| msg.severity).max()
    }

    pub fn with_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a GraphMessage> + 'a {
        self.messages.iter().filter(move |msg| msg.code == code)
    }
}
impl<'a> IntoIterator for &'a MessageCollection {
    type Item = &'a GraphMessage;
    type IntoIter = std::slice::Iter<'a, GraphMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
impl IntoIterator for MessageCollection {
    type Item = GraphMessage;
    type IntoIter = std::vec::IntoIter<GraphMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}
impl std::iter::Extend<GraphMessage> for MessageCollection {
    fn extend<T: IntoIterator<Item = GraphMessage>>(&mut self, iter: T) {
        self.messages.extend(iter);
    }
}
