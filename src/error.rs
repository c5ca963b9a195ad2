//! Error type shared by connectors and collectors.

pub type CollectResult<T> = Result<T, CollectError>;

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("command failed: {cmd}: {stderr}")]
    Command { cmd: String, stderr: String },

    #[error("response too large: {len} bytes for command: {cmd}")]
    OutputTooLarge { cmd: String, len: usize },

    #[error("invalid utf-8 in command output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid {model} record: path={path} error={message}")]
    Model {
        model: &'static str,
        path: String,
        message: String,
    },

    #[error("missing field: {0}")]
    MissingField(String),

    #[error("malformed resource id: '{0}'")]
    MalformedId(String),

    #[error("trigger config has no bindings")]
    EmptyBindings,

    #[error("config error: {0}")]
    Config(String),
}

impl CollectError {
    /// Short machine-readable name of the variant, carried on error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Command { .. } => "Command",
            Self::OutputTooLarge { .. } => "OutputTooLarge",
            Self::Utf8(_) => "Utf8",
            Self::Json(_) => "Json",
            Self::Io(_) => "Io",
            Self::Model { .. } => "Model",
            Self::MissingField(_) => "MissingField",
            Self::MalformedId(_) => "MalformedId",
            Self::EmptyBindings => "EmptyBindings",
            Self::Config(_) => "Config",
        }
    }
}
