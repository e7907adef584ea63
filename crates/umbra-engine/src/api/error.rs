use thiserror::Error;

/// Errors surfaced to the host.
///
/// Annotation parse failures and not-yet-loaded resources never show up here:
/// those degrade to "no override" or "retry next tick".
#[derive(Error, Debug)]
pub enum ShadowError {
    #[error("not a shadow command: {0:?}")]
    NotShadowCommand(String),
    #[error("unknown shadow subcommand: {0}")]
    UnknownSubcommand(String),
    #[error("missing target for shadow set")]
    MissingTarget,
    #[error("invalid switch value for {command}: {value}")]
    InvalidSwitch { command: &'static str, value: String },
    #[error("invalid shadow config: {0}")]
    Config(#[from] serde_json::Error),
}
