//! Runtime shadow commands.
//!
//! ```text
//! shadow set <target> [annotation]
//! shadow visible [0|1]
//! shadow mirror-x [0|1]      (alias xReverse)
//! shadow mirror-y [0|1]      (alias yReverse)
//! ```

use crate::api::error::ShadowError;
use crate::api::types::EventId;

pub const KEYWORD: &str = "shadow";

/// Which subjects a `set` command applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelector {
    /// `-1` or `play`.
    Player,
    /// `0` or `self`: the event running the command.
    Invoker,
    /// A map event by id.
    Event(EventId),
    /// Every map event whose shape is not None.
    All,
    /// Every map event whose name contains the token.
    NameContains(String),
}

impl TargetSelector {
    pub fn parse(token: &str) -> Self {
        match token {
            "-1" | "play" => Self::Player,
            "0" | "self" => Self::Invoker,
            "all" => Self::All,
            _ => match token.parse::<u32>() {
                Ok(id) => Self::Event(EventId(id)),
                Err(_) => Self::NameContains(token.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShadowCommand {
    Set { target: TargetSelector, annotation: String },
    /// `None` toggles.
    Visible(Option<bool>),
    MirrorX(Option<bool>),
    MirrorY(Option<bool>),
}

impl ShadowCommand {
    /// Parse one command line, keyword included.
    pub fn parse(line: &str) -> Result<Self, ShadowError> {
        let mut words = line.split_whitespace();
        match words.next() {
            Some(word) if word.eq_ignore_ascii_case(KEYWORD) => {}
            _ => return Err(ShadowError::NotShadowCommand(line.to_string())),
        }

        let sub = words.next().ok_or_else(|| ShadowError::UnknownSubcommand(String::new()))?;
        match sub.to_ascii_lowercase().as_str() {
            "set" => {
                let target = words.next().ok_or(ShadowError::MissingTarget)?;
                let annotation = words.collect::<Vec<_>>().join(" ");
                Ok(Self::Set { target: TargetSelector::parse(target), annotation })
            }
            "visible" => Ok(Self::Visible(switch("visible", words.next())?)),
            "mirror-x" | "xreverse" => Ok(Self::MirrorX(switch("mirror-x", words.next())?)),
            "mirror-y" | "yreverse" => Ok(Self::MirrorY(switch("mirror-y", words.next())?)),
            _ => Err(ShadowError::UnknownSubcommand(sub.to_string())),
        }
    }
}

fn switch(command: &'static str, value: Option<&str>) -> Result<Option<bool>, ShadowError> {
    match value {
        None => Ok(None),
        Some("1" | "on" | "true") => Ok(Some(true)),
        Some("0" | "off" | "false") => Ok(Some(false)),
        Some(other) => Err(ShadowError::InvalidSwitch { command, value: other.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_set() {
        let cmd = ShadowCommand::parse("shadow set 5 circle|10:0").unwrap();
        assert_eq!(
            cmd,
            ShadowCommand::Set { target: TargetSelector::Event(EventId(5)), annotation: "circle|10:0".into() }
        );

        let cmd = ShadowCommand::parse("shadow set play").unwrap();
        assert_eq!(cmd, ShadowCommand::Set { target: TargetSelector::Player, annotation: String::new() });
    }

    #[test]
    fn target_selectors() {
        assert_eq!(TargetSelector::parse("-1"), TargetSelector::Player);
        assert_eq!(TargetSelector::parse("0"), TargetSelector::Invoker);
        assert_eq!(TargetSelector::parse("self"), TargetSelector::Invoker);
        assert_eq!(TargetSelector::parse("12"), TargetSelector::Event(EventId(12)));
        assert_eq!(TargetSelector::parse("all"), TargetSelector::All);
        assert_eq!(TargetSelector::parse("Guard"), TargetSelector::NameContains("Guard".into()));
        assert_eq!(TargetSelector::parse("-3"), TargetSelector::NameContains("-3".into()));
    }

    #[test]
    fn parse_switches() {
        assert_eq!(ShadowCommand::parse("shadow visible").unwrap(), ShadowCommand::Visible(None));
        assert_eq!(ShadowCommand::parse("shadow visible 0").unwrap(), ShadowCommand::Visible(Some(false)));
        assert_eq!(ShadowCommand::parse("shadow xReverse 1").unwrap(), ShadowCommand::MirrorX(Some(true)));
        assert_eq!(ShadowCommand::parse("shadow mirror-y").unwrap(), ShadowCommand::MirrorY(None));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(ShadowCommand::parse("light on"), Err(ShadowError::NotShadowCommand(_))));
        assert!(matches!(ShadowCommand::parse("shadow dance"), Err(ShadowError::UnknownSubcommand(_))));
        assert!(matches!(ShadowCommand::parse("shadow"), Err(ShadowError::UnknownSubcommand(_))));
        assert!(matches!(ShadowCommand::parse("shadow set"), Err(ShadowError::MissingTarget)));
        assert!(matches!(
            ShadowCommand::parse("shadow visible maybe"),
            Err(ShadowError::InvalidSwitch { command: "visible", .. })
        ));
    }
}
