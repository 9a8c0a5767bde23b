use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[strum(serialize = "up", serialize = "increment", serialize = "+")]
    Increment,
    #[strum(serialize = "down", serialize = "decrement", serialize = "-")]
    Decrement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Step(Step),
    SetActive(u32),
    ConfigReload,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseEventError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    Unknown(String),
    #[error("Invalid segment count '{0}'")]
    InvalidCount(String),
}

/// Parses one line of the control socket protocol.
impl FromStr for AppEvent {
    type Err = ParseEventError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseEventError::Empty)?;

        if command.eq_ignore_ascii_case("set") {
            let arg = words.next().unwrap_or_default();
            return arg
                .parse()
                .map(AppEvent::SetActive)
                .map_err(|_| ParseEventError::InvalidCount(arg.to_string()));
        }
        if command.eq_ignore_ascii_case("reload") {
            return Ok(AppEvent::ConfigReload);
        }

        Step::from_str(command)
            .map(AppEvent::Step)
            .map_err(|_| ParseEventError::Unknown(command.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_aliases() {
        let cases = vec![
            ("up", Step::Increment),
            ("UP", Step::Increment),
            ("+", Step::Increment),
            ("increment", Step::Increment),
            ("down", Step::Decrement),
            ("-", Step::Decrement),
            ("Decrement", Step::Decrement),
        ];

        for (text, expected) in cases {
            assert_eq!(text.parse::<AppEvent>(), Ok(AppEvent::Step(expected)));
        }
    }

    #[test]
    fn test_step_deserialization() {
        let step: Step = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(step, Step::Decrement);
    }

    #[test]
    fn test_set_and_reload() {
        assert_eq!("set 4".parse(), Ok(AppEvent::SetActive(4)));
        assert_eq!("  SET   0 ".parse(), Ok(AppEvent::SetActive(0)));
        assert_eq!("reload".parse(), Ok(AppEvent::ConfigReload));
    }

    #[test]
    fn test_rejected_lines() {
        assert_eq!("".parse::<AppEvent>(), Err(ParseEventError::Empty));
        assert_eq!(
            "louder".parse::<AppEvent>(),
            Err(ParseEventError::Unknown("louder".into()))
        );
        assert_eq!(
            "set -1".parse::<AppEvent>(),
            Err(ParseEventError::InvalidCount("-1".into()))
        );
        assert_eq!(
            "set".parse::<AppEvent>(),
            Err(ParseEventError::InvalidCount("".into()))
        );
    }
}
