use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    OutOfFuel,
    StorageFull,
    Lava,
}

impl EndReason {
    /// Short code carried to the game-over screen.
    pub fn code(self) -> &'static str {
        match self {
            EndReason::OutOfFuel => "fuel",
            EndReason::StorageFull => "storage",
            EndReason::Lava => "lava",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReason(pub String);

impl FromStr for EndReason {
    type Err = UnknownReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fuel" => Ok(EndReason::OutOfFuel),
            "storage" => Ok(EndReason::StorageFull),
            "lava" => Ok(EndReason::Lava),
            other => Err(UnknownReason(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Session {
    #[default]
    Running,
    Ended(EndReason),
}

impl Session {
    pub fn is_running(&self) -> bool {
        matches!(self, Session::Running)
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self {
            Session::Running => None,
            Session::Ended(r) => Some(*r),
        }
    }

    /// Returns `true` only for the call that actually ended the session.
    pub fn end(&mut self, reason: EndReason) -> bool {
        if self.is_running() {
            *self = Session::Ended(reason);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_end_wins() {
        let mut s = Session::default();
        assert!(s.is_running());
        assert!(s.end(EndReason::StorageFull));
        assert!(!s.end(EndReason::Lava));
        assert!(!s.end(EndReason::OutOfFuel));
        assert_eq!(s, Session::Ended(EndReason::StorageFull));
        assert_eq!(s.end_reason(), Some(EndReason::StorageFull));
    }

    #[test]
    fn reason_codes_parse_back() {
        for r in [EndReason::OutOfFuel, EndReason::StorageFull, EndReason::Lava] {
            assert_eq!(r.code().parse::<EndReason>(), Ok(r));
        }
        assert_eq!(
            "meteor".parse::<EndReason>(),
            Err(UnknownReason("meteor".to_string()))
        );
    }
}
