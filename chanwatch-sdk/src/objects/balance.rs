use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which liquidity direction the channel list should favour.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceMode {
    /// Channels that can receive the most come first.
    #[default]
    Receive,
    /// Channels that can send the most come first.
    Send,
    /// The most lopsided channels come first.
    Routing,
}

impl BalanceMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            BalanceMode::Receive => "receive",
            BalanceMode::Send => "send",
            BalanceMode::Routing => "routing",
        }
    }
}

impl fmt::Display for BalanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown balance mode `{0}`, expected one of: receive, send, routing")]
pub struct BalanceModeParseError(pub String);

impl FromStr for BalanceMode {
    type Err = BalanceModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "receive" => Ok(BalanceMode::Receive),
            "send" => Ok(BalanceMode::Send),
            "routing" => Ok(BalanceMode::Routing),
            _ => Err(BalanceModeParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_balance_mode() {
        assert_eq!("receive".parse::<BalanceMode>().unwrap(), BalanceMode::Receive);
        assert_eq!(" Routing ".parse::<BalanceMode>().unwrap(), BalanceMode::Routing);
        assert!("sideways".parse::<BalanceMode>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&BalanceMode::Send).unwrap();
        assert_eq!(json, "\"send\"");
        let mode: BalanceMode = serde_json::from_str("\"routing\"").unwrap();
        assert_eq!(mode, BalanceMode::Routing);
    }
}
