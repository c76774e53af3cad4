//! House-rule knobs. Loaded from TOML at runtime by the `simulate` CLI; every field falls back to
//! the table defaults when omitted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RulesConfig {
    /// Timer ticks a seat gets before a draw is forced on it.
    pub turn_timer_ticks: u32,
    /// Consecutive decisions an automated seat may take in one call.
    pub max_bot_chain: usize,
    /// Mercy: a hand this large loses the round.
    pub mercy_hand_limit: usize,
    /// Mercy: cards a reverse forces on the opponent.
    pub mercy_reverse_draw: usize,
    /// Fkk: a hand this large draws `fkk_penalty` more.
    pub fkk_hand_limit: usize,
    pub fkk_penalty: usize,
    /// Cards drawn for failing to call UNO.
    pub uno_penalty: usize,
    /// Entries kept in the round history.
    pub history_len: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            turn_timer_ticks: 20,
            max_bot_chain: 5,
            mercy_hand_limit: 35,
            mercy_reverse_draw: 5,
            fkk_hand_limit: 15,
            fkk_penalty: 2,
            uno_penalty: 2,
            history_len: 15,
        }
    }
}

impl RulesConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, GameError> {
        let rules: RulesConfig = toml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.turn_timer_ticks == 0 {
            return Err(GameError::InvalidConfiguration("turn timer must be positive"));
        }
        if self.max_bot_chain == 0 {
            return Err(GameError::InvalidConfiguration("bot chain must allow one decision"));
        }
        if self.mercy_hand_limit < 2 || self.fkk_hand_limit < 2 {
            return Err(GameError::InvalidConfiguration("hand limits must be at least 2"));
        }
        Ok(())
    }
}

/// Load house rules from a TOML file.
pub fn load_rules(path: &Path) -> Result<RulesConfig, GameError> {
    let content = std::fs::read_to_string(path)?;
    let rules = RulesConfig::from_toml_str(&content)?;
    tracing::info!(path = %path.display(), "loaded house rules");
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let rules = RulesConfig::from_toml_str("mercy_hand_limit = 20\nturn_timer_ticks = 5\n").unwrap();
        assert_eq!(rules.mercy_hand_limit, 20);
        assert_eq!(rules.turn_timer_ticks, 5);
        assert_eq!(rules.fkk_hand_limit, 15);
        assert_eq!(rules.uno_penalty, 2);
    }

    #[test]
    fn rejects_zero_timer() {
        assert!(matches!(
            RulesConfig::from_toml_str("turn_timer_ticks = 0"),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            RulesConfig::from_toml_str("max_bot_chain = \"many\""),
            Err(GameError::Rules(_))
        ));
    }
}
