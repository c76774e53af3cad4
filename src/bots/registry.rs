use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::{Bot, Difficulty};
use crate::bots::{AggressiveBot, FirstLegalBot, HumanBot, RandomBot};
use crate::error::GameError;

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Built-in policy for a difficulty tier.
pub fn create_bot(difficulty: Difficulty, seed: u64) -> Box<dyn Bot> {
    let rng = StdRng::seed_from_u64(seed);
    match difficulty {
        Difficulty::Easy => Box::new(FirstLegalBot::new(rng)),
        Difficulty::Normal => Box::new(RandomBot::new(rng)),
        Difficulty::Hard => Box::new(AggressiveBot::new(rng)),
    }
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - easy[:seed]
/// - normal[:seed] (alias: random)
/// - hard[:seed]
pub fn create_bot_from_spec(spec: &str, index: usize, seed: u64) -> Result<Box<dyn Bot>, GameError> {
    let label = label_for_spec(spec);
    if label == "human" {
        let name = spec
            .split_once(':')
            .map(|(_, name)| name.trim().to_string())
            .unwrap_or_else(|| format!("Human {}", index + 1));
        return Ok(Box::new(HumanBot::new(name)));
    }
    let custom_seed = spec
        .split_once(':')
        .and_then(|(_, value)| value.trim().parse::<u64>().ok())
        .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
    let difficulty = match label.as_str() {
        "random" => Difficulty::Normal,
        other => other.parse::<Difficulty>()?,
    };
    Ok(create_bot(difficulty, custom_seed))
}
