use serde::{Deserialize, Serialize};

use crate::game_registry::GameKind;
use crate::money::{Cents, MAX_STAKES, is_usable_stake};

/// Engine-wide defaults applied when a round's game setup leaves a field out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stakes: StakeDefaults,
    /// Tied skins roll into the next hole.
    pub skins_carryover: bool,
    /// Pushed wolf holes roll their points into the next hole.
    pub wolf_carryover: bool,
    /// Games compare net scores unless told otherwise.
    pub net_scoring: bool,
    pub nassau_auto_press: bool,
    /// Use the modified stableford table by default.
    pub stableford_modified: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stakes: StakeDefaults::default(),
            skins_carryover: true,
            wolf_carryover: true,
            net_scoring: true,
            nassau_auto_press: false,
            stableford_modified: false,
        }
    }
}

/// Default stakes per game, in dollars as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakeDefaults {
    /// Per player, per skin.
    pub skins: f64,
    /// Per segment and per press.
    pub nassau: f64,
    pub match_play: f64,
    /// Per losing team member.
    pub best_ball: f64,
    /// Per wolf point.
    pub wolf: f64,
    pub side_bet: f64,
}

impl Default for StakeDefaults {
    fn default() -> Self {
        Self {
            skins: 1.0,
            nassau: 5.0,
            match_play: 10.0,
            best_ball: 5.0,
            wolf: 1.0,
            side_bet: 5.0,
        }
    }
}

impl EngineConfig {
    /// Load config from `$FAIRWAY_CONFIG` or `config/fairway.toml`. Falls back
    /// to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("FAIRWAY_CONFIG")
            .unwrap_or_else(|_| "config/fairway.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validate configuration, logging and returning a warning per issue.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for kind in GameKind::GAMES.into_iter().chain([GameKind::SideBet]) {
            let dollars = self.stakes.dollars_for(kind);
            if !is_usable_stake(dollars) {
                warnings.push(format!(
                    "stakes.{kind} must be a non-negative amount of at most {MAX_STAKES}"
                ));
            }
        }
        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        warnings
    }

    /// Default stake for `kind` in cents. Unusable config values count as zero.
    pub fn default_stakes(&self, kind: GameKind) -> Cents {
        let dollars = self.stakes.dollars_for(kind);
        if is_usable_stake(dollars) {
            Cents::from_dollars(dollars).unwrap_or(Cents::ZERO)
        } else {
            Cents::ZERO
        }
    }
}

impl StakeDefaults {
    fn dollars_for(&self, kind: GameKind) -> f64 {
        match kind {
            GameKind::Skins => self.skins,
            GameKind::Nassau => self.nassau,
            GameKind::MatchPlay => self.match_play,
            GameKind::BestBall => self.best_ball,
            GameKind::Wolf => self.wolf,
            GameKind::SideBet => self.side_bet,
            GameKind::Stableford => 0.0,
        }
    }
}
