use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fairway_bestball::{BestBallConfig, Team};
use fairway_core::config::EngineConfig;
use fairway_core::course::{self, HoleInfo};
use fairway_core::game_registry::GameKind;
use fairway_core::game_trait::PlayerId;
use fairway_core::money::sanitize_stakes;
use fairway_core::player::{Player, in_tee_order};
use fairway_core::scorecard::Score;
use fairway_core::strokes::StrokeAllocation;
use fairway_matchplay::MatchPlayConfig;
use fairway_nassau::{MAX_PRESSES, NassauConfig, Press, PressStatus};
use fairway_skins::SkinsConfig;
use fairway_stableford::{StablefordConfig, StablefordVariant};
use fairway_wolf::{WolfConfig, WolfDecision, wolf_for_hole};

use crate::RoundSnapshot;
use crate::game::GameConfig;
use crate::settlement::SideBet;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Why a round file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Json(String),
    Toml(String),
    UnsupportedFormat(String),
    PlayerCount(usize),
    DuplicatePlayer(PlayerId),
    UnknownPlayer { id: PlayerId, context: String },
    HoleOutOfRange { hole: u8, hole_count: u8 },
    PressAfterLastHole { start_hole: u8, hole_count: u8 },
    TooManyPresses(usize),
    TooManyTeams(usize),
    WolfOwnPartner { hole: u8, wolf: PlayerId },
    BlindWithPartner { hole: u8 },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "invalid JSON round: {e}"),
            Self::Toml(e) => write!(f, "invalid TOML round: {e}"),
            Self::UnsupportedFormat(ext) => write!(f, "unsupported round file type: {ext}"),
            Self::PlayerCount(n) => {
                write!(f, "a round needs {MIN_PLAYERS}-{MAX_PLAYERS} players, got {n}")
            },
            Self::DuplicatePlayer(id) => write!(f, "player {id} is listed twice"),
            Self::UnknownPlayer { id, context } => {
                write!(f, "{context} references unknown player {id}")
            },
            Self::HoleOutOfRange { hole, hole_count } => {
                write!(f, "hole {hole} is outside the round (1-{hole_count})")
            },
            Self::PressAfterLastHole {
                start_hole,
                hole_count,
            } => write!(
                f,
                "press starting on hole {start_hole} is past the last hole ({hole_count})"
            ),
            Self::TooManyPresses(n) => {
                write!(f, "{n} presses requested, at most {MAX_PRESSES} allowed")
            },
            Self::TooManyTeams(n) => {
                write!(f, "{n} best ball teams listed, at most {MAX_PLAYERS} allowed")
            },
            Self::WolfOwnPartner { hole, wolf } => {
                write!(f, "wolf {wolf} cannot partner themselves on hole {hole}")
            },
            Self::BlindWithPartner { hole } => {
                write!(f, "hole {hole}: a blind wolf cannot take a partner")
            },
        }
    }
}

impl std::error::Error for InputError {}

/// Serialization of a round file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(InputError::UnsupportedFormat(ext)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub handicap_index: f32,
    /// Tee order; defaults to the order players are listed.
    #[serde(default)]
    pub position: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleInput {
    pub number: u8,
    #[serde(default = "default_par")]
    pub par: u8,
    #[serde(default)]
    pub difficulty_rank: Option<u8>,
    #[serde(default)]
    pub distance_yards: u16,
}

fn default_par() -> u8 {
    course::DEFAULT_PAR
}

/// Handicap strokes granted to one player on one hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeInput {
    pub player_id: PlayerId,
    pub hole: u8,
    pub strokes: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressInput {
    pub start_hole: u8,
    pub initiator: PlayerId,
    /// Defaults to the nassau's stakes.
    #[serde(default)]
    pub stakes: Option<f64>,
    #[serde(default)]
    pub cancelled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInput {
    #[serde(default)]
    pub name: Option<String>,
    pub players: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionInput {
    pub hole: u8,
    /// Absent for a lone wolf.
    #[serde(default)]
    pub partner: Option<PlayerId>,
    #[serde(default)]
    pub blind: bool,
}

/// A game as written in a round file, tagged by `type`. Missing fields take
/// the engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameSpec {
    Skins {
        #[serde(default)]
        stakes: Option<f64>,
        #[serde(default)]
        carryover: Option<bool>,
        #[serde(default)]
        net: Option<bool>,
    },
    Nassau {
        #[serde(default)]
        stakes: Option<f64>,
        #[serde(default)]
        net: Option<bool>,
        #[serde(default)]
        auto_press: Option<bool>,
        #[serde(default)]
        presses: Vec<PressInput>,
    },
    MatchPlay {
        #[serde(default)]
        stakes: Option<f64>,
        #[serde(default)]
        net: Option<bool>,
    },
    Stableford {
        #[serde(default)]
        modified: Option<bool>,
        #[serde(default)]
        net: Option<bool>,
    },
    BestBall {
        #[serde(default)]
        stakes: Option<f64>,
        #[serde(default)]
        net: Option<bool>,
        #[serde(default)]
        teams: Vec<TeamInput>,
    },
    Wolf {
        #[serde(default)]
        stakes: Option<f64>,
        #[serde(default)]
        carryover: Option<bool>,
        #[serde(default)]
        net: Option<bool>,
        #[serde(default)]
        decisions: Vec<DecisionInput>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideBetInput {
    pub label: String,
    #[serde(default)]
    pub hole: Option<u8>,
    #[serde(default)]
    pub stakes: Option<f64>,
    #[serde(default)]
    pub winner: Option<PlayerId>,
}

/// A complete round file, as written by hand or sent by the presentation
/// layer.
///
/// Stakes are decimal dollars that may be missing and player references are
/// plain ids. [`RoundInput::into_snapshot`] validates the shape once and
/// produces the typed [`RoundSnapshot`] the calculators run on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundInput {
    pub players: Vec<PlayerInput>,
    pub holes: Vec<HoleInput>,
    pub scores: Vec<Score>,
    pub strokes: Vec<StrokeInput>,
    pub games: Vec<GameSpec>,
    pub side_bets: Vec<SideBetInput>,
}

impl RoundInput {
    pub fn from_json(content: &str) -> Result<Self, InputError> {
        serde_json::from_str(content).map_err(|e| InputError::Json(e.to_string()))
    }

    pub fn from_toml(content: &str) -> Result<Self, InputError> {
        toml::from_str(content).map_err(|e| InputError::Toml(e.to_string()))
    }

    pub fn parse(content: &str, format: InputFormat) -> Result<Self, InputError> {
        match format {
            InputFormat::Json => Self::from_json(content),
            InputFormat::Toml => Self::from_toml(content),
        }
    }

    /// Validate the round and resolve defaults from `config`.
    pub fn into_snapshot(self, config: &EngineConfig) -> Result<RoundSnapshot, InputError> {
        let players = self.resolve_players()?;
        let ids: BTreeSet<PlayerId> = players.iter().map(|p| p.id).collect();
        let holes: Vec<HoleInfo> = self
            .holes
            .iter()
            .map(|h| HoleInfo {
                number: h.number,
                par: h.par,
                difficulty_rank: h.difficulty_rank.unwrap_or(h.number),
                distance_yards: h.distance_yards,
            })
            .collect();
        let hole_count = course::hole_count(&holes);
        let check_hole = |hole: u8| {
            if (1..=hole_count).contains(&hole) {
                Ok(())
            } else {
                Err(InputError::HoleOutOfRange { hole, hole_count })
            }
        };
        let check_player = |id: PlayerId, context: &str| {
            if ids.contains(&id) {
                Ok(())
            } else {
                Err(InputError::UnknownPlayer {
                    id,
                    context: context.to_string(),
                })
            }
        };

        for score in &self.scores {
            check_hole(score.hole)?;
        }

        let mut strokes = StrokeAllocation::new();
        for entry in &self.strokes {
            check_player(entry.player_id, "stroke allocation")?;
            check_hole(entry.hole)?;
            strokes.set(entry.player_id, entry.hole, entry.strokes);
        }

        let tee_order: Vec<PlayerId> = in_tee_order(&players).iter().map(|p| p.id).collect();
        let mut games = Vec::with_capacity(self.games.len());
        for game_spec in self.games {
            let game = match game_spec {
                GameSpec::Skins {
                    stakes,
                    carryover,
                    net,
                } => GameConfig::Skins(SkinsConfig {
                    stakes: sanitize_stakes(stakes, config.default_stakes(GameKind::Skins)),
                    carryover: carryover.unwrap_or(config.skins_carryover),
                    net: net.unwrap_or(config.net_scoring),
                }),
                GameSpec::Nassau {
                    stakes,
                    net,
                    auto_press,
                    presses,
                } => {
                    let stakes = sanitize_stakes(stakes, config.default_stakes(GameKind::Nassau));
                    let mut resolved = Vec::with_capacity(presses.len());
                    for press in presses {
                        check_player(press.initiator, "press")?;
                        if press.start_hole == 0 {
                            return Err(InputError::HoleOutOfRange {
                                hole: 0,
                                hole_count,
                            });
                        }
                        if press.start_hole > hole_count {
                            return Err(InputError::PressAfterLastHole {
                                start_hole: press.start_hole,
                                hole_count,
                            });
                        }
                        let mut resolved_press = Press::new(
                            press.start_hole,
                            press.initiator,
                            sanitize_stakes(press.stakes, stakes),
                        );
                        if press.cancelled {
                            resolved_press.status = PressStatus::Cancelled;
                        }
                        resolved.push(resolved_press);
                    }
                    let live = resolved
                        .iter()
                        .filter(|p| p.status == PressStatus::Active)
                        .count();
                    if live > MAX_PRESSES {
                        return Err(InputError::TooManyPresses(live));
                    }
                    GameConfig::Nassau(NassauConfig {
                        stakes,
                        net: net.unwrap_or(config.net_scoring),
                        auto_press: auto_press.unwrap_or(config.nassau_auto_press),
                        presses: resolved,
                    })
                },
                GameSpec::MatchPlay { stakes, net } => GameConfig::MatchPlay(MatchPlayConfig {
                    stakes: sanitize_stakes(stakes, config.default_stakes(GameKind::MatchPlay)),
                    net: net.unwrap_or(config.net_scoring),
                }),
                GameSpec::Stableford { modified, net } => {
                    let variant = if modified.unwrap_or(config.stableford_modified) {
                        StablefordVariant::Modified
                    } else {
                        StablefordVariant::Standard
                    };
                    GameConfig::Stableford(StablefordConfig {
                        variant,
                        net: net.unwrap_or(config.net_scoring),
                    })
                },
                GameSpec::BestBall { stakes, net, teams } => {
                    if teams.len() > MAX_PLAYERS {
                        return Err(InputError::TooManyTeams(teams.len()));
                    }
                    let mut resolved = Vec::with_capacity(teams.len());
                    for (team, id) in teams.into_iter().zip(1..) {
                        for &player in &team.players {
                            check_player(player, "best ball team")?;
                        }
                        let name = team.name.unwrap_or_else(|| format!("Team {id}"));
                        resolved.push(Team::new(id, name, team.players));
                    }
                    GameConfig::BestBall(BestBallConfig {
                        teams: resolved,
                        net: net.unwrap_or(config.net_scoring),
                        stakes: sanitize_stakes(stakes, config.default_stakes(GameKind::BestBall)),
                    })
                },
                GameSpec::Wolf {
                    stakes,
                    carryover,
                    net,
                    decisions,
                } => {
                    let mut resolved = Vec::with_capacity(decisions.len());
                    for decision in decisions {
                        check_hole(decision.hole)?;
                        let Some(partner) = decision.partner else {
                            resolved.push(WolfDecision::lone(decision.hole, decision.blind));
                            continue;
                        };
                        if decision.blind {
                            return Err(InputError::BlindWithPartner {
                                hole: decision.hole,
                            });
                        }
                        check_player(partner, "wolf decision")?;
                        if let Some(wolf) = wolf_for_hole(&tee_order, decision.hole)
                            && wolf == partner
                            && tee_order.len() == fairway_wolf::WOLF_PLAYERS
                        {
                            return Err(InputError::WolfOwnPartner {
                                hole: decision.hole,
                                wolf,
                            });
                        }
                        resolved.push(WolfDecision::partner(decision.hole, partner));
                    }
                    GameConfig::Wolf(WolfConfig {
                        stakes: sanitize_stakes(stakes, config.default_stakes(GameKind::Wolf)),
                        carryover: carryover.unwrap_or(config.wolf_carryover),
                        net: net.unwrap_or(config.net_scoring),
                        decisions: resolved,
                    })
                },
            };
            games.push(game);
        }

        let mut side_bets = Vec::with_capacity(self.side_bets.len());
        for bet in self.side_bets {
            if let Some(hole) = bet.hole {
                check_hole(hole)?;
            }
            if let Some(winner) = bet.winner {
                check_player(winner, "side bet")?;
            }
            side_bets.push(SideBet {
                stakes: sanitize_stakes(bet.stakes, config.default_stakes(GameKind::SideBet)),
                label: bet.label,
                hole: bet.hole,
                winner: bet.winner,
            });
        }

        Ok(RoundSnapshot {
            players,
            holes,
            scores: self.scores,
            strokes,
            games,
            side_bets,
        })
    }

    fn resolve_players(&self) -> Result<Vec<Player>, InputError> {
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(InputError::PlayerCount(count));
        }
        let mut seen = BTreeSet::new();
        let mut players = Vec::with_capacity(count);
        for (index, input) in self.players.iter().enumerate() {
            if !seen.insert(input.id) {
                return Err(InputError::DuplicatePlayer(input.id));
            }
            let position = input.position.unwrap_or(index as u8);
            players.push(
                Player::new(input.id, input.name.clone(), position)
                    .with_handicap(input.handicap_index),
            );
        }
        Ok(players)
    }
}
