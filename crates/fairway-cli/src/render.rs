use fairway_core::game_registry::GameEntry;
use fairway_core::player::{Player, display_name};
use fairway_engine::game::GameResult;
use fairway_engine::live::LiveMoneyState;
use fairway_engine::settlement::NetSettlement;
use fairway_engine::{RoundReport, RoundSnapshot};
use fairway_nassau::nassau_context;

pub fn report(snapshot: &RoundSnapshot, report: &RoundReport) -> String {
    let players = &snapshot.players;
    let mut lines = Vec::new();
    match report.thru {
        Some(thru) => lines.push(format!("Thru {thru}")),
        None => lines.push("No holes completed".to_string()),
    }

    for result in &report.results {
        lines.push(String::new());
        lines.push(format!("== {} ==", result.kind().as_str()));
        game_lines(result, players, &mut lines);
    }

    lines.push(String::new());
    lines.push("== Balances ==".to_string());
    for (&id, &balance) in &report.balances {
        lines.push(format!("{:<16} {balance:>10}", display_name(players, id)));
    }
    lines.push(String::new());
    lines.push("== Settle up ==".to_string());
    settlement_lines(&report.settlements, players, &mut lines);
    finish(lines)
}

fn game_lines(result: &GameResult, players: &[Player], lines: &mut Vec<String>) {
    let name = |id| display_name(players, id);
    match result {
        GameResult::Skins(skins) => {
            if skins.standings.is_empty() {
                lines.push("not played".to_string());
            }
            for s in &skins.standings {
                let player = name(s.player_id);
                lines.push(format!("{player:<16} {:>2} skins {:>10}", s.skins_won, s.earnings));
            }
            if skins.carryover > 0 {
                lines.push(format!("Next hole worth {} skins", skins.next_hole_value()));
            }
        },
        GameResult::Nassau(nassau) => {
            let Some(context) = nassau_context(nassau, players) else {
                lines.push("not played".to_string());
                return;
            };
            for bet in nassau.segments.iter().chain(&nassau.presses) {
                let state = match (bet.winner, bet.leader) {
                    (Some(winner), _) => format!("won by {}", name(winner)),
                    (None, Some(leader)) => format!("{} up {}", name(leader), bet.margin),
                    (None, None) if bet.complete => "halved".to_string(),
                    (None, None) => "all square".to_string(),
                };
                lines.push(format!("{:<24} {state}", bet.label));
            }
            lines.push(context.summary);
        },
        GameResult::MatchPlay(matchplay) => {
            if matchplay.players.is_empty() {
                lines.push("not played".to_string());
                return;
            }
            match matchplay.winner() {
                Some(winner) => lines.push(format!("{} wins {}", name(winner), matchplay.margin)),
                None => lines.push(format!("{} thru {}", matchplay.margin, matchplay.holes_played)),
            }
        },
        GameResult::Stableford(stableford) => {
            for s in &stableford.standings {
                lines.push(format!("{:<16} {:>3} pts", name(s.player_id), s.points));
            }
        },
        GameResult::BestBall(bestball) => {
            for s in &bestball.standings {
                lines.push(format!("{:<24} {:>+4} ({} won)", s.name, s.to_par, s.holes_won));
            }
            if let Some(matchup) = &bestball.matchup {
                lines.push(matchup.text.clone());
            }
        },
        GameResult::Wolf(wolf) => {
            if wolf.order.is_empty() {
                lines.push("not played".to_string());
                return;
            }
            for s in &wolf.standings {
                let player = name(s.player_id);
                lines.push(format!("{player:<16} {:>6.2} pts {:>10}", s.points, s.earnings));
            }
            if let Some(next) = wolf.next_wolf {
                lines.push(format!("{} is the wolf next", name(next)));
            }
        },
    }
}

fn settlement_lines(settlements: &[NetSettlement], players: &[Player], lines: &mut Vec<String>) {
    if settlements.is_empty() {
        lines.push("All square".to_string());
    }
    for s in settlements {
        lines.push(format!(
            "{} pays {} {}",
            display_name(players, s.from),
            display_name(players, s.to),
            s.amount
        ));
    }
}

pub fn live(state: &LiveMoneyState) -> String {
    let mut lines = Vec::new();
    match state.thru {
        Some(thru) => lines.push(format!("-- Thru {thru} --")),
        None => lines.push("-- Not started --".to_string()),
    }
    for p in &state.players {
        let delta = if p.hole_delta.is_zero() {
            String::new()
        } else if p.hole_delta.is_positive() {
            format!(" (+{})", p.hole_delta)
        } else {
            format!(" ({})", p.hole_delta)
        };
        lines.push(format!("{:<16} {:>10}{delta}", p.display_name, p.balance));
    }
    if let Some(swing) = &state.biggest_swing {
        lines.push(format!(
            "Biggest swing on {}: {} {}",
            swing.hole, swing.display_name, swing.amount
        ));
    }
    finish(lines)
}

pub fn catalog(entries: &[GameEntry]) -> String {
    let lines = entries
        .iter()
        .map(|entry| {
            let m = &entry.metadata;
            let players = if m.min_players == m.max_players {
                format!("{} players", m.min_players)
            } else {
                format!("{}-{} players", m.min_players, m.max_players)
            };
            format!("{:<12} {:<12} {}", entry.kind.as_str(), players, m.description)
        })
        .collect();
    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
