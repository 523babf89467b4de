use fairway_core::game_trait::PlayerId;

/// Players in a wolf game.
pub const WOLF_PLAYERS: usize = 4;

/// The wolf on `hole`, rotating through `order` starting at hole 1.
///
/// `order` is the players sorted by position.
pub fn wolf_for_hole(order: &[PlayerId], hole: u8) -> Option<PlayerId> {
    if order.is_empty() || hole == 0 {
        return None;
    }
    order.get(usize::from(hole - 1) % order.len()).copied()
}

/// Hitting order for `hole`: the players after the wolf in rotation, with
/// the wolf teeing off last.
pub fn hunting_order(order: &[PlayerId], hole: u8) -> Vec<PlayerId> {
    if order.is_empty() || hole == 0 {
        return Vec::new();
    }
    let wolf_index = usize::from(hole - 1) % order.len();
    (1..=order.len())
        .map(|offset| order[(wolf_index + offset) % order.len()])
        .collect()
}
