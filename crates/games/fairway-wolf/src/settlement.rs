use fairway_core::money::{Transfer, distribute_proportionally};

use crate::WolfResult;

/// Raw payments implied by the wolf standings, before netting against other
/// games. Each loser's deficit is spread over the winners by their share of
/// the winnings.
pub fn transfers(result: &WolfResult) -> Vec<Transfer> {
    distribute_proportionally(&result.earnings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{config, lone, run};
    use fairway_core::game_trait::PlayerId;
    use fairway_core::money::Cents;

    #[test]
    fn lone_wolf_collects_from_each_hunter() {
        let rows: &[(PlayerId, &[u8])] = &[(1, &[3]), (2, &[4]), (3, &[4]), (4, &[5])];
        let result = run(rows, config(vec![lone(1, false)]));
        let transfers = transfers(&result);
        assert_eq!(transfers.len(), 3);
        assert!(transfers.iter().all(|t| t.to == 1 && t.amount == Cents(1600)));
    }

    #[test]
    fn transfers_balance_every_player() {
        let result = run(
            &[(1, &[5, 4]), (2, &[4, 3]), (3, &[4, 5]), (4, &[5, 5])],
            config(vec![lone(1, false), lone(2, true)]),
        );
        let transfers = transfers(&result);
        for standing in &result.standings {
            let received: Cents = transfers
                .iter()
                .filter(|t| t.to == standing.player_id)
                .map(|t| t.amount)
                .sum();
            let paid: Cents = transfers
                .iter()
                .filter(|t| t.from == standing.player_id)
                .map(|t| t.amount)
                .sum();
            assert_eq!(received - paid, standing.earnings);
        }
    }
}
