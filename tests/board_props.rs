use battleship_bot::{
    AttackOutcome, DefaultRandomness, Gameboard, PlacementPolicy, RejectReason, Rules, BOARD_SIZE,
    SHIP_SIZES,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64, rules: &Rules) -> Gameboard {
    let mut rng = DefaultRandomness::seeded(seed);
    let mut board = Gameboard::with_rules(rules);
    board.place_fleet_randomly(&mut rng, rules.fleet()).unwrap();
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_fleet_respects_buffer(seed in any::<u64>()) {
        let board = random_board(seed, &Rules::standard());
        let ships = board.ships();
        prop_assert_eq!(ships.len(), SHIP_SIZES.len());
        for (i, a) in ships.iter().enumerate() {
            for b in ships.iter().skip(i + 1) {
                prop_assert!((a.footprint().dilate() & b.footprint()).is_empty());
            }
        }
    }

    #[test]
    fn touching_fleet_never_overlaps(seed in any::<u64>()) {
        let rules = Rules::standard().with_placement(PlacementPolicy::Touching);
        let board = random_board(seed, &rules);
        let total: usize = SHIP_SIZES.iter().sum();
        prop_assert_eq!(board.occupied().count_ones(), total);
    }

    #[test]
    fn repeat_attack_changes_nothing(seed in any::<u64>(), row in 0..BOARD_SIZE, col in 0..BOARD_SIZE) {
        let mut board = random_board(seed, &Rules::standard());
        let first = board.receive_attack(row, col);
        prop_assert!(first.is_valid());
        let cells = board.cells();
        let status = board.fleet_status();
        let second = board.receive_attack(row, col);
        prop_assert_eq!(second, AttackOutcome::Rejected(RejectReason::AlreadyAttacked));
        prop_assert_eq!(board.cells(), cells);
        prop_assert_eq!(board.fleet_status(), status);
    }

    #[test]
    fn hits_equal_occupied_cells_attacked(seed in any::<u64>(), shots in 0usize..150) {
        let mut board = random_board(seed, &Rules::standard());
        let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
        for _ in 0..shots {
            let r = rng.random_range(0..BOARD_SIZE);
            let c = rng.random_range(0..BOARD_SIZE);
            let _ = board.receive_attack(r, c);
        }
        let hits: usize = board.fleet_status().iter().map(|s| s.hits).sum();
        prop_assert_eq!(hits, (board.occupied() & board.attacked()).count_ones());
        for status in board.fleet_status() {
            prop_assert!(status.hits <= status.size);
            prop_assert_eq!(status.sunk, status.hits == status.size);
        }
    }

    #[test]
    fn all_sunk_after_every_ship_cell(seed in any::<u64>()) {
        let mut board = random_board(seed, &Rules::standard());
        let cells: Vec<_> = board.occupied().iter_set_bits().collect();
        let (last, rest) = cells.split_last().unwrap();
        for &(r, c) in rest {
            prop_assert!(board.receive_attack(r, c).is_hit());
        }
        prop_assert!(!board.all_sunk());
        prop_assert_eq!(board.receive_attack(last.0, last.1), AttackOutcome::Sink);
        prop_assert!(board.all_sunk());
    }
}
