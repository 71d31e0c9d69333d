use battleship_bot::{
    bot_strategy, DefaultRandomness, Difficulty, Gameboard, PlacementPolicy, PlayerError, Rules,
    BOARD_SIZE,
};
use proptest::prelude::*;

fn any_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Normal),
        Just(Difficulty::Hard),
    ]
}

fn any_placement() -> impl Strategy<Value = PlacementPolicy> {
    prop_oneof![Just(PlacementPolicy::Buffered), Just(PlacementPolicy::Touching)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bots_sink_fleet_without_repeats(
        seed in any::<u64>(),
        difficulty in any_difficulty(),
        policy in any_placement(),
    ) {
        let rules = Rules::standard().with_placement(policy);
        let mut rng = DefaultRandomness::seeded(seed);
        let mut board = Gameboard::with_rules(&rules);
        board.place_fleet_randomly(&mut rng, rules.fleet()).unwrap();
        let mut bot = bot_strategy(difficulty, &rules);

        let mut shots = 0;
        while !board.all_sunk() {
            let report = bot.attack(&mut board, &mut rng, None).unwrap();
            prop_assert!(report.outcome.is_valid(), "{:?} repeated a shot: {:?}", difficulty, report);
            shots += 1;
            prop_assert!(shots <= BOARD_SIZE * BOARD_SIZE);
        }
        prop_assert_eq!(board.attacked().count_ones(), shots);
    }

    #[test]
    fn bots_run_dry_without_repeats(seed in any::<u64>(), difficulty in any_difficulty()) {
        // fleet the bot was not told about; it must still find every ship
        let rules = Rules::standard().with_fleet(vec![3]);
        let mut rng = DefaultRandomness::seeded(seed);
        let mut board = Gameboard::with_rules(&rules);
        board.place_fleet_randomly(&mut rng, &[1, 1]).unwrap();
        let mut bot = bot_strategy(difficulty, &rules);

        let mut shots = 0;
        loop {
            match bot.attack(&mut board, &mut rng, None) {
                Ok(report) => prop_assert!(report.outcome.is_valid()),
                Err(e) => {
                    prop_assert_eq!(e, PlayerError::NoTargetsLeft);
                    break;
                }
            }
            shots += 1;
            prop_assert!(shots <= BOARD_SIZE * BOARD_SIZE);
        }
        prop_assert!(board.all_sunk());
        if difficulty != Difficulty::Hard {
            prop_assert_eq!(shots, BOARD_SIZE * BOARD_SIZE);
        }
    }
}
