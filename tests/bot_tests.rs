use battleship_bot::{
    AttackOutcome, AttackStrategy, DefaultRandomness, Direction, EasyBot, Gameboard, Grid,
    HardBot, HuntState, NormalBot, PlayerError, Rules, ScriptedRandomness, BOARD_SIZE,
};

/// Board used by the scripted hunt scenarios.
fn scenario_board() -> Gameboard {
    let mut board = Gameboard::new();
    board.place_ship(2, 0, 0, Direction::Horizontal).unwrap();
    board.place_ship(2, 8, 9, Direction::Vertical).unwrap();
    board.place_ship(4, 5, 5, Direction::Horizontal).unwrap();
    board.place_ship(4, 2, 3, Direction::Vertical).unwrap();
    board
}

#[test]
fn test_easy_never_repeats_and_exhausts_board() {
    let mut rng = DefaultRandomness::seeded(3);
    let mut board = scenario_board();
    let mut bot = EasyBot::new();
    for _ in 0..BOARD_SIZE * BOARD_SIZE {
        let report = bot.attack(&mut board, &mut rng, None).unwrap();
        assert!(report.outcome.is_valid(), "repeated {:?}", report);
    }
    assert_eq!(board.attacked().count_ones(), BOARD_SIZE * BOARD_SIZE);
    assert!(board.all_sunk());
    assert_eq!(
        bot.attack(&mut board, &mut rng, None),
        Err(PlayerError::NoTargetsLeft)
    );
}

#[test]
fn test_bots_ignore_supplied_coordinates() {
    let mut rng = ScriptedRandomness::new().with_indices([4, 4]);
    let mut bot = NormalBot::new();
    let target = bot.select_target(&mut rng, Some((0, 0))).unwrap();
    assert_eq!(target, (4, 4));
}

#[test]
fn test_normal_follows_ship_after_hit() {
    let mut board = scenario_board();
    // first pick lands on the vertical four-decker at (3, 3); neighbours are
    // shuffled so that "down" comes first
    let mut rng = ScriptedRandomness::new()
        .with_indices([3, 3])
        .with_order(vec![0, 1, 2, 3]);
    let mut bot = NormalBot::new();

    let first = bot.attack(&mut board, &mut rng, None).unwrap();
    assert_eq!((first.row, first.col, first.outcome), (3, 3, AttackOutcome::Hit));
    assert_eq!(bot.state(), HuntState::TrackingUndirected);

    let second = bot.attack(&mut board, &mut rng, None).unwrap();
    assert_eq!((second.row, second.col, second.outcome), (4, 3, AttackOutcome::Hit));
    assert_eq!(bot.state(), HuntState::TrackingDirected);
    assert_eq!(bot.hunt().direction(), Some(Direction::Vertical));

    // (5, 3) ends the ship; the next shot misses and sends the bot back up
    let third = bot.attack(&mut board, &mut rng, None).unwrap();
    assert_eq!((third.row, third.col, third.outcome), (5, 3, AttackOutcome::Hit));
    let fourth = bot.attack(&mut board, &mut rng, None).unwrap();
    assert_eq!((fourth.row, fourth.col, fourth.outcome), (6, 3, AttackOutcome::Miss));
    assert!(bot.hunt().is_going_back());

    let fifth = bot.attack(&mut board, &mut rng, None).unwrap();
    assert_eq!((fifth.row, fifth.col, fifth.outcome), (2, 3, AttackOutcome::Sink));
    assert_eq!(bot.state(), HuntState::Searching);
}

#[test]
fn test_hard_sinks_two_cell_ship_in_two_shots() {
    let mut board = scenario_board();
    // (0, 0) first; after off-board filtering its neighbours are [down, right],
    // and the scripted order puts right first
    let mut rng = ScriptedRandomness::new()
        .with_indices([0, 0])
        .with_order(vec![1, 0]);
    let mut bot = HardBot::new(&Rules::standard());

    let first = bot.attack(&mut board, &mut rng, None).unwrap();
    assert_eq!((first.row, first.col), (0, 0));
    assert_eq!(first.outcome, AttackOutcome::Hit);

    let second = bot.attack(&mut board, &mut rng, None).unwrap();
    assert_eq!((second.row, second.col), (0, 1));
    assert_eq!(second.outcome, AttackOutcome::Sink);
    assert_eq!(bot.state(), HuntState::Searching);
    assert_eq!(bot.sunk_ships().len(), 1);
    assert_eq!(bot.sunk_ships()[0].positions(), &[(0, 0), (0, 1)]);
    assert_eq!(bot.remaining_fleet().len(), 4);
}

#[test]
fn test_hard_never_fires_into_sunk_buffer() {
    let mut board = scenario_board();
    let mut rng = ScriptedRandomness::new()
        .with_indices([0, 0])
        .with_order(vec![1, 0])
        .with_fallback_seed(11);
    let mut bot = HardBot::new(&Rules::standard().with_fleet(vec![2, 2, 4, 4]));
    bot.attack(&mut board, &mut rng, None).unwrap();
    bot.attack(&mut board, &mut rng, None).unwrap();

    let buffer = Gameboard::buffer_zone(0, 0, 2, Direction::Horizontal);
    assert!(buffer.iter().all(|&(r, c)| bot.blocked().contains(r, c)));

    while !board.all_sunk() {
        let report = bot.attack(&mut board, &mut rng, None).unwrap();
        assert!(report.outcome.is_valid());
        assert!(
            !buffer.contains(&(report.row, report.col)),
            "fired into buffer at {:?}",
            (report.row, report.col)
        );
    }
    assert!(bot.remaining_fleet().is_empty());
}

#[test]
fn test_hard_rejects_boxed_in_cells() {
    let bot = HardBot::new(&Rules::standard());
    assert_eq!(bot.smallest_remaining(), 2);
    let blocked = Grid::from_cells([(1, 7), (3, 7), (2, 6), (2, 8)]).unwrap();
    assert!(!bot.has_room((2, 7), &blocked));
    let corner = Grid::from_cells([(3, 0), (4, 1)]).unwrap();
    assert!(bot.has_room((4, 0), &corner));
}

#[test]
fn test_reset_history_forgets_board() {
    let mut board = scenario_board();
    let mut rng = DefaultRandomness::seeded(5);
    let mut bot = HardBot::new(&Rules::standard());
    for _ in 0..30 {
        bot.attack(&mut board, &mut rng, None).unwrap();
    }
    bot.reset_history();
    assert_eq!(bot.attacked().count_ones(), 0);
    assert!(bot.sunk_ships().is_empty());
    assert_eq!(bot.remaining_fleet().len(), 5);
    assert_eq!(bot.state(), HuntState::Searching);
}
