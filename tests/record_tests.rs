use battleship_match::{
    deserialize, serialize, Coord, Match, MatchConfig, MatchRecord, Mode, PlacementMode,
    RecordError, Seat, TurnPolicy, RECORD_VERSION,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A vs-bot match with `shots` human shots fired at random open cells.
fn played_match(seed: u64, shots: usize, turn_policy: TurnPolicy) -> (Match, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Match::new(
        MatchConfig {
            mode: Mode::VsBot,
            placement: PlacementMode::Random,
            turn_policy,
        },
        &mut rng,
    )
    .unwrap();
    for _ in 0..shots {
        if game.is_round_over() {
            break;
        }
        let open: Vec<_> = game.board(Seat::Second).unattacked().iter().collect();
        let (row, col) = open[rng.random_range(0..open.len())];
        game.attack(Seat::First, Coord::new(row as u8, col as u8), &mut rng)
            .unwrap();
    }
    (game, rng)
}

#[test]
fn test_portable_round_trip_is_exact() {
    let (game, _) = played_match(3, 30, TurnPolicy::Alternate);
    let record = game.to_portable();
    assert_eq!(record.version, RECORD_VERSION);
    assert_eq!(record.grid_size, 10);
    let restored = Match::from_portable(&record).unwrap();
    assert_eq!(restored, game);
    assert_eq!(restored.to_portable(), record);
}

#[test]
fn test_restored_match_plays_identically() {
    let (game, rng) = played_match(4, 12, TurnPolicy::HitGoesAgain);
    let mut original = game.clone();
    let mut restored = deserialize(&serialize(&game).unwrap()).unwrap();
    let mut rng_a = rng.clone();
    let mut rng_b = rng;

    while !original.is_round_over() {
        let (row, col) = original
            .board(Seat::Second)
            .unattacked()
            .iter()
            .next()
            .unwrap();
        let coord = Coord::new(row as u8, col as u8);
        let a = original.attack(Seat::First, coord, &mut rng_a);
        let b = restored.attack(Seat::First, coord, &mut rng_b);
        assert_eq!(a, b);
    }
    assert_eq!(original, restored);
}

#[test]
fn test_record_survives_json() {
    let (game, _) = played_match(5, 20, TurnPolicy::Alternate);
    let json = serde_json::to_string(&game.to_portable()).unwrap();
    let record: MatchRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(Match::from_portable(&record).unwrap(), game);
}

#[test]
fn test_bot_queue_is_kept() {
    // Find a position where the bot is mid-hunt on a wounded ship.
    for seed in 0..50 {
        let (game, _) = played_match(seed, 25, TurnPolicy::Alternate);
        if game.bot().targets().is_empty() {
            continue;
        }
        let record = game.to_portable();
        assert_eq!(record.bot_targets, game.bot().targets());
        let restored = Match::from_portable(&record).unwrap();
        assert_eq!(restored.bot(), game.bot());
        return;
    }
    panic!("no seed left the bot with pending leads");
}

#[test]
fn test_rejects_malformed_records() {
    let (game, _) = played_match(6, 10, TurnPolicy::Alternate);
    let good = game.to_portable();

    let mut bad = good.clone();
    bad.version = RECORD_VERSION + 1;
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::UnsupportedVersion(_))
    ));

    let mut bad = good.clone();
    bad.grid_size = 8;
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::GridSizeMismatch(8))
    ));

    let mut bad = good.clone();
    bad.current_turn = 2;
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::InvalidSeat(2))
    ));

    let mut bad = good.clone();
    bad.round_over = true;
    bad.winner = None;
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::InconsistentOutcome)
    ));

    let mut bad = good.clone();
    bad.seats[0].attacks.push(Coord::new(12, 0));
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::OutOfBounds(_))
    ));

    let mut bad = good.clone();
    let ship = bad.seats[1]
        .ships
        .iter_mut()
        .find(|s| s.cells.len() > 2)
        .unwrap();
    ship.cells.swap(0, 1);
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::MalformedShip)
    ));

    let mut bad = good.clone();
    let far = bad.seats[1].ships[0].cells[0];
    bad.seats[1].ships[1].hits.push(far);
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::HitOutsideShip(_))
    ));

    let mut bad = good.clone();
    let copy = bad.seats[0].ships[0].clone();
    bad.seats[0].ships.push(copy);
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::TooManyShips)
    ));

    let mut bad = good.clone();
    let copy = bad.seats[0].ships[0].clone();
    bad.seats[0].ships[1] = copy;
    assert!(matches!(
        Match::from_portable(&bad),
        Err(RecordError::ShipsTouch)
    ));

    assert!(matches!(
        deserialize(&[1, 2, 3]),
        Err(RecordError::Codec(_))
    ));
}

#[test]
fn test_out_of_grid_cell_error_formats() {
    let (game, _) = played_match(7, 5, TurnPolicy::Alternate);
    let mut bad = game.to_portable();
    bad.seats[0].attacks.push(Coord::new(0, 250));
    let err = Match::from_portable(&bad).unwrap_err();
    assert!(matches!(err, RecordError::OutOfBounds(_)));
    assert_eq!(err.to_string(), "cell (0, 250) is outside the grid");

    assert_eq!(Coord::new(255, 255).to_string(), "(255, 255)");
    assert_eq!(Coord::new(3, 9).to_string(), "J3");
}

#[test]
fn test_rejects_unrecorded_hits_and_hidden_halo() {
    for seed in 0..20 {
        let (game, _) = played_match(seed, 60, TurnPolicy::Alternate);
        let good = game.to_portable();
        let sunk = good.seats.iter().enumerate().find_map(|(i, seat)| {
            seat.ships
                .iter()
                .position(|s| s.hits.len() == s.cells.len())
                .map(|j| (i, j))
        });
        let Some((seat, ship)) = sunk else {
            continue;
        };

        // Dropping a hit leaves an attacked ship cell unaccounted for.
        let mut bad = good.clone();
        let dropped = bad.seats[seat].ships[ship].hits.pop().unwrap();
        assert!(matches!(
            Match::from_portable(&bad),
            Err(RecordError::UnrecordedHit(c)) if c == dropped
        ));

        // Un-attacking a buffer cell hides water a sink should have revealed.
        let mut bad = good.clone();
        let cells = &bad.seats[seat].ships[ship].cells;
        let water = cells
            .iter()
            .flat_map(|c| c.neighbors())
            .find(|n| !cells.contains(n))
            .unwrap();
        bad.seats[seat].attacks.retain(|&c| c != water);
        assert!(matches!(
            Match::from_portable(&bad),
            Err(RecordError::UnrevealedHalo)
        ));
        return;
    }
    panic!("no seed produced a sunk ship");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn serialize_round_trip(seed in any::<u64>(), shots in 0usize..60, again in any::<bool>()) {
        let policy = if again { TurnPolicy::HitGoesAgain } else { TurnPolicy::Alternate };
        let (game, _) = played_match(seed, shots, policy);
        let bytes = serialize(&game).unwrap();
        let restored = deserialize(&bytes).unwrap();
        prop_assert_eq!(&restored, &game);
        prop_assert_eq!(restored.view(Seat::First), game.view(Seat::First));
        prop_assert_eq!(restored.view(Seat::Second), game.view(Seat::Second));
    }
}
