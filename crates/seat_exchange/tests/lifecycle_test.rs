//! Tests for seating changes and round progression.

use rand::SeedableRng;
use rand::rngs::StdRng;
use seat_exchange::{
    InvariantSet, PrivateNumber, Seat, SeatErrorKind, SeatGame, SeatInvariants, SeatOptions,
};
use std::io::Write;

fn values(game: &SeatGame) -> Vec<usize> {
    game.layout().iter().map(|n| n.value()).collect()
}

fn is_bijection(game: &SeatGame) -> bool {
    let mut sorted = values(game);
    sorted.sort_unstable();
    sorted.into_iter().eq(0..game.player_count())
}

#[test]
fn test_x_cycles_through_every_number() {
    let mut game =
        SeatGame::with_seats(9, SeatOptions::default(), StdRng::seed_from_u64(4)).unwrap();
    let start = game.current_x().clone();

    let mut seen = vec![0; 9];
    for _ in 0..9 {
        for x in game.current_x().iter() {
            seen[x.value()] += 1;
        }
        game.new_round();
    }

    assert_eq!(game.round(), 10);
    assert_eq!(game.current_x(), &start);
    assert!(seen.iter().all(|&count| count == 1), "{seen:?}");
}

#[test]
fn test_multiple_x_rotate_together() {
    let options = SeatOptions::default().with_x_count(3);
    let mut game = SeatGame::with_seats(12, options, StdRng::seed_from_u64(2)).unwrap();
    assert_eq!(game.current_x().to_string(), "{0, 4, 8}");
    game.new_round();
    assert_eq!(game.current_x().to_string(), "{1, 5, 9}");
}

#[test]
fn test_x_seats_follow_numbers() {
    let game = SeatGame::from_layout(
        &[3, 1, 4, 0, 2, 5],
        2,
        SeatOptions::default(),
        StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(game.x_seats(), vec![Seat::new(1)]);
    assert!(game.is_x(PrivateNumber::new(1)));
    assert_eq!(game.seat_of_number(PrivateNumber::new(4)).unwrap(), Seat::new(2));
}

#[test]
fn test_remove_then_add_restores_size() {
    let mut game =
        SeatGame::with_seats(10, SeatOptions::default(), StdRng::seed_from_u64(8)).unwrap();

    game.remove_seat(Seat::new(4)).unwrap();
    assert_eq!(game.player_count(), 9);
    assert!(is_bijection(&game));

    game.add_seat().unwrap();
    assert_eq!(game.player_count(), 10);
    assert!(is_bijection(&game));
    assert!(!game.game_over());
    assert!(SeatInvariants::check_all(&game).is_ok());
}

#[test]
fn test_remove_boundary_seats() {
    let mut game = SeatGame::from_layout(
        &[5, 2, 7, 0, 3, 6, 1, 4],
        1,
        SeatOptions::default(),
        StdRng::seed_from_u64(0),
    )
    .unwrap();

    assert_eq!(game.remove_seat(Seat::new(0)).unwrap(), PrivateNumber::new(5));
    assert_eq!(values(&game), vec![2, 6, 0, 3, 5, 1, 4]);

    assert_eq!(game.remove_seat(Seat::new(6)).unwrap(), PrivateNumber::new(4));
    assert_eq!(values(&game), vec![2, 5, 0, 3, 4, 1]);
    assert!(SeatInvariants::check_all(&game).is_ok());
}

#[test]
fn test_removing_x_number_passes_x_on() {
    // Round 3 of 8 seats: 2 is X and sits in seat 1.
    let mut game = SeatGame::from_layout(
        &[5, 2, 7, 0, 3, 6, 1, 4],
        3,
        SeatOptions::default(),
        StdRng::seed_from_u64(0),
    )
    .unwrap();
    assert_eq!(game.remove_seat(Seat::new(1)).unwrap(), PrivateNumber::new(2));
    // 3 slid down into 2 and inherits the X.
    assert_eq!(game.current_x().to_string(), "{2}");
    assert_eq!(game.x_seats(), vec![Seat::new(3)]);
}

#[test]
fn test_invalid_seat_is_rejected_without_change() {
    let mut game =
        SeatGame::with_seats(6, SeatOptions::default(), StdRng::seed_from_u64(5)).unwrap();
    let before = values(&game);

    let err = game.remove_seat(Seat::new(6)).unwrap_err();
    assert!(matches!(err.kind(), SeatErrorKind::InvalidArgument(_)));
    let err = game.swap_seats(Seat::new(0), Seat::new(9)).unwrap_err();
    assert!(matches!(err.kind(), SeatErrorKind::InvalidArgument(_)));
    assert!(game.number_in_seat(Seat::new(6)).is_err());
    assert!(game.seat_of_number(PrivateNumber::new(6)).is_err());

    assert_eq!(values(&game), before);
}

#[test]
fn test_shrinking_to_empty_and_regrowing() {
    let mut game =
        SeatGame::with_seats(7, SeatOptions::default(), StdRng::seed_from_u64(12)).unwrap();
    while game.player_count() > 0 {
        let last = Seat::new(game.player_count() - 1);
        game.remove_seat(last).unwrap();
        assert!(is_bijection(&game));
        assert!(SeatInvariants::check_all(&game).is_ok());
    }
    assert!(game.current_x().is_empty());

    for _ in 0..7 {
        game.add_seat().unwrap();
    }
    assert_eq!(game.player_count(), 7);
    assert_eq!(game.x_count(), 1);
    assert!(!game.game_over());
}

#[test]
fn test_game_over_matches_winners() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut game =
        SeatGame::with_seats(9, SeatOptions::default(), StdRng::seed_from_u64(21)).unwrap();

    for _ in 0..300 {
        let a = Seat::new(rand::Rng::gen_range(&mut rng, 0..9));
        let b = Seat::new(rand::Rng::gen_range(&mut rng, 0..9));
        game.swap_seats(a, b).unwrap();
        assert_eq!(game.game_over(), game.winners().is_ok());
        if game.game_over() {
            let winners = game.winners().unwrap();
            assert_eq!(winners.len(), game.win_streak_length());
            game.new_round();
        }
    }
}

#[test]
fn test_options_from_file_drive_the_game() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "x_count = 2\nwin_streak_length = 5").unwrap();

    let options = SeatOptions::from_file(file.path()).unwrap();
    let game = SeatGame::with_seats(12, options, StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(game.x_count(), 2);
    assert_eq!(game.win_streak_length(), 5);
    assert_eq!(game.current_x().len(), 2);
    assert!(!game.game_over());
}

#[test]
fn test_reset_then_regrow() {
    let mut game = SeatGame::seeded(SeatOptions::default(), 17);
    for _ in 0..5 {
        game.add_seat().unwrap();
    }
    game.new_round();
    game.reset();
    assert_eq!(game.player_count(), 0);
    assert_eq!(game.round(), 1);

    game.add_seat().unwrap();
    assert_eq!(values(&game), vec![0]);
}

#[test]
fn test_state_serializes_as_plain_numbers() {
    let game = SeatGame::from_layout(
        &[6, 0, 1, 2, 3, 4, 7, 5],
        7,
        SeatOptions::default(),
        StdRng::seed_from_u64(0),
    )
    .unwrap();

    assert_eq!(serde_json::to_string(game.layout()).unwrap(), "[6,0,1,2,3,4,7,5]");
    assert_eq!(serde_json::to_string(game.current_x()).unwrap(), "[6]");

    let streak = serde_json::to_value(game.longest_streak()).unwrap();
    assert_eq!(streak["longest_streak"], 5);
    assert_eq!(streak["starting_seat"], 1);
    assert_eq!(streak["direction"], "Clockwise");
}
