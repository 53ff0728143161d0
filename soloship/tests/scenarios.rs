use rand::{rngs::StdRng, SeedableRng};
use soloship::{
    BoardSize, Cell, Direction, FleetPlacer, FleetSetup, GameConfig, GameState, GameStatus,
    HitOutcome, Mark, ShipId, TurnBudget,
};

fn five_by_five(seed: u64) -> GameState {
    let placer = FleetPlacer::new(&GameConfig::new(5)).unwrap();
    let placed = placer.place_fleet(&mut StdRng::seed_from_u64(seed)).unwrap();
    assert_eq!(placed.fleet().len(), 5);
    GameState::new(placed)
}

#[test]
fn sinking_the_first_ship() {
    for seed in 0..16 {
        let mut game = five_by_five(seed);
        let first = ShipId::new(1);
        let cells = game.fleet().get(first).unwrap().cells().to_vec();

        let outcome = game.record_guess(cells[0]).unwrap();
        if cells.len() == 1 {
            assert_eq!(outcome, HitOutcome::HitAndSunk(first));
        } else {
            assert_eq!(outcome, HitOutcome::Hit(first));
        }
        assert_eq!(game.record_guess(cells[0]), Ok(HitOutcome::Repeat));
        assert_eq!(game.hits(first), 1);

        let mut last = outcome;
        for &cell in &cells[1..] {
            last = game.record_guess(cell).unwrap();
        }
        assert_eq!(last, HitOutcome::HitAndSunk(first));
        assert!(game.is_sunk(first));
        assert_eq!(game.status(), GameStatus::InProgress);
    }
}

#[test]
fn guessing_an_empty_cell_misses() {
    let mut game = five_by_five(42);
    let empty = game
        .size()
        .iter_rows()
        .flatten()
        .find(|cell| !game.occupancy().is_occupied(cell))
        .unwrap();
    assert_eq!(game.record_guess(empty), Ok(HitOutcome::Miss));
    assert_eq!(game.mark(&empty), Mark::Miss);
    for ship in game.fleet().iter() {
        assert_eq!(game.hits(ship.id()), 0);
        assert!(!game.is_sunk(ship.id()));
    }
}

#[test]
fn zero_length_ship_sinks_on_its_anchor() {
    let mut setup = FleetSetup::new(BoardSize::new(5));
    setup.place_ship(Cell::new(0, 0), Direction::South, 4).unwrap();
    let single = setup.place_ship(Cell::new(2, 2), Direction::North, 0).unwrap();
    let placed = setup.finish();
    assert_eq!(placed.fleet().get(single).unwrap().cells(), &[Cell::new(2, 2)]);

    let mut game = GameState::new(placed);
    assert_eq!(
        game.record_guess(Cell::new(2, 2)),
        Ok(HitOutcome::HitAndSunk(single))
    );
    assert_eq!(game.ships_remaining(), 1);
}

#[test]
fn full_game_within_budget() {
    let mut game = five_by_five(9);
    let mut turns = TurnBudget::for_game(&game);
    let cells: Vec<Cell> = game
        .fleet()
        .iter()
        .flat_map(|ship| ship.cells().to_vec())
        .collect();
    for cell in cells {
        turns.play(&mut game, cell).unwrap();
    }
    assert!(game.is_won());
    assert_eq!(turns.remaining(), 5);
}

#[test]
fn running_out_of_turns_loses() {
    let placer = FleetPlacer::new(&GameConfig::new(5).with_ship_count(1)).unwrap();
    let mut game = GameState::new(placer.place_fleet(&mut StdRng::seed_from_u64(9)).unwrap());
    let mut turns = TurnBudget::new(3);
    let empty: Vec<Cell> = game
        .size()
        .iter_rows()
        .flatten()
        .filter(|cell| !game.occupancy().is_occupied(cell))
        .take(3)
        .collect();
    for cell in empty {
        assert_eq!(turns.play(&mut game, cell), Ok(HitOutcome::Miss));
    }
    assert_eq!(game.status(), GameStatus::LostByTurnExhaustion);
}
