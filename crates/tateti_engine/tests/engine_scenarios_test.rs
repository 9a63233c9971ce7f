//! Tests for the game engine's rules and score bookkeeping.

use tateti_engine::{
    Board, GameEngine, GameStatus, MemoryStore, PlaceError, Player, Position, ScoreTally, WinLine,
};

const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

fn new_engine() -> GameEngine<MemoryStore> {
    GameEngine::new(MemoryStore::new())
}

fn play(engine: &mut GameEngine<MemoryStore>, moves: &[usize]) {
    for &index in moves {
        engine.place_mark(index).expect("Valid move");
    }
}

/// Picks `count` cells off `line` that hold no complete line between them.
fn fillers(line: WinLine, count: usize) -> Vec<usize> {
    let free: Vec<usize> = (0..9).filter(|i| !line.indices().contains(i)).collect();
    for a in 0..free.len() {
        for b in (a + 1)..free.len() {
            if count == 2 {
                return vec![free[a], free[b]];
            }
            for c in (b + 1)..free.len() {
                let picked = [free[a], free[b], free[c]];
                let forms_line = WinLine::ALL.iter().any(|l| {
                    let mut idx = l.indices();
                    idx.sort_unstable();
                    idx == picked
                });
                if !forms_line {
                    return picked.to_vec();
                }
            }
        }
    }
    panic!("No filler cells for {:?}", line);
}

#[test]
fn test_column_win_scenario() {
    let mut engine = new_engine();
    play(&mut engine, &[0, 1, 3, 2]);
    let placement = engine.place_mark(6).expect("Valid move");

    assert_eq!(placement.status(), &GameStatus::Won(Player::X));
    assert_eq!(placement.winning_line(), &Some(WinLine::Col0));
    assert_eq!(WinLine::Col0.indices(), [0, 3, 6]);
    assert_eq!(engine.scores(), &ScoreTally::new(1, 0, 0));
    assert_eq!(engine.store().record(), Some(ScoreTally::new(1, 0, 0)));
}

#[test]
fn test_draw_scenario() {
    let mut engine = new_engine();
    play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6]);
    let placement = engine.place_mark(8).expect("Valid move");

    assert_eq!(placement.status(), &GameStatus::Draw);
    assert!(placement.winning_line().is_none());
    assert_eq!(engine.scores(), &ScoreTally::new(0, 0, 1));
    assert_eq!(engine.store().record(), Some(ScoreTally::new(0, 0, 1)));
}

#[test]
fn test_no_record_starts_at_zero() {
    let engine = new_engine();
    assert_eq!(engine.scores(), &ScoreTally::new(0, 0, 0));
}

#[test]
fn test_every_line_in_every_order_for_both_players() {
    for line in WinLine::ALL {
        for order in PERMUTATIONS {
            let marks: Vec<usize> = order.iter().map(|&k| line.indices()[k]).collect();

            // X completes the line, O fills elsewhere.
            let o_cells = fillers(line, 2);
            let mut engine = new_engine();
            play(&mut engine, &[marks[0], o_cells[0], marks[1], o_cells[1]]);
            let placement = engine.place_mark(marks[2]).expect("Valid move");
            assert_eq!(placement.status(), &GameStatus::Won(Player::X), "{:?}", line);
            assert_eq!(placement.winning_line(), &Some(line));
            assert_eq!(engine.scores().x(), 1);

            // O completes the line, X fills elsewhere.
            let x_cells = fillers(line, 3);
            let mut engine = new_engine();
            play(
                &mut engine,
                &[x_cells[0], marks[0], x_cells[1], marks[1], x_cells[2]],
            );
            let placement = engine.place_mark(marks[2]).expect("Valid move");
            assert_eq!(placement.status(), &GameStatus::Won(Player::O), "{:?}", line);
            assert_eq!(placement.winning_line(), &Some(line));
            assert_eq!(engine.scores().o(), 1);
        }
    }
}

#[test]
fn test_double_line_reports_earliest() {
    let mut engine = new_engine();
    // X: 1, 2, 3, 6 then 0 completes the top row and the left column.
    play(&mut engine, &[1, 4, 2, 5, 3, 8, 6, 7]);
    let placement = engine.place_mark(0).expect("Valid move");

    assert_eq!(placement.status(), &GameStatus::Won(Player::X));
    assert_eq!(placement.winning_line(), &Some(WinLine::Row0));
    assert_eq!(engine.scores(), &ScoreTally::new(1, 0, 0));
}

#[test]
fn test_occupied_cell_changes_nothing() {
    let mut engine = new_engine();
    play(&mut engine, &[4]);
    let board = engine.board().clone();

    assert_eq!(
        engine.place_mark(4).unwrap_err(),
        PlaceError::CellOccupied(Position::Center)
    );
    assert_eq!(engine.board(), &board);
    assert_eq!(engine.current(), Player::O);
    assert_eq!(engine.status(), GameStatus::InProgress);
}

#[test]
fn test_terminal_game_rejects_moves() {
    let mut engine = new_engine();
    play(&mut engine, &[0, 1, 3, 2, 6]);
    let board = engine.board().clone();
    let scores = *engine.scores();

    for index in [0, 4, 9] {
        assert_eq!(engine.place_mark(index).unwrap_err(), PlaceError::GameNotActive);
    }
    assert_eq!(engine.board(), &board);
    assert_eq!(engine.current(), Player::X);
    assert_eq!(engine.status(), GameStatus::Won(Player::X));
    assert_eq!(engine.scores(), &scores);
    assert_eq!(engine.store().saves(), 1);
}

#[test]
fn test_reset_game_keeps_scores() {
    let mut engine = GameEngine::new(MemoryStore::with_record(ScoreTally::new(2, 3, 4)));
    play(&mut engine, &[0, 1, 3]);

    engine.reset_game();
    assert_eq!(engine.board(), &Board::new());
    assert_eq!(engine.current(), Player::X);
    assert_eq!(engine.status(), GameStatus::InProgress);
    assert_eq!(engine.scores(), &ScoreTally::new(2, 3, 4));

    engine.reset_game();
    assert_eq!(engine.board(), &Board::new());
}

#[test]
fn test_reset_scores_keeps_board() {
    let mut engine = GameEngine::new(MemoryStore::with_record(ScoreTally::new(2, 3, 4)));
    play(&mut engine, &[0, 1, 3]);
    let board = engine.board().clone();

    let persistence = engine.reset_scores();
    assert!(!persistence.is_failed());
    assert_eq!(engine.scores(), &ScoreTally::default());
    assert_eq!(engine.store().record(), Some(ScoreTally::default()));
    assert_eq!(engine.board(), &board);
    assert_eq!(engine.current(), Player::O);
    assert_eq!(engine.status(), GameStatus::InProgress);
}

#[test]
fn test_scores_accumulate_across_games() {
    let mut engine = new_engine();
    play(&mut engine, &[0, 1, 3, 2, 6]);
    engine.reset_game();
    play(&mut engine, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    engine.reset_game();
    play(&mut engine, &[0, 4, 1, 2, 8, 6]);

    assert_eq!(engine.scores(), &ScoreTally::new(1, 1, 1));
    assert_eq!(engine.store().record(), Some(ScoreTally::new(1, 1, 1)));
}
