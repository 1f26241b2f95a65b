use super::rng::TileSource;
use super::state::{Board, Move, Score, Slide, Spawn, Status, Tile, SIZE, WIN_TILE};

pub type Line = [Tile; SIZE];

/// Outcome of sliding a single line toward index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSlide {
    pub line: Line,
    pub gained: Score,
    pub changed: bool,
}

/// Slide/merge tiles in the given direction. No randomness.
pub fn shift(board: Board, direction: Move) -> Slide {
    let mut out = board;
    let mut gained = 0;
    let mut moved = false;
    for idx in 0..SIZE {
        let slid = slide_line(read_line(&board, direction, idx));
        write_line(&mut out, direction, idx, slid.line);
        gained += slid.gained;
        moved |= slid.changed;
    }
    Slide {
        board: out,
        gained,
        moved,
    }
}

/// Compact a line toward index 0, merging adjacent equal pairs once.
///
/// A merged tile is never re-examined in the same pass, so `[2, 2, 2, 2]`
/// becomes `[4, 4, 0, 0]`. Pairs whose double does not fit a `Tile` stay
/// unmerged.
pub fn slide_line(line: Line) -> LineSlide {
    let mut compact = [0; SIZE];
    let mut len = 0;
    for &tile in line.iter().filter(|&&t| t != 0) {
        compact[len] = tile;
        len += 1;
    }

    let mut out = [0; SIZE];
    let mut gained: Score = 0;
    let mut i = 0;
    let mut n = 0;
    while i < len {
        let pair = i + 1 < len && compact[i] == compact[i + 1];
        match compact[i].checked_mul(2) {
            Some(merged) if pair => {
                out[n] = merged;
                gained += Score::from(merged);
                i += 2;
            }
            _ => {
                out[n] = compact[i];
                i += 1;
            }
        }
        n += 1;
    }

    LineSlide {
        line: out,
        gained,
        changed: out != line,
    }
}

/// Board coordinates of the `k`-th cell of line `idx`, counted from the edge
/// tiles slide toward.
#[inline]
fn cell_at(direction: Move, idx: usize, k: usize) -> (usize, usize) {
    match direction {
        Move::Left => (idx, k),
        Move::Right => (idx, SIZE - 1 - k),
        Move::Up => (k, idx),
        Move::Down => (SIZE - 1 - k, idx),
    }
}

pub(crate) fn read_line(board: &Board, direction: Move, idx: usize) -> Line {
    let mut line = [0; SIZE];
    for (k, cell) in line.iter_mut().enumerate() {
        let (r, c) = cell_at(direction, idx, k);
        *cell = board.0[r][c];
    }
    line
}

pub(crate) fn write_line(board: &mut Board, direction: Move, idx: usize, line: Line) {
    for (k, &tile) in line.iter().enumerate() {
        let (r, c) = cell_at(direction, idx, k);
        board.0[r][c] = tile;
    }
}

/// True if the board is full and no adjacent pair can merge.
pub fn is_game_over(board: Board) -> bool {
    !has_tile(board, 0) && !has_adjacent_pair(board)
}

/// Moves that would change the board, in `Move::ALL` order.
pub fn legal_moves(board: Board) -> Vec<Move> {
    Move::ALL
        .into_iter()
        .filter(|&dir| shift(board, dir).moved)
        .collect()
}

/// Count the number of zero tiles.
pub fn count_empty(board: Board) -> usize {
    board.tiles().filter(|&t| t == 0).count()
}

/// Empty cells as `(row, col)` in row-major order.
pub fn empty_cells(board: &Board) -> Vec<(usize, usize)> {
    let mut cells = Vec::with_capacity(SIZE * SIZE);
    for (r, row) in board.0.iter().enumerate() {
        for (c, &tile) in row.iter().enumerate() {
            if tile == 0 {
                cells.push((r, c));
            }
        }
    }
    cells
}

/// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// No-op on a full board.
pub fn insert_random_tile<S: TileSource + ?Sized>(
    board: &mut Board,
    source: &mut S,
) -> Option<Spawn> {
    let empty = empty_cells(board);
    if empty.is_empty() {
        return None;
    }
    let (row, col) = empty[source.pick_index(empty.len())];
    let value = generate_random_tile(source);
    board.0[row][col] = value;
    Some(Spawn { row, col, value })
}

pub(crate) fn generate_random_tile<S: TileSource + ?Sized>(source: &mut S) -> Tile {
    if source.next_unit() < 0.9 { 2 } else { 4 }
}

/// True if any cell holds exactly `value`.
#[inline]
pub fn has_tile(board: Board, value: Tile) -> bool {
    board.tiles().any(|t| t == value)
}

/// True if any horizontally or vertically adjacent cells hold equal values.
///
/// Only the right and down neighbour of each cell is checked, which covers
/// every adjacency once.
pub fn has_adjacent_pair(board: Board) -> bool {
    let g = &board.0;
    for r in 0..SIZE {
        for c in 0..SIZE {
            let val = g[r][c];
            if (r + 1 < SIZE && val == g[r + 1][c]) || (c + 1 < SIZE && val == g[r][c + 1]) {
                return true;
            }
        }
    }
    false
}

/// Status of a board right after a move that changed it.
pub fn evaluate_status(board: Board) -> Status {
    if has_tile(board, WIN_TILE) {
        Status::Win
    } else if has_tile(board, 0) || has_adjacent_pair(board) {
        Status::Playing
    } else {
        Status::Lose
    }
}

pub(crate) fn format_val(val: Tile) -> String {
    match val {
        0 => String::from("       "),
        x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}

pub fn get_highest_tile_val(board: Board) -> Tile {
    board.tiles().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::ScriptedSource;
    use crate::engine::state::Grid;

    fn board(grid: Grid) -> Board {
        Board::try_from(grid).unwrap()
    }

    #[test]
    fn it_slide_line_left() {
        assert_eq!(slide_line([0, 0, 0, 0]).line, [0, 0, 0, 0]);
        assert_eq!(slide_line([2, 4, 2, 4]).line, [2, 4, 2, 4]);
        assert_eq!(slide_line([2, 2, 4, 4]).line, [4, 8, 0, 0]);
        assert_eq!(slide_line([2, 0, 0, 2]).line, [4, 0, 0, 0]);
        assert_eq!(slide_line([0, 2, 0, 2]).line, [4, 0, 0, 0]);
        assert_eq!(slide_line([2, 0, 2, 4]).line, [4, 4, 0, 0]);
        assert_eq!(slide_line([4, 2, 2, 0]).line, [4, 4, 0, 0]);
    }

    #[test]
    fn it_never_merges_twice() {
        let s = slide_line([2, 2, 2, 2]);
        assert_eq!(s.line, [4, 4, 0, 0]);
        assert_eq!(s.gained, 8);
        assert!(s.changed);

        let s = slide_line([4, 4, 8, 0]);
        assert_eq!(s.line, [8, 8, 0, 0]);
        assert_eq!(s.gained, 8);

        let s = slide_line([2, 2, 2, 0]);
        assert_eq!(s.line, [4, 2, 0, 0]);
    }

    #[test]
    fn it_leaves_overflowing_pairs_alone() {
        let top = 1 << 31;
        let s = slide_line([top, top, 0, 0]);
        assert_eq!(s.line, [top, top, 0, 0]);
        assert!(!s.changed);
        assert_eq!(slide_line([0, top, 0, top]).line, [top, top, 0, 0]);
    }

    #[test]
    fn it_reports_unchanged_lines() {
        let s = slide_line([2, 4, 8, 0]);
        assert!(!s.changed);
        assert_eq!(s.gained, 0);
        assert!(!slide_line([0; 4]).changed);
    }

    #[test]
    fn test_shift_right() {
        let b = board([[0, 2, 0, 2], [2, 2, 2, 2], [2, 4, 8, 16], [4, 0, 0, 4]]);
        let s = shift(b, Move::Right);
        assert_eq!(
            s.board.rows(),
            [[0, 0, 0, 4], [0, 0, 4, 4], [2, 4, 8, 16], [0, 0, 0, 8]]
        );
        assert_eq!(s.gained, 4 + 8 + 8);
        assert!(s.moved);
    }

    #[test]
    fn test_move_up() {
        let b = board([[2, 0, 4, 2], [2, 0, 4, 0], [0, 2, 8, 2], [4, 2, 0, 0]]);
        let s = shift(b, Move::Up);
        assert_eq!(
            s.board.rows(),
            [[4, 4, 8, 4], [4, 0, 8, 0], [0, 0, 0, 0], [0, 0, 0, 0]]
        );
        assert_eq!(s.gained, 4 + 4 + 8 + 4);
    }

    #[test]
    fn test_move_down() {
        let b = board([[2, 0, 4, 2], [2, 0, 4, 0], [0, 2, 8, 2], [4, 2, 0, 0]]);
        let s = shift(b, Move::Down);
        assert_eq!(
            s.board.rows(),
            [[0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 8, 0], [4, 4, 8, 4]]
        );
    }

    #[test]
    fn test_shift_conserves_tile_sum() {
        let b = board([[2, 2, 4, 8], [0, 4, 4, 4], [16, 0, 16, 2], [2, 2, 2, 2]]);
        for dir in Move::ALL {
            let s = shift(b, dir);
            assert_eq!(s.board.tile_sum(), b.tile_sum(), "{dir:?}");
        }
    }

    #[test]
    fn test_blocked_shift_is_noop() {
        let b = board([[2, 4, 0, 0], [4, 2, 0, 0], [0; 4], [0; 4]]);
        let s = shift(b, Move::Left);
        assert!(!s.moved);
        assert_eq!(s.board, b);
        assert_eq!(s.gained, 0);
        assert_eq!(legal_moves(b), vec![Move::Down, Move::Right]);
    }

    #[test]
    fn it_count_empty() {
        let b = board([[2, 2, 2, 2], [0; 4], [2, 2, 2, 2], [0; 4]]);
        assert_eq!(count_empty(b), 8);
        assert_eq!(count_empty(Board::EMPTY), 16);
        assert_eq!(empty_cells(&b)[0], (1, 0));
    }

    #[test]
    fn it_insert_random_tile() {
        let mut b = Board::EMPTY;
        let mut src = ScriptedSource::new([3, 0], [0.95, 0.1]);
        let first = insert_random_tile(&mut b, &mut src).unwrap();
        assert_eq!(first, Spawn { row: 0, col: 3, value: 4 });
        let second = insert_random_tile(&mut b, &mut src).unwrap();
        assert_eq!(second, Spawn { row: 0, col: 0, value: 2 });
        assert_eq!(count_empty(b), 14);
    }

    #[test]
    fn it_spawns_four_from_the_threshold_up() {
        let mut src = ScriptedSource::new([0], [0.9, 0.899_999, 0.999]);
        assert_eq!(generate_random_tile(&mut src), 4);
        assert_eq!(generate_random_tile(&mut src), 2);
        assert_eq!(generate_random_tile(&mut src), 4);

        let mut b = Board::EMPTY;
        let mut src = ScriptedSource::new([5], [0.9]);
        let spawn = insert_random_tile(&mut b, &mut src).unwrap();
        assert_eq!(spawn, Spawn { row: 1, col: 1, value: 4 });
    }

    #[test]
    fn it_game_over_only_when_full_and_stuck() {
        assert!(!is_game_over(Board::EMPTY));
        let lone = board([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert!(!is_game_over(lone));
        let full_pair = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 8, 8]]);
        assert!(!is_game_over(full_pair));
    }

    #[test]
    fn it_fills_board_then_noops() {
        let mut b = Board::EMPTY;
        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            assert!(insert_random_tile(&mut b, &mut rng).is_some());
        }
        assert_eq!(count_empty(b), 0);
        assert!(b.tiles().all(|t| t == 2 || t == 4));
        let full = b;
        assert_eq!(insert_random_tile(&mut b, &mut rng), None);
        assert_eq!(b, full);
    }

    #[test]
    fn it_evaluates_status() {
        let checker = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!has_adjacent_pair(checker));
        assert_eq!(evaluate_status(checker), Status::Lose);
        assert!(checker.is_game_over());

        let mergeable = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
        assert_eq!(evaluate_status(mergeable), Status::Playing);

        let with_gap = board([[0, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert_eq!(evaluate_status(with_gap), Status::Playing);

        let won = board([[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(evaluate_status(won), Status::Win);
    }

    #[test]
    fn it_get_highest_tile_val() {
        assert_eq!(get_highest_tile_val(Board::EMPTY), 0);
        let b = board([[2, 0, 0, 0], [0, 1024, 0, 0], [0; 4], [0, 0, 0, 8]]);
        assert_eq!(get_highest_tile_val(b), 1024);
    }
}
