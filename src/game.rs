#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_COLS: usize = 10;
pub const BOARD_ROWS: usize = 20;

// Drop timing (milliseconds per automatic one-row descent)
pub const BASE_DROP_INTERVAL_MS: u64 = 800;
pub const DROP_INTERVAL_STEP_MS: u64 = 60;
pub const MIN_DROP_INTERVAL_MS: u64 = 200;

// Level progression
pub const LINES_PER_LEVEL: u32 = 5;
pub const STARTING_LEVEL: u32 = 1;

// Normal-mode line clear scoring, indexed by lines cleared - 1
pub const NORMAL_CLEAR_POINTS: [i64; 4] = [100, 300, 500, 800];
pub const BIG_CLEAR_POINTS_PER_LINE: i64 = 200;

// Chaotic-mode line clear scoring: multi-line clears are punished on purpose.
// gain = max(CHAOTIC_CLEAR_MIN, CHAOTIC_CLEAR_BASE - (lines - 1) * CHAOTIC_CLEAR_PENALTY)
pub const CHAOTIC_CLEAR_BASE: i64 = 60;
pub const CHAOTIC_CLEAR_PENALTY: i64 = 80;
pub const CHAOTIC_CLEAR_MIN: i64 = 5;

// Drop scoring
pub const SOFT_DROP_POINTS: i64 = 1;
pub const HARD_DROP_POINTS_PER_ROW: i64 = 2;

// Global mode alternation. Chaotic stretches last exactly twice as long as
// normal ones.
pub const DEFAULT_NORMAL_MODE_SECS: u64 = 8;
pub const CHAOTIC_MODE_FACTOR: u64 = 2;

#[must_use]
pub fn level_for_lines(lines: u32) -> u32 {
    STARTING_LEVEL + lines / LINES_PER_LEVEL
}

#[must_use]
pub fn drop_interval_for_level(level: u32) -> u64 {
    BASE_DROP_INTERVAL_MS
        .saturating_sub(u64::from(level) * DROP_INTERVAL_STEP_MS)
        .max(MIN_DROP_INTERVAL_MS)
}

/// Points awarded for clearing `lines` rows in one lock cycle.
///
/// Normal mode uses the classic lookup table; chaotic mode inverts the
/// incentive so that clearing more lines at once scores less.
#[must_use]
pub fn line_clear_points(chaotic: bool, lines: usize) -> i64 {
    if lines == 0 {
        return 0;
    }
    if chaotic {
        let lines = i64::try_from(lines).unwrap_or(i64::MAX);
        (CHAOTIC_CLEAR_BASE - (lines - 1) * CHAOTIC_CLEAR_PENALTY).max(CHAOTIC_CLEAR_MIN)
    } else if lines <= NORMAL_CLEAR_POINTS.len() {
        NORMAL_CLEAR_POINTS[lines - 1]
    } else {
        i64::try_from(lines).unwrap_or(i64::MAX) * BIG_CLEAR_POINTS_PER_LINE
    }
}

/// Points for a hard drop of `distance` rows. Negative while chaotic: the
/// further you slam a piece, the more you lose.
#[must_use]
pub fn hard_drop_points(chaotic: bool, distance: i64) -> i64 {
    let points = distance * HARD_DROP_POINTS_PER_ROW;
    if chaotic { -points } else { points }
}
