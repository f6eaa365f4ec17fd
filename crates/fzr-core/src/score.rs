//! Fuzzy alignment scoring.
//!
//! A Smith-Waterman style dynamic program over (pattern row, text column)
//! with positional bonuses for word boundaries, separators and camelCase
//! transitions. The column scan for each row is windowed: it starts one past
//! the column where the previous row first matched. That makes the scan
//! near-linear for typical file names but means some valid subsequence
//! placements are never examined — this is a deliberate approximation and
//! scores are defined by it, so do not "fix" the window.

use crate::error::{Error, Result};
use crate::types::Limits;

const SCORE_MATCH: i32 = 16;
const BONUS_BOUNDARY: i32 = 8;
const BONUS_NON_ALNUM: i32 = 8;
const BONUS_CAMEL: i32 = 5;
const BONUS_CONSECUTIVE: i32 = 4;
const PENALTY_GAP_START: i32 = -3;
const PENALTY_GAP_EXTEND: i32 = -1;

/// Positional bonus for each text column, from the character and its
/// predecessor. The predecessor of the first character counts as
/// non-alphanumeric, so a match at position 0 earns the boundary bonus.
/// Only the first matching rule applies per position.
fn fill_bonus(text: &[u8], bonus: &mut [i32]) {
    let mut prev = 0u8;
    for (i, &cur) in text.iter().enumerate() {
        bonus[i + 1] = if !prev.is_ascii_alphanumeric() && cur.is_ascii_alphanumeric() {
            BONUS_BOUNDARY
        } else if !cur.is_ascii_alphanumeric() {
            BONUS_NON_ALNUM
        } else if prev.is_ascii_lowercase() && cur.is_ascii_uppercase() {
            BONUS_CAMEL
        } else {
            0
        };
        prev = cur;
    }
}

/// A successful alignment: the best score found on the last matrix row and
/// the column it ended at. Holds no matrix data itself; [`ScoreScratch::positions`]
/// reads the matrix left behind by the `align` call that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Alignment {
    pub score: i32,
    best_col: usize,
    rows: usize,
    cols: usize,
}

/// Reusable alignment buffers: score matrix, contiguous-run matrix and bonus
/// vector, sized once from [`Limits`] and cleared per call. Owning a scratch
/// makes alignment reentrant; nothing here is shared between instances.
#[derive(Debug)]
pub struct ScoreScratch {
    matrix: Vec<i32>,
    runs: Vec<i32>,
    bonus: Vec<i32>,
    max_rows: usize,
    max_cols: usize,
}

impl ScoreScratch {
    pub fn new(limits: &Limits) -> Result<Self> {
        let max_rows = limits.max_pattern_len + 1;
        let max_cols = limits.max_name_len + 1;

        let cells = max_rows * max_cols;
        let mut matrix = Vec::new();
        matrix.try_reserve_exact(cells)?;
        matrix.resize(cells, 0);
        let mut runs = Vec::new();
        runs.try_reserve_exact(cells)?;
        runs.resize(cells, 0);
        let mut bonus = Vec::new();
        bonus.try_reserve_exact(max_cols)?;
        bonus.resize(max_cols, 0);

        Ok(Self {
            matrix,
            runs,
            bonus,
            max_rows,
            max_cols,
        })
    }

    /// Align `pattern` against `text`, case-insensitively (ASCII).
    ///
    /// `Ok(None)` is the normal negative result: some pattern character has
    /// no match anywhere in its column window, detected as soon as that row
    /// finishes. Errors only report inputs exceeding the configured limits.
    pub fn align(&mut self, pattern: &str, text: &str) -> Result<Option<Alignment>> {
        let pat = pattern.as_bytes();
        let txt = text.as_bytes();
        if pat.len() >= self.max_rows {
            return Err(Error::PatternTooLong {
                len: pat.len(),
                limit: self.max_rows - 1,
            });
        }
        if txt.len() >= self.max_cols {
            return Err(Error::NameTooLong {
                len: txt.len(),
                limit: self.max_cols - 1,
            });
        }

        let rows = pat.len() + 1;
        let cols = txt.len() + 1;
        self.matrix[..rows * cols].fill(0);
        self.runs[..rows * cols].fill(0);
        fill_bonus(txt, &mut self.bonus[..cols]);

        let mut first_col = 1;
        let mut best_score = 0;
        let mut best_col = 0;

        for row in 1..rows {
            let p = pat[row - 1];
            let mut in_gap = false;
            let mut row_matched = false;

            for col in first_col..cols {
                let idx = row * cols + col;
                let mut left = self.matrix[idx - 1];
                left += if in_gap {
                    PENALTY_GAP_EXTEND
                } else {
                    // breaking a match streak costs more than staying in a gap
                    PENALTY_GAP_START
                };

                let mut cell = left;
                let mut run = 0;
                let mut selected = false;

                if p.eq_ignore_ascii_case(&txt[col - 1]) {
                    if !row_matched {
                        row_matched = true;
                        // next row's window opens after this row's first match
                        first_col = col + 1;
                    }

                    run = self.runs[idx - cols - 1] + 1;
                    let mut bonus = self.bonus[col];
                    if run > 1 {
                        // a streak inherits the best bonus seen anywhere in it,
                        // at minimum the flat continuation bonus, then escalates
                        bonus = bonus
                            .max(BONUS_CONSECUTIVE)
                            .max(self.bonus[col + 1 - run as usize])
                            + 1;
                    }

                    let diag = self.matrix[idx - cols - 1] + SCORE_MATCH + bonus;
                    if left < diag {
                        cell = diag;
                        selected = true;
                    }
                }

                if selected {
                    in_gap = false;
                    self.runs[idx] = run;
                } else {
                    in_gap = true;
                    self.runs[idx] = 0;
                }
                self.matrix[idx] = cell.max(0);

                if row == rows - 1 && self.matrix[idx] > best_score {
                    best_score = self.matrix[idx];
                    best_col = col;
                }
            }

            if !row_matched {
                return Ok(None);
            }
        }

        Ok(Some(Alignment {
            score: best_score,
            best_col,
            rows,
            cols,
        }))
    }

    /// Recover which text positions the pattern consumed, by walking the
    /// matrix backward from the best cell. One slot per text byte; exactly
    /// `pattern.len()` slots end up marked, in increasing column order.
    ///
    /// Must be called before the next `align` overwrites the matrix.
    pub fn positions(&self, alignment: &Alignment) -> Vec<bool> {
        let mut marked = vec![false; alignment.cols - 1];
        let mut row = alignment.rows - 1;
        let mut col = alignment.best_col;

        while row >= 1 {
            let idx = row * alignment.cols + col;
            // equal values resolve toward "matched"; deterministic, though not
            // the only valid reconstruction when optima tie
            if self.matrix[idx - 1] <= self.matrix[idx] {
                marked[col - 1] = true;
                row -= 1;
            }
            col -= 1;
        }

        marked
    }

    /// Align and backtrace in one call. Used by front-ends to highlight
    /// matched characters per visible row, independently of ranking.
    pub fn match_positions(&mut self, pattern: &str, text: &str) -> Result<Option<(i32, Vec<bool>)>> {
        match self.align(pattern, text)? {
            Some(alignment) => {
                let positions = self.positions(&alignment);
                Ok(Some((alignment.score, positions)))
            }
            None => Ok(None),
        }
    }
}
