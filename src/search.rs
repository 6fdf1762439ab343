//! The search engine (component F): depth-first branch-and-bound over
//! segment -> assignment, with structural constraints, calendar validation,
//! and score-maximizing result selection.
//!
//! An admissible-heuristic branch-and-bound (a precomputed per-segment
//! optimistic upper bound prunes branches that cannot beat the best complete
//! assignment found so far) that walks segments left to right rather than
//! reordering by remaining-option count; for the segment counts this engine
//! ever sees (a handful per input) that costs nothing in practice and keeps
//! backtracking a plain recursive function instead of a priority-queue
//! frontier. See `DESIGN.md`.

use std::collections::HashMap;

use crate::calendar;
use crate::hypothesis::{Assignment, Candidate};
use crate::intern::{LocaleId, LocaleIds};
use crate::specifier::Category;
use crate::value::DecodedValue;
use time::Time;

/// One fully assigned, constraint-valid interpretation of every candidate
/// segment.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Per candidate position: `Some(assignment_index)` or `None` (kept as
    /// literal text).
    pub choices: Vec<Option<usize>>,
    pub score: i32,
    /// The locales consistent with every locale-bearing choice made. Empty
    /// means no locale-distinguishing evidence was used.
    pub locales: LocaleIds,
    pub value: Option<DecodedValue>,
}

/// Run the search over every candidate segment's hypotheses and return all
/// outcomes sharing the maximum score. Empty input (no candidates) returns
/// no outcomes; callers treat that as "nothing to report", not an error.
pub fn search(candidates: &[Candidate], universal: &LocaleIds) -> Vec<Outcome> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let n = candidates.len();
    let optimistic: Vec<i32> = candidates
        .iter()
        .map(|c| {
            c.assignments
                .iter()
                .map(optimistic_score)
                .max()
                .unwrap_or(0)
        })
        .collect();
    let mut suffix_bound = vec![0i32; n + 1];
    for i in (0..n).rev() {
        suffix_bound[i] = suffix_bound[i + 1] + optimistic[i];
    }

    let mut state = State {
        candidates,
        chosen: vec![None; n],
        category_position: HashMap::new(),
        universal,
    };
    let mut best_score = i32::MIN;
    let mut outcomes = Vec::new();
    dfs(&mut state, 0, 0, &suffix_bound, &mut best_score, &mut outcomes);

    if let Some(max) = outcomes.iter().map(|o| o.score).max() {
        outcomes.retain(|o| o.score == max);
    }
    outcomes
}

/// An admissible upper bound on what this assignment could ever contribute
/// to the real score (`score_assignment`, computed at a leaf): `+1` for the
/// specifier itself, plus `+1` for each hint present, treating every hint as
/// if it were a fresh, unshared locale match. The real score instead maxes a
/// per-locale counter across every hint that matched, so it can only be
/// lower than or equal to this flat count — safe as a branch-and-bound
/// bound, even though it is not the score finalize will actually report.
fn optimistic_score(assignment: &Assignment) -> i32 {
    1 + assignment.prefix_hint.is_some() as i32 + assignment.suffix_hint.is_some() as i32
}

struct State<'c> {
    candidates: &'c [Candidate],
    chosen: Vec<Option<usize>>,
    category_position: HashMap<Category, usize>,
    universal: &'c LocaleIds,
}

/// `score` here is the flat, per-assignment heuristic total (see
/// `optimistic_score`), used only to prune; the score a returned `Outcome`
/// actually carries is computed once, at the leaf, by `finalize`.
fn dfs(
    state: &mut State,
    position: usize,
    score: i32,
    suffix_bound: &[i32],
    best_score: &mut i32,
    outcomes: &mut Vec<Outcome>,
) {
    if position == state.candidates.len() {
        if let Some(outcome) = finalize(state) {
            if outcome.score > *best_score {
                *best_score = outcome.score;
            }
            outcomes.push(outcome);
        }
        return;
    }

    if score + suffix_bound[position] < *best_score {
        return;
    }

    // Leave this segment as a literal.
    dfs(state, position + 1, score, suffix_bound, best_score, outcomes);

    for (index, assignment) in state.candidates[position].assignments.iter().enumerate() {
        let category = assignment.specifier.category();
        if state.category_position.contains_key(&category) {
            continue;
        }
        state.category_position.insert(category, position);
        state.chosen[position] = Some(index);
        let gained = optimistic_score(assignment);
        dfs(state, position + 1, score + gained, suffix_bound, best_score, outcomes);
        state.chosen[position] = None;
        state.category_position.remove(&category);
    }
}

/// A chosen assignment together with the position it came from, borrowed
/// out of `State` for the validation pass.
struct Chosen<'a> {
    position: usize,
    assignment: &'a Assignment,
}

fn finalize(state: &State) -> Option<Outcome> {
    let mut by_category: HashMap<Category, Chosen> = HashMap::new();
    let mut locales: Option<Vec<LocaleId>> = None;

    for (position, choice) in state.chosen.iter().enumerate() {
        let Some(index) = choice else { continue };
        let assignment = &state.candidates[position].assignments[*index];
        by_category.insert(assignment.specifier.category(), Chosen { position, assignment });
        if !assignment.locales.is_empty() {
            locales = Some(intersect(locales, &assignment.locales));
            if locales.as_ref().is_some_and(Vec::is_empty) {
                return None;
            }
        }
    }

    let date_present = Category::ALL.iter().any(|c| c.is_date() && by_category.contains_key(c));
    if date_present {
        for required in [Category::Year, Category::Month, Category::Day] {
            if !by_category.contains_key(&required) {
                return None;
            }
        }
    }
    let time_present = Category::ALL.iter().any(|c| c.is_time() && by_category.contains_key(c));
    if time_present {
        for required in [Category::Hour, Category::Minute] {
            if !by_category.contains_key(&required) {
                return None;
            }
        }
    }

    if let (Some(month), Some(day)) = (by_category.get(&Category::Month), by_category.get(&Category::Day)) {
        if !adjacent_among_assigned(&by_category, month.position, day.position) {
            return None;
        }
    }
    if let Some(century) = by_category.get(&Category::Century) {
        match by_category.get(&Category::Year) {
            Some(year) if year.position == century.position + 1 => {}
            _ => return None,
        }
    }
    if let (Some(hour), Some(minute)) = (by_category.get(&Category::Hour), by_category.get(&Category::Minute)) {
        if hour.position > minute.position || !adjacent_among_assigned(&by_category, hour.position, minute.position) {
            return None;
        }
        if let Some(second) = by_category.get(&Category::Second) {
            if minute.position > second.position
                || !adjacent_among_assigned(&by_category, minute.position, second.position)
            {
                return None;
            }
        }
    }

    let am_pm = by_category.get(&Category::AmPm).map(|c| c.assignment.value != 0);
    if let Some(hour) = by_category.get(&Category::Hour).map(|c| c.assignment.value as u8) {
        if am_pm.is_some() && !(1..=12).contains(&hour) {
            return None;
        }
    }

    let date = if date_present {
        let month = by_category[&Category::Month].assignment.value as u8;
        let day = by_category[&Category::Day].assignment.value as u8;
        let weekday_ordinal = by_category.get(&Category::Weekday).map(|c| c.assignment.value as u8);

        let year = match by_category.get(&Category::Century) {
            Some(century) => {
                let two_digit = by_category[&Category::Year].assignment.value;
                century.assignment.value * 100 + two_digit
            }
            None => {
                let two_digit = by_category[&Category::Year].assignment.value as u8;
                calendar::infer_century(two_digit, month, day, weekday_ordinal) as i64
            }
        };

        let date = calendar::valid_date(year as i32, month, day)?;
        if let Some(weekday_ordinal) = weekday_ordinal {
            if calendar::weekday_number(date.weekday()) != weekday_ordinal {
                return None;
            }
        }
        Some(date)
    } else {
        None
    };

    let time = if time_present {
        let mut hour = by_category[&Category::Hour].assignment.value as u8;
        if let Some(is_pm) = am_pm {
            hour = calendar::adjust_hour_for_am_pm(hour, is_pm);
        }
        if hour > 23 {
            return None;
        }
        let minute = by_category[&Category::Minute].assignment.value as u8;
        let second = by_category.get(&Category::Second).map(|c| c.assignment.value as u8).unwrap_or(0);
        if second > 60 || minute > 59 {
            return None;
        }
        let second = second.min(59);
        Time::from_hms(hour, minute, second).ok()
    } else {
        None
    };

    let score = score_assignment(state, locales.as_deref());

    let locales = match locales {
        Some(mut v) => {
            v.sort();
            v.dedup();
            LocaleIds::from(v)
        }
        None => state.universal.clone(),
    };

    Some(Outcome {
        choices: state.chosen.clone(),
        score,
        locales,
        value: DecodedValue::combine(date, time),
    })
}

/// The real scoring formula: `+1` for every specifier chosen, `+1` for every
/// adjacent literal matching a hint with a universal (empty) locale set, and
/// for every hint naming specific locales, a per-locale hit counter; the
/// combined contribution from all such hints is the single highest counter
/// value among the locales still consistent with `required` (every locale,
/// if no keyword assignment has narrowed it yet) — not a flat `+1` per hint,
/// since several hints backing the *same* locale should reinforce each
/// other rather than each count independently.
fn score_assignment(state: &State, required: Option<&[LocaleId]>) -> i32 {
    let mut base = 0i32;
    let mut universal_hints = 0i32;
    let mut per_locale: HashMap<LocaleId, i32> = HashMap::new();

    for (position, choice) in state.chosen.iter().enumerate() {
        let Some(index) = choice else { continue };
        let assignment = &state.candidates[position].assignments[*index];
        base += 1;
        for hint in [&assignment.prefix_hint, &assignment.suffix_hint] {
            let Some(hint_locales) = hint else { continue };
            if hint_locales.is_empty() {
                universal_hints += 1;
            } else {
                for locale in hint_locales.iter() {
                    *per_locale.entry(locale.clone()).or_insert(0) += 1;
                }
            }
        }
    }

    let locale_bonus = match required {
        Some(required) => required.iter().filter_map(|l| per_locale.get(l)).copied().max().unwrap_or(0),
        None => per_locale.values().copied().max().unwrap_or(0),
    };

    base + universal_hints + locale_bonus
}

fn adjacent_among_assigned(by_category: &HashMap<Category, Chosen>, a: usize, b: usize) -> bool {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    !by_category.values().any(|c| c.position > low && c.position < high)
}

fn intersect(current: Option<Vec<LocaleId>>, next: &LocaleIds) -> Vec<LocaleId> {
    match current {
        None => next.to_vec(),
        Some(current) => current.into_iter().filter(|id| next.contains(id)).collect(),
    }
}
