//! Shared string formatting and parsing for score types.
//!
//! Full form: `"-7init/-147hard/-258medium/-369soft"` (init segment only when non-zero).
//! Short form: zero levels and a zero init score are left out, `"0"` when nothing remains.
//! Bendable scores bracket each group: `"[0/-1]hard/[-5/0/-3]soft"`.

use std::fmt::Write;

use super::level::ScoreNumber;
use super::traits::ScoreParseError;

pub(crate) const INIT_LABEL: &str = "init";
pub(crate) const HARD_LABEL: &str = "hard";
pub(crate) const SOFT_LABEL: &str = "soft";

fn init_prefix(init_score: i32) -> String {
    if init_score == 0 {
        String::new()
    } else {
        format!("{}{}/", init_score, INIT_LABEL)
    }
}

pub(crate) fn full_string<N: ScoreNumber>(init_score: i32, levels: &[N], labels: &[&str]) -> String {
    let body = levels
        .iter()
        .zip(labels)
        .map(|(level, label)| format!("{}{}", level, label))
        .collect::<Vec<_>>()
        .join("/");
    format!("{}{}", init_prefix(init_score), body)
}

pub(crate) fn short_string<N: ScoreNumber>(init_score: i32, levels: &[N], labels: &[&str]) -> String {
    let mut segments = Vec::with_capacity(levels.len() + 1);
    if init_score != 0 {
        segments.push(format!("{}{}", init_score, INIT_LABEL));
    }
    for (level, label) in levels.iter().zip(labels) {
        if !level.is_zero() {
            segments.push(format!("{}{}", level, label));
        }
    }
    if segments.is_empty() {
        // "0" over "0.00": decimal levels may have different scales
        return "0".to_string();
    }
    segments.join("/")
}

fn bracket<N: ScoreNumber>(levels: &[N], label: &str) -> String {
    let mut out = String::from("[");
    for (i, level) in levels.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        let _ = write!(out, "{}", level);
    }
    let _ = write!(out, "]{}", label);
    out
}

pub(crate) fn bendable_full_string<N: ScoreNumber>(init_score: i32, hard: &[N], soft: &[N]) -> String {
    format!(
        "{}{}/{}",
        init_prefix(init_score),
        bracket(hard, HARD_LABEL),
        bracket(soft, SOFT_LABEL)
    )
}

pub(crate) fn bendable_short_string<N: ScoreNumber>(init_score: i32, hard: &[N], soft: &[N]) -> String {
    let mut segments = Vec::with_capacity(3);
    if init_score != 0 {
        segments.push(format!("{}{}", init_score, INIT_LABEL));
    }
    if hard.iter().any(|level| !level.is_zero()) {
        segments.push(bracket(hard, HARD_LABEL));
    }
    if soft.iter().any(|level| !level.is_zero()) {
        segments.push(bracket(soft, SOFT_LABEL));
    }
    if segments.is_empty() {
        return "0".to_string();
    }
    segments.join("/")
}

fn parse_init(type_name: &str, score: &str, token: &str) -> Result<i32, ScoreParseError> {
    token.parse::<i32>().map_err(|e| {
        ScoreParseError::new(format!(
            "The score string ({}) for {} has an init score ({}) which is not a valid integer: {}",
            score, type_name, token, e
        ))
    })
}

fn parse_number<N: ScoreNumber>(type_name: &str, score: &str, token: &str) -> Result<N, ScoreParseError> {
    N::parse_level(token).map_err(|e| {
        ScoreParseError::new(format!(
            "The score string ({}) for {} has an invalid level: {}",
            score, type_name, e
        ))
    })
}

/// Parses the full or short form of a score whose levels carry fixed labels.
///
/// Returns the init score and one value per label; missing levels are zero.
pub(crate) fn parse_labeled<N: ScoreNumber>(
    type_name: &str,
    score: &str,
    labels: &[&str],
) -> Result<(i32, Vec<N>), ScoreParseError> {
    let trimmed = score.trim();
    if trimmed.is_empty() {
        return Err(ScoreParseError::new(format!(
            "The score string for {} is empty",
            type_name
        )));
    }

    let mut tokens: Vec<&str> = trimmed.split('/').collect();
    let mut init_score = 0;
    if let Some(init) = tokens[0].strip_suffix(INIT_LABEL) {
        init_score = parse_init(type_name, trimmed, init)?;
        tokens.remove(0);
    }

    let mut levels = vec![N::ZERO; labels.len()];
    if tokens.len() == 1 && tokens[0] == "0" {
        return Ok((init_score, levels));
    }

    let mut next = 0;
    for token in tokens {
        let index = (next..labels.len())
            .find(|&i| token.ends_with(labels[i]))
            .ok_or_else(|| {
                ScoreParseError::new(format!(
                    "The score string ({}) for {} doesn't follow the pattern ({}): \
                     the token ({}) has no expected level label",
                    trimmed,
                    type_name,
                    pattern(labels),
                    token
                ))
            })?;
        let number = &token[..token.len() - labels[index].len()];
        levels[index] = parse_number(type_name, trimmed, number)?;
        next = index + 1;
    }
    Ok((init_score, levels))
}

fn pattern(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|label| format!("999{}", label))
        .collect::<Vec<_>>()
        .join("/")
}

/// Parses the full or short form of a bendable score.
pub(crate) fn parse_bendable<N: ScoreNumber>(
    type_name: &str,
    score: &str,
    hard_levels: usize,
    soft_levels: usize,
) -> Result<(i32, Vec<N>, Vec<N>), ScoreParseError> {
    let trimmed = score.trim();
    let malformed = |reason: String| {
        ScoreParseError::new(format!(
            "The score string ({}) for {} doesn't follow the pattern ([999/.../999]hard/[999/.../999]soft): {}",
            trimmed, type_name, reason
        ))
    };
    if trimmed.is_empty() {
        return Err(malformed("it is empty".to_string()));
    }

    let mut rest = trimmed;
    let mut init_score = 0;
    let mut has_init = false;
    if !rest.starts_with('[') {
        if let Some(position) = rest.find(INIT_LABEL) {
            init_score = parse_init(type_name, trimmed, &rest[..position])?;
            rest = &rest[position + INIT_LABEL.len()..];
            has_init = true;
            if !rest.is_empty() {
                rest = rest
                    .strip_prefix('/')
                    .ok_or_else(|| malformed("the init segment is not followed by '/'".to_string()))?;
            }
        }
    }

    let mut hard = vec![N::ZERO; hard_levels];
    let mut soft = vec![N::ZERO; soft_levels];
    if rest == "0" || (rest.is_empty() && has_init) {
        return Ok((init_score, hard, soft));
    }

    let mut seen_hard = false;
    let mut seen_soft = false;
    while !rest.is_empty() {
        let body = rest
            .strip_prefix('[')
            .ok_or_else(|| malformed(format!("the segment ({}) does not start with '['", rest)))?;
        let close = body
            .find(']')
            .ok_or_else(|| malformed(format!("the segment ({}) has no closing ']'", rest)))?;
        let inner = &body[..close];
        let after = &body[close + 1..];

        let (target, count, after_label) = if let Some(after_label) = after.strip_prefix(HARD_LABEL) {
            if seen_hard || seen_soft {
                return Err(malformed("the hard segment must come first and only once".to_string()));
            }
            seen_hard = true;
            (&mut hard, hard_levels, after_label)
        } else if let Some(after_label) = after.strip_prefix(SOFT_LABEL) {
            if seen_soft {
                return Err(malformed("the soft segment appears twice".to_string()));
            }
            seen_soft = true;
            (&mut soft, soft_levels, after_label)
        } else {
            return Err(malformed(format!("the segment ({}) has no level label", rest)));
        };

        let tokens: Vec<&str> = if inner.is_empty() {
            Vec::new()
        } else {
            inner.split('/').collect()
        };
        if tokens.len() != count {
            return Err(malformed(format!(
                "expected {} levels in [{}], found {}",
                count,
                inner,
                tokens.len()
            )));
        }
        for (slot, token) in target.iter_mut().zip(tokens) {
            *slot = parse_number(type_name, trimmed, token)?;
        }

        rest = if after_label.is_empty() {
            after_label
        } else {
            after_label
                .strip_prefix('/')
                .ok_or_else(|| malformed(format!("unsupported suffix ({})", after_label)))?
        };
    }
    Ok((init_score, hard, soft))
}
