// Report rendering: turns a headline and its prediction set into the text
// block shown after each successful classification. Everything here is
// pure; the caller decides where the text goes.

use std::fmt::Write as _;

use crate::api::Prediction;

/// Number of cells in a confidence bar.
pub const BAR_WIDTH: usize = 10;
/// How many ranked guesses the report lists.
pub const TOP_N: usize = 3;

const FILLED: char = '█';
const EMPTY: char = '░';
const BANNER_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 11;

/// Highest-scoring prediction. Ties go to the entry that appears first.
pub fn best_topic(predictions: &[Prediction]) -> Option<&Prediction> {
    predictions.iter().fold(None, |best, p| match best {
        Some(b) if b.score >= p.score => Some(b),
        _ => Some(p),
    })
}

/// The `n` highest-scoring predictions, highest first. Equal scores keep
/// their original relative order.
pub fn top_n(predictions: &[Prediction], n: usize) -> Vec<&Prediction> {
    let mut ranked: Vec<&Prediction> = predictions.iter().collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(n);
    ranked
}

/// Number of filled cells for `score`: one per full ten percent, clamped to
/// the bar width. NaN renders as an empty bar.
pub fn filled_blocks(score: f64) -> usize {
    let blocks = (score * 100.0 / 10.0).floor();
    if blocks.is_nan() {
        0
    } else {
        blocks.clamp(0.0, BAR_WIDTH as f64) as usize
    }
}

/// Fixed-width bar, e.g. `██████░░░░` for 0.62.
pub fn confidence_bar(score: f64) -> String {
    let filled = filled_blocks(score);
    let mut bar = String::with_capacity(BAR_WIDTH * FILLED.len_utf8());
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(BAR_WIDTH - filled));
    bar
}

/// Score as a percentage with one decimal, e.g. `62.0`. Display only.
pub fn percent(score: f64) -> String {
    format!("{:.1}", score * 100.0)
}

/// Full console report. Returns `None` for an empty prediction set, which
/// the client never hands out.
pub fn render(headline: &str, predictions: &[Prediction]) -> Option<String> {
    let best = best_topic(predictions)?;
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "🗞️ News Topic Classifier");
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "Headline: {headline}");
    let _ = writeln!(out, "Best topic: {}", best.label);
    let _ = writeln!(
        out,
        "Confidence: {}% [{}]",
        percent(best.score),
        confidence_bar(best.score)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Top {TOP_N} guesses:");
    for (rank, p) in top_n(predictions, TOP_N).iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {:<width$} {}% [{}]",
            rank + 1,
            p.label,
            percent(p.score),
            confidence_bar(p.score),
            width = LABEL_WIDTH
        );
    }
    let _ = writeln!(out, "{banner}");
    Some(out)
}
