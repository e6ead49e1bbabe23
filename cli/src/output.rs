//! Plain-text rendering for stdout.

use embedcmp_embeddings::{Comparison, EmbedOutcome, Embedding, format_score};

const PREVIEW_LEN: usize = 8;

pub fn vector(values: &[f32], full: bool) -> String {
    let shown = if full {
        values
    } else {
        &values[..values.len().min(PREVIEW_LEN)]
    };
    let body = shown
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(", ");

    if shown.len() < values.len() {
        format!("[{body}, ...] (first {} of {})", shown.len(), values.len())
    } else {
        format!("[{body}]")
    }
}

pub fn embedding(embedding: &Embedding, full: bool) -> String {
    format!(
        "label: {}\ndimension: {}\nvector: {}",
        embedding.label,
        embedding.dimension(),
        vector(&embedding.vector, full)
    )
}

pub fn outcome(outcome: &EmbedOutcome, full: bool) -> String {
    let mut out = embedding(&outcome.embedding, full);
    out.push_str(&format!("\nmodel: {}", outcome.model));
    if let Some(tokens) = outcome.tokens_used {
        out.push_str(&format!("\ntokens: {tokens}"));
    }
    out
}

pub fn comparison(comparison: &Comparison) -> String {
    format!(
        "similarity: {} ({} vs reference {})",
        format_score(comparison.score),
        comparison.current_label,
        comparison.stored_label
    )
}
