/// Clean a raw speech fragment for display.
///
/// Collapses whitespace runs to single spaces, trims, and capitalizes the
/// first character. When the result ends in sentence-terminal punctuation
/// (`.`, `!`, `?`), the text is re-split into sentence-terminated chunks and
/// rejoined with single spaces, each chunk capitalized — this canonicalizes
/// spacing between sentences that were concatenated from separate fragments.
///
/// Pure and deterministic; `normalize("")` is `""`.
pub fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return collapsed;
    }

    if collapsed.ends_with(['.', '!', '?']) {
        return sentence_chunks(&collapsed)
            .map(|chunk| capitalize(chunk.trim()))
            .collect::<Vec<_>>()
            .join(" ");
    }

    capitalize(&collapsed)
}

/// Split into chunks that each end with a run of terminal punctuation.
/// The caller guarantees the input itself ends with terminal punctuation,
/// so the final chunk is always sentence-terminated.
fn sentence_chunks(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let mut end = rest.len();
        let mut seen_terminal = false;
        for (i, c) in rest.char_indices() {
            let terminal = matches!(c, '.' | '!' | '?');
            if seen_terminal && !terminal {
                end = i;
                break;
            }
            seen_terminal = terminal;
        }
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
