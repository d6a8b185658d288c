// Cleanup of model output before JSON parsing, and normalization of pasted
// exam text before prompting.

/// Maximum exam text length forwarded to the model (characters).
const MAX_TEXT_LENGTH: usize = 20_000;

/// Strip markdown fences and surrounding prose from a model response so the
/// remainder parses as JSON.
///
/// Models are instructed to answer with bare JSON but routinely wrap it in
/// fences or preface it with a sentence. Fences go first; whatever is left
/// is sliced down to the outermost `{...}`.
pub fn clean_model_json(raw: &str) -> String {
    let unfenced = raw.replace("```json", "").replace("```", "");
    let trimmed = unfenced.trim();

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}

/// Normalize pasted exam text: drop invisible and control characters,
/// collapse blank lines, trim, and truncate.
pub fn sanitize_exam_text(raw: &str) -> String {
    let visible = remove_invisible_chars(raw);
    let normalized = normalize_whitespace(&visible);
    truncate_to_max_length(&normalized, MAX_TEXT_LENGTH)
}

/// Remove zero-width/formatting Unicode and C0 controls, preserving
/// standard whitespace.
fn remove_invisible_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            if *c == ' ' || *c == '\n' || *c == '\t' || *c == '\r' {
                return true;
            }
            if matches!(
                *c,
                '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{FEFF}'
            ) {
                return false;
            }
            !c.is_control()
        })
        .collect()
}

/// Collapse runs of blank lines, trim each line, drop leading/trailing
/// blanks.
fn normalize_whitespace(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut prev_blank = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !prev_blank {
                lines.push("");
                prev_blank = true;
            }
        } else {
            lines.push(trimmed);
            prev_blank = false;
        }
    }

    while lines.first() == Some(&"") {
        lines.remove(0);
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }

    lines.join("\n")
}

/// Truncate to `max_len` characters, breaking at the last word boundary.
fn truncate_to_max_length(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_len).collect();
    let cut = match cut.rfind(char::is_whitespace) {
        Some(pos) => &cut[..pos],
        None => cut.as_str(),
    };
    format!("{cut}…[TRUNCADO]")
}
