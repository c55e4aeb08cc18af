//! Post-processing of free-text completions into bullet lines.
//!
//! Models preface bullet points with filler ("here are the transformed
//! bullet points:") no matter how firmly the system prompt forbids it. The
//! heuristic here lowercases the text, strips the known filler phrases,
//! drops bullet markers, and re-capitalizes each surviving line.

use std::sync::OnceLock;

use regex::Regex;

// Matched against the lowercased response.
const IGNORE_PHRASES: &[&str] = &[
    "note: i've kept the bullet points concise, using action verbs and focusing on impact.",
    "here's the transformed bullet point:",
    "here is the transformed bullet point:",
    "here\u{2019}s the transformed bullet point:",
    "transformed bullet point:",
    "bullet point:",
    "here are two possible bullet points:",
    "here are some possible bullet points:",
    "possible bullet points:",
    "the transformed version is:",
    "here are the transformed bullet points:",
    "here's the improved bullet point:",
    "here is the improved bullet point:",
    "improved bullet point:",
    "here are the transformed resume bullet points:",
    "here is the transformed resume",
    "here is the transformed commit message into a resume",
    "here is a polished resume",
    "here's a possible transformation:",
];

fn bullet_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[-*\u{2022}]\s*").unwrap())
}

/// Split a raw completion into cleaned, capitalized lines.
pub fn clean_output(output: &str) -> Vec<String> {
    let mut lowered = output.to_lowercase();
    for phrase in IGNORE_PHRASES {
        lowered = lowered.replace(phrase, "");
    }

    lowered
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let line = bullet_marker().replace(line, "");
            let mut chars = line.chars();
            let first = chars.next()?;
            Some(first.to_uppercase().collect::<String>() + chars.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bullet_markers_and_capitalizes() {
        let raw = "\u{2022} built a sync engine\n- improved test coverage\n* fixed a race";
        assert_eq!(
            clean_output(raw),
            [
                "Built a sync engine",
                "Improved test coverage",
                "Fixed a race"
            ]
        );
    }

    #[test]
    fn removes_filler_preamble() {
        let raw = "Here are the transformed bullet points:\n\u{2022} shipped the exporter";
        assert_eq!(clean_output(raw), ["Shipped the exporter"]);
    }

    #[test]
    fn drops_blank_lines() {
        let raw = "\n\n\u{2022} one thing\n\n";
        assert_eq!(clean_output(raw), ["One thing"]);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(clean_output("").is_empty());
    }

    #[test]
    fn plain_text_passes_through_capitalized() {
        assert_eq!(clean_output("led the migration"), ["Led the migration"]);
    }
}
