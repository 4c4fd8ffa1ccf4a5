//! Response cleanup — reduces a raw model response to pure CSV text before
//! parsing. Best-effort heuristics, never fails.

use tracing::warn;

/// Header tokens that mark where the CSV starts when the model prepends
/// prose without fencing. The prompt quotes every field, so the quoted form
/// is tried first.
const HEADER_MARKERS: [&str; 2] = ["\"Question\"", "Question,"];

/// Extracts the CSV payload from a raw model response.
///
/// 1. If a ``` fenced block is present (optionally tagged `csv`), returns
///    its trimmed interior.
/// 2. Otherwise, if a recognizable header token occurs, returns the trimmed
///    suffix starting there.
/// 3. Otherwise returns the whole text unchanged and lets the parser cope.
pub fn extract_csv(raw: &str) -> String {
    if let Some(inner) = fenced_block(raw) {
        return inner.trim().to_string();
    }

    for marker in HEADER_MARKERS {
        if let Some(start) = raw.find(marker) {
            return raw[start..].trim().to_string();
        }
    }

    warn!("No CSV start marker found in model response; passing it through as-is");
    raw.to_string()
}

/// Returns the interior of the first ``` fenced block, if any.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let after = after.strip_prefix("csv").unwrap_or(after);
    let end = after.find("```")?;
    Some(&after[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\"Question\",\"Bonne Réponse\"\n\"Q1\",\"R1\"";

    #[test]
    fn test_extract_from_tagged_fence() {
        let raw = format!("```csv\n{CSV}\n```");
        assert_eq!(extract_csv(&raw), CSV);
    }

    #[test]
    fn test_extract_from_bare_fence() {
        let raw = format!("```\n{CSV}\n```");
        assert_eq!(extract_csv(&raw), CSV);
    }

    #[test]
    fn test_extract_from_fence_with_preamble() {
        let raw = format!("Voici les questions demandées :\n\n```csv\n{CSV}\n```\nBonne journée !");
        assert_eq!(extract_csv(&raw), CSV);
    }

    #[test]
    fn test_extract_falls_back_to_header_marker() {
        let raw = format!("Voici le document CSV :\n\n{CSV}");
        assert_eq!(extract_csv(&raw), CSV);
    }

    #[test]
    fn test_extract_unquoted_header_marker() {
        let raw = "Bien sûr.\nQuestion,Réponse\nQ1,R1";
        assert_eq!(extract_csv(raw), "Question,Réponse\nQ1,R1");
    }

    #[test]
    fn test_extract_passthrough_when_nothing_recognized() {
        let raw = "du texte sans rien de reconnaissable";
        assert_eq!(extract_csv(raw), raw);
    }

    #[test]
    fn test_unterminated_fence_falls_through_to_marker() {
        let raw = format!("```csv\n{CSV}");
        assert_eq!(extract_csv(&raw), CSV);
    }
}
