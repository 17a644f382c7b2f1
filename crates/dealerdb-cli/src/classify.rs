//! `classify` command: run the built-in classifier over one piece of text.

use dealerdb_sentiment::Classifier;

/// Render the label and the vocabulary hit counts behind it.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn render(text: &str, as_json: bool) -> anyhow::Result<String> {
    let classifier = Classifier::default();
    let score = classifier.score(text);
    let label = classifier.classify(text);

    if as_json {
        let value = serde_json::json!({
            "sentiment": label,
            "positive": score.positive,
            "negative": score.negative,
        });
        return Ok(serde_json::to_string(&value)?);
    }

    Ok(format!(
        "{label} (positive: {}, negative: {})",
        score.positive, score.negative
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_plain_shows_label_and_counts() {
        let out = render("Excellent and friendly staff", false).expect("render");
        assert_eq!(out, "positive (positive: 2, negative: 0)");
    }

    #[test]
    fn render_json_is_parseable() {
        let out = render("Terrible and rude experience", true).expect("render");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value["sentiment"], "negative");
        assert_eq!(value["negative"], 2);
    }

    #[test]
    fn render_empty_text_is_neutral() {
        let out = render("", false).expect("render");
        assert_eq!(out, "neutral (positive: 0, negative: 0)");
    }
}
