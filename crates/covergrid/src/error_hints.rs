use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("above the limit of") {
        push_hint(
            &mut out,
            "Raise the cap with `--enumeration-limit <CELLS>`, or pass `--no-enumeration-limit`.",
        );
    }

    if haystack.contains("grid dimensions must be positive") {
        push_hint(&mut out, "Width and height must both be at least 1.");
    }

    if haystack.contains("threshold must be non-negative") {
        push_hint(&mut out, "Use a threshold of 0 or more.");
    }

    if haystack.contains("unsupported file extension") {
        push_hint(&mut out, "Rename the file to end in `.toml` or `.json`.");
    }

    if haystack.contains("missing --") {
        push_hint(
            &mut out,
            "Pass --width, --height and --threshold, or an --input file that sets them.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn budget_error_suggests_raising_the_limit() {
        let err = anyhow!("Enumeration would visit 400 cells, above the limit of 10");
        let text = format(&err);
        assert!(text.starts_with("Error: Enumeration would visit"));
        assert!(text.contains("--no-enumeration-limit"));
    }

    #[test]
    fn context_chain_is_searched() {
        let err = anyhow!("Unsupported file extension 'txt' (expected .toml or .json)")
            .context("Failed to load request from req.txt");
        let text = format(&err);
        assert!(text.contains("req.txt"));
        assert!(text.contains("`.toml` or `.json`"));
    }

    #[test]
    fn unrelated_errors_have_no_hints() {
        let err = anyhow!("something else");
        assert_eq!(format(&err), "Error: something else");
    }
}
