use ffc_model::ConversionOutcome;

/// Text of the end-of-run report.
///
/// In verbose mode the summary line is followed by a blank line and then one
/// line per directory or pattern that matched nothing.
pub fn render_summary(outcome: &ConversionOutcome, overwrite: bool, verbose: bool) -> String {
    let mut text = outcome.summary_line(overwrite);
    if verbose && !outcome.empty.is_empty() {
        text.push('\n');
        for line in outcome.empty_lines() {
            text.push('\n');
            text.push_str(&line);
        }
    }
    text
}

pub fn print_summary(outcome: &ConversionOutcome, overwrite: bool, verbose: bool) {
    println!("{}", render_summary(outcome, overwrite, verbose));
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn outcome_with_empty() -> ConversionOutcome {
        let mut outcome = ConversionOutcome::new();
        outcome.record_source_bytes(1000);
        outcome.record_converted(250);
        outcome.record_empty(Path::new("C2"), "No subdirectories matching '*'");
        outcome
    }

    #[test]
    fn test_quiet_summary_hides_empty_entries() {
        insta::assert_snapshot!(
            render_summary(&outcome_with_empty(), false, false),
            @"1 converted file(s) are smaller by a factor of 4.00"
        );
    }

    #[test]
    fn test_verbose_summary_lists_empty_entries() {
        insta::assert_snapshot!(
            render_summary(&outcome_with_empty(), false, true),
            @r"
        1 converted file(s) are smaller by a factor of 4.00

        C2: No subdirectories matching '*'
        "
        );
    }
}
