//! Plain-text rendering for the command line.

use crate::logic::SearchOutcome;
use crate::models::{FarmerProfile, RowExplanation, SearchRecord};
use std::fmt::Write;

pub fn render_outcome(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    let results = &outcome.results;

    if let Some(ref explanations) = outcome.explanations {
        out.push_str(&render_explanations(explanations));
        out.push('\n');
    }

    if results.eligible.is_empty() {
        let _ = writeln!(out, "No eligible schemes found.");
    } else {
        let _ = writeln!(out, "Eligible schemes ({}):", results.count);
        for (i, scheme) in results.eligible.iter().enumerate() {
            let name = match scheme.name.trim() {
                "" => "(unnamed scheme)",
                name => name,
            };
            let _ = writeln!(out, "  {:>2}. {}", i + 1, name);
            if let Some(ref link) = scheme.link {
                let _ = writeln!(out, "      {}", link);
            }
        }
    }

    let _ = writeln!(
        out,
        "Searched at {}",
        results.searched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if let Some(ref saved) = outcome.saved {
        let _ = writeln!(
            out,
            "Saved to profile '{}' ({})",
            saved.profile_name, saved.user_id
        );
    }
    if let Some(ref warning) = outcome.warning {
        let _ = writeln!(out, "Warning: {}", warning);
    }

    out
}

pub fn render_explanations(explanations: &[RowExplanation]) -> String {
    let mut out = String::new();
    for row in explanations {
        let mark = if row.eligible { "✓" } else { "✗" };
        match row.failing_cell() {
            Some(failed) => {
                let _ = writeln!(out, "{} {} (rejected on {})", mark, row.name, failed.column);
            }
            None => {
                let _ = writeln!(out, "{} {}", mark, row.name);
            }
        }
        for cell in &row.cells {
            let outcome = if !cell.verdict.passed {
                "fail"
            } else if cell.verdict.kind.is_passthrough() {
                "skip"
            } else {
                "pass"
            };
            let _ = writeln!(
                out,
                "    {:<24} cell={:<16} answer={:<16} {} -> {}",
                cell.column,
                cell.cell,
                if cell.answer.is_empty() { "(none)" } else { cell.answer.as_str() },
                cell.verdict.kind,
                outcome,
            );
        }
    }
    out
}

pub fn render_profiles(profiles: &[FarmerProfile]) -> String {
    if profiles.is_empty() {
        return "No saved profiles.\n".to_string();
    }
    let mut out = String::new();
    for profile in profiles {
        let _ = writeln!(
            out,
            "{:<24} {} answers, updated {}",
            profile.name,
            profile.answers.len(),
            profile.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

pub fn render_history(profile: &FarmerProfile, records: &[SearchRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "History for '{}':", profile.name);
    for (key, value) in profile.answers.iter() {
        let _ = writeln!(out, "  {} = {}", key, value);
    }
    if records.is_empty() {
        let _ = writeln!(out, "  (no searches recorded)");
    }
    for record in records {
        let _ = writeln!(
            out,
            "  {}  {} eligible: {}",
            record.searched_at.format("%Y-%m-%d %H:%M"),
            record.eligible_count,
            record.scheme_names.join(", ")
        );
    }
    out
}
