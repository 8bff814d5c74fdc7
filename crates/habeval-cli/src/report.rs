use habeval::core::models::evaluation::{EvaluationResult, EvaluationScores, EvaluationStatus};
use serde::Serialize;
use std::fmt::Write;

/// One evaluated layout together with where it came from.
#[derive(Debug, Serialize)]
pub struct LabeledResult {
    pub source: String,
    #[serde(flatten)]
    pub result: EvaluationResult,
}

fn mark(passed: bool) -> &'static str {
    if passed { "ok" } else { "FAILED" }
}

fn status_label(status: EvaluationStatus) -> &'static str {
    match status {
        EvaluationStatus::Scored => "scored",
        EvaluationStatus::Rejected => "rejected",
        EvaluationStatus::CalculationError => "calculation error",
    }
}

pub fn render_text(entries: &[LabeledResult]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_entry(&mut out, entry);
    }
    out
}

fn render_entry(out: &mut String, entry: &LabeledResult) {
    let result = &entry.result;
    let v = &result.validation;

    let _ = writeln!(out, "== {} ==", entry.source);
    let _ = writeln!(out, "Status: {}", status_label(result.status));
    let _ = writeln!(out, "Validation:");
    let _ = writeln!(out, "  All modules used:  {}", mark(v.all_modules_used));
    let _ = writeln!(out, "  No overlap:        {}", mark(v.no_overlapping));
    let _ = writeln!(out, "  Fit in habitat:    {}", mark(v.fit_in_habitat));
    let _ = writeln!(out, "  NHV requirements:  {}", mark(v.nhv_satisfied));

    match &result.scores {
        EvaluationScores::Scored(s) => {
            let _ = writeln!(out, "Scores:");
            let _ = writeln!(out, "  Space utilization: {:6.2}", s.space_utilization);
            let _ = writeln!(out, "  Comfortability:    {:6.2}", s.comfortability);
            let _ = writeln!(out, "  Efficiency:        {:6.2}", s.efficiency);
            let _ = writeln!(out, "  Overall:           {:6.2}", s.overall_score);
        }
        EvaluationScores::Penalty { penalty_score } => {
            let _ = writeln!(out, "Penalty score: {}", penalty_score);
        }
    }

    if result.feedback.is_empty() {
        let _ = writeln!(out, "Feedback: none");
        return;
    }

    let sections = [
        ("Strengths", "+", &result.feedback.strengths),
        ("Improvements", "-", &result.feedback.improvements),
        ("Errors", "!", &result.feedback.errors),
    ];
    for (title, bullet, lines) in sections {
        if lines.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}:", title);
        for line in lines {
            let _ = writeln!(out, "  {} {}", bullet, line);
        }
    }
}
