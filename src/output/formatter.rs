use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::session::{GroupReport, Report};
use crate::survey::Survey;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with three decimals, "0.400"
pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

/// Format a single group as one line: index, score, members
/// Invalid groups get a trailing "!" after the score
fn format_group_line(idx: usize, group: &GroupReport, use_colors: bool) -> String {
    let index_str = format!("{:>2}.", idx + 1);
    let marker = if group.invalid.is_some() { "!" } else { " " };
    let score_str = format!("{:>7}{}", format_score(group.score), marker);
    let members = group.members.join(", ");

    if use_colors {
        let score_str = if group.invalid.is_some() {
            score_str.red().to_string()
        } else {
            score_str.bold().to_string()
        };
        format!("{} {}  {}", index_str.dimmed(), score_str, members)
    } else {
        format!("{} {}  {}", index_str, score_str, members)
    }
}

/// Format a scored grouping as a table followed by the overall score
pub fn format_report(report: &Report, use_colors: bool) -> String {
    if report.groups.is_empty() {
        return "No groups to score.".to_string();
    }

    let mut lines: Vec<String> = report
        .groups
        .iter()
        .enumerate()
        .map(|(idx, group)| format_group_line(idx, group, use_colors))
        .collect();

    let label = match &report.course {
        Some(name) => format!("{} grouping score", name),
        None => "Grouping score".to_string(),
    };
    let total = format!("{}: {}", label, format_score(report.score));
    lines.push(String::new());
    lines.push(if use_colors {
        total.bold().to_string()
    } else {
        total
    });

    lines.join("\n")
}

/// Format per-question detail for each group (for verbose mode)
pub fn format_report_detail(report: &Report) -> String {
    report
        .groups
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            let mut out = format!(
                "Group {}: {}\n  Score: {}",
                idx + 1,
                group.members.join(", "),
                format_score(group.score)
            );
            if let Some(reason) = &group.invalid {
                out.push_str(&format!("\n  Zeroed: {}", reason));
            }
            for q in &group.questions {
                out.push_str(&format!(
                    "\n  Q{} {}: {} x{} = {}",
                    q.question_id,
                    q.criterion,
                    format_score(q.raw),
                    q.weight,
                    format_score(q.weighted)
                ));
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format the registered questions with their weight and criterion
pub fn format_questions(survey: &Survey, use_colors: bool) -> String {
    if survey.is_empty() {
        return "No questions in survey.".to_string();
    }

    survey
        .questions()
        .into_iter()
        .map(|q| {
            let weight = survey.weight(q).unwrap_or_default();
            let criterion = survey.criterion(q).map(|c| c.name()).unwrap_or("-");
            let id = format!("{:>3}.", q.id());
            if use_colors {
                format!("{} {}  [x{} {}]", id.dimmed(), q, weight, criterion.cyan())
            } else {
                format!("{} {}  [x{} {}]", id, q, weight, criterion)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
