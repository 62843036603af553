//! Console rendering of warming progress and summaries

use colored::Colorize;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use warmer_engine::{
    AggregateSummary, Outcome, Profile, ProfileSummary, ProgressSink, RequestResult,
};

/// Progress sink printing stage lines, error lines and summary tables
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    stage: AtomicUsize,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn announce(&self, total_urls: usize, profiles: usize) {
        println!(
            "{} {} {}\n",
            "Total URLs to warm up:".magenta().bold(),
            total_urls.to_string().green().bold(),
            format!("({} profile(s))", profiles).dimmed()
        );
    }
}

impl ProgressSink for ConsoleReporter {
    fn profile_started(&self, profile: &Profile, total: usize) {
        let stage = self.stage.fetch_add(1, Ordering::SeqCst) + 1;
        eprint!("{}", progress_line(stage, &profile.name, 0, total));
    }

    fn on_progress(&self, completed: usize, total: usize, profile_name: &str) {
        let stage = self.stage.load(Ordering::SeqCst);
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "{}", progress_line(stage, profile_name, completed, total));
        if completed == total {
            let _ = writeln!(stderr);
        }
    }

    fn on_result(&self, result: &RequestResult) {
        if result.outcome == Outcome::Error {
            eprintln!();
            println!("{}", error_line(result));
        }
    }

    fn on_profile_complete(&self, summary: &ProfileSummary) {
        println!("\n{}\n", render_profile_panel(summary));
        if let Some(failures) = render_failures(summary) {
            println!("{}\n", failures);
        }
    }

    fn on_session_complete(&self, summary: &AggregateSummary) {
        println!("{}", render_aggregate_table(summary));
    }
}

fn progress_line(stage: usize, name: &str, completed: usize, total: usize) -> String {
    let percent = if total == 0 {
        100
    } else {
        completed * 100 / total
    };
    format!(
        "\r  STAGE {}: {} [{}/{}] {:>3}%",
        stage,
        name.bold(),
        completed,
        total,
        percent
    )
}

pub fn error_line(result: &RequestResult) -> String {
    format!(
        "{} url: {} ({})",
        "There is an error during request run please check log files for more information"
            .red()
            .bold(),
        result.url,
        result.error_detail.as_deref().unwrap_or("unknown error")
    )
}

pub fn render_profile_panel(summary: &ProfileSummary) -> String {
    let title = format!("{} SUMMARY", summary.profile.name);
    let rows = [
        ("Total URLs processed:", summary.total.to_string().green()),
        ("Cache HIT:", summary.hits.to_string().green()),
        ("Cache MISS:", summary.misses.to_string().red()),
        ("Errors:", summary.errors.to_string().red()),
        (
            "Total time:",
            format!("{:.2} seconds", summary.elapsed.as_secs_f64()).green(),
        ),
    ];

    let mut out = format!("┌─ {} ", title.white().bold());
    for (label, value) in rows {
        out.push_str(&format!("\n│ {:<22}{}", label.magenta(), value));
    }
    out.push_str(&format!("\n└─ {} ✔", "Done".green()));
    out
}

/// Failed URLs of a profile in input order, or `None` when all succeeded
pub fn render_failures(summary: &ProfileSummary) -> Option<String> {
    let lines: Vec<String> = summary
        .errored()
        .map(|result| {
            format!(
                "  {} {}",
                result.url,
                result.error_detail.as_deref().unwrap_or("unknown error").red()
            )
        })
        .collect();

    if lines.is_empty() {
        return None;
    }

    Some(format!(
        "{}\n{}",
        format!("Failed URLs ({}):", lines.len()).red().bold(),
        lines.join("\n")
    ))
}

pub fn render_aggregate_table(summary: &AggregateSummary) -> String {
    let headers = [
        "Total URLs processed",
        "Total Cache HIT",
        "Total Cache MISS",
        "Total Errors",
        "Total Time",
    ];
    let values = [
        summary.total_requests.to_string().cyan(),
        summary.total_hits.to_string().green(),
        summary.total_misses.to_string().red(),
        summary.total_errors.to_string().red(),
        format!("{:.2}", summary.elapsed.as_secs_f64()).blue(),
    ];

    let header_row: Vec<String> = headers.iter().map(|h| format!("{:<22}", h)).collect();
    let value_row: Vec<String> = values
        .iter()
        .map(|value| {
            let padding = 22usize.saturating_sub(value.chars().count());
            format!("{}{}", value, " ".repeat(padding))
        })
        .collect();

    format!(
        "{}\n{}\n{}",
        "FINAL AGGREGATE SUMMARY ✔".magenta().bold(),
        header_row.join("│ ").as_str().bold(),
        value_row.join("│ ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use warmer_engine::UrlTarget;

    fn summary(name: &str) -> ProfileSummary {
        ProfileSummary {
            profile: Arc::new(Profile::new(name)),
            total: 4,
            hits: 2,
            misses: 1,
            errors: 1,
            elapsed: Duration::from_millis(1500),
            results: Vec::new(),
        }
    }

    #[test]
    fn test_profile_panel_lists_counts() {
        colored::control::set_override(false);
        let panel = render_profile_panel(&summary("mobile"));

        assert!(panel.contains("mobile SUMMARY"));
        assert!(panel.contains(&format!("{:<22}2", "Cache HIT:")));
        assert!(panel.contains(&format!("{:<22}1", "Cache MISS:")));
        assert!(panel.contains(&format!("{:<22}1", "Errors:")));
        assert!(panel.contains("1.50 seconds"));
    }

    #[test]
    fn test_aggregate_table_totals() {
        colored::control::set_override(false);
        let aggregate = AggregateSummary::from_profiles(vec![summary("a"), summary("b")]);
        let table = render_aggregate_table(&aggregate);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        let values: Vec<&str> = lines[2].split('│').map(str::trim).collect();
        assert_eq!(values, vec!["8", "4", "2", "2", "3.00"]);
    }

    #[test]
    fn test_error_line_names_url() {
        colored::control::set_override(false);
        let result = RequestResult {
            url: UrlTarget::new("https://example.com/slow"),
            profile: Arc::new(Profile::default_profile()),
            outcome: Outcome::Error,
            status_code: None,
            latency: Duration::from_secs(10),
            error_detail: Some("timeout".to_string()),
            cache_indicator: None,
        };

        let line = error_line(&result);
        assert!(line.ends_with("url: https://example.com/slow (timeout)"));
    }

    #[test]
    fn test_failures_listed_in_input_order() {
        colored::control::set_override(false);
        let result = |url: &str, outcome: Outcome, detail: Option<&str>| RequestResult {
            url: UrlTarget::new(url),
            profile: Arc::new(Profile::default_profile()),
            outcome,
            status_code: None,
            latency: Duration::ZERO,
            error_detail: detail.map(str::to_string),
            cache_indicator: None,
        };

        let mut profile = summary("desktop");
        assert!(render_failures(&profile).is_none());

        profile.results = vec![
            result("https://example.com/a", Outcome::Error, Some("timeout")),
            result("https://example.com/b", Outcome::Hit, None),
            result("https://example.com/c", Outcome::Error, Some("Connection failed: refused")),
        ];
        let rendered = render_failures(&profile).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Failed URLs (2):");
        assert_eq!(lines[1], "  https://example.com/a timeout");
        assert_eq!(lines[2], "  https://example.com/c Connection failed: refused");
    }
}
