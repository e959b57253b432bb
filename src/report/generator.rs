//! Histogram report generation.
//!
//! Each metric is rendered as its own panel so histograms never
//! overlap. Text output is meant for a terminal, Markdown output for
//! pasting into documents.

use crate::analysis::Figure;
use crate::models::{PlotMetadata, PlotReport};

const BAR_CHAR: &str = "█";

/// Generate the terminal report.
pub fn generate_text_report(report: &PlotReport, width: usize) -> String {
    let mut output = String::new();

    output.push_str(&generate_text_header(&report.metadata));

    for figure in &report.figures {
        output.push('\n');
        output.push_str(&generate_text_figure(figure, width));
    }

    output
}

fn generate_text_header(metadata: &PlotMetadata) -> String {
    let mut header = String::new();

    header.push_str(&format!("Language: {}\n", metadata.language));
    header.push_str(&format!("Reports:  {}", metadata.pattern));
    header.push_str(&format!(" ({} loaded", metadata.files_loaded));
    if metadata.files_skipped > 0 {
        header.push_str(&format!(", {} skipped", metadata.files_skipped));
    }
    header.push_str(")\n");
    header.push_str(&format!("Rows:     {}\n", metadata.rows));
    header.push_str(&format!(
        "Date:     {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    header
}

/// Render one figure as a block of horizontal bars.
fn generate_text_figure(figure: &Figure, width: usize) -> String {
    let hist = &figure.histogram;
    let mut block = String::new();

    block.push_str(&format!(
        "{}  (n={}, min={}, max={})\n",
        figure.metric,
        hist.total(),
        format_value(hist.min()),
        format_value(hist.max())
    ));

    let labels: Vec<String> = hist
        .edges()
        .windows(2)
        .map(|pair| format!("{} - {}", format_value(pair[0]), format_value(pair[1])))
        .collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for (label, bin) in labels.iter().zip(hist.bins()) {
        let bar = BAR_CHAR.repeat(bar_length(bin.count, hist.peak(), width));
        block.push_str(&format!(
            "  {:>lw$} | {:<bw$} {}\n",
            label,
            bar,
            bin.count,
            lw = label_width,
            bw = width
        ));
    }

    block
}

/// Generate the Markdown report.
pub fn generate_markdown_report(report: &PlotReport, width: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Metric histograms: {}\n\n",
        report.metadata.language
    ));
    output.push_str(&generate_metadata_section(&report.metadata));

    for figure in &report.figures {
        output.push_str(&generate_markdown_figure(figure, width));
    }

    output
}

fn generate_metadata_section(metadata: &PlotMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!("- **Reports:** `{}`\n", metadata.pattern));
    section.push_str(&format!("- **Files Loaded:** {}\n", metadata.files_loaded));
    if metadata.files_skipped > 0 {
        section.push_str(&format!("- **Files Skipped:** {}\n", metadata.files_skipped));
    }
    section.push_str(&format!("- **Rows:** {}\n", metadata.rows));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push('\n');

    section
}

fn generate_markdown_figure(figure: &Figure, width: usize) -> String {
    let hist = &figure.histogram;
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", figure.metric));
    section.push_str(&format!(
        "*Values: {} | Min: {} | Max: {}*\n\n",
        hist.total(),
        format_value(hist.min()),
        format_value(hist.max())
    ));
    section.push_str("| Range | Count | Distribution |\n");
    section.push_str("|:---|:---:|:---|\n");

    for bin in hist.bins() {
        section.push_str(&format!(
            "| {} - {} | {} | {} |\n",
            format_value(bin.lower),
            format_value(bin.upper),
            bin.count,
            BAR_CHAR.repeat(bar_length(bin.count, hist.peak(), width))
        ));
    }
    section.push('\n');

    section
}

/// Bar length for a bin, scaled to the tallest bin.
///
/// Non-empty bins always get at least one cell.
fn bar_length(count: usize, peak: usize, width: usize) -> usize {
    if count == 0 || peak == 0 {
        return 0;
    }
    (count * width / peak).max(1)
}

/// Integers print without decimals, everything else with two.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Histogram;
    use chrono::Utc;

    fn create_test_report() -> PlotReport {
        let metadata = PlotMetadata {
            pattern: "/tmp/res/*.json".to_string(),
            language: "java".to_string(),
            files_loaded: 4,
            files_skipped: 1,
            rows: 4,
            generated_at: Utc::now(),
        };

        PlotReport {
            metadata,
            figures: vec![
                Figure {
                    metric: "total_lines_of_code".to_string(),
                    histogram: Histogram::from_values(&[100.0, 200.0, 200.0, 400.0], 3)
                        .unwrap(),
                },
                Figure {
                    metric: "average_keywords_complexity".to_string(),
                    histogram: Histogram::from_values(&[0.25, 0.5, 0.5, 0.75], 2).unwrap(),
                },
            ],
        }
    }

    #[test]
    fn test_generate_text_report() {
        let report = create_test_report();
        let text = generate_text_report(&report, 10);

        assert!(text.contains("Language: java"));
        assert!(text.contains("4 loaded, 1 skipped"));
        assert!(text.contains("total_lines_of_code  (n=4, min=100, max=400)"));
        assert!(text.contains("average_keywords_complexity  (n=4, min=0.25, max=0.75)"));
        // The tallest bin spans the full width.
        assert!(text.contains(&BAR_CHAR.repeat(10)));
    }

    #[test]
    fn test_figures_render_in_separate_panels() {
        let report = create_test_report();
        let text = generate_text_report(&report, 10);

        let first = text.find("total_lines_of_code").unwrap();
        let second = text.find("average_keywords_complexity").unwrap();
        assert!(first < second);
        assert_eq!(text.matches("(n=4").count(), 2);
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report, 8);

        assert!(markdown.contains("# Metric histograms: java"));
        assert!(markdown.contains("- **Files Skipped:** 1"));
        assert!(markdown.contains("## total_lines_of_code"));
        assert!(markdown.contains("## average_keywords_complexity"));
        assert!(markdown.contains("| 100 - 200 | 1 |"));
    }

    #[test]
    fn test_bar_length() {
        assert_eq!(bar_length(0, 5, 40), 0);
        assert_eq!(bar_length(5, 5, 40), 40);
        assert_eq!(bar_length(1, 100, 40), 1);
        assert_eq!(bar_length(50, 100, 40), 20);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(100.0), "100");
        assert_eq!(format_value(0.5), "0.50");
        assert_eq!(format_value(-3.0), "-3");
    }
}
