//! German plain-text report and console summary

use crate::analysis::{RegionComparison, RegionStatistics, RegionTrend};
use crate::config::ReportSettings;
use crate::constants::{country_name, month_label};
use crate::Result;
use chrono::NaiveDateTime;
use inflation_forecast::{ForecastRun, TimeSeriesPoint};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the text report inside the output directory
pub const REPORT_FILE: &str = "inflation_report.txt";

/// Rows shown in the monthly comparison table
pub(crate) const COMPARISON_MONTHS: usize = 12;

/// Average differences within this many percentage points count as equal
pub(crate) const VERDICT_THRESHOLD: f64 = 0.1;

const WIDTH: usize = 80;

/// Everything the text and HTML reports are rendered from
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub settings: &'a ReportSettings,
    pub points: &'a [TimeSeriesPoint],
    pub statistics: &'a [RegionStatistics],
    pub trends: &'a [RegionTrend],
    pub comparison: &'a RegionComparison,
    pub forecast: &'a ForecastRun,
    pub generated_at: NaiveDateTime,
}

/// Render the full text report
pub fn render_text_report(ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(WIDTH);
    let light = "-".repeat(WIDTH);

    line(&mut out, &heavy);
    line(&mut out, "INFLATIONSBERICHT: ÖSTERREICH IM EUROPÄISCHEN VERGLEICH");
    line(&mut out, &heavy);
    line(
        &mut out,
        &format!("Erstellt am: {}", ctx.generated_at.format("%Y-%m-%d %H:%M:%S")),
    );
    line(&mut out, "");

    write_summary(&mut out, ctx, &light);
    write_statistics(&mut out, ctx, &light);
    write_trends(&mut out, ctx, &light);
    write_comparison_table(&mut out, ctx, &light);
    write_analysis(&mut out, ctx.comparison, &light);
    write_forecast(&mut out, ctx, &light);

    line(&mut out, &heavy);
    line(&mut out, "ENDE DES BERICHTS");
    out.push_str(&heavy);
    out
}

/// Write `content` to `<output_dir>/inflation_report.txt`
pub fn write_text_report<P: AsRef<Path>>(content: &str, output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(REPORT_FILE);
    fs::write(&path, content)?;
    log::info!("Text report written to {}", path.display());
    Ok(path)
}

/// Short console summary: current rate, mean and peak per region
pub fn format_summary(statistics: &[RegionStatistics], trends: &[RegionTrend]) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(WIDTH);

    line(&mut out, "");
    line(&mut out, &heavy);
    line(&mut out, "ZUSAMMENFASSUNG DER INFLATIONSANALYSE");
    line(&mut out, &heavy);

    for stats in statistics {
        line(&mut out, "");
        line(&mut out, &format!("{}:", stats.region_name));
        line(
            &mut out,
            &format!(
                "  Aktuell: {:.2}% ({})",
                stats.latest,
                month_label(stats.latest_date)
            ),
        );
        line(&mut out, &format!("  Durchschnitt: {:.2}%", stats.mean));
        if let Some(trend) = trends.iter().find(|t| t.region_code == stats.region_code) {
            line(
                &mut out,
                &format!(
                    "  Spitzenwert: {:.2}% ({})",
                    trend.highest,
                    month_label(trend.highest_date)
                ),
            );
        }
    }

    line(&mut out, "");
    out.push_str(&heavy);
    out
}

pub fn print_summary(statistics: &[RegionStatistics], trends: &[RegionTrend]) {
    println!("{}", format_summary(statistics, trends));
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn section(out: &mut String, title: &str, rule: &str) {
    line(out, title);
    line(out, rule);
}

fn write_summary(out: &mut String, ctx: &ReportContext<'_>, rule: &str) {
    section(out, "ZUSAMMENFASSUNG", rule);

    let first = ctx.points.iter().map(|p| p.date).min();
    let last = ctx.points.iter().map(|p| p.date).max();
    if let (Some(first), Some(last)) = (first, last) {
        line(
            out,
            &format!("Analysezeitraum: {} - {}", first.year(), last.year()),
        );
    }
    line(out, "");

    for stats in ctx.statistics {
        line(
            out,
            &format!(
                "{} - Aktuelle Inflationsrate ({}): {:.2}%",
                stats.region_name,
                month_label(stats.latest_date),
                stats.latest
            ),
        );
    }
    line(out, "");
}

fn write_statistics(out: &mut String, ctx: &ReportContext<'_>, rule: &str) {
    section(
        out,
        &format!(
            "STATISTISCHE KENNZAHLEN (SEIT {})",
            ctx.settings.statistics_start.year()
        ),
        rule,
    );

    for stats in ctx.statistics {
        line(out, "");
        line(out, &format!("{}:", stats.region_name));
        line(out, &format!("  Durchschnittliche Inflation: {:.2}%", stats.mean));
        line(out, &format!("  Median der Inflation:      {:.2}%", stats.median));
        line(out, &format!("  Minimale Inflation:        {:.2}%", stats.min));
        line(out, &format!("  Maximale Inflation:        {:.2}%", stats.max));
        line(out, &format!("  Standardabweichung:        {:.2}", stats.std_dev));
    }
    line(out, "");
}

fn write_trends(out: &mut String, ctx: &ReportContext<'_>, rule: &str) {
    section(out, "TRENDS UND EXTREMWERTE", rule);

    for trend in ctx.trends {
        line(out, "");
        line(out, &format!("{}:", trend.region_name));
        line(
            out,
            &format!(
                "  Höchste Inflation: {:.2}% im {}",
                trend.highest,
                month_label(trend.highest_date)
            ),
        );
        line(
            out,
            &format!(
                "  Niedrigste Inflation: {:.2}% im {}",
                trend.lowest,
                month_label(trend.lowest_date)
            ),
        );
    }
    line(out, "");
}

fn write_comparison_table(out: &mut String, ctx: &ReportContext<'_>, rule: &str) {
    let comparison = ctx.comparison;
    let countries = &ctx.settings.countries;

    section(out, "MONATLICHER VERGLEICH", rule);

    let mut header = format!("{:<12}", "Monat");
    for code in countries {
        header.push_str(&format!(" {:<15}", country_name(code)));
    }
    header.push_str(&format!(
        " Differenz ({}-{})",
        comparison.primary, comparison.benchmark
    ));
    line(out, &header);
    line(out, rule);

    for row in comparison.last(COMPARISON_MONTHS) {
        let mut text = format!("{:<12}", row.date.to_string());
        for code in countries {
            let cell = match row.value(code) {
                Some(value) => format!(" {:>8.2}%      ", value),
                None => format!(" {:>8}       ", "-"),
            };
            text.push_str(&cell);
        }
        let diff = match row.difference {
            Some(diff) => format!(" {:>8.2} PP", diff),
            None => format!(" {:>8}", "-"),
        };
        text.push_str(&diff);
        line(out, text.trim_end());
    }
    line(out, "");
}

fn write_analysis(out: &mut String, comparison: &RegionComparison, rule: &str) {
    section(out, "ANALYSE-ZUSAMMENFASSUNG", rule);

    let primary = country_name(&comparison.primary);
    let benchmark = country_name(&comparison.benchmark);

    match comparison.average_difference() {
        Some(avg_diff) => {
            let compared = comparison.months_compared();
            let higher = comparison.months_higher();
            line(
                out,
                &format!(
                    "Durchschnittliche Differenz ({} - {}): {:.2} Prozentpunkte.",
                    primary, benchmark, avg_diff
                ),
            );
            line(
                out,
                &format!(
                    "{} hatte in {} von {} Monaten ({:.1}%) eine höhere Inflation als {}.",
                    primary,
                    higher,
                    compared,
                    higher as f64 / compared as f64 * 100.0,
                    benchmark
                ),
            );

            let verdict = if avg_diff > VERDICT_THRESHOLD {
                "tendenziell höher als"
            } else if avg_diff < -VERDICT_THRESHOLD {
                "tendenziell niedriger als"
            } else {
                "weitgehend gleich wie"
            };
            line(
                out,
                &format!(
                    "Im Durchschnitt war die Inflation in {} {} in {}.",
                    primary, verdict, benchmark
                ),
            );
        }
        None => line(
            out,
            &format!(
                "Keine gemeinsamen Monate für {} und {} vorhanden.",
                primary, benchmark
            ),
        ),
    }
    line(out, "");
}

fn write_forecast(out: &mut String, ctx: &ReportContext<'_>, rule: &str) {
    section(out, "PROGNOSE", rule);

    for region in ctx.forecast.regions() {
        line(out, "");
        line(out, &format!("{}:", region.region_name));
        let fallback = if region.fallback_reason.is_some() {
            " (Ersatzmodell)"
        } else {
            ""
        };
        line(
            out,
            &format!(
                "  Methode: {}{}, Trainingsfenster: {} Monate, Standardfehler: {:.3}",
                region.method, fallback, region.training_window_size, region.std_error
            ),
        );
        for point in &region.points {
            line(
                out,
                &format!(
                    "  {:<10} {:>6.2}%   [{:>6.2}% ; {:>6.2}%]",
                    point.date.to_string(),
                    point.point_estimate,
                    point.lower_bound,
                    point.upper_bound
                ),
            );
        }
    }

    for code in ctx.forecast.skipped() {
        line(out, "");
        line(
            out,
            &format!("{}: keine Daten, keine Prognose", country_name(code)),
        );
    }

    for (code, reason) in ctx.forecast.failed() {
        line(out, "");
        line(
            out,
            &format!("{}: Prognose fehlgeschlagen ({})", country_name(code), reason),
        );
    }
    line(out, "");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{calculate_statistics, compare_regions, identify_trends};
    use chrono::NaiveDate;
    use inflation_forecast::{forecast_inflation, YearMonth};

    fn points() -> Vec<TimeSeriesPoint> {
        let mut points = Vec::new();
        let mut date = YearMonth::new(2024, 1).unwrap();
        for i in 0..14 {
            points.push(TimeSeriesPoint::new(date, "AT", "Österreich", 4.0 - 0.1 * i as f64));
            points.push(TimeSeriesPoint::new(date, "DE", "Deutschland", 3.0 - 0.05 * i as f64));
            points.push(TimeSeriesPoint::new(date, "EA20", "Eurozone", 3.5 - 0.1 * i as f64));
            date = date.succ();
        }
        points
    }

    fn render(points: &[TimeSeriesPoint]) -> String {
        let settings = ReportSettings::default();
        let statistics = calculate_statistics(points, settings.statistics_start).unwrap();
        let trends = identify_trends(points).unwrap();
        let comparison = compare_regions(points, "AT", "EA20");
        let forecast = forecast_inflation(points, 3).unwrap();
        let generated_at = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();

        render_text_report(&ReportContext {
            settings: &settings,
            points,
            statistics: &statistics,
            trends: &trends,
            comparison: &comparison,
            forecast: &forecast,
            generated_at,
        })
    }

    #[test]
    fn test_report_sections_in_order() {
        let report = render(&points());
        let sections = [
            "INFLATIONSBERICHT",
            "ZUSAMMENFASSUNG",
            "STATISTISCHE KENNZAHLEN (SEIT 2020)",
            "TRENDS UND EXTREMWERTE",
            "MONATLICHER VERGLEICH",
            "ANALYSE-ZUSAMMENFASSUNG",
            "PROGNOSE",
            "ENDE DES BERICHTS",
        ];

        let mut offset = 0;
        for title in sections {
            let found = report[offset..].find(title).unwrap_or_else(|| panic!("{}", title));
            offset += found + title.len();
        }
        assert!(report.contains("Erstellt am: 2025-03-01 08:30:00"));
        assert!(report.contains("Analysezeitraum: 2024 - 2025"));
    }

    #[test]
    fn test_report_analysis_verdict() {
        let report = render(&points());

        assert!(report.contains("Österreich - Aktuelle Inflationsrate (Feb 2025): 2.70%"));
        assert!(report.contains("Durchschnittliche Differenz (Österreich - Eurozone): 0.50 Prozentpunkte."));
        assert!(report.contains("hatte in 14 von 14 Monaten (100.0%)"));
        assert!(report.contains("tendenziell höher als"));
    }

    #[test]
    fn test_comparison_table_shows_last_year() {
        let report = render(&points());
        let table: Vec<&str> = report
            .lines()
            .skip_while(|l| !l.starts_with("MONATLICHER VERGLEICH"))
            .skip(4)
            .take_while(|l| !l.is_empty())
            .collect();

        assert_eq!(table.len(), 12);
        assert!(table[0].starts_with("2024-03"));
        assert!(table[11].starts_with("2025-02"));
        assert!(table[11].ends_with("0.50 PP"));
    }

    #[test]
    fn test_forecast_section_lists_regions() {
        let report = render(&points());
        assert!(report.contains("Methode: damped_trend, Trainingsfenster: 14 Monate"));
        assert!(report.contains("  2025-03"));
        assert!(report.contains("  2025-05"));
    }

    #[test]
    fn test_forecast_section_lists_failed_region() {
        let mut points = points();
        let mut date = YearMonth::new(2024, 1).unwrap();
        for i in 0..12 {
            points.push(TimeSeriesPoint::new(date, "XX", "XX", 1.5e308 - i as f64 * 1e306));
            date = date.succ();
        }
        let report = render(&points);

        assert!(report.contains("XX: Prognose fehlgeschlagen ("));
        assert!(report.contains("Methode: damped_trend, Trainingsfenster: 14 Monate"));
    }

    #[test]
    fn test_summary() {
        let points = points();
        let statistics = calculate_statistics(&points, YearMonth::january(2020)).unwrap();
        let trends = identify_trends(&points).unwrap();
        let summary = format_summary(&statistics, &trends);

        assert!(summary.contains("ZUSAMMENFASSUNG DER INFLATIONSANALYSE"));
        assert!(summary.contains("  Aktuell: 2.70% (Feb 2025)"));
        assert!(summary.contains("  Spitzenwert: 4.00% (Jan 2024)"));
    }

    #[test]
    fn test_write_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let path = write_text_report("Bericht", &target).unwrap();

        assert_eq!(path, target.join(REPORT_FILE));
        assert_eq!(fs::read_to_string(path).unwrap(), "Bericht");
    }
}
