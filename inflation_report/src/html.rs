//! German HTML report
//!
//! Same content as the text report laid out as a standalone page with
//! inline CSS. No charts are embedded.

use crate::constants::{country_name, month_label};
use crate::report::{ReportContext, COMPARISON_MONTHS, VERDICT_THRESHOLD};
use crate::Result;
use inflation_forecast::ForecastMethod;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the HTML report inside the output directory
pub const HTML_REPORT_FILE: &str = "inflation_report.html";

const STYLE: &str = r#"
        body { font-family: -apple-system, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; background-color: #f8f9fa; margin: 0; padding: 20px; }
        .container { max-width: 1200px; margin: 0 auto; background-color: #fff; border: 1px solid #dee2e6; border-radius: 4px; }
        header { background-color: #343a40; color: #fff; padding: 30px 40px; border-bottom: 4px solid #007bff; }
        header h1 { font-size: 2em; margin: 0 0 10px 0; font-weight: 600; }
        .metadata { display: flex; gap: 25px; font-size: 0.85em; margin-top: 20px; padding-top: 15px; border-top: 1px solid #495057; }
        .content { padding: 20px 40px; }
        .section { margin-bottom: 40px; }
        .section-title { border-bottom: 2px solid #007bff; padding-bottom: 8px; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; }
        .card { border: 1px solid #dee2e6; border-radius: 4px; padding: 15px 20px; }
        .stat { display: flex; justify-content: space-between; border-bottom: 1px dotted #dee2e6; }
        .stat-value { font-weight: 600; }
        table { width: 100%; border-collapse: collapse; font-size: 0.9em; }
        th, td { padding: 6px 10px; border-bottom: 1px solid #dee2e6; text-align: right; }
        th:first-child, td:first-child { text-align: left; }
        .note { color: #6c757d; font-size: 0.9em; }
        footer { padding: 15px 40px; font-size: 0.8em; color: #6c757d; border-top: 1px solid #dee2e6; }
"#;

/// German description of a forecast method
pub fn method_name(method: ForecastMethod) -> &'static str {
    match method {
        ForecastMethod::DampedTrend => "Exponentielle Glättung mit gedämpftem Trend",
        ForecastMethod::LinearTrend => "Linearer Trend",
    }
}

/// Render the full HTML report
pub fn render_html_report(ctx: &ReportContext<'_>) -> String {
    let mut html = String::new();
    let first = ctx.points.iter().map(|p| p.date).min();
    let last = ctx.points.iter().map(|p| p.date).max();
    let period = match (first, last) {
        (Some(first), Some(last)) => format!("{} - {}", first.year(), last.year()),
        _ => "-".to_string(),
    };
    let title_year = last.map(|d| d.year().to_string()).unwrap_or_default();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Inflationsbericht {}: Österreich im europäischen Vergleich</title>
    <style>{}    </style>
</head>
<body>
<div class="container">
    <header>
        <h1>Inflationsbericht: Österreich im europäischen Vergleich</h1>
        <div class="subtitle">Harmonisierter Verbraucherpreisindex (HVPI), jährliche Veränderungsrate</div>
        <div class="metadata">
            <div><span>Berichtszeitraum:</span> <strong>{}</strong></div>
            <div><span>Datenstand:</span> <strong>{}</strong></div>
            <div><span>Erstellt am:</span> <strong>{}</strong></div>
        </div>
    </header>
    <div class="content">
"#,
        title_year,
        STYLE,
        period,
        last.map(month_label).unwrap_or_else(|| "-".to_string()),
        ctx.generated_at.format("%d.%m.%Y, %H:%M Uhr")
    ));

    write_summary(&mut html, ctx);
    write_methodology(&mut html, ctx);
    write_statistics(&mut html, ctx);
    write_trends(&mut html, ctx);
    write_comparison(&mut html, ctx);
    write_forecast(&mut html, ctx);

    html.push_str(&format!(
        r#"    </div>
    <footer>Erstellt mit {} {}</footer>
</div>
</body>
</html>
"#,
        crate::NAME,
        crate::VERSION
    ));
    html
}

/// Write `content` to `<output_dir>/inflation_report.html`
pub fn write_html_report<P: AsRef<Path>>(content: &str, output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(HTML_REPORT_FILE);
    fs::write(&path, content)?;
    log::info!("HTML report written to {}", path.display());
    Ok(path)
}

/// Replace the characters HTML treats as markup
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn open_section(html: &mut String, title: &str) {
    html.push_str(&format!(
        "        <div class=\"section\">\n            <h2 class=\"section-title\">{}</h2>\n",
        escape(title)
    ));
}

fn close_section(html: &mut String) {
    html.push_str("        </div>\n");
}

fn stat(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "                <div class=\"stat\"><span>{}</span><span class=\"stat-value\">{}</span></div>\n",
        escape(label),
        escape(value)
    ));
}

fn write_summary(html: &mut String, ctx: &ReportContext<'_>) {
    let comparison = ctx.comparison;
    open_section(html, "Zusammenfassung");

    html.push_str("            <ul>\n");
    for stats in ctx.statistics {
        html.push_str(&format!(
            "                <li><strong>{}</strong>: {:.2}% ({})</li>\n",
            escape(&stats.region_name),
            stats.latest,
            month_label(stats.latest_date)
        ));
    }
    html.push_str("            </ul>\n");

    let latest = |code: &str| {
        ctx.statistics
            .iter()
            .find(|s| s.region_code == code)
            .map(|s| s.latest)
    };
    let primary = country_name(&comparison.primary);
    let benchmark = country_name(&comparison.benchmark);

    if let (Some(p), Some(b)) = (latest(&comparison.primary), latest(&comparison.benchmark)) {
        html.push_str(&format!(
            "            <p>Die aktuelle Differenz zwischen {} und {} beträgt {:.2} Prozentpunkte.</p>\n",
            escape(primary),
            escape(benchmark),
            (p - b).abs()
        ));
    }

    let outlook = ctx
        .forecast
        .region(&comparison.primary)
        .and_then(|r| r.points.last())
        .zip(latest(&comparison.primary));
    if let Some((last_point, current)) = outlook {
        let tendency = if last_point.point_estimate < current - VERDICT_THRESHOLD {
            "eine Senkung"
        } else if last_point.point_estimate > current + VERDICT_THRESHOLD {
            "einen Anstieg"
        } else {
            "eine gleichbleibende Tendenz"
        };
        html.push_str(&format!(
            "            <p><strong>Prognose:</strong> Für {} wird bis {} {} der Inflation erwartet ({:.2}%).</p>\n",
            escape(primary),
            month_label(last_point.date),
            tendency,
            last_point.point_estimate
        ));
    }
    close_section(html);
}

fn write_methodology(html: &mut String, ctx: &ReportContext<'_>) {
    open_section(html, "Methodik und Datenbasis");
    html.push_str("            <div class=\"card\">\n");
    stat(html, "Datenquelle:", "Eurostat (Datensatz: prc_hicp_manr)");
    stat(
        html,
        "Indikator:",
        "Harmonisierter Verbraucherpreisindex (HVPI), jährliche Veränderungsrate",
    );
    stat(html, "Prognosemodell:", method_name(ForecastMethod::DampedTrend));
    stat(html, "Ersatzmodell:", method_name(ForecastMethod::LinearTrend));
    if let Some(window) = ctx
        .forecast
        .regions()
        .iter()
        .map(|r| r.training_window_size)
        .max()
    {
        stat(html, "Trainingsdaten (Prognose):", &format!("bis zu {} Monate", window));
    }
    html.push_str("            </div>\n");
    close_section(html);
}

fn write_statistics(html: &mut String, ctx: &ReportContext<'_>) {
    open_section(
        html,
        &format!(
            "Statistische Kennzahlen (seit {})",
            ctx.settings.statistics_start.year()
        ),
    );
    html.push_str("            <div class=\"grid\">\n");
    for stats in ctx.statistics {
        html.push_str(&format!(
            "            <div class=\"card\">\n                <h3>{}</h3>\n",
            escape(&stats.region_name)
        ));
        stat(html, "Durchschnitt:", &format!("{:.2}%", stats.mean));
        stat(html, "Median:", &format!("{:.2}%", stats.median));
        stat(html, "Maximum:", &format!("{:.2}%", stats.max));
        stat(html, "Minimum:", &format!("{:.2}%", stats.min));
        stat(html, "Standardabweichung:", &format!("{:.2}", stats.std_dev));
        html.push_str("            </div>\n");
    }
    html.push_str("            </div>\n");
    close_section(html);
}

fn write_trends(html: &mut String, ctx: &ReportContext<'_>) {
    open_section(html, "Trends und Extremwerte");
    html.push_str(
        "            <table>\n                <thead><tr><th>Region</th><th>Höchste Inflation</th><th>Niedrigste Inflation</th></tr></thead>\n                <tbody>\n",
    );
    for trend in ctx.trends {
        html.push_str(&format!(
            "                    <tr><td>{}</td><td>{:.2}% ({})</td><td>{:.2}% ({})</td></tr>\n",
            escape(&trend.region_name),
            trend.highest,
            month_label(trend.highest_date),
            trend.lowest,
            month_label(trend.lowest_date)
        ));
    }
    html.push_str("                </tbody>\n            </table>\n");
    close_section(html);
}

fn write_comparison(html: &mut String, ctx: &ReportContext<'_>) {
    let comparison = ctx.comparison;
    let countries = &ctx.settings.countries;
    open_section(html, "Monatlicher Vergleich");

    html.push_str("            <table>\n                <thead><tr><th>Monat</th>");
    for code in countries {
        html.push_str(&format!("<th>{}</th>", escape(country_name(code))));
    }
    html.push_str(&format!(
        "<th>Differenz ({}-{})</th></tr></thead>\n                <tbody>\n",
        escape(&comparison.primary),
        escape(&comparison.benchmark)
    ));

    for row in comparison.last(COMPARISON_MONTHS) {
        html.push_str(&format!("                    <tr><td>{}</td>", month_label(row.date)));
        for code in countries {
            let cell = match row.value(code) {
                Some(value) => format!("<td>{:.2}%</td>", value),
                None => "<td>-</td>".to_string(),
            };
            html.push_str(&cell);
        }
        let diff = match row.difference {
            Some(diff) => format!("<td>{:.2} PP</td>", diff),
            None => "<td>-</td>".to_string(),
        };
        html.push_str(&diff);
        html.push_str("</tr>\n");
    }
    html.push_str("                </tbody>\n            </table>\n");

    if let Some(avg_diff) = comparison.average_difference() {
        html.push_str(&format!(
            "            <p>Durchschnittliche Differenz ({} - {}): {:.2} Prozentpunkte; höher in {} von {} Monaten.</p>\n",
            escape(country_name(&comparison.primary)),
            escape(country_name(&comparison.benchmark)),
            avg_diff,
            comparison.months_higher(),
            comparison.months_compared()
        ));
    }
    close_section(html);
}

fn write_forecast(html: &mut String, ctx: &ReportContext<'_>) {
    open_section(html, "Inflationsprognose");
    html.push_str("            <div class=\"grid\">\n");

    for region in ctx.forecast.regions() {
        html.push_str(&format!(
            "            <div>\n                <h4>{}</h4>\n                <p class=\"note\">{}{}, Trainingsfenster: {} Monate, Standardfehler: {:.3}</p>\n",
            escape(&region.region_name),
            method_name(region.method),
            if region.fallback_reason.is_some() {
                " (Ersatzmodell)"
            } else {
                ""
            },
            region.training_window_size,
            region.std_error
        ));
        html.push_str(
            "                <table>\n                    <thead><tr><th>Monat</th><th>Prognose</th><th>Konfidenzintervall</th></tr></thead>\n                    <tbody>\n",
        );
        for point in &region.points {
            html.push_str(&format!(
                "                        <tr><td>{}</td><td>{:.2}%</td><td>{:.2}% - {:.2}%</td></tr>\n",
                month_label(point.date),
                point.point_estimate,
                point.lower_bound,
                point.upper_bound
            ));
        }
        html.push_str("                    </tbody>\n                </table>\n            </div>\n");
    }
    html.push_str("            </div>\n");

    for code in ctx.forecast.skipped() {
        html.push_str(&format!(
            "            <p class=\"note\">{}: keine Daten, keine Prognose</p>\n",
            escape(country_name(code))
        ));
    }
    for (code, reason) in ctx.forecast.failed() {
        html.push_str(&format!(
            "            <p class=\"note\">{}: Prognose fehlgeschlagen ({})</p>\n",
            escape(country_name(code)),
            escape(reason)
        ));
    }
    close_section(html);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{calculate_statistics, compare_regions, identify_trends};
    use crate::config::ReportSettings;
    use chrono::NaiveDate;
    use inflation_forecast::{forecast_inflation, TimeSeriesPoint, YearMonth};

    fn points(with_euro_area: bool) -> Vec<TimeSeriesPoint> {
        let mut points = Vec::new();
        let mut date = YearMonth::new(2024, 1).unwrap();
        for i in 0..14 {
            points.push(TimeSeriesPoint::new(date, "AT", "Österreich", 4.0 - 0.1 * i as f64));
            points.push(TimeSeriesPoint::new(date, "DE", "Deutschland", 3.0 - 0.05 * i as f64));
            if with_euro_area {
                points.push(TimeSeriesPoint::new(date, "EA20", "Eurozone", 3.5 - 0.1 * i as f64));
            }
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

        render_html_report(&ReportContext {
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
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape("Österreich"), "Österreich");
    }

    #[test]
    fn test_html_document_structure() {
        let html = render(&points(true));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"de\">"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(html.contains("Inflationsbericht 2025"));
        assert!(html.contains("Erstellt am:</span> <strong>01.03.2025, 08:30 Uhr"));
        assert!(html.contains("Berichtszeitraum:</span> <strong>2024 - 2025"));
        assert_eq!(html.matches("<div class=\"section\">").count(), 6);
    }

    #[test]
    fn test_html_statistics_and_forecast() {
        let html = render(&points(true));

        assert!(html.contains("Statistische Kennzahlen (seit 2020)"));
        assert!(html.contains("<h3>Österreich</h3>"));
        assert!(html.contains("<td>Feb 2025</td><td>2.70%</td>"));
        assert!(html.contains("Exponentielle Glättung mit gedämpftem Trend, Trainingsfenster: 14 Monate"));
        assert!(html.contains("<td>Mär 2025</td>"));
        assert!(html.contains("eine Senkung der Inflation"));
    }

    #[test]
    fn test_html_comparison() {
        let html = render(&points(true));

        assert!(html.contains("<th>Differenz (AT-EA20)</th>"));
        assert!(html.contains("<td>Feb 2025</td><td>2.70%</td><td>2.35%</td><td>2.20%</td><td>0.50 PP</td>"));
        assert!(!html.contains("<td>Feb 2024</td>"));
        assert!(html.contains("Durchschnittliche Differenz (Österreich - Eurozone): 0.50 Prozentpunkte; höher in 14 von 14 Monaten."));
        assert!(html.contains("beträgt 0.50 Prozentpunkte"));
    }

    #[test]
    fn test_missing_benchmark_region() {
        let html = render(&points(false));

        assert!(html.contains("<td>Feb 2025</td><td>2.70%</td><td>2.35%</td><td>-</td><td>-</td>"));
        assert!(!html.contains("Durchschnittliche Differenz"));
        assert!(!html.contains("beträgt"));
    }

    #[test]
    fn test_write_html_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_html_report("<html></html>", dir.path()).unwrap();

        assert_eq!(path, dir.path().join(HTML_REPORT_FILE));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
