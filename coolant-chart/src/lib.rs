//! SVG trend charts for one machine's service history.
//!
//! The chart has two panels sharing a date axis: concentration percent on
//! top and pH below, each with its target drawn as a horizontal line.
//! Unmeasured values (`0`) are left out of their panel.

use chrono::{Duration, NaiveDate};
use coolant_core::chemistry::Targets;
use coolant_db::models::TrendPoint;
use coolant_utils::dates::parse_date;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (900u32, 640u32);
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Series for one panel: dated values with unmeasured points removed.
fn measured(points: &[(NaiveDate, f64)]) -> Vec<(NaiveDate, f64)> {
    points.iter().copied().filter(|(_, v)| *v > 0.0).collect()
}

/// Date axis covering every point, padded so a single visit still has width.
fn date_range(dates: &[NaiveDate]) -> Option<Range<NaiveDate>> {
    let start = *dates.iter().min()?;
    let end = *dates.iter().max()?;
    Some(Range {
        start: start - Duration::days(1),
        end: end + Duration::days(1),
    })
}

#[allow(clippy::too_many_arguments)]
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    caption: &str,
    y_desc: &str,
    dates: Range<NaiveDate>,
    y_range: Range<f64>,
    series: &[(NaiveDate, f64)],
    target: f64,
    color: RGBColor,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let ranged_date: RangedDate<NaiveDate> = dates.clone().into();
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 20))
        .margin(15i32)
        .x_label_area_size(30u32)
        .y_label_area_size(50u32)
        .build_cartesian_2d(ranged_date, y_range)?;
    chart
        .configure_mesh()
        .x_labels(8_usize)
        .y_desc(y_desc)
        .x_label_formatter(&|d: &NaiveDate| d.format(DATE_FORMAT).to_string())
        .draw()?;

    chart
        .draw_series(LineSeries::new(series.to_vec(), color))?
        .label(y_desc)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    chart.draw_series(series.iter().map(|p| Circle::new(*p, 3, color.filled())))?;

    chart
        .draw_series(LineSeries::new(
            vec![(dates.start, target), (dates.end, target)],
            RED.stroke_width(1),
        ))?
        .label("Target")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Render the trend of `points` as an SVG document.
pub fn render_trend_svg(
    title: &str,
    points: &[TrendPoint],
    targets: &Targets,
) -> anyhow::Result<String> {
    let mut dated = Vec::with_capacity(points.len());
    for point in points {
        dated.push((parse_date(&point.date)?, point));
    }
    let conc = measured(
        &dated
            .iter()
            .map(|(d, p)| (*d, p.concentration_pct))
            .collect::<Vec<_>>(),
    );
    let ph = measured(&dated.iter().map(|(d, p)| (*d, p.ph)).collect::<Vec<_>>());
    if conc.is_empty() && ph.is_empty() {
        anyhow::bail!("no measured readings to chart for {}", title);
    }

    let dates: Vec<NaiveDate> = dated.iter().map(|(d, _)| *d).collect();
    let Some(x_range) = date_range(&dates) else {
        anyhow::bail!("no readings to chart for {}", title);
    };

    let conc_max = conc
        .iter()
        .map(|(_, v)| *v)
        .fold(targets.target_conc_pct, f64::max);
    let ph_min = ph.iter().map(|(_, v)| *v).fold(targets.target_min_ph, f64::min);
    let ph_max = ph.iter().map(|(_, v)| *v).fold(targets.target_min_ph, f64::max);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let (upper, lower) = root.split_vertically(CHART_SIZE.1 as i32 / 2);
        draw_panel(
            &upper,
            &format!("{} - Concentration", title),
            "Concentration %",
            x_range.clone(),
            0f64..(conc_max * 1.25).ceil(),
            &conc,
            targets.target_conc_pct,
            BLUE,
        )?;
        draw_panel(
            &lower,
            &format!("{} - pH", title),
            "pH",
            x_range,
            (ph_min - 1.0).max(0.0).floor()..(ph_max + 1.0).ceil(),
            &ph,
            targets.target_min_ph,
            GREEN,
        )?;
        root.present()?;
    }
    log::info!(
        "[Coolant] chart: rendered {} points for {}",
        points.len(),
        title
    );
    Ok(svg)
}

/// Render the trend chart and write it to `path`.
pub fn write_trend_svg(
    path: &Path,
    title: &str,
    points: &[TrendPoint],
    targets: &Targets,
) -> anyhow::Result<()> {
    let svg = render_trend_svg(title, points, targets)?;
    std::fs::write(path, svg)?;
    log::info!("[Coolant] chart: wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, concentration_pct: f64, ph: f64) -> TrendPoint {
        TrendPoint {
            date: date.to_string(),
            concentration_pct,
            ph,
        }
    }

    #[test]
    fn renders_svg_document() {
        let points = vec![
            point("2024-01-10", 8.5, 9.0),
            point("2024-02-10", 6.0, 8.0),
            point("2024-03-10", 7.2, 8.9),
        ];
        let svg = render_trend_svg("Acme CNC-01", &points, &Targets::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Acme CNC-01 - Concentration"));
        assert!(svg.contains("Acme CNC-01 - pH"));
    }

    #[test]
    fn single_visit_still_renders() {
        let points = vec![point("2024-01-10", 8.5, 0.0)];
        assert!(render_trend_svg("Solo", &points, &Targets::default()).is_ok());
    }

    #[test]
    fn nothing_measured_is_an_error() {
        let points = vec![point("2024-01-10", 0.0, 0.0)];
        assert!(render_trend_svg("Empty", &points, &Targets::default()).is_err());
        assert!(render_trend_svg("Empty", &[], &Targets::default()).is_err());
    }

    #[test]
    fn bad_date_is_an_error() {
        let points = vec![point("10/01/2024", 8.5, 9.0)];
        assert!(render_trend_svg("Bad", &points, &Targets::default()).is_err());
    }

    #[test]
    fn measured_drops_zero_values() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(measured(&[(d, 0.0), (d, 8.1)]), vec![(d, 8.1)]);
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.svg");
        write_trend_svg(&path, "Acme", &[point("2024-01-10", 8.5, 9.0)], &Targets::default())
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
    }
}
