#![cfg(feature = "web")]
use crate::chart::{Chart, ChartKind};
use crate::error::DashboardError;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;

/// Configuration options for graph generation
///
/// Titles, axis labels and the chart type travel with the [`Chart`] itself;
/// only the canvas is configured here.
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Width of the graph in pixels
    pub width: u32,

    /// Height of the graph in pixels
    pub height: u32,

    /// Radius of scatter points in pixels
    pub point_size: u32,
}

impl Default for GraphOptions {
    /// 800x600 canvas with 5-pixel scatter points
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            point_size: 5,
        }
    }
}

/// Renders a chart to an SVG document
///
/// This is the main entry point for drawing view charts. It works out the
/// axis ranges from the data and delegates to plotters' SVG backend, writing
/// into memory.
///
/// # Arguments
/// * `chart` - Chart-ready series produced by a view
/// * `options` - Canvas options
///
/// # Returns
/// * The SVG markup, `NoDataForFilter` for a chart without points, or
///   `Render` if plotters fails
///
/// # Examples
/// ```
/// use f1_dashboard::chart::{Chart, ChartKind, Series};
/// use f1_dashboard::graph::{GraphOptions, render_svg};
///
/// let chart = Chart::new(ChartKind::Line, "Races per Year", "Year", "Races")
///     .with_series(Series::new("races", vec![(2019.0, 21.0), (2020.0, 17.0)]));
///
/// let svg = render_svg(&chart, &GraphOptions::default()).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
pub fn render_svg(chart: &Chart, options: &GraphOptions) -> Result<String, DashboardError> {
    if chart.is_empty() {
        return Err(DashboardError::no_data(format!("Nothing to plot for {}", chart.title)));
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        draw_chart(&root, chart, options).map_err(|e| DashboardError::Render(e.to_string()))?;
    }
    Ok(svg)
}

fn draw_chart(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &Chart,
    options: &GraphOptions,
) -> Result<(), Box<dyn Error>> {
    root.fill(&WHITE)?;

    let (min_x, max_x, min_y, max_y) = chart.bounds().ok_or("chart has no data")?;

    // Inverted axes are drawn by negating y and un-negating the tick labels.
    let sign = if chart.invert_y { -1.0 } else { 1.0 };
    let bar_width = histogram_width(chart);
    let x_range = match chart.kind {
        ChartKind::Line => pad(min_x, max_x, 0.0),
        ChartKind::Bar | ChartKind::Scatter => pad(min_x, max_x, 0.5),
        ChartKind::Histogram => min_x..max_x + bar_width,
    };
    let y_range = match chart.kind {
        ChartKind::Bar | ChartKind::Histogram => 0.0..headroom(max_y.max(0.0)),
        _ if chart.invert_y => -(max_y + 0.5)..-(min_y - 0.5),
        _ => pad(min_y, max_y, 0.5),
    };

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;

    let categories = &chart.categories;
    let x_formatter = |x: &f64| {
        if categories.is_empty() {
            tick(*x)
        } else {
            category(categories, *x)
        }
    };
    let y_formatter = |y: &f64| tick(*y * sign);

    ctx.configure_mesh()
        .x_desc(&chart.x_label)
        .y_desc(&chart.y_label)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .draw()?;

    for (i, series) in chart.series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let points = series.points.iter().map(move |&(x, y)| (x, y * sign));

        match chart.kind {
            ChartKind::Line => {
                ctx.draw_series(LineSeries::new(points, color.stroke_width(2)))?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
            ChartKind::Scatter => {
                let size = options.point_size;
                ctx.draw_series(points.map(|p| Circle::new(p, size, color.filled())))?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
            }
            ChartKind::Bar => {
                ctx.draw_series(
                    points.map(|(x, y)| Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], color.filled())),
                )?;
            }
            ChartKind::Histogram => {
                ctx.draw_series(
                    points.map(|(x, y)| Rectangle::new([(x, 0.0), (x + bar_width, y)], color.filled())),
                )?;
            }
        }
    }

    if chart.series.len() > 1 {
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn pad(min: f64, max: f64, margin: f64) -> Range<f64> {
    if min == max {
        (min - 0.5 - margin)..(max + 0.5 + margin)
    } else {
        (min - margin)..(max + margin)
    }
}

fn headroom(max: f64) -> f64 {
    if max <= 0.0 { 1.0 } else { max * 1.05 }
}

// Bins are equal width, so the spacing of the first two edges is the width.
fn histogram_width(chart: &Chart) -> f64 {
    chart
        .series
        .first()
        .and_then(|s| match s.points.as_slice() {
            [first, second, ..] => Some(second.0 - first.0),
            _ => None,
        })
        .filter(|w| *w > 0.0)
        .unwrap_or(1.0)
}

fn tick(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else if (v - v.round()).abs() < 1e-9 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

fn category(categories: &[String], x: f64) -> String {
    if (x - x.round()).abs() > 1e-9 || x < 0.0 {
        return String::new();
    }
    categories.get(x.round() as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Series;

    #[test]
    fn every_kind_renders() {
        let points = vec![(1.0, 3.0), (2.0, 1.0), (3.0, 2.0)];
        for kind in [ChartKind::Line, ChartKind::Bar, ChartKind::Scatter, ChartKind::Histogram] {
            let chart = Chart::new(kind, "Sample", "x", "y").with_series(Series::new("s", points.clone()));
            let svg = render_svg(&chart, &GraphOptions::default()).unwrap();
            assert!(svg.contains("<svg"), "{:?}", kind);
            assert!(svg.contains("Sample"), "{:?}", kind);
        }
    }

    #[test]
    fn inverted_and_multi_series() {
        let chart = Chart::new(ChartKind::Scatter, "Grid vs Final", "Grid", "Position")
            .inverted()
            .with_series(Series::new("Red", vec![(1.0, 1.0)]))
            .with_series(Series::new("Blue", vec![(2.0, 2.0)]));
        let svg = render_svg(&chart, &GraphOptions::default()).unwrap();
        assert!(svg.contains("Blue"));
    }

    #[test]
    fn empty_chart_is_no_data() {
        let chart = Chart::new(ChartKind::Line, "Empty", "x", "y");
        assert!(render_svg(&chart, &GraphOptions::default()).unwrap_err().is_no_data());
    }

    #[test]
    fn tick_labels() {
        assert_eq!(tick(-0.0), "0");
        assert_eq!(tick(2020.0), "2020");
        assert_eq!(tick(-3.0), "-3");
        assert_eq!(tick(2.26), "2.3");
        let names = vec!["Red".to_string(), "Blue".to_string()];
        assert_eq!(category(&names, 1.0), "Blue");
        assert_eq!(category(&names, 0.5), "");
        assert_eq!(category(&names, 7.0), "");
    }
}
