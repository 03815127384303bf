// Chart rendering. Charts are plain SVG documents assembled by hand and
// written next to the tables.

use crate::config::DataPaths;
use crate::error::Result;
use crate::persist::write_atomic;
use crate::stats::{self, DecadeBreakdown, YearlySeries};
use crate::table::LaunchTable;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

pub const TOP_COUNTRIES: usize = 10;
/// Countries compared by the rivalry chart, in drawing order
pub const RIVALRY: [&str; 2] = ["Russia", "USA"];

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 80.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 110.0;
const FONT_SIZE: f64 = 14.0;
const MARKER_RADIUS: f64 = 5.0;
const BAR_FILL: f64 = 0.8;
const AREA_OPACITY: f64 = 0.1;

const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];
const BAR_COLOR: &str = "#1f77b4";
const YEAR_COLOR: &str = "#3f9624";
const RIVALRY_COLORS: [&str; 2] = ["#ff0000", "#0000ff"];
const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#dddddd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chart {
    ByCountry,
    ByYear,
    ByCountryDecade,
    Rivalry,
}

impl Chart {
    pub const ALL: [Chart; 4] = [Chart::ByCountry, Chart::ByYear, Chart::ByCountryDecade, Chart::Rivalry];

    pub fn file_name(self) -> &'static str {
        match self {
            Chart::ByCountry => "by_country.svg",
            Chart::ByYear => "by_year.svg",
            Chart::ByCountryDecade => "by_country_year.svg",
            Chart::Rivalry => "usa_russia.svg",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Chart::ByCountry => "Launches by country",
            Chart::ByYear => "Launches per year",
            Chart::ByCountryDecade => "Launches per decade by country",
            Chart::Rivalry => "USA vs Russia",
        }
    }
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Chart A: the ten countries with the most launches
pub fn plot_launches_by_country(table: &LaunchTable, paths: &DataPaths) -> Result<PathBuf> {
    let (countries, counts): (Vec<String>, Vec<usize>) =
        stats::top_countries(table.records(), TOP_COUNTRIES).into_iter().unzip();
    debug!("Top countries: {:?}", countries);

    let svg = render_bar_chart(Chart::ByCountry.title(), &countries, &counts);
    write_chart(paths.chart(Chart::ByCountry), &svg)
}

/// Chart B: launches per year, and per decade for the top ten countries.
/// Produces two files.
pub fn plot_launches_by_country_and_year(table: &LaunchTable, paths: &DataPaths) -> Result<Vec<PathBuf>> {
    let by_year: Vec<(i32, usize)> = stats::launches_by_year(table.records()).into_iter().collect();
    let by_year_svg = render_line_chart(Chart::ByYear.title(), &by_year);
    let by_year_path = write_chart(paths.chart(Chart::ByYear), &by_year_svg)?;

    let countries: Vec<String> = stats::top_countries(table.records(), TOP_COUNTRIES)
        .into_iter()
        .map(|(country, _)| country)
        .collect();
    let breakdown = stats::decade_breakdown(table.records(), &countries);
    let decades_svg = render_stacked_bars(Chart::ByCountryDecade.title(), &breakdown);
    let decades_path = write_chart(paths.chart(Chart::ByCountryDecade), &decades_svg)?;

    Ok(vec![by_year_path, decades_path])
}

/// Chart C: yearly and running launch totals, USA against Russia
pub fn plot_launches_usa_vs_russia(table: &LaunchTable, paths: &DataPaths) -> Result<PathBuf> {
    let (years, series) = stats::yearly_series(table.records(), &RIVALRY);
    let svg = render_rivalry_chart(Chart::Rivalry.title(), &years, &series);
    write_chart(paths.chart(Chart::Rivalry), &svg)
}

/// Every chart, in the order the files are listed by `Chart::ALL`
pub fn render_all(table: &LaunchTable, paths: &DataPaths) -> Result<Vec<PathBuf>> {
    let mut artifacts = vec![plot_launches_by_country(table, paths)?];
    artifacts.extend(plot_launches_by_country_and_year(table, paths)?);
    artifacts.push(plot_launches_usa_vs_russia(table, paths)?);
    Ok(artifacts)
}

fn write_chart(path: PathBuf, svg: &str) -> Result<PathBuf> {
    write_atomic(&path, |file| Ok(file.write_all(svg.as_bytes())?))?;
    info!("Rendered {}", path.display());
    Ok(path)
}

pub fn render_bar_chart(title: &str, labels: &[String], values: &[usize]) -> String {
    if values.is_empty() {
        return render_empty(title);
    }

    let frame = Frame::standard();
    let axis = ValueAxis::for_max(values.iter().copied().max().unwrap_or(0));
    let mut svg = Svg::new();
    draw_title(&mut svg, title);
    draw_value_axis(&mut svg, &frame, &axis, Side::Left, "Launches", false);

    for (i, value) in values.iter().enumerate() {
        let (x, width) = frame.bar(i, values.len());
        let y = frame.y(&axis, *value as f64);
        svg.rect(x, y, width, frame.bottom() - y, BAR_COLOR, 1.0);
    }
    draw_category_labels(&mut svg, &frame, labels);
    svg.finish()
}

/// Line with markers over consecutive years
pub fn render_line_chart(title: &str, points: &[(i32, usize)]) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return render_empty(title);
    };

    let frame = Frame::standard();
    let years = YearScale::new(first.0, last.0);
    let axis = ValueAxis::for_max(points.iter().map(|(_, n)| *n).max().unwrap_or(0));
    let mut svg = Svg::new();
    draw_title(&mut svg, title);
    draw_value_axis(&mut svg, &frame, &axis, Side::Left, "Launches", true);
    draw_year_axis(&mut svg, &frame, &years);

    let coords: Vec<(f64, f64)> = points
        .iter()
        .map(|(year, n)| (years.x(&frame, *year), frame.y(&axis, *n as f64)))
        .collect();
    svg.polyline(&coords, YEAR_COLOR, 2.0);
    for (x, y) in coords {
        svg.circle(x, y, MARKER_RADIUS, YEAR_COLOR);
    }
    svg.finish()
}

/// One bar per country, stacked by decade
pub fn render_stacked_bars(title: &str, breakdown: &DecadeBreakdown) -> String {
    if breakdown.countries.is_empty() || breakdown.decades.is_empty() {
        return render_empty(title);
    }

    let totals: Vec<usize> = breakdown.counts.iter().map(|row| row.iter().sum()).collect();
    let frame = Frame::standard();
    let axis = ValueAxis::for_max(totals.iter().copied().max().unwrap_or(0));
    let mut svg = Svg::new();
    draw_title(&mut svg, title);
    draw_value_axis(&mut svg, &frame, &axis, Side::Left, "Launches", false);

    let count = breakdown.countries.len();
    for (c, row) in breakdown.counts.iter().enumerate() {
        let (x, width) = frame.bar(c, count);
        let mut stacked = 0usize;
        for (d, n) in row.iter().enumerate() {
            if *n == 0 {
                continue;
            }
            let top = frame.y(&axis, (stacked + n) as f64);
            let bottom = frame.y(&axis, stacked as f64);
            svg.rect(x, top, width, bottom - top, PALETTE[d % PALETTE.len()], 1.0);
            stacked += n;
        }
    }
    draw_category_labels(&mut svg, &frame, &breakdown.countries);

    let legend: Vec<(String, &str)> = breakdown
        .decades
        .iter()
        .enumerate()
        .map(|(d, decade)| (format!("{}s", decade), PALETTE[d % PALETTE.len()]))
        .collect();
    draw_legend(&mut svg, &frame, &legend);
    svg.finish()
}

/// Per-year counts as translucent areas against the left axis, running
/// totals as lines with markers against the right axis
pub fn render_rivalry_chart(title: &str, years: &[i32], series: &[YearlySeries]) -> String {
    let (Some(first), Some(last)) = (years.first(), years.last()) else {
        return render_empty(title);
    };

    let frame = Frame::standard();
    let scale = YearScale::new(*first, *last);
    let yearly = ValueAxis::for_max(series.iter().flat_map(|s| s.per_year.iter().copied()).max().unwrap_or(0));
    let total = ValueAxis::for_max(series.iter().flat_map(|s| s.cumulative.iter().copied()).max().unwrap_or(0));

    let mut svg = Svg::new();
    draw_title(&mut svg, title);
    draw_value_axis(&mut svg, &frame, &yearly, Side::Left, "Launches per year", false);
    draw_value_axis(&mut svg, &frame, &total, Side::Right, "Total launches", false);
    draw_year_axis(&mut svg, &frame, &scale);

    let mut legend = Vec::with_capacity(series.len());
    for (i, s) in series.iter().enumerate() {
        let color = RIVALRY_COLORS[i % RIVALRY_COLORS.len()];
        let xs: Vec<f64> = years.iter().map(|y| scale.x(&frame, *y)).collect();

        let mut area: Vec<(f64, f64)> = xs
            .iter()
            .zip(&s.per_year)
            .map(|(x, n)| (*x, frame.y(&yearly, *n as f64)))
            .collect();
        area.push((scale.x(&frame, *last), frame.bottom()));
        area.push((scale.x(&frame, *first), frame.bottom()));
        svg.polygon(&area, color, AREA_OPACITY);

        let line: Vec<(f64, f64)> = xs
            .iter()
            .zip(&s.cumulative)
            .map(|(x, n)| (*x, frame.y(&total, *n as f64)))
            .collect();
        svg.polyline(&line, color, 2.0);
        for (x, y) in line {
            svg.circle(x, y, MARKER_RADIUS, color);
        }
        legend.push((s.country.clone(), color));
    }
    draw_legend(&mut svg, &frame, &legend);
    svg.finish()
}

fn render_empty(title: &str) -> String {
    let mut svg = Svg::new();
    draw_title(&mut svg, title);
    svg.text(WIDTH / 2.0, HEIGHT / 2.0, "No launches", "middle", FONT_SIZE * 1.5, None);
    svg.finish()
}

fn draw_title(svg: &mut Svg, title: &str) {
    svg.text(WIDTH / 2.0, MARGIN_TOP / 2.0 + 6.0, title, "middle", FONT_SIZE * 1.4, None);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn draw_value_axis(svg: &mut Svg, frame: &Frame, axis: &ValueAxis, side: Side, label: &str, grid: bool) {
    let (x, tick_end, anchor) = match side {
        Side::Left => (frame.left, frame.left - 6.0, "end"),
        Side::Right => (frame.right(), frame.right() + 6.0, "start"),
    };
    svg.line(x, frame.top, x, frame.bottom(), AXIS_COLOR);

    for value in axis.ticks() {
        let y = frame.y(axis, value);
        if grid {
            svg.line(frame.left, y, frame.right(), y, GRID_COLOR);
        }
        svg.line(x, y, tick_end, y, AXIS_COLOR);
        let label_x = match side {
            Side::Left => tick_end - 4.0,
            Side::Right => tick_end + 4.0,
        };
        svg.text(label_x, y + FONT_SIZE / 3.0, &format!("{}", value as u64), anchor, FONT_SIZE, None);
    }

    let label_x = match side {
        Side::Left => frame.left - 55.0,
        Side::Right => frame.right() + 60.0,
    };
    let label_y = frame.top + frame.height / 2.0;
    svg.text(label_x, label_y, label, "middle", FONT_SIZE, Some((-90.0, label_x, label_y)));
}

fn draw_category_labels(svg: &mut Svg, frame: &Frame, labels: &[String]) {
    svg.line(frame.left, frame.bottom(), frame.right(), frame.bottom(), AXIS_COLOR);
    for (i, label) in labels.iter().enumerate() {
        let x = frame.center(i, labels.len());
        let y = frame.bottom() + FONT_SIZE + 4.0;
        svg.text(x, y, label, "end", FONT_SIZE, Some((-30.0, x, y)));
    }
}

fn draw_year_axis(svg: &mut Svg, frame: &Frame, years: &YearScale) {
    svg.line(frame.left, frame.bottom(), frame.right(), frame.bottom(), AXIS_COLOR);
    for year in years.ticks() {
        let x = years.x(frame, year);
        svg.line(x, frame.bottom(), x, frame.bottom() + 6.0, AXIS_COLOR);
        svg.text(x, frame.bottom() + FONT_SIZE + 8.0, &year.to_string(), "middle", FONT_SIZE, None);
    }
}

fn draw_legend<S: AsRef<str>>(svg: &mut Svg, frame: &Frame, entries: &[(S, &str)]) {
    let row = FONT_SIZE + 6.0;
    let x = frame.right() - 120.0;
    for (i, (label, color)) in entries.iter().enumerate() {
        let y = frame.top + 10.0 + i as f64 * row;
        svg.rect(x, y, 12.0, 12.0, color, 1.0);
        svg.text(x + 18.0, y + 11.0, label.as_ref(), "start", FONT_SIZE, None);
    }
}

/// Plotting area inside the canvas margins
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn standard() -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn y(&self, axis: &ValueAxis, value: f64) -> f64 {
        self.bottom() - value / axis.max * self.height
    }

    fn center(&self, index: usize, count: usize) -> f64 {
        let band = self.width / count.max(1) as f64;
        self.left + band * (index as f64 + 0.5)
    }

    /// Left edge and width of bar `index` out of `count`
    fn bar(&self, index: usize, count: usize) -> (f64, f64) {
        let width = self.width / count.max(1) as f64 * BAR_FILL;
        (self.center(index, count) - width / 2.0, width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ValueAxis {
    max: f64,
    step: f64,
}

impl ValueAxis {
    fn for_max(max: usize) -> Self {
        let step = nice_step(max as f64, 5);
        let top = (max as f64 / step).ceil().max(1.0) * step;
        Self { max: top, step }
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        let count = (self.max / self.step).round() as usize;
        (0..=count).map(|i| i as f64 * self.step)
    }
}

/// Smallest 1/2/5 x 10^k step that splits `span` into at most `ticks`
/// intervals. Never below 1.
fn nice_step(span: f64, ticks: usize) -> f64 {
    let raw = (span / ticks.max(1) as f64).max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    let nice = match raw / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    };
    nice * magnitude
}

#[derive(Debug, Clone, Copy)]
struct YearScale {
    first: i32,
    last: i32,
}

impl YearScale {
    fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    fn x(&self, frame: &Frame, year: i32) -> f64 {
        if self.first == self.last {
            return frame.left + frame.width / 2.0;
        }
        frame.left + (year - self.first) as f64 / (self.last - self.first) as f64 * frame.width
    }

    fn ticks(&self) -> impl Iterator<Item = i32> {
        let step = nice_step((self.last - self.first) as f64, 12) as i32;
        let mut start = self.first.div_euclid(step) * step;
        if start < self.first {
            start += step;
        }
        let last = self.last;
        (start..=last).step_by(step as usize)
    }
}

/// SVG document under construction
struct Svg {
    body: String,
}

impl Svg {
    fn new() -> Self {
        let mut svg = Self { body: String::new() };
        svg.rect(0.0, 0.0, WIDTH, HEIGHT, "#ffffff", 1.0);
        svg
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str, opacity: f64) {
        self.body.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="{}"/>"#,
            x, y, width, height, fill, opacity
        ));
        self.body.push('\n');
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        self.body.push_str(&format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
            x1, y1, x2, y2, stroke
        ));
        self.body.push('\n');
    }

    fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, width: f64) {
        self.body.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            points_attr(points),
            stroke,
            width
        ));
        self.body.push('\n');
    }

    fn polygon(&mut self, points: &[(f64, f64)], fill: &str, opacity: f64) {
        self.body.push_str(&format!(
            r#"<polygon points="{}" fill="{}" fill-opacity="{}" stroke="{}" stroke-opacity="0.4"/>"#,
            points_attr(points),
            fill,
            opacity,
            fill
        ));
        self.body.push('\n');
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.body.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
        self.body.push('\n');
    }

    /// `rotate` is (degrees, pivot x, pivot y)
    fn text(&mut self, x: f64, y: f64, content: &str, anchor: &str, size: f64, rotate: Option<(f64, f64, f64)>) {
        let transform = rotate
            .map(|(deg, px, py)| format!(r#" transform="rotate({} {:.1} {:.1})""#, deg, px, py))
            .unwrap_or_default();
        self.body.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="{}" font-size="{:.1}" fill="{}"{}>{}</text>"#,
            x,
            y,
            anchor,
            size,
            AXIS_COLOR,
            transform,
            escape_xml(content)
        ));
        self.body.push('\n');
    }

    fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">
{body}</svg>
"#,
            w = WIDTH,
            h = HEIGHT,
            body = self.body
        )
    }
}

fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(0.0, 5), 1.0);
        assert_eq!(nice_step(7.0, 5), 2.0);
        assert_eq!(nice_step(23.0, 5), 5.0);
        assert_eq!(nice_step(130.0, 5), 50.0);
    }

    #[test]
    fn test_value_axis_covers_max() {
        let axis = ValueAxis::for_max(23);
        assert_eq!(axis.max, 25.0);
        assert_eq!(axis.ticks().count(), 6);

        let empty = ValueAxis::for_max(0);
        assert_eq!(empty.max, 1.0);
    }

    #[test]
    fn test_year_ticks_inside_range() {
        let ticks: Vec<i32> = YearScale::new(1957, 2022).ticks().collect();
        assert_eq!(ticks.first(), Some(&1960));
        assert!(ticks.iter().all(|y| (1957..=2022).contains(y)));
        assert!(ticks.windows(2).all(|w| w[1] - w[0] == 10));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Rocket Lab <USA> & \"NZ\""), "Rocket Lab &lt;USA&gt; &amp; &quot;NZ&quot;");
    }

    #[test]
    fn test_empty_chart_says_so() {
        let svg = render_bar_chart("Launches by country", &[], &[]);
        assert!(svg.contains("No launches"));
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_bar_chart_draws_one_bar_per_value() {
        let labels = vec!["USA".to_string(), "China".to_string()];
        let svg = render_bar_chart("Launches by country", &labels, &[12, 7]);
        // background plus two bars
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains(">China</text>"));
    }

    #[test]
    fn test_chart_file_names_are_distinct() {
        let mut names: Vec<&str> = Chart::ALL.iter().map(|c| c.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Chart::ALL.len());
    }
}
