use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Cursor;
use std::sync::OnceLock;

use crate::models::Expense;
use crate::report;
use crate::util::{format_amount, truncate};

pub(crate) const CATEGORY_TITLE: &str = "Expenses by Category";
pub(crate) const MONTH_TITLE: &str = "Expenses Over Time";
const Y_LABEL: &str = "Amount ($)";

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const MARGIN: u32 = 16;
const Y_LABEL_AREA: u32 = 104;
const X_LABEL_AREA: u32 = 36;
const TICKS: f64 = 5.0;
/// Rough pixel width of one x-label character at `LABEL_SIZE`.
const CHAR_WIDTH: u32 = 8;
const BAR_HALF_WIDTH: f64 = 0.3;

const FONT_FAMILY: &str = "sans-serif";
const FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
const TITLE_SIZE: i32 = 22;
const LABEL_SIZE: i32 = 13;

const GRID: RGBColor = RGBColor(222, 226, 230);
const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LINE_GREEN: RGBColor = RGBColor(0, 128, 0);

/// A rendered chart ready for a `data:image/png;base64,` URI.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Chart {
    pub(crate) title: String,
    pub(crate) png_base64: String,
}

impl Chart {
    fn from_png(title: &str, png: &[u8]) -> Self {
        Self {
            title: title.to_string(),
            png_base64: STANDARD.encode(png),
        }
    }
}

/// The dashboard's charts for `records`: none for an empty ledger, else the
/// category bar chart followed by the monthly line chart. The line chart
/// is left out when no record carries a usable date.
pub(crate) fn dashboard_charts(records: &[Expense]) -> Result<Vec<Chart>> {
    let mut charts = Vec::new();
    if records.is_empty() {
        return Ok(charts);
    }

    let categories: Vec<(String, f64)> = report::by_category(records)?
        .into_iter()
        .map(|(name, total)| (name, total.to_f64().unwrap_or(0.0)))
        .collect();
    let png = bar_chart(CATEGORY_TITLE, &categories)?;
    charts.push(Chart::from_png(CATEGORY_TITLE, &png));

    let months: Vec<(String, f64)> = report::by_month(records)?
        .into_iter()
        .map(|(month, total)| (month.to_string(), total.to_f64().unwrap_or(0.0)))
        .collect();
    if months.is_empty() {
        tracing::debug!("no dated expenses, skipping monthly chart");
    } else {
        let png = line_chart(MONTH_TITLE, &months)?;
        charts.push(Chart::from_png(MONTH_TITLE, &png));
    }

    Ok(charts)
}

/// Vertical bar chart, one bar per entry in the given order.
pub(crate) fn bar_chart(title: &str, data: &[(String, f64)]) -> Result<Vec<u8>> {
    render(Kind::Bar, title, data)
}

/// Line chart with square markers, points in the given order.
pub(crate) fn line_chart(title: &str, data: &[(String, f64)]) -> Result<Vec<u8>> {
    render(Kind::Line, title, data)
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Bar,
    Line,
}

/// Entries sit at x = 0, 1, 2, ... with half a slot of padding either
/// side; y spans a rounded range that always includes zero.
fn render(kind: Kind, title: &str, data: &[(String, f64)]) -> Result<Vec<u8>> {
    if data.is_empty() {
        anyhow::bail!("Cannot chart '{title}': no data");
    }
    if data.iter().any(|(_, v)| !v.is_finite()) {
        anyhow::bail!("Cannot chart '{title}': non-finite value");
    }
    load_font()?;

    let values: Vec<f64> = data.iter().map(|(_, v)| *v).collect();
    let axis = Axis::fit(&values);
    let max_chars = label_chars(data.len());
    let labels: Vec<String> = data.iter().map(|(l, _)| truncate(l, max_chars)).collect();
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let mut pixels = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT_FAMILY, TITLE_SIZE))
            .margin(MARGIN)
            .x_label_area_size(X_LABEL_AREA)
            .y_label_area_size(Y_LABEL_AREA)
            .build_cartesian_2d(-0.5..(data.len() as f64 - 0.5), axis.min..axis.max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(GRID)
            .light_line_style(WHITE)
            .x_labels(data.len())
            .x_label_formatter(&|x| slot_label(&labels, *x))
            .y_labels(axis.ticks().len())
            .y_label_formatter(&|y| currency_label(*y))
            .y_desc(Y_LABEL)
            .label_style((FONT_FAMILY, LABEL_SIZE))
            .axis_desc_style((FONT_FAMILY, LABEL_SIZE))
            .draw()?;

        match kind {
            Kind::Bar => {
                chart.draw_series(points.iter().map(|&(x, y)| {
                    Rectangle::new(
                        [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, y)],
                        SKY_BLUE.filled(),
                    )
                }))?;
            }
            Kind::Line => {
                chart.draw_series(LineSeries::new(
                    points.iter().copied(),
                    LINE_GREEN.stroke_width(2),
                ))?;
                chart.draw_series(points.iter().map(|&p| {
                    EmptyElement::at(p) + Rectangle::new([(-3, -3), (3, 3)], LINE_GREEN.filled())
                }))?;
            }
        }

        root.present()?;
    }

    encode_png(pixels)
}

/// Registers the bundled face under `FONT_FAMILY` once per process.
fn load_font() -> Result<()> {
    static LOADED: OnceLock<bool> = OnceLock::new();
    let loaded = *LOADED.get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT).is_ok());
    if loaded {
        Ok(())
    } else {
        Err(anyhow!("Failed to load the chart font"))
    }
}

fn encode_png(pixels: Vec<u8>) -> Result<Vec<u8>> {
    let img = RgbImage::from_raw(WIDTH, HEIGHT, pixels)
        .ok_or_else(|| anyhow!("Chart buffer does not match {WIDTH}x{HEIGHT}"))?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode chart as PNG")?;
    Ok(bytes)
}

/// How many characters of an x label fit in one of `slots` slots.
fn label_chars(slots: usize) -> usize {
    let plot_width = WIDTH - 2 * MARGIN - Y_LABEL_AREA;
    (plot_width / slots.max(1) as u32 / CHAR_WIDTH) as usize
}

/// Label for the slot at `x`; blank between slots.
fn slot_label(labels: &[String], x: f64) -> String {
    let slot = x.round();
    if (x - slot).abs() > 1e-6 || slot < 0.0 {
        return String::new();
    }
    labels.get(slot as usize).cloned().unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    min: f64,
    max: f64,
    step: f64,
}

impl Axis {
    /// Smallest range on a 1/2/5 step grid covering zero and every value.
    fn fit(values: &[f64]) -> Self {
        let hi = values.iter().copied().fold(0.0_f64, f64::max);
        let lo = values.iter().copied().fold(0.0_f64, f64::min);
        let span = hi - lo;
        if span <= 0.0 {
            return Self {
                min: 0.0,
                max: 1.0,
                step: 0.2,
            };
        }
        let step = nice_step(span / TICKS);
        Self {
            min: (lo / step).floor() * step,
            max: (hi / step).ceil() * step,
            step,
        }
    }

    fn ticks(&self) -> Vec<f64> {
        let count = ((self.max - self.min) / self.step).round() as i64;
        (0..=count)
            .map(|i| self.min + i as f64 * self.step)
            .collect()
    }
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn currency_label(value: f64) -> String {
    format_amount(Decimal::from_f64(value).unwrap_or_default())
}
