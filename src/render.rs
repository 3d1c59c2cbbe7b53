use crate::error::{Error, Result};
use crate::tracker::ValidFractionCurve;
use log::debug;
use plotters::prelude::*;
use std::path::Path;
use std::process::Command;

const POINTS_PER_INCH: f64 = 72.0;

/// Fixed presentation parameters for the valid-fraction chart. Physical sizes are kept in inches
/// and points and converted to pixels using the output resolution, so changing `dpi` scales the
/// whole figure rather than cropping it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub font_pt: f64,
    pub line_pt: f64,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width_in: 6.4,
            height_in: 4.8,
            dpi: crate::DPI_OUTPUT,
            font_pt: 10.0,
            line_pt: 1.5,
            x_label: "Limit",
            y_label: "Valid Fraction (Average)",
        }
    }
}

impl ChartStyle {
    pub fn with_dpi(dpi: u32) -> Self {
        Self {
            dpi,
            ..Self::default()
        }
    }

    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    fn points_to_pixels(&self, points: f64) -> f64 {
        points * self.dpi as f64 / POINTS_PER_INCH
    }
}

/// Draw the curve as a blue line chart and write it as a PNG to `path`. The x axis spans the
/// 1-based positions with no padding, the y axis is fixed to `[0, 1]`.
///
/// # Arguments
///
/// * `curve` - normalized valid fractions, one per position.
/// * `style` - size, resolution, and labelling of the chart.
/// * `path` - destination of the image file; an existing file is overwritten.
///
/// # Errors
///
/// Any failure reported by the drawing backend, including an unwritable destination, is returned
/// as `Error::Render`.
pub fn render_curve(curve: &ValidFractionCurve, style: &ChartStyle, path: &Path) -> Result<()> {
    let (width, height) = style.pixel_size();
    debug!("rendering {} points at {}x{} px", curve.len(), width, height);

    let font_px = style.points_to_pixels(style.font_pt);
    let stroke_px = style.points_to_pixels(style.line_pt).round().max(1.0) as u32;
    // a single point still needs a non-empty x range
    let x_end = (curve.len() as f64).max(2.0);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin((font_px * 1.2) as u32)
        .x_label_area_size((font_px * 2.8) as u32)
        .y_label_area_size((font_px * 4.4) as u32)
        .build_cartesian_2d(1f64..x_end, 0f64..1f64)
        .map_err(render_error)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(style.x_label)
        .y_desc(style.y_label)
        .label_style(("sans-serif", font_px))
        .axis_desc_style(("sans-serif", font_px))
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.1}", y))
        .draw()
        .map_err(render_error)?;

    chart
        .draw_series(LineSeries::new(curve.points(), BLUE.stroke_width(stroke_px)))
        .map_err(render_error)?;

    root.present().map_err(render_error)?;
    Ok(())
}

fn render_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> Error {
    Error::Render(err.to_string())
}

/// Open `path` in the platform's default image viewer and wait for the launcher to return.
///
/// # Errors
///
/// Returns `Error::Display` when the launcher cannot be started and `Error::Viewer` when it
/// reports failure.
pub fn show(path: &Path) -> Result<()> {
    let mut command = viewer_command(path);
    debug!("launching viewer: {:?}", command);
    let status = command.status().map_err(|source| Error::Display {
        path: path.display().to_string(),
        source,
    })?;
    match status.success() {
        true => Ok(()),
        false => Err(Error::Viewer(status)),
    }
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(path);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    }
}
