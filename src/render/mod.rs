//! Figure rendering and static image export.
//!
//! The renderer is split the same way the figure is:
//!
//! - `style`: the immutable look-and-feel value (colors, fonts, line widths)
//! - `panel`: draws one year's envelope/trend/reference panel
//! - `figure`: stacks panels, builds the shared legend and the footnote
//!
//! Export renders the same figure description twice, once per backend: a
//! bitmap (PNG) at the raster resolution and an SVG at the base geometry.
//! Plotters treats each backend as its own drawing surface, so "two formats"
//! means two draw passes over identical inputs, not a conversion.

pub mod figure;
pub mod panel;
pub mod style;

pub use figure::*;
pub use panel::*;
pub use style::*;

use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::domain::RenderConfig;
use crate::error::AppError;

/// Paths of the two written artifacts.
#[derive(Debug, Clone)]
pub struct ExportedFigure {
    pub raster: PathBuf,
    pub vector: PathBuf,
}

pub(crate) fn draw_err<E: std::error::Error + Send + Sync>(
    e: DrawingAreaErrorKind<E>,
) -> AppError {
    AppError::render(format!("Chart rendering failed: {e}"))
}

/// Render the figure into both artifacts.
///
/// The raster pass draws at `raster_dpi` with all pixel-based style values
/// scaled up accordingly, so fonts and line widths keep their physical size.
/// PNG is written first, then SVG; both are independently regenerable, so no
/// transactional guarantee is attempted.
pub fn export_figure(
    data: &FigureData<'_>,
    config: &RenderConfig,
    style: &StyleConfig,
) -> Result<ExportedFigure, AppError> {
    if !config.out_dir.is_dir() {
        return Err(AppError::write(format!(
            "Output directory '{}' does not exist or is not a directory.",
            config.out_dir.display()
        )));
    }

    let raster = config.out_dir.join(format!("{}.png", config.basename));
    let vector = config.out_dir.join(format!("{}.svg", config.basename));

    {
        let scaled = style.scaled(config.raster_scale());
        let root = BitMapBackend::new(&raster, config.raster_size()).into_drawing_area();
        draw_figure(&root, data, config, &scaled)?;
        root.present().map_err(|e| {
            AppError::write(format!(
                "Failed to write raster artifact '{}': {e}",
                raster.display()
            ))
        })?;
    }

    {
        let root = SVGBackend::new(&vector, config.vector_size()).into_drawing_area();
        draw_figure(&root, data, config, style)?;
        root.present().map_err(|e| {
            AppError::write(format!(
                "Failed to write vector artifact '{}': {e}",
                vector.display()
            ))
        })?;
    }

    Ok(ExportedFigure { raster, vector })
}
