use std::sync::Arc;

use tiny_skia::Pixmap;
use usvg::{Tree, fontdb};

use crate::errors::{FlightMapError, Result};

/// usvg options with the system fonts loaded, built once and shared.
pub fn usvg_options() -> usvg::Options<'static> {
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    let mut usvg_options = usvg::Options::default();
    usvg_options.fontdb = Arc::new(fontdb);
    usvg_options
}

pub fn svg_to_png(svg: &str, opt: &usvg::Options) -> Result<Vec<u8>> {
    let tree =
        Tree::from_str(svg, opt).map_err(|e| FlightMapError::RenderError(format!("parsing svg: {}", e)))?;

    let pixmap_size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(pixmap_size.width(), pixmap_size.height())
        .ok_or_else(|| FlightMapError::RenderError(format!("invalid image size {:?}", pixmap_size)))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| FlightMapError::RenderError(format!("encoding png: {}", e)))
}
