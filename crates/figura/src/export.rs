//! Export backends for headless rendering.

pub mod svg;

pub use svg::SvgSurface;
