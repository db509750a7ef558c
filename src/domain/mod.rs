pub mod color;
pub mod input_source;
pub mod raster_image;
pub mod template_png;
pub mod template_recolor;
