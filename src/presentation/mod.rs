pub mod export;
pub mod surface;

pub use surface::{PresentationSurface, SurfaceContent, NO_FILE_CHOSEN};
