//! Geophagia editor core: the session that ties a height field to its mesh,
//! generator presets built from configuration, and OS directory resolution.

pub mod platform;
pub mod presets;
pub mod session;

pub use platform::{APP_NAME, PlatformDirs, PlatformError};
pub use presets::{fractal_generator, multifractal_generator, preview_field, voronoi_generator};
pub use session::{EditorSession, HeightmapFormat, SessionError};
