pub mod color;
pub mod error;
pub mod geometry;
pub mod mode;
pub mod model;
pub mod refresh;
pub mod selection;

pub use color::Rgba;
pub use error::{Error, Result};
pub use geometry::{Geometry, Position};
pub use mode::Mode;
pub use model::*;
pub use refresh::Refresh;
pub use selection::{is_feature_selected, selected_features};
