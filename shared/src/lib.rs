pub mod classes;
pub mod colors;
pub mod error;
pub mod interaction;
pub mod join;
pub mod legend;
pub mod model;
pub mod path;
pub mod scale;
pub mod stats;
pub mod theme;
pub mod topology;

pub use colors::Rgb;
pub use error::{MapError, TopologyError};
pub use interaction::{Input, MapSession, Modifiers, Reaction, Target, VisualState};
pub use join::CombinedRegion;
pub use model::{MapModel, load_together};
pub use stats::RegionStatistic;
pub use theme::{ColorTheme, ThemeCycle};
pub use topology::{RegionGeometry, Shape, Topology};
