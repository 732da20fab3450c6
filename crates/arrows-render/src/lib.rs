pub mod hit;
pub mod layout;
pub mod text;
pub mod visual;

pub use hit::{Hit, VisualGraph};
pub use layout::{GraphLayout, StraightLayout};
pub use text::{MeasureText, text_bounds, text_size};
pub use visual::{RoutedRelationship, VisualNode};
