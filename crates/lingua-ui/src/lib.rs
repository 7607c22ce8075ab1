pub mod escape;
pub mod render;
pub mod surfaces;

pub use escape::Markup;
pub use render::DefinitionView;
pub use surfaces::{PanelContent, Surfaces};
