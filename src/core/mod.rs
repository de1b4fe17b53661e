pub mod connections;
pub mod load;
pub mod render;
pub mod view;

pub use connections::{group, Connection, PeerReport, RenderModel};
pub use load::{load_interface_view, LoadError};
pub use render::{encode, Encoding, RenderError, Renderer, TemplateGroup};
pub use view::{render_interface_view, render_model, OutputFormat};
