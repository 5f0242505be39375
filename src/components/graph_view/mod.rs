mod component;
mod fetch;
mod scene;
mod sim;
mod state;
mod svg;
mod types;

pub use component::GraphView;
pub use fetch::FetchError;
pub use types::{GraphLink, GraphNode, GraphPayload, NodeKind};
