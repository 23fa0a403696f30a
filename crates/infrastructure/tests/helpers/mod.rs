pub mod mock_node;

pub use mock_node::*;
