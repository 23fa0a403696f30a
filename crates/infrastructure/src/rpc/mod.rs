pub mod neo_client;
pub mod stack_json;

pub use neo_client::NeoRpcClient;
