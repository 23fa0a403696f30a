//! Adapters between the NNS resolution core and the outside world: the Neo
//! JSON-RPC node and DNS wire messages.

pub mod dns;
pub mod rpc;
