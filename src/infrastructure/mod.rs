// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_dispatcher;
pub mod json_rpc;
pub mod rpc_source;
pub mod snapshot_source;
pub mod surface_registry;
