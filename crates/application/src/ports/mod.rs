mod resolution_hook;
mod router_api;

pub use resolution_hook::ResolutionHook;
pub use router_api::RouterApi;
