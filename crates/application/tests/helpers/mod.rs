#![allow(dead_code)]

pub mod mock_hooks;
pub mod mock_router;

pub use mock_hooks::MockHook;
pub use mock_router::MockRouterApi;
