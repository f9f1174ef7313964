//! Infrastructure adapters

mod reqwest_identity;
mod tracing_navigator;

pub use reqwest_identity::ReqwestIdentityApi;
pub use tracing_navigator::TracingNavigator;
