pub mod cli;
pub mod configs;
pub mod environment;
pub mod error;
pub mod loader;
pub mod store;

pub use environment::{Environment, InMemoryEnvironment, ProcessEnvironment};
pub use error::LoaderError;
#[allow(deprecated)]
pub use loader::{
    LoadReport, PathEnvironmentLoader, load, load_blocking, normalize_path, parse,
};
pub use store::{
    Parameter, ParameterPage, ParameterStore, ParametersByPathRequest,
    adapters::{local_store::LocalParameterStore, ssm_store::SsmParameterStore},
};
