//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `modforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `CommandRunner`: External process execution (the Go toolchain)
//!   - `RepositoryCloner`: Fetching template repositories
//!   - `ProjectRenderer`: Turning descriptor fragments into source files
//!   - `ProgressReporter`: Stage notifications for the user interface
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, Filesystem, NoopProgress, ProgressReporter, ProjectRenderer,
    RepositoryCloner,
};

#[cfg(test)]
pub use output::MockCommandRunner;
