//! Typed docker-compose model.

mod block;
mod manifest;

pub use block::{
    Command, Environment, Healthcheck, Logging, LoggingOptions, PortMapping, RestartPolicy, Route,
    RouteTarget, ServiceBlock, VolumeMount,
};
pub use manifest::{ComposeManifest, render_fragment};
