//! Transport connectors
//!
//! Registered in the container's connector chain in this order by the
//! default bootstrap:
//!
//! | Connector | Claims | Records into |
//! |-----------|--------|--------------|
//! | [`RmiConnector`] | `Capability::REMOTE` | [`RmiEndpointTable`] |
//! | [`RestConnector`] | `Capability::PATH` | [`RestResourceTable`] |
//! | [`RemoteClientConnector`] | `Capability::REMOTE_CLIENT` | - |

pub mod remote_client;
pub mod rest;
pub mod rmi;

pub use remote_client::RemoteClientConnector;
pub use rest::{RestConnector, RestResource, RestResourceTable, RestRoute};
pub use rmi::{RmiConnector, RmiEndpoint, RmiEndpointTable};
