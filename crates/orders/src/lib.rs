//! Top-level facade crate for the orders service.
//!
//! Re-exports the common library and the service so users can depend on a single crate.

pub mod common {
    pub use orders_common::*;
}

pub mod service {
    pub use orders_service::*;
}
