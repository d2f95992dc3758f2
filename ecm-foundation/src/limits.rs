//! Platform-specific limits for the statically composed object graph.
//!
//! Every registry in the model is a fixed-capacity inline collection. These
//! limits size them. Different platform profiles are supported via feature
//! flags:
//!
//! - `embedded-small`: MCU targets with ~64KB RAM
//! - `embedded-medium`: Embedded Linux with ~1MB RAM
//! - Default: host builds and tests
//!
//! # Usage
//!
//! ```rust
//! use ecm_foundation::limits;
//!
//! assert!(limits::MAX_FIELDS_PER_PART >= 8);
//! ```

/// Platform profile for embedded microcontrollers (~64KB RAM)
#[cfg(feature = "embedded-small")]
pub mod platform {
    /// Maximum declared classes in one composition
    pub const MAX_CLASSES: usize = 16;

    /// Maximum declared interfaces in one composition
    pub const MAX_INTERFACES: usize = 8;

    /// Maximum fields in one const or var part, inherited fields included
    pub const MAX_FIELDS_PER_PART: usize = 8;

    /// Maximum operations in one dispatch contract
    pub const MAX_OPERATIONS: usize = 8;

    /// Maximum late-bound slots (associations, event slots, forwarders)
    pub const MAX_SLOTS: usize = 32;

    /// Maximum vtables checked by one composition root
    pub const MAX_VTABLES: usize = 16;

    /// Maximum receivers on one event forwarder
    pub const MAX_RECEIVERS: usize = 4;
}

/// Platform profile for embedded Linux (~1MB RAM)
#[cfg(all(feature = "embedded-medium", not(feature = "embedded-small")))]
pub mod platform {
    /// Maximum declared classes in one composition
    pub const MAX_CLASSES: usize = 32;

    /// Maximum declared interfaces in one composition
    pub const MAX_INTERFACES: usize = 16;

    /// Maximum fields in one const or var part, inherited fields included
    pub const MAX_FIELDS_PER_PART: usize = 16;

    /// Maximum operations in one dispatch contract
    pub const MAX_OPERATIONS: usize = 16;

    /// Maximum late-bound slots (associations, event slots, forwarders)
    pub const MAX_SLOTS: usize = 128;

    /// Maximum vtables checked by one composition root
    pub const MAX_VTABLES: usize = 64;

    /// Maximum receivers on one event forwarder
    pub const MAX_RECEIVERS: usize = 8;
}

/// Default profile for host builds
#[cfg(not(any(feature = "embedded-small", feature = "embedded-medium")))]
pub mod platform {
    /// Maximum declared classes in one composition
    pub const MAX_CLASSES: usize = 64;

    /// Maximum declared interfaces in one composition
    pub const MAX_INTERFACES: usize = 32;

    /// Maximum fields in one const or var part, inherited fields included
    pub const MAX_FIELDS_PER_PART: usize = 16;

    /// Maximum operations in one dispatch contract
    pub const MAX_OPERATIONS: usize = 32;

    /// Maximum late-bound slots (associations, event slots, forwarders)
    pub const MAX_SLOTS: usize = 256;

    /// Maximum vtables checked by one composition root
    pub const MAX_VTABLES: usize = 128;

    /// Maximum receivers on one event forwarder
    pub const MAX_RECEIVERS: usize = 16;
}

pub use platform::*;

// Inherited fields count against MAX_FIELDS_PER_PART, so a usable class
// hierarchy needs room for more than a couple of fields per level.
const _: () = assert!(MAX_FIELDS_PER_PART >= 8);
const _: () = assert!(MAX_RECEIVERS >= 2);
