//! Presentation Layer
//!
//! This layer handles:
//! - Creating use cases with infrastructure dependencies
//!
//! ## Usage
//!
//! ```ignore
//! use stackdev::presentation::factory;
//!
//! let components = factory::create_dev_components(&root, &config, sink, SynthMode::Dev)?;
//! components.dev_loop.run(&running)?;
//! ```

pub mod factory;

pub use factory::{create_dev_components, resolve_root, DevComponents};
