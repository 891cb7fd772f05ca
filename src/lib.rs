//! Generator for two-layer **stencil signs**: a solid base plate and a top plate
//! of the same outline with the text cut through it, so the base colour shows
//! through the letters.
//!
//! The pipeline is
//! [`params`] → [`sizing`] + [`heaviness`] → [`predict`] → [`builder`] → [`io`],
//! driven by [`generator::SignGenerator`].
//!
//! ```no_run
//! use stencil_sign::{GeneratorConfig, SignGenerator, SignRequest};
//!
//! let generator = SignGenerator::new(GeneratorConfig::default());
//! let request = SignRequest { text: "EXIT".into(), ..Default::default() };
//! let sign = generator.generate(&request).expect("valid sign");
//! assert!(sign.layers.top.volume() < sign.layers.base.volume());
//! ```
//!
//! # Features
//! #### Default
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): binary and ASCII `.stl` export
//! - **cli**: the `stencil-sign` command line tool (needs `stl-io`)

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod builder;
pub mod config;
pub mod errors;
pub mod float_types;
pub mod font;
pub mod generator;
pub mod heaviness;
pub mod io;
pub mod kernel;
pub mod mesh;
pub mod params;
pub mod predict;
pub mod sizing;
pub mod sketch;
pub mod triangulated;

pub use builder::GeneratedLayers;
pub use config::GeneratorConfig;
pub use errors::{GenerationError, GenerationFailure, ValidationError};
pub use generator::SignGenerator;
pub use mesh::Mesh;
pub use params::{SignRequest, SignSpec};
