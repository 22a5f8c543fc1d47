//! Multilingual MSI packaging.
//!
//! Starting from a build directory that holds the base-culture installer
//! (`<build>/en-us/<package>.msi`), [`packager::Packager`] makes a master copy
//! (`<build>/Master/<package>.msi`) and runs the external transform tool on it
//! once per configured culture, in order.

pub mod anchor;
pub mod commands;
pub mod core;
pub mod packager;
pub mod transform;
pub mod utils;
