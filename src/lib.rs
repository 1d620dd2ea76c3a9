//! ide-config library
//!
//! Core functionality for generating IDE configuration for CMake and ROS
//! packages: manifest scanning, workspace resolution and Qt Creator
//! project-file rendering.

pub mod cmake;
pub mod config;
pub mod qtcreator;
pub mod ros;
