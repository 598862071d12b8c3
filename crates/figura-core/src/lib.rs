//! Figura Core Types and Definitions
//!
//! This crate provides the foundational types for the Figura interactive
//! diagram system. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: 2D point math and curve evaluators ([`geometry`] module)
//! - **Scene**: The entity model and scene graph ([`scene`] module)
//! - **Interaction**: The point drag state machine ([`interact`] module)
//! - **Surface**: The drawing and text capabilities consumed by the scene
//!   graph ([`surface`] and [`text`] modules)

pub mod color;
pub mod geometry;
pub mod interact;
pub mod scene;
pub mod surface;
pub mod text;
