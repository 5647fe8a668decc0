//! Scrollstory is a headless implementation of a scroll-driven product story view.
//!
//! A pinned strip of full-viewport sections travels horizontally as the page scrolls, its
//! text blocks fade in once, an SVG outline morphs with scroll progress, a vector animation
//! loops on the wall clock and a lit torus knot rotates in a canvas behind the content.
//! Text is shaped with Parley from bundled DejaVu Sans faces.
//!
//! - Create a [`Host`] (viewport, scroll offset, clock, listeners, frame queue, surfaces)
//! - Load a [`StoryConfig`] and [`StoryAssets`]
//! - [`ProductStory::mount`] the view, drive the host, read a [`StorySnapshot`] or render a
//!   [`FrameRGBA`]
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod assets;
pub mod config;
pub mod host;
pub mod morph;
pub mod render;
pub mod scene3d;
pub mod scroll;
pub mod story;
pub mod vector;

pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, RgbColor, Rgba8Premul, Vec2, Viewport,
};
pub use crate::foundation::error::{StoryError, StoryResult};

pub use crate::assets::store::{MorphPaths, StoryAssets, StoryFonts};
pub use crate::config::model::StoryConfig;
pub use crate::host::{Host, ListenerGuard, SurfaceLease, WeakHost};
pub use crate::render::compose::FrameRGBA;
pub use crate::story::component::{MountedStory, ProductStory, StorySnapshot};
