use std::fmt;

use serde::{Deserialize, Serialize};

use crate::focal::FocalPoint;
use crate::placement::{compute_placement, Rect, Size};
use crate::surface::SlideImage;

/// Stable identity of a slide, unaffected by re-indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideId(pub u64);

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the caller asks for: an image source and where its subject sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub src: String,
    pub focus: FocalPoint,
}

impl SlideSpec {
    pub fn new(src: impl Into<String>, focus: FocalPoint) -> Self {
        Self { src: src.into(), focus }
    }
}

#[derive(Debug)]
pub enum LoadState<I> {
    Unloaded,
    Loading,
    Loaded(I),
    Failed,
}

pub struct Slide<I> {
    pub id: SlideId,
    pub index: usize,
    pub source: String,
    pub focus: FocalPoint,
    pub state: LoadState<I>,
}

impl<I> Slide<I> {
    pub fn new(id: SlideId, index: usize, spec: SlideSpec) -> Self {
        Self {
            id,
            index,
            source: spec.src,
            focus: spec.focus,
            state: LoadState::Unloaded,
        }
    }

    pub fn image(&self) -> Option<&I> {
        match &self.state {
            LoadState::Loaded(image) => Some(image),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed)
    }

    pub fn spec(&self) -> SlideSpec {
        SlideSpec::new(self.source.clone(), self.focus)
    }
}

impl<I: SlideImage> Slide<I> {
    /// Cover-fit destination for this slide on a surface of `canvas` size.
    /// `None` until the image has loaded.
    pub fn placement(&self, canvas: Size) -> Option<Rect> {
        self.image()
            .map(|image| compute_placement(image.size(), canvas, self.focus))
    }
}

impl<I> fmt::Debug for Slide<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            LoadState::Unloaded => "unloaded",
            LoadState::Loading => "loading",
            LoadState::Loaded(_) => "loaded",
            LoadState::Failed => "failed",
        };
        f.debug_struct("Slide")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("source", &self.source)
            .field("focus", &self.focus)
            .field("state", &state)
            .finish()
    }
}
