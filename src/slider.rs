//! The slider controller.
//!
//! `Slider` owns the slide list and every piece of playback state. It does no
//! I/O of its own: loads are handed to the host as [`LoadRequest`]s and fed
//! back through [`Slider::load_finished`], time arrives through
//! [`Slider::advance_clock`], frames through [`Slider::frame`], and pixels
//! leave through a borrowed [`Surface`].
//!
//! Only one load is ever in flight, so slides load strictly in list order.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::SliderOptions;
use crate::error::{LoadError, SliderError};
use crate::focal::FocalPoint;
use crate::slide::{LoadState, Slide, SlideId, SlideSpec};
use crate::state::SliderState;
use crate::surface::{SlideImage, Surface};
use crate::timer::AutoplayTimer;
use crate::transition::Fade;

/// Ask the host to fetch and decode one slide image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: SlideId,
    pub index: usize,
    pub source: String,
}

/// Which slide `show_slide` should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideTarget {
    Index(usize),
    Slide(SlideId),
    Current,
}

/// What a navigation request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Nothing was displayed before; the slide is now current.
    Shown(usize),
    /// A fade from `from` to `to` started.
    Transitioning { from: usize, to: usize },
    /// The target is still loading and will be shown once it arrives.
    Deferred(usize),
    /// The target is already current.
    Unchanged(usize),
    /// Rejected: a fade is running, or there is nothing to navigate from.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(LoadError),
}

/// Passed to slide-loaded observers after each completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideLoaded {
    pub id: SlideId,
    pub index: usize,
    pub outcome: LoadOutcome,
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

type LoadHook = Box<dyn FnMut(&SlideLoaded)>;

pub struct Slider<I> {
    slides: Vec<Slide<I>>,
    options: SliderOptions,
    initialized: bool,
    next_id: u64,

    current: Option<usize>,
    fade: Option<Fade>,
    pending: Option<SlideId>,
    in_flight: Option<SlideId>,

    timer: Option<AutoplayTimer>,
    interval: Duration,
    visible: bool,
    paused: bool,

    redraw: bool,
    hooks: Vec<LoadHook>,
}

impl<I> Slider<I> {
    pub fn new(specs: impl IntoIterator<Item = SlideSpec>, options: SliderOptions) -> Self {
        let mut slider = Self {
            slides: Vec::new(),
            interval: options.slide_duration,
            options,
            initialized: false,
            next_id: 0,
            current: None,
            fade: None,
            pending: None,
            in_flight: None,
            timer: None,
            visible: true,
            paused: false,
            redraw: false,
            hooks: Vec::new(),
        };
        for spec in specs {
            slider.push_slide(spec);
        }
        slider
    }

    /// Begin preloading. Returns the first load to perform, if any.
    pub fn initialize(&mut self) -> Option<LoadRequest> {
        if self.initialized {
            return None;
        }
        self.initialized = true;
        info!("Slider initialized with {} slide(s)", self.slides.len());
        self.next_load()
    }

    /// Record the result of a load and return the next one to perform.
    pub fn load_finished(&mut self, id: SlideId, result: Result<I, LoadError>) -> Option<LoadRequest> {
        if self.in_flight == Some(id) {
            self.in_flight = None;
        }

        let Some(index) = self.position(id) else {
            debug!("Discarding load result for removed slide {}", id);
            return self.next_load();
        };

        let outcome = match result {
            Ok(image) => {
                debug!("Slide {} loaded: {}", index, self.slides[index].source);
                self.slides[index].state = LoadState::Loaded(image);
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!("Skipping slide {}: {}", index, e);
                self.slides[index].state = LoadState::Failed;
                LoadOutcome::Failed(e)
            }
        };

        let event = SlideLoaded { id, index, outcome };
        for hook in self.hooks.iter_mut() {
            hook(&event);
        }

        let was_pending = self.pending == Some(id);
        if was_pending {
            self.pending = None;
        }
        if event.outcome == LoadOutcome::Loaded && self.fade.is_none() {
            if self.current.is_none() {
                self.display_first(index);
            } else if was_pending {
                if let Err(e) = self.navigate_to(index) {
                    warn!("Deferred display of slide {} failed: {}", index, e);
                }
            }
        }

        self.next_load()
    }

    /// Display a slide. With nothing on screen the slide appears at once,
    /// otherwise a fade starts. Rejected while a fade is running.
    pub fn show_slide(&mut self, target: SlideTarget) -> Result<Navigation, SliderError> {
        if self.fade.is_some() {
            debug!("Ignoring {:?} during transition", target);
            return Ok(Navigation::Ignored);
        }

        let index = match target {
            SlideTarget::Index(index) => {
                if index >= self.slides.len() {
                    return Err(SliderError::IndexOutOfRange {
                        index,
                        len: self.slides.len(),
                    });
                }
                index
            }
            SlideTarget::Slide(id) => self.position(id).ok_or(SliderError::UnknownSlide(id.0))?,
            SlideTarget::Current => {
                let index = self.current.ok_or(SliderError::NoCurrentSlide)?;
                self.redraw = true;
                return Ok(Navigation::Unchanged(index));
            }
        };

        self.navigate_to(index)
    }

    pub fn next(&mut self) -> Navigation {
        self.advance(Direction::Forward)
    }

    pub fn previous(&mut self) -> Navigation {
        self.advance(Direction::Backward)
    }

    /// Step the running fade by one frame. Returns `true` when the surface
    /// needs to be drawn this frame.
    pub fn frame(&mut self) -> bool {
        let Some(fade) = self.fade.as_mut() else {
            return self.redraw;
        };

        if fade.step() {
            let to = fade.to;
            self.fade = None;
            self.current = Some(to);
            self.redraw = true;
            if let Some(timer) = self.timer.as_mut() {
                timer.reset();
            }
            debug!("Transition complete, current slide {}", to);
        }
        true
    }

    /// Feed elapsed wall-clock time to the autoplay timer.
    pub fn advance_clock(&mut self, dt: Duration) -> Option<Navigation> {
        let fired = self.timer.as_mut().is_some_and(|timer| timer.tick(dt));
        if fired {
            Some(self.next())
        } else {
            None
        }
    }

    /// Start autoplay, replacing any running timer. `None` reuses the last
    /// interval.
    pub fn start(&mut self, interval: Option<Duration>) {
        if let Some(interval) = interval {
            self.interval = interval;
        }
        if !self.visible {
            self.timer = None;
            self.paused = true;
            debug!("Autoplay deferred until visible");
            return;
        }
        self.timer = Some(AutoplayTimer::new(self.interval));
        debug!("Autoplay started, interval {:?}", self.interval);
    }

    /// Stop autoplay. A running fade still finishes.
    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            debug!("Autoplay stopped");
        }
        self.paused = false;
    }

    pub fn restart(&mut self) {
        self.stop();
        self.start(None);
    }

    /// Pause autoplay while hidden and resume it, same interval, on return.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if !visible {
            if self.timer.take().is_some() {
                self.paused = true;
                info!("Autoplay paused while hidden");
            }
        } else if self.paused {
            self.paused = false;
            info!("Autoplay resumed");
            self.start(None);
        }
    }

    /// The surface changed size. Redraws unless a fade will do it anyway.
    pub fn surface_resized(&mut self) -> bool {
        if self.fade.is_some() {
            return false;
        }
        self.redraw = true;
        true
    }

    /// Append a slide. Returns a load request when the preloader was idle.
    pub fn add_slide(&mut self, src: impl Into<String>, focus: FocalPoint) -> Option<LoadRequest> {
        self.push_slide(SlideSpec::new(src, focus));
        if self.initialized {
            self.next_load()
        } else {
            None
        }
    }

    /// Remove a slide and close the gap in the indices after it.
    pub fn remove_slide(&mut self, index: usize) -> Result<SlideSpec, SliderError> {
        if index >= self.slides.len() {
            return Err(SliderError::IndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        if let Some(fade) = self.fade {
            if fade.from == index || fade.to == index {
                return Err(SliderError::SlideInTransition(index));
            }
        }

        let removed = self.slides.remove(index);
        for (i, slide) in self.slides.iter_mut().enumerate().skip(index) {
            slide.index = i;
        }

        if self.pending == Some(removed.id) {
            self.pending = None;
        }
        if let Some(fade) = self.fade.as_mut() {
            if fade.from > index {
                fade.from -= 1;
            }
            if fade.to > index {
                fade.to -= 1;
            }
        }
        match self.current {
            Some(current) if current == index => {
                self.current = self.first_loaded_from(index);
                self.redraw = true;
            }
            Some(current) if current > index => self.current = Some(current - 1),
            _ => {}
        }

        debug!("Removed slide {} ({})", index, removed.source);
        Ok(removed.spec())
    }

    /// Register an observer called after every completed load.
    pub fn on_slide_loaded(&mut self, hook: impl FnMut(&SlideLoaded) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn state(&self) -> SliderState {
        if !self.initialized {
            SliderState::Uninitialized
        } else if self.fade.is_some() {
            SliderState::Transitioning
        } else if self.current.is_some() {
            SliderState::Idle
        } else {
            SliderState::Loading
        }
    }

    pub fn slides(&self) -> &[Slide<I>] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide<I>> {
        self.current.map(|index| &self.slides[index])
    }

    pub fn fade(&self) -> Option<&Fade> {
        self.fade.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.fade.is_some()
    }

    pub fn pending(&self) -> Option<SlideId> {
        self.pending
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    pub fn is_autoplaying(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw || self.fade.is_some()
    }

    fn push_slide(&mut self, spec: SlideSpec) {
        let id = SlideId(self.next_id);
        self.next_id += 1;
        let index = self.slides.len();
        self.slides.push(Slide::new(id, index, spec));
    }

    fn position(&self, id: SlideId) -> Option<usize> {
        self.slides.iter().position(|slide| slide.id == id)
    }

    fn next_load(&mut self) -> Option<LoadRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let slide = self
            .slides
            .iter_mut()
            .find(|slide| matches!(slide.state, LoadState::Unloaded))?;
        slide.state = LoadState::Loading;
        self.in_flight = Some(slide.id);
        debug!("Loading slide {}: {}", slide.index, slide.source);
        Some(LoadRequest {
            id: slide.id,
            index: slide.index,
            source: slide.source.clone(),
        })
    }

    fn display_first(&mut self, index: usize) {
        info!("Showing first slide {}: {}", index, self.slides[index].source);
        self.current = Some(index);
        self.redraw = true;
        if self.options.auto_play && self.timer.is_none() && !self.paused {
            self.start(None);
        }
    }

    fn advance(&mut self, direction: Direction) -> Navigation {
        if self.fade.is_some() {
            debug!("Ignoring navigation during transition");
            return Navigation::Ignored;
        }
        let Some(current) = self.current else {
            return Navigation::Ignored;
        };
        match self.neighbour(current, direction) {
            Some(target) => self.navigate_to(target).unwrap_or(Navigation::Ignored),
            None => Navigation::Unchanged(current),
        }
    }

    /// Nearest slide in `direction`, wrapping around and skipping slides that
    /// failed to load.
    fn neighbour(&self, from: usize, direction: Direction) -> Option<usize> {
        let len = self.slides.len();
        (1..len)
            .map(|step| match direction {
                Direction::Forward => (from + step) % len,
                Direction::Backward => (from + len - step) % len,
            })
            .find(|&index| !self.slides[index].is_failed())
    }

    fn first_loaded_from(&self, start: usize) -> Option<usize> {
        let len = self.slides.len();
        (0..len)
            .map(|step| (start + step) % len)
            .find(|&index| self.slides[index].is_loaded())
    }

    fn navigate_to(&mut self, index: usize) -> Result<Navigation, SliderError> {
        let slide = &self.slides[index];
        if slide.is_failed() {
            return Err(SliderError::SlideFailed(index));
        }
        if !slide.is_loaded() {
            debug!("Slide {} not loaded yet, deferring", index);
            self.pending = Some(slide.id);
            return Ok(Navigation::Deferred(index));
        }
        self.pending = None;

        match self.current {
            None => {
                self.display_first(index);
                Ok(Navigation::Shown(index))
            }
            Some(current) if current == index => Ok(Navigation::Unchanged(index)),
            Some(current) => {
                debug!("Transition {} -> {}", current, index);
                self.fade = Some(Fade::new(current, index));
                self.redraw = true;
                Ok(Navigation::Transitioning {
                    from: current,
                    to: index,
                })
            }
        }
    }
}

impl<I: SlideImage> Slider<I> {
    /// Draw the current slide, or both slides of a running fade.
    pub fn render<S: Surface<Image = I>>(&mut self, surface: &mut S) {
        surface.clear();
        match self.fade {
            Some(fade) => {
                self.draw_slide(surface, fade.from, fade.outgoing_alpha());
                self.draw_slide(surface, fade.to, fade.incoming_alpha());
            }
            None => {
                if let Some(current) = self.current {
                    self.draw_slide(surface, current, 1.0);
                }
            }
        }
        self.redraw = false;
    }

    fn draw_slide<S: Surface<Image = I>>(&self, surface: &mut S, index: usize, alpha: f32) {
        let slide = &self.slides[index];
        let (Some(image), Some(rect)) = (slide.image(), slide.placement(surface.size())) else {
            return;
        };
        if !rect.is_empty() {
            surface.draw_image(image, rect, alpha);
        }
    }
}
