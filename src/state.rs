#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SliderState {
    Uninitialized, // Nothing requested yet
    Loading,       // Preloading, no slide displayed yet
    Idle,          // A slide is current and still
    Transitioning, // Cross-fading between two slides
}
