mod index_space;
mod scheduler;
mod scroll_animation;

pub use index_space::{IndexSpace, LoopStrategy, SettledSlot, wrap_index};
pub use scheduler::{AutoAdvanceScheduler, ManualScheduler, TimerHandle};
pub use scroll_animation::{ScrollAnimation, ease_out_cubic};

use serde::{Deserialize, Serialize};

/// Who currently owns the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselMode {
    /// No timer armed; nothing moves unless the user scrolls.
    Idle,
    /// The auto-advance timer is armed.
    AutoAdvancing,
    /// Timer disarmed; the user's drag drives the offset.
    UserDragging,
}

/// Scroll request issued by the controller to its scroll surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollCommand {
    pub offset: f64,
    pub animated: bool,
}
