mod barrage;
mod caption_overlay;
mod fullscreen_controls;
mod player_frame;
mod progress;
mod reaction_wall;

pub use barrage::BarrageOverlay;
pub use caption_overlay::CaptionOverlay;
pub use fullscreen_controls::{FullscreenControls, VIDEO_WRAPPER_ID};
pub use player_frame::PlayerFrame;
pub use progress::ProgressControls;
pub use reaction_wall::ReactionWall;
