// A software "acrylic" backdrop — the translucent frosted-glass look behind
// a frameless window — plus the interaction layer that makes such a window
// usable: drag-move, edge-resize, snap, maximize and mini mode.
//
// The blur is a three-pass box approximation of a gaussian running on raw
// BGRA buffers; the OS compositor, screen capture and host window are
// collaborators behind small traits. Everything runs synchronously on the
// host's UI thread.

pub mod blur;
pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod interaction;
pub mod mini;
pub mod pixel;
pub mod resize;
pub mod snap;

pub use blur::{Axis, BlurConfig, box_blur_pass, gaussian_blur};
pub use compositor::{
    AccelProbe, BackdropCompositor, BackdropSource, DirtyRegionSet, NoAccel, RenderMode,
    TintState,
};
pub use config::EffectConfig;
pub use error::Error;
pub use geometry::{Point, Rect};
pub use interaction::{PointerUpdate, ScreenGeometry, WindowInteractionController};
pub use mini::{MiniModeState, WindowMiniMode};
pub use pixel::{PixelBuffer, Rgba};
pub use resize::{CursorShape, EdgeMask, classify_edge, cursor_for_mask};
pub use snap::{MaximizeState, SnapTarget, snap_at_press, snap_while_dragging};
