//! Host integration layer
//!
//! The player never touches a window system or a document tree directly.
//! Everything it needs from its embedding environment goes through
//! [`PlayerHost`]: the mount container, the per-frame scheduling primitive,
//! the two surface signals that drive resizing, and the user-facing message
//! channel.

mod headless;

pub use headless::HeadlessHost;

/// Identifies a rendering surface node attached to the mount container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Identifies a host subscription created by [`PlayerHost::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Host signals that may change the size of the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceSignal {
    /// The host window was resized
    WindowResize,
    /// An attribute of the mount container changed (layout-driven resize)
    ContainerAttributes,
}

/// Services the embedding environment provides to the player
pub trait PlayerHost {
    /// Current origin, used as the default resource server
    fn origin(&self) -> String;

    /// Create the mount container (initially hidden)
    fn create_container(&mut self);

    /// Remove the mount container
    fn remove_container(&mut self);

    /// Container width in pixels
    fn client_width(&self) -> u32;

    /// Container height in pixels
    fn client_height(&self) -> u32;

    /// Show or hide the mount container
    fn set_container_visible(&mut self, visible: bool);

    /// Attach a rendering surface node to the container
    fn attach_surface(&mut self, surface: SurfaceId);

    /// Detach a rendering surface node from the container
    fn detach_surface(&mut self, surface: SurfaceId);

    /// Ask for one frame callback on the next display refresh
    fn request_frame(&mut self);

    /// Start delivering `signal` to the player
    fn subscribe(&mut self, signal: SurfaceSignal) -> SubscriptionId;

    /// Stop a subscription created by [`PlayerHost::subscribe`]
    fn unsubscribe(&mut self, id: SubscriptionId);

    /// Show a message to the user
    fn notify_user(&mut self, message: &str);
}

/// Mountable-surface capability consumed by the host UI layer
pub trait Mountable {
    /// Mount the container and install surface observers (first call only)
    fn render(&mut self);

    /// Remove the container and release surface observers
    fn unmount(&mut self);

    /// Whether `render` has mounted the container
    fn is_mounted(&self) -> bool;
}
