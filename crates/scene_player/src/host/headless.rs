//! Headless host used by the demo binary and the test suite
//!
//! Records every call the player makes so lifecycle invariants can be
//! observed, and queues frame requests and surface signals for an outer
//! loop to pump.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{PlayerHost, SubscriptionId, SurfaceId, SurfaceSignal};

/// In-memory [`PlayerHost`]
#[derive(Debug)]
pub struct HeadlessHost {
    origin: String,
    width: u32,
    height: u32,
    container: bool,
    visible: bool,
    surfaces: HashSet<SurfaceId>,
    detach_count: usize,
    frame_requested: bool,
    frame_requests: usize,
    subscriptions: HashMap<SubscriptionId, SurfaceSignal>,
    next_subscription: u64,
    pending_signals: VecDeque<SurfaceSignal>,
    messages: Vec<String>,
}

impl HeadlessHost {
    /// Create a host with a container of the given size
    pub fn new(origin: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            origin: origin.into(),
            width,
            height,
            container: false,
            visible: false,
            surfaces: HashSet::new(),
            detach_count: 0,
            frame_requested: false,
            frame_requests: 0,
            subscriptions: HashMap::new(),
            next_subscription: 0,
            pending_signals: VecDeque::new(),
            messages: Vec::new(),
        }
    }

    /// Resize the host window, which also changes the container
    pub fn resize_window(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.raise(SurfaceSignal::WindowResize);
    }

    /// Resize the container through layout (e.g. a splitter) only
    pub fn resize_container(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.raise(SurfaceSignal::ContainerAttributes);
    }

    fn raise(&mut self, signal: SurfaceSignal) {
        if self.subscriptions.values().any(|s| *s == signal) {
            self.pending_signals.push_back(signal);
        }
    }

    /// Consume the pending frame request, if any
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Drain surface signals raised since the last call
    pub fn drain_signals(&mut self) -> Vec<SurfaceSignal> {
        self.pending_signals.drain(..).collect()
    }

    /// Whether the container exists
    pub fn has_container(&self) -> bool {
        self.container
    }

    /// Whether the container is visible
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Surfaces currently attached to the container
    pub fn attached_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    /// Total successful detach operations
    pub fn detach_count(&self) -> usize {
        self.detach_count
    }

    /// Total frame requests received
    pub fn frame_requests(&self) -> usize {
        self.frame_requests
    }

    /// Whether a frame request is outstanding
    pub fn frame_pending(&self) -> bool {
        self.frame_requested
    }

    /// Live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Messages shown to the user
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new("http://localhost", 800, 600)
    }
}

impl PlayerHost for HeadlessHost {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn create_container(&mut self) {
        self.container = true;
        self.visible = false;
    }

    fn remove_container(&mut self) {
        self.container = false;
        self.visible = false;
    }

    fn client_width(&self) -> u32 {
        self.width
    }

    fn client_height(&self) -> u32 {
        self.height
    }

    fn set_container_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn attach_surface(&mut self, surface: SurfaceId) {
        self.surfaces.insert(surface);
    }

    fn detach_surface(&mut self, surface: SurfaceId) {
        if self.surfaces.remove(&surface) {
            self.detach_count += 1;
        } else {
            log::warn!("Detach requested for unknown surface {:?}", surface);
        }
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
        self.frame_requests += 1;
    }

    fn subscribe(&mut self, signal: SurfaceSignal) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, signal);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscriptions.remove(&id);
    }

    fn notify_user(&mut self, message: &str) {
        log::info!("[host] {}", message);
        self.messages.push(message.to_string());
    }
}
