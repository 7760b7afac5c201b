//! Frame lifecycle and CPU/GPU synchronization.
//!
//! The harness runs a deliberately simple scheme: one constant-buffer
//! generation, one command stream, and a full GPU stall at the end of every
//! frame.  Because frame N+1's recording never starts until frame N's GPU
//! work is provably complete, the upload regions and encoder can be reused
//! without per-frame multi-buffering.  The stall is the scalability
//! bottleneck, not a correctness hazard.

/// The blocking wait on previously submitted GPU work.
///
/// A seam so the frame loop can be driven in tests without a device.  The
/// real implementation blocks indefinitely; a hung device therefore hangs
/// the frame loop (no timeout, by design).
pub trait GpuWait {
    fn wait_idle(&mut self);
}

/// [`GpuWait`] over a live device: drains all submitted work.
pub struct DeviceWait<'a>(pub &'a wgpu::Device);

impl GpuWait for DeviceWait<'_> {
    fn wait_idle(&mut self) {
        let _ = self.0.poll(wgpu::Maintain::Wait);
    }
}

// ── Lifecycle state machine ───────────────────────────────────────────────

/// Driver states. `Ready ⇄ Rendering` cycles once per frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Uninitialized,
    Initializing,
    Ready,
    Rendering,
    ShuttingDown,
    Terminated,
}

impl FrameState {
    pub fn can_transition_to(self, next: FrameState) -> bool {
        use FrameState::*;
        matches!(
            (self, next),
            (Uninitialized, Initializing)
                | (Initializing, Ready)
                | (Ready, Rendering)
                | (Rendering, Ready)
                | (Ready, ShuttingDown)
                | (ShuttingDown, Terminated)
        )
    }
}

/// Tracks the driver state and rejects out-of-order frame operations.
#[derive(Debug)]
pub struct FrameLifecycle {
    state: FrameState,
}

impl FrameLifecycle {
    pub fn new() -> Self {
        Self {
            state: FrameState::Uninitialized,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Moves to `next`.  Panics on an illegal transition — that is a driver
    /// bug, not a runtime condition.
    pub fn transition(&mut self, next: FrameState) {
        assert!(
            self.state.can_transition_to(next),
            "illegal frame-state transition {:?} -> {:?}",
            self.state,
            next
        );
        self.state = next;
    }
}

impl Default for FrameLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

// ── Fence / back-buffer bookkeeping ───────────────────────────────────────

/// Back-buffer rotation plus the monotonically increasing fence value.
///
/// `finish_frame` performs the end-of-frame sequence: advance the back
/// buffer modulo the buffer count, bump the fence, and stall until the GPU
/// reports idle.  Exactly one wait per frame.
#[derive(Debug)]
pub struct FrameSync {
    buffer_count: u32,
    back_buffer: u32,
    fence_value: u64,
}

impl FrameSync {
    pub fn new(buffer_count: u32) -> Self {
        assert!(buffer_count > 0, "swap chain needs at least one buffer");
        Self {
            buffer_count,
            back_buffer: 0,
            fence_value: 0,
        }
    }

    /// Index of the back buffer the current frame renders into.
    pub fn back_buffer_index(&self) -> u32 {
        self.back_buffer
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }

    /// Fence value of the last completed frame.
    pub fn fence_value(&self) -> u64 {
        self.fence_value
    }

    /// Steps 11–12 of the frame: rotate the back buffer, signal the next
    /// fence value, and block until the GPU has caught up.
    pub fn finish_frame(&mut self, wait: &mut dyn GpuWait) {
        self.back_buffer = (self.back_buffer + 1) % self.buffer_count;
        self.fence_value += 1;
        wait.wait_idle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingWait {
        waits: u32,
    }

    impl GpuWait for CountingWait {
        fn wait_idle(&mut self) {
            self.waits += 1;
        }
    }

    #[test]
    fn back_buffer_cycles_and_waits_once_per_frame() {
        let mut sync = FrameSync::new(2);
        let mut wait = CountingWait { waits: 0 };

        let mut observed = Vec::new();
        for _ in 0..3 {
            observed.push(sync.back_buffer_index());
            sync.finish_frame(&mut wait);
        }

        assert_eq!(observed, vec![0, 1, 0]);
        assert_eq!(wait.waits, 3);
        assert_eq!(sync.fence_value(), 3);
    }

    #[test]
    fn single_buffer_never_rotates() {
        let mut sync = FrameSync::new(1);
        let mut wait = CountingWait { waits: 0 };
        sync.finish_frame(&mut wait);
        sync.finish_frame(&mut wait);
        assert_eq!(sync.back_buffer_index(), 0);
    }

    #[test]
    fn lifecycle_walks_the_full_state_graph() {
        let mut lc = FrameLifecycle::new();
        assert_eq!(lc.state(), FrameState::Uninitialized);
        lc.transition(FrameState::Initializing);
        lc.transition(FrameState::Ready);
        // Two frame ticks.
        lc.transition(FrameState::Rendering);
        lc.transition(FrameState::Ready);
        lc.transition(FrameState::Rendering);
        lc.transition(FrameState::Ready);
        lc.transition(FrameState::ShuttingDown);
        lc.transition(FrameState::Terminated);
    }

    #[test]
    #[should_panic(expected = "illegal frame-state transition")]
    fn rendering_from_uninitialized_is_rejected() {
        let mut lc = FrameLifecycle::new();
        lc.transition(FrameState::Rendering);
    }

    #[test]
    #[should_panic(expected = "illegal frame-state transition")]
    fn nested_rendering_is_rejected() {
        let mut lc = FrameLifecycle::new();
        lc.transition(FrameState::Initializing);
        lc.transition(FrameState::Ready);
        lc.transition(FrameState::Rendering);
        lc.transition(FrameState::Rendering);
    }
}
