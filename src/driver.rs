//! Frame driver: the continuous redraw loop
//!
//! The loop is an explicit `Running` flag plus a [`CancelToken`] handed to the
//! scheduler with every request. Teardown cancels the pending request and the
//! token in one step, so a tick the host already queued finds the token
//! cancelled and does nothing.

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::rc::Rc;

/// Shared cancellation flag for one mount
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Host primitive that calls back once per display refresh
pub trait FrameScheduler {
    type Handle: Copy + Debug;

    /// Ask for one more tick. `None` means the host refused the request.
    fn request_tick(&mut self, token: &CancelToken) -> Option<Self::Handle>;

    /// Revoke a tick requested earlier
    fn cancel_tick(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    Idle,
    Running,
}

/// Run state of the redraw loop for one mount
#[derive(Debug)]
pub struct FrameDriver<H> {
    phase: DriverPhase,
    pending: Option<H>,
    token: CancelToken,
    frames: u64,
}

impl<H: Copy + Debug> Default for FrameDriver<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy + Debug> FrameDriver<H> {
    pub fn new() -> Self {
        Self {
            phase: DriverPhase::Idle,
            pending: None,
            token: CancelToken::new(),
            frames: 0,
        }
    }

    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == DriverPhase::Running && !self.token.is_cancelled()
    }

    /// Ticks accepted since start
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Enter `Running` and request the first tick.
    ///
    /// A stopped driver stays stopped; remounting means a new driver.
    pub fn start<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) -> bool {
        if self.token.is_cancelled() {
            log::warn!("frame driver already torn down; not restarting");
            return false;
        }
        if self.phase == DriverPhase::Running {
            return true;
        }
        self.phase = DriverPhase::Running;
        self.schedule_next(scheduler);
        true
    }

    /// Accept the tick that just fired. Returns false when the frame must not run.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        if !self.is_running() {
            return false;
        }
        self.frames += 1;
        true
    }

    /// Request the following tick, unless torn down
    pub fn schedule_next<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if !self.is_running() || self.pending.is_some() {
            return;
        }
        self.pending = scheduler.request_tick(&self.token);
        if self.pending.is_none() {
            log::warn!("scheduler refused next frame; animation halted");
        }
    }

    /// Cancel the pending tick and stop for good. Safe to call repeatedly.
    pub fn stop<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_tick(handle);
        }
        self.token.cancel();
        self.phase = DriverPhase::Idle;
    }
}

/// Scheduler driven by hand: each [`ManualScheduler::advance`] is one display refresh.
///
/// Backs the headless preview and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u32,
    queue: VecDeque<(u32, CancelToken)>,
    cancelled: Vec<u32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests waiting to fire
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Handles revoked through [`FrameScheduler::cancel_tick`]
    pub fn cancelled(&self) -> &[u32] {
        &self.cancelled
    }

    /// Fire the oldest request. Returns true when its token was still live,
    /// meaning the caller should run the tick.
    pub fn advance(&mut self) -> bool {
        match self.queue.pop_front() {
            Some((_, token)) => !token.is_cancelled(),
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_tick(&mut self, token: &CancelToken) -> Option<u32> {
        self.next_handle += 1;
        self.queue.push_back((self.next_handle, token.clone()));
        Some(self.next_handle)
    }

    fn cancel_tick(&mut self, handle: u32) {
        self.queue.retain(|(h, _)| *h != handle);
        self.cancelled.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scheduler that refuses every request
    struct Refusing;

    impl FrameScheduler for Refusing {
        type Handle = ();

        fn request_tick(&mut self, _token: &CancelToken) -> Option<()> {
            None
        }

        fn cancel_tick(&mut self, _handle: ()) {}
    }

    #[test]
    fn test_start_requests_one_tick() {
        let mut sched = ManualScheduler::new();
        let mut driver = FrameDriver::new();
        assert_eq!(driver.phase(), DriverPhase::Idle);

        assert!(driver.start(&mut sched));
        assert!(driver.is_running());
        assert_eq!(sched.pending(), 1);

        // Starting twice does not double-schedule
        assert!(driver.start(&mut sched));
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn test_frame_cycle() {
        let mut sched = ManualScheduler::new();
        let mut driver = FrameDriver::new();
        driver.start(&mut sched);

        for expected in 1..=3 {
            assert!(sched.advance());
            assert!(driver.begin_frame());
            driver.schedule_next(&mut sched);
            assert_eq!(driver.frames(), expected);
            assert_eq!(sched.pending(), 1);
        }
    }

    #[test]
    fn test_stop_revokes_pending_and_is_idempotent() {
        let mut sched = ManualScheduler::new();
        let mut driver = FrameDriver::new();
        driver.start(&mut sched);

        driver.stop(&mut sched);
        driver.stop(&mut sched);
        assert_eq!(driver.phase(), DriverPhase::Idle);
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.cancelled(), &[1]);
        assert!(!driver.begin_frame());

        driver.schedule_next(&mut sched);
        assert_eq!(sched.pending(), 0);
        assert!(!driver.start(&mut sched));
    }

    #[test]
    fn test_tick_already_queued_sees_cancelled_token() {
        let mut sched = ManualScheduler::new();
        let mut driver = FrameDriver::new();
        driver.start(&mut sched);

        // Simulate the host having dequeued the callback before teardown
        let token = driver.token().clone();
        driver.stop(&mut sched);
        assert!(token.is_cancelled());
        assert!(!sched.advance());
    }

    #[test]
    fn test_refused_request_leaves_no_pending() {
        let mut driver: FrameDriver<()> = FrameDriver::new();
        assert!(driver.start(&mut Refusing));
        assert!(!driver.has_pending());
        assert!(driver.is_running());
    }
}
