//! Surface controller: one mounted backdrop
//!
//! Owns the surface, the animation state and the frame driver for a single
//! mount. The host calls [`Backdrop::on_tick`] from its refresh callback and
//! [`Backdrop::on_resize`] from its resize listener.

use crate::config::{SurfaceConfig, Variant};
use crate::driver::{FrameDriver, FrameScheduler};
use crate::renderer::{DrawSurface, FrameStats, render_frame};
use crate::sim::{SurfaceState, Viewport, tick};

pub struct Backdrop<D, H> {
    state: SurfaceState,
    surface: Option<D>,
    driver: FrameDriver<H>,
    last_frame: Option<FrameStats>,
}

impl<D: DrawSurface, H: Copy + std::fmt::Debug> Backdrop<D, H> {
    /// Size the surface, seed the pool and start the redraw loop
    pub fn mount<S: FrameScheduler<Handle = H>>(
        config: &SurfaceConfig,
        surface: D,
        viewport: Viewport,
        scheduler: &mut S,
    ) -> Self {
        Self::start(SurfaceState::new(config, viewport), surface, scheduler)
    }

    /// [`Backdrop::mount`] with a fixed RNG seed
    pub fn mount_seeded<S: FrameScheduler<Handle = H>>(
        config: &SurfaceConfig,
        surface: D,
        viewport: Viewport,
        seed: u64,
        scheduler: &mut S,
    ) -> Self {
        Self::start(SurfaceState::with_seed(config, viewport, seed), surface, scheduler)
    }

    fn start<S: FrameScheduler<Handle = H>>(
        state: SurfaceState,
        mut surface: D,
        scheduler: &mut S,
    ) -> Self {
        surface.resize(state.viewport);
        log::info!(
            "mounted {} backdrop: {} entities on {}x{}",
            state.variant().as_str(),
            state.entity_count(),
            state.viewport.width,
            state.viewport.height
        );

        let mut backdrop = Self {
            state,
            surface: Some(surface),
            driver: FrameDriver::new(),
            last_frame: None,
        };
        backdrop.driver.start(scheduler);
        backdrop
    }

    /// Adopt the new viewport and reseed; prior entity state is discarded
    pub fn on_resize(&mut self, viewport: Viewport) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(viewport);
        }
        self.state.resize(viewport);
    }

    /// Run one frame (update, then render) and request the next.
    ///
    /// Returns `None` for frames that did not render: after teardown, or while
    /// the surface is detached.
    pub fn on_tick<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) -> Option<FrameStats> {
        if !self.driver.begin_frame() {
            return None;
        }

        let stats = match self.surface.as_mut() {
            Some(surface) => {
                tick(&mut self.state);
                Some(render_frame(&mut self.state.scene, self.state.viewport, surface))
            }
            None => {
                log::debug!("surface unavailable; skipping frame");
                None
            }
        };

        self.driver.schedule_next(scheduler);
        if stats.is_some() {
            self.last_frame = stats;
        }
        stats
    }

    /// Stop the loop and release the surface. Safe to call more than once.
    pub fn unmount<S: FrameScheduler<Handle = H>>(&mut self, scheduler: &mut S) -> Option<D> {
        let was_running = self.driver.is_running();
        self.driver.stop(scheduler);
        if was_running {
            log::info!(
                "unmounted {} backdrop after {} frames",
                self.state.variant().as_str(),
                self.driver.frames()
            );
        }
        self.surface.take()
    }

    /// Take the surface away while the loop keeps running; frames become no-ops
    pub fn detach_surface(&mut self) -> Option<D> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&D> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut D> {
        self.surface.as_mut()
    }

    pub fn state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SurfaceState {
        &mut self.state
    }

    pub fn variant(&self) -> Variant {
        self.state.variant()
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    pub fn frames(&self) -> u64 {
        self.driver.frames()
    }

    /// Stats of the most recent rendered frame
    pub fn last_frame(&self) -> Option<FrameStats> {
        self.last_frame
    }
}
