use crate::input::{EventSource, InputPoller};
use crate::paint::palette;
use crate::script::{CallOutcome, ScriptError, ScriptHost};
use crate::sim::{ScriptDraw, SharedStage};
use crate::time::{Clock, FramePacer, SystemClock};

use super::{AppControl, CallbackErrorPolicy, EngineError, RunState, Surface};

/// Arguments passed to `make_rect` every render phase.
pub const MAKE_RECT_ARGS: [f64; 4] = [10.0, 10.0, 100.0, 100.0];

/// What a finished run did.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RunSummary {
    /// Frames that completed their render phase.
    pub frames: u64,
    /// Input events taken from the surface, signals included.
    pub events: u64,
    /// Callback failures observed, whatever the policy did with them.
    pub callback_errors: u64,
    /// Input events lost to a full buffer.
    pub dropped_events: u64,
}

/// Owns every piece of per-run state and sequences the frame phases.
///
/// Each iteration runs input, update and render strictly in that order. A quit
/// signal ends the loop before update; the surface is shut down exactly once
/// however the loop ends.
pub struct FrameDriver<S, C = SystemClock> {
    surface: S,
    script: ScriptHost,
    stage: SharedStage,
    pacer: FramePacer<C>,
    poller: InputPoller,
    on_callback_error: CallbackErrorPolicy,

    state: RunState,
    frames: u64,
    callback_errors: u64,
    last_error: Option<String>,
    reported_missing: Vec<&'static str>,
}

impl<S, C> FrameDriver<S, C>
where
    S: Surface + EventSource,
    C: Clock,
{
    pub fn new(
        surface: S,
        script: ScriptHost,
        stage: SharedStage,
        pacer: FramePacer<C>,
        poller: InputPoller,
        on_callback_error: CallbackErrorPolicy,
    ) -> Self {
        Self {
            surface,
            script,
            stage,
            pacer,
            poller,
            on_callback_error,
            state: RunState::Stopped,
            frames: 0,
            callback_errors: 0,
            last_error: None,
            reported_missing: Vec::new(),
        }
    }

    /// Runs frames until a quit signal or a fatal error.
    pub fn run(mut self) -> Result<RunSummary, EngineError> {
        self.state = RunState::Running;
        self.pacer.reset();
        log::info!("running {} at {:?} per frame", self.script.name(), self.pacer.budget());

        let mut result = Ok(());
        while self.state == RunState::Running {
            match self.step() {
                Ok(AppControl::Continue) => {}
                Ok(AppControl::Exit) => self.state = RunState::Stopped,
                Err(err) => {
                    self.state = RunState::Stopped;
                    result = Err(err);
                }
            }
        }

        self.surface.shutdown();

        let summary = RunSummary {
            frames: self.frames,
            events: self.poller.consumed(),
            callback_errors: self.callback_errors,
            dropped_events: self.surface.dropped_events(),
        };
        log::info!(
            "stopped after {} frames ({} callback errors)",
            summary.frames,
            summary.callback_errors
        );

        result.map(|()| summary)
    }

    fn step(&mut self) -> Result<AppControl, EngineError> {
        // Input
        if let Some(signal) = self.poller.poll(&mut self.surface) {
            log::info!("{signal:?} received, stopping");
            return Ok(AppControl::Exit);
        }

        // Update
        let ft = self.pacer.wait_next();
        log::trace!("frame {} dt={:.4}", ft.frame_index, ft.dt);

        let outcome = self.script.call_update(ft.dt);
        self.flush_issued();
        self.settle("update", outcome)?;

        // Render
        self.surface.clear(palette::BACKGROUND);
        let player = self.stage.borrow().player.rect();
        self.surface.fill_rect(player, palette::FOREGROUND);

        let [x, y, w, h] = MAKE_RECT_ARGS;
        let outcome = self.script.call_make_rect(x, y, w, h);
        self.flush_issued();
        self.settle("make_rect", outcome)?;

        self.surface.present()?;

        self.frames += 1;
        Ok(AppControl::Continue)
    }

    /// Replays draws issued from script onto the surface.
    fn flush_issued(&mut self) {
        let issued = self.stage.borrow_mut().take_issued();
        for draw in issued {
            match draw {
                ScriptDraw::Outline { x1, y1, x2, y2 } => {
                    self.surface.outline_rect(x1, y1, x2, y2, palette::ACCENT);
                }
            }
        }
    }

    /// Applies the callback error policy to a callback result.
    fn settle(
        &mut self,
        callback: &'static str,
        outcome: Result<CallOutcome, ScriptError>,
    ) -> Result<(), EngineError> {
        let err = match outcome {
            Ok(CallOutcome::Invoked) => return Ok(()),
            Ok(CallOutcome::Missing) => {
                if !self.reported_missing.contains(&callback) {
                    log::info!("{} defines no `{callback}`; skipping it", self.script.name());
                    self.reported_missing.push(callback);
                }
                return Ok(());
            }
            Err(err) => err,
        };
        self.callback_errors += 1;

        match self.on_callback_error {
            CallbackErrorPolicy::Abort => Err(err.into()),
            CallbackErrorPolicy::Log => {
                let message = describe(err);
                if self.last_error.as_deref() == Some(message.as_str()) {
                    log::debug!("{message} (repeated)");
                } else {
                    log::error!("{message}");
                    self.last_error = Some(message);
                }
                Ok(())
            }
        }
    }
}

/// One-line message with every source in the chain.
fn describe(err: ScriptError) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::coords::Rect;
    use crate::core::PresentError;
    use crate::input::{EventPolicy, InputEvent, Key, KeyState};
    use crate::paint::Color;
    use crate::scene::DrawCmd;
    use crate::sim::{Player, Stage};
    use crate::time::{ManualClock, WaitStrategy};

    #[derive(Debug, Default)]
    struct Record {
        current: Vec<DrawCmd>,
        frames: Vec<Vec<DrawCmd>>,
        presented_at: Vec<Instant>,
        clears: usize,
        shutdowns: usize,
    }

    /// Surface that records every call. Quits once its scripted events run dry.
    struct RecordingSurface {
        events: VecDeque<InputEvent>,
        record: Rc<RefCell<Record>>,
        clock: ManualClock,
        fail_present: bool,
    }

    impl EventSource for RecordingSurface {
        fn poll_event(&mut self) -> Option<InputEvent> {
            Some(self.events.pop_front().unwrap_or(InputEvent::Quit))
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _color: Color) {
            let mut record = self.record.borrow_mut();
            record.clears += 1;
            record.current.clear();
        }

        fn draw(&mut self, cmd: DrawCmd) {
            self.record.borrow_mut().current.push(cmd);
        }

        fn present(&mut self) -> Result<(), PresentError> {
            if self.fail_present {
                return Err(PresentError::new("lost"));
            }
            let mut record = self.record.borrow_mut();
            let frame = std::mem::take(&mut record.current);
            record.frames.push(frame);
            record.presented_at.push(self.clock.now());
            Ok(())
        }

        fn shutdown(&mut self) {
            self.record.borrow_mut().shutdowns += 1;
        }
    }

    struct Harness {
        driver: FrameDriver<RecordingSurface, ManualClock>,
        record: Rc<RefCell<Record>>,
        stage: SharedStage,
    }

    fn harness(source: &str, frames: usize, policy: CallbackErrorPolicy) -> Harness {
        let clock = ManualClock::new();
        let record = Rc::new(RefCell::new(Record::default()));
        let stage = Stage::shared();
        let script = ScriptHost::from_source("driver_test.lua", source, &stage).unwrap();

        let surface = RecordingSurface {
            events: std::iter::repeat_n(InputEvent::Focused(true), frames).collect(),
            record: Rc::clone(&record),
            clock: clock.clone(),
            fail_present: false,
        };

        let driver = FrameDriver::new(
            surface,
            script,
            Rc::clone(&stage),
            FramePacer::new(clock, 30, WaitStrategy::Sleep),
            InputPoller::new(EventPolicy::Single),
            policy,
        );

        Harness { driver, record, stage }
    }

    fn player_fill(rect: Rect) -> DrawCmd {
        DrawCmd::fill(rect, palette::FOREGROUND)
    }

    #[test]
    fn quit_before_first_frame_skips_update_and_render() {
        let h = harness(
            "function update(dt) set_player_pos(1, 1) end",
            0,
            CallbackErrorPolicy::Log,
        );
        let summary = h.driver.run().unwrap();

        assert_eq!(summary.frames, 0);
        let record = h.record.borrow();
        assert_eq!(record.clears, 0);
        assert!(record.frames.is_empty());
        assert_eq!(record.shutdowns, 1);
        assert_eq!(h.stage.borrow().player, Player::INITIAL);
    }

    #[test]
    fn escape_stops_the_loop() {
        let mut h = harness("", 2, CallbackErrorPolicy::Log);
        h.driver.surface.events.push_back(InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Pressed,
            repeat: false,
        });
        h.driver.surface.events.push_back(InputEvent::Focused(false));

        let summary = h.driver.run().unwrap();
        assert_eq!(summary.frames, 2);
        assert_eq!(h.record.borrow().shutdowns, 1);
    }

    #[test]
    fn player_moved_in_update_is_drawn_that_frame() {
        let h = harness(
            "function update(dt) set_player_pos(50, 75) end",
            1,
            CallbackErrorPolicy::Log,
        );
        h.driver.run().unwrap();

        let record = h.record.borrow();
        assert_eq!(record.frames, vec![vec![player_fill(Rect::new(50.0, 75.0, 10.0, 10.0))]]);
    }

    #[test]
    fn make_rect_outline_follows_player() {
        let h = harness(
            "function make_rect(x, y, w, h) render_rect(x, y, x + w, y + h) end",
            1,
            CallbackErrorPolicy::Log,
        );
        h.driver.run().unwrap();

        let record = h.record.borrow();
        assert_eq!(
            record.frames[0],
            vec![
                player_fill(Rect::new(20.0, 20.0, 10.0, 10.0)),
                DrawCmd::stroke(Rect::new(10.0, 10.0, 100.0, 100.0), palette::ACCENT),
            ]
        );
    }

    #[test]
    fn reversed_corners_draw_negative_size() {
        let h = harness(
            "function make_rect() render_rect(30, 40, 10, 10) end",
            1,
            CallbackErrorPolicy::Log,
        );
        h.driver.run().unwrap();

        let record = h.record.borrow();
        assert_eq!(
            record.frames[0][1],
            DrawCmd::stroke(Rect::new(30.0, 40.0, -20.0, -30.0), palette::ACCENT)
        );
    }

    #[test]
    fn draws_issued_during_update_are_cleared() {
        let h = harness(
            "function update(dt) render_rect(0, 0, 5, 5) end",
            1,
            CallbackErrorPolicy::Log,
        );
        h.driver.run().unwrap();

        let record = h.record.borrow();
        assert_eq!(record.frames[0], vec![player_fill(Player::INITIAL.rect())]);
    }

    #[test]
    fn frames_are_paced_and_dt_is_reported_in_seconds() {
        let h = harness(
            "function update(dt) set_player_pos(math.floor(dt * 1000 + 0.5), 0) end",
            5,
            CallbackErrorPolicy::Log,
        );
        h.driver.run().unwrap();

        let record = h.record.borrow();
        assert_eq!(record.frames.len(), 5);
        for pair in record.presented_at.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(33));
        }
        for frame in &record.frames {
            let DrawCmd::FillRect(fill) = frame[0] else {
                panic!("expected player fill, got {:?}", frame[0]);
            };
            assert!(fill.rect.origin.x >= 33.0);
        }
    }

    #[test]
    fn log_policy_keeps_running_after_callback_errors() {
        let h = harness("function update(dt) error('broken') end", 3, CallbackErrorPolicy::Log);
        let summary = h.driver.run().unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.callback_errors, 3);
        assert_eq!(h.record.borrow().frames.len(), 3);
    }

    #[test]
    fn bad_bridge_arguments_count_as_callback_errors() {
        let h = harness("function make_rect() render_rect(1, 2) end", 2, CallbackErrorPolicy::Log);
        let summary = h.driver.run().unwrap();

        assert_eq!(summary.frames, 2);
        assert_eq!(summary.callback_errors, 2);
    }

    #[test]
    fn abort_policy_stops_with_the_error() {
        let h = harness("function update(dt) error('broken') end", 3, CallbackErrorPolicy::Abort);
        let err = h.driver.run().unwrap_err();

        assert!(matches!(
            err,
            EngineError::Script(ScriptError::Runtime { ref callback, .. }) if callback == "update"
        ));
        let record = h.record.borrow();
        assert!(record.frames.is_empty());
        assert_eq!(record.shutdowns, 1);
    }

    #[test]
    fn present_failure_is_fatal() {
        let mut h = harness("", 3, CallbackErrorPolicy::Log);
        h.driver.surface.fail_present = true;

        let err = h.driver.run().unwrap_err();
        assert!(matches!(err, EngineError::Present(_)));
        assert_eq!(h.record.borrow().shutdowns, 1);
    }

    #[test]
    fn described_errors_include_sources() {
        let err = ScriptError::Argument {
            callback: "update".into(),
            source: crate::script::ArgumentError::new("set_player_pos", "bad"),
        };
        let message = describe(err);
        assert!(message.contains("update"));
        assert!(message.contains("set_player_pos: bad"));
    }

    #[test]
    fn summary_counts_consumed_events() {
        let h = harness("", 2, CallbackErrorPolicy::Log);
        let summary = h.driver.run().unwrap();

        // Two focus events plus the final quit.
        assert_eq!(summary.events, 3);
        assert_eq!(summary.frames, 2);
    }

    #[test]
    fn missing_callbacks_are_not_errors() {
        let h = harness("x = 1", 3, CallbackErrorPolicy::Abort);
        let summary = h.driver.run().unwrap();

        assert_eq!(summary.callback_errors, 0);
        assert_eq!(summary.frames, 3);
    }
}
