//! Observer trait for diagnostics and visualisation.

use pursuit_behavior::Transition;
use pursuit_core::Tick;

/// Callbacks invoked by [`Sim::step`][crate::Sim::step].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: state printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_transition(&mut self, tick: Tick, tr: Transition, color: &'static str) {
///         println!("{tick}: {} {} -> {} ({color})", tr.agent, tr.from, tr.to);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per agent whose state changed this tick, in ascending
    /// `AgentId` order.  `color` is the diagnostic tint for the new state.
    fn on_transition(&mut self, _tick: Tick, _transition: Transition, _color: &'static str) {}

    /// Called at the end of each tick.  `updated` is the number of agents
    /// whose state machine ran (0 while frozen).
    fn on_tick_end(&mut self, _tick: Tick, _updated: usize) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
