use crate::consts::{DOUBLE_TAP_WINDOW_MS, WHEEL_COMMIT_DELAY_MS};
use crate::geometry::{PointerSample, coordinate_to_value};
use crate::model::{InitialValue, KnobConfig, ValueModel};
use crate::state::{Button, DragSource, Interaction, Phase, TouchState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Deferred callbacks the host schedules on behalf of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Closes the double-tap window.
    DoubleTap,
    /// Commits the value after a burst of wheel ticks.
    WheelCommit,
}

impl Timer {
    #[must_use]
    pub fn millis(self) -> u32 {
        match self {
            Self::DoubleTap => DOUBLE_TAP_WINDOW_MS,
            Self::WheelCommit => WHEEL_COMMIT_DELAY_MS,
        }
    }
}

/// Effects returned from input handlers for the host to carry out, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RenderNeeded,
    /// The value was committed; notify the owner.
    Committed(i64),
    /// (Re)arm a timer, replacing any pending one of the same kind.
    ArmTimer(Timer),
    CancelTimer(Timer),
    /// Show the cleared text overlay and focus it once it is on screen.
    OpenEditor,
    /// Clear and hide the text overlay.
    CloseEditor,
}

/// Knob state and gesture logic, free of any DOM dependency.
///
/// Every handler returns the effects the host has to perform. Out-of-range
/// values are clamped, unparseable entries dropped, and stray input (extra
/// fingers, chorded buttons, events in the wrong phase) ignored, so handlers
/// never fail.
pub struct KnobCore {
    config: KnobConfig,
    value: ValueModel,
    interaction: Interaction,
    touch: TouchState,
}

impl KnobCore {
    #[must_use]
    pub fn new(config: KnobConfig, initial: &InitialValue) -> Self {
        let value = ValueModel::new(initial.resolve(&config), &config);
        Self {
            config,
            value,
            interaction: Interaction::default(),
            touch: TouchState::default(),
        }
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    /// Live value, floating during a gesture.
    pub fn value(&self) -> i64 {
        self.value.value()
    }

    pub fn committed_value(&self) -> i64 {
        self.value.committed()
    }

    pub fn phase(&self) -> Phase {
        self.interaction.phase
    }

    pub fn display_text(&self) -> String {
        self.config.format_value(self.value.value())
    }

    /// Swap in a new configuration. The value is left as is.
    pub fn set_config(&mut self, config: KnobConfig) -> Vec<Effect> {
        self.config = config;
        vec![Effect::RenderNeeded]
    }

    /// Set and commit a value from outside a gesture.
    pub fn set_value(&mut self, value: f64) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.apply_floating(value, &mut effects);
        self.commit(&mut effects);
        effects
    }

    // --- Value operations ---

    fn apply_floating(&mut self, value: f64, effects: &mut Vec<Effect>) {
        self.value.apply_floating(value, &self.config);
        effects.push(Effect::RenderNeeded);
    }

    fn commit(&mut self, effects: &mut Vec<Effect>) {
        let value = self.value.commit();
        log::debug!("knob committed {value}");
        effects.push(Effect::RenderNeeded);
        effects.push(Effect::Committed(value));
    }

    fn rollback(&mut self, effects: &mut Vec<Effect>) {
        self.interaction.wheel_pending = false;
        let value = self.value.rollback();
        log::debug!("knob gesture cancelled, back to {value}");
        effects.push(Effect::RenderNeeded);
    }

    fn open_editor(&mut self, effects: &mut Vec<Effect>) {
        self.interaction.begin_editing();
        effects.push(Effect::OpenEditor);
        effects.push(Effect::RenderNeeded);
    }

    /// End a drag: commit normally, roll back if the knob became read-only mid-gesture.
    /// Wheel ticks taken during the drag belong to it.
    fn finish_drag(&mut self, effects: &mut Vec<Effect>) {
        self.interaction.finish();
        self.interaction.wheel_pending = false;
        if self.config.read_only {
            self.rollback(effects);
        } else {
            self.commit(effects);
        }
    }

    // --- Mouse ---

    pub fn on_pointer_down(&mut self, button: Button, sample: PointerSample) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.config.read_only || !self.interaction.is_idle() {
            return effects;
        }
        match button {
            Button::Primary => {
                self.interaction.begin_drag(DragSource::Mouse);
                self.apply_floating(coordinate_to_value(sample, &self.config), &mut effects);
            }
            Button::Secondary | Button::Middle => self.open_editor(&mut effects),
        }
        effects
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.interaction.dragging_with(DragSource::Mouse) && !self.config.read_only {
            self.apply_floating(coordinate_to_value(sample, &self.config), &mut effects);
        }
        effects
    }

    pub fn on_pointer_up(&mut self, sample: PointerSample) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.interaction.dragging_with(DragSource::Mouse) {
            return effects;
        }
        if !self.config.read_only {
            self.apply_floating(coordinate_to_value(sample, &self.config), &mut effects);
        }
        self.finish_drag(&mut effects);
        effects
    }

    /// The pointer left the control: abandon the drag.
    pub fn on_pointer_leave(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.interaction.dragging_with(DragSource::Mouse) {
            self.interaction.finish();
            self.rollback(&mut effects);
        }
        effects
    }

    pub fn on_double_click(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.config.read_only && self.interaction.is_idle() {
            self.open_editor(&mut effects);
        }
        effects
    }

    // --- Touch ---

    /// `touches` is the number of touches on the control; `sample` is the first one.
    pub fn on_touch_start(&mut self, touches: u32, sample: Option<PointerSample>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.config.read_only || touches != 1 || self.interaction.is_editing() {
            return effects;
        }
        let Some(sample) = sample else {
            return effects;
        };
        if self.touch.register_tap() {
            effects.push(Effect::ArmTimer(Timer::DoubleTap));
        }
        self.interaction.begin_drag(DragSource::Touch);
        self.apply_floating(coordinate_to_value(sample, &self.config), &mut effects);
        effects
    }

    pub fn on_touch_move(&mut self, touches: u32, sample: Option<PointerSample>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.interaction.dragging_with(DragSource::Touch) || self.config.read_only || touches != 1
        {
            return effects;
        }
        if let Some(sample) = sample {
            self.apply_floating(coordinate_to_value(sample, &self.config), &mut effects);
        }
        effects
    }

    /// `remaining` is the number of touches still on the control.
    pub fn on_touch_end(&mut self, remaining: u32) -> Vec<Effect> {
        let mut effects = Vec::new();
        if remaining == 0 && self.interaction.dragging_with(DragSource::Touch) {
            self.finish_drag(&mut effects);
        }
        effects
    }

    pub fn on_touch_cancel(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.interaction.dragging_with(DragSource::Touch) {
            self.interaction.finish();
            self.rollback(&mut effects);
            self.touch.reset();
            effects.push(Effect::CancelTimer(Timer::DoubleTap));
        }
        effects
    }

    // --- Wheel ---

    /// One wheel tick moves the value by one step in the direction of `delta_y`.
    pub fn on_wheel(&mut self, delta_y: f64) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.config.read_only || self.interaction.is_editing() {
            return effects;
        }
        let step = if delta_y > 0.0 {
            1.0
        } else if delta_y < 0.0 {
            -1.0
        } else {
            0.0
        };
        let target = self.value.value() as f64 + step;
        self.apply_floating(target, &mut effects);
        self.interaction.wheel_pending = true;
        effects.push(Effect::ArmTimer(Timer::WheelCommit));
        effects
    }

    // --- Text entry ---

    /// A key was released in the text overlay. Only Enter and Escape matter.
    pub fn on_editor_key(&mut self, key: &str, text: &str) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.interaction.is_editing() {
            return effects;
        }
        match key {
            "Enter" => {
                self.interaction.finish();
                effects.push(Effect::CloseEditor);
                match self.config.parse_value(text) {
                    Some(value) => {
                        self.apply_floating(value, &mut effects);
                        self.commit(&mut effects);
                    }
                    None => log::debug!("knob entry {text:?} is not a number, ignored"),
                }
            }
            "Escape" => {
                self.interaction.finish();
                effects.push(Effect::CloseEditor);
            }
            _ => {}
        }
        effects
    }

    // --- Timers ---

    pub fn on_timer(&mut self, timer: Timer) -> Vec<Effect> {
        let mut effects = Vec::new();
        match timer {
            // A running drag settles the value itself when it ends.
            Timer::WheelCommit => {
                if self.interaction.wheel_pending && !self.interaction.is_dragging() {
                    self.interaction.wheel_pending = false;
                    self.commit(&mut effects);
                }
            }
            Timer::DoubleTap => {
                let double = self.touch.close_window();
                if double && !self.config.read_only && !self.interaction.is_editing() {
                    if self.interaction.is_dragging() {
                        self.finish_drag(&mut effects);
                    }
                    self.open_editor(&mut effects);
                }
            }
        }
        effects
    }
}
