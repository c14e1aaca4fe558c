use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UiOptions {
    /// Upper bound on time between animation ticks; also the poll
    /// timeout of the event loop.
    pub tick_rate: Duration,
    /// Re-run validation after every field mutation to drive live
    /// error display. Submission re-validates unconditionally either
    /// way.
    pub auto_validate: bool,
    pub show_help: bool,
    /// Ask for a second quit keypress when the draft has unsaved
    /// edits.
    pub confirm_exit: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(50),
            auto_validate: true,
            show_help: true,
            confirm_exit: true,
        }
    }
}

impl UiOptions {
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_auto_validate(mut self, enabled: bool) -> Self {
        self.auto_validate = enabled;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }
}
