//! Spinner shown while a tree is built; a no-op when the `progress` feature
//! is disabled

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// Indeterminate progress indicator on stderr
pub struct Spinner {
    #[cfg(feature = "progress")]
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Start spinning with `message`, or stay invisible if `visible` is false
    #[cfg(feature = "progress")]
    pub fn start(message: &'static str, visible: bool) -> Self {
        if !visible {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message);
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    #[cfg(not(feature = "progress"))]
    pub fn start(_message: &'static str, _visible: bool) -> Self {
        Self {}
    }

    /// Remove the spinner from the terminal
    pub fn finish(self) {
        #[cfg(feature = "progress")]
        {
            if let Some(bar) = self.bar {
                bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner() {
        let spinner = Spinner::start("working", false);
        spinner.finish();
    }
}
