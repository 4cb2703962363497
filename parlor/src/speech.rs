//! Fire-and-forget text-to-speech.
//!
//! `Voice` wraps an external speech command taken from the `PARLOR_VOICE`
//! environment variable (for example `espeak` or `say`). Each call to
//! [`Voice::speak`] spawns a detached task that runs the command with the
//! reply text as its single argument. The task is never joined and never
//! cancelled, and every failure is swallowed: a missing or broken speech
//! command must not be able to take down the chat loop. Failures are logged
//! at debug level only.

use tracing::debug;

/// Speaks bot replies through an external command, when one is configured.
#[derive(Debug, Clone)]
pub struct Voice {
    command: Option<String>,
    enabled: bool,
}

impl Voice {
    /// Build from `PARLOR_VOICE`. Enabled whenever a command is set.
    pub fn from_env() -> Self {
        let command = std::env::var("PARLOR_VOICE")
            .ok()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let enabled = command.is_some();
        Self { command, enabled }
    }

    /// A voice with no command; never speaks.
    pub fn silent() -> Self {
        Self {
            command: None,
            enabled: false,
        }
    }

    /// Whether a speech command is configured at all.
    pub fn configured(&self) -> bool {
        self.command.is_some()
    }

    /// Whether `speak` will currently do anything.
    pub fn enabled(&self) -> bool {
        self.enabled && self.command.is_some()
    }

    /// Toggle at runtime. Has no effect while no command is configured.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Speak one line in the background and return immediately.
    pub fn speak(&self, text: &str) {
        if !self.enabled() {
            return;
        }
        let Some(command) = self.command.clone() else {
            return;
        };
        let text = text.to_string();
        tokio::spawn(async move {
            // Capture output so the command cannot write into the raw-mode
            // terminal.
            match tokio::process::Command::new(&command)
                .arg(&text)
                .output()
                .await
            {
                Ok(output) if !output.status.success() => {
                    debug!(
                        command = %command,
                        code = ?output.status.code(),
                        "speech command exited non-zero"
                    );
                }
                Err(e) => {
                    debug!(command = %command, error = %e, "speech command failed to run");
                }
                Ok(_) => {}
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_voice_is_disabled() {
        let voice = Voice::silent();
        assert!(!voice.configured());
        assert!(!voice.enabled());
    }

    #[test]
    fn test_enable_without_command_stays_inert() {
        let mut voice = Voice::silent();
        voice.set_enabled(true);
        assert!(!voice.enabled());
        // No command configured, so this must be a no-op rather than a spawn.
        voice.speak("hello");
    }
}
