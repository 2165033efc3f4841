use core::fmt;
use std::env;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use color_eyre::owo_colors::OwoColorize;

/// Treat stdout as a terminal even when it is redirected.
pub const FORCE_TTY_ENV: &str = "HUBCTL_FORCE_TTY";

/// Never prompt, whatever the terminal supports.
pub const PROMPT_DISABLED_ENV: &str = "HUBCTL_PROMPT_DISABLED";

pub const NO_COLOR_ENV: &str = "NO_COLOR";

/// What the attached terminal supports.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal {
    pub stdin_tty: bool,
    pub stdout_tty: bool,
    pub stderr_tty: bool,
    /// `NO_COLOR` is unset; each sink is still colored only on a terminal.
    pub color: bool,
    pub prompt_disabled: bool,
}

impl Terminal {
    pub fn detect() -> Self {
        let stdout_tty = env_flag(FORCE_TTY_ENV) || io::stdout().is_terminal();

        Self {
            stdin_tty: io::stdin().is_terminal(),
            stdout_tty,
            stderr_tty: io::stderr().is_terminal(),
            color: env::var_os(NO_COLOR_ENV).is_none(),
            prompt_disabled: env_flag(PROMPT_DISABLED_ENV),
        }
    }

    /// Whether an interactive prompt can be shown.
    pub const fn can_prompt(&self) -> bool {
        self.stdin_tty && self.stdout_tty && !self.prompt_disabled
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| !matches!(value.trim(), "" | "0" | "false"))
}

#[derive(Clone, Copy, Debug)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn success_icon(self) -> String {
        if self.enabled {
            "✓".green().to_string()
        } else {
            "✓".to_owned()
        }
    }

    pub fn failure_icon(self) -> String {
        if self.enabled {
            "X".red().to_string()
        } else {
            "X".to_owned()
        }
    }
}

pub trait Report {
    fn report(&self, out: &mut dyn Write, colors: ColorScheme) -> io::Result<()>;
}

/// Human-readable output channel.
///
/// Results go to `out`, failures to `err`.
pub struct Output {
    terminal: Terminal,
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
}

impl Output {
    pub fn new(terminal: Terminal, out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            terminal,
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    pub fn stdio(terminal: Terminal) -> Self {
        Self::new(terminal, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub const fn is_stdout_tty(&self) -> bool {
        self.terminal.stdout_tty
    }

    /// Colors for stdout.
    pub const fn color_scheme(&self) -> ColorScheme {
        ColorScheme::new(self.terminal.color && self.terminal.stdout_tty)
    }

    /// Colors for stderr.
    pub const fn error_color_scheme(&self) -> ColorScheme {
        ColorScheme::new(self.terminal.color && self.terminal.stderr_tty)
    }

    pub fn write<T: Report>(&self, value: &T) {
        Self::emit(&self.out, value, self.color_scheme());
    }

    pub fn write_error<T: Report>(&self, value: &T) {
        Self::emit(&self.err, value, self.error_color_scheme());
    }

    fn emit<T: Report>(sink: &Mutex<Box<dyn Write + Send>>, value: &T, colors: ColorScheme) {
        let mut sink = match sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Err(err) = value.report(&mut **sink, colors).and_then(|()| sink.flush()) {
            eprintln!("Failed to write output: {err}");
        }
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SuccessLine<'a>(pub &'a str);

impl Report for SuccessLine<'_> {
    fn report(&self, out: &mut dyn Write, colors: ColorScheme) -> io::Result<()> {
        writeln!(out, "{} {}", colors.success_icon(), self.0)
    }
}

#[derive(Clone, Copy)]
pub struct ErrorLine<'a>(pub &'a (dyn fmt::Display + 'a));

impl fmt::Debug for ErrorLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorLine")
            .field(&format_args!("{}", self.0))
            .finish()
    }
}

impl Report for ErrorLine<'_> {
    fn report(&self, out: &mut dyn Write, colors: ColorScheme) -> io::Result<()> {
        writeln!(out, "{} {}", colors.failure_icon(), self.0)
    }
}
