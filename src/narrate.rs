use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::handle::Handle;
use colored::{Color, Colorize};
use std::fmt::Display;
use std::io::Write;

/// Printed in place of a real address when addresses are hidden.
pub const HIDDEN_ADDRESS: &str = "<address>";

/// Writes a demo's step-by-step commentary.
///
/// Every line is `label: value`. Values are styled by kind (plain values in
/// green, addresses in blue, handle states in yellow) when color is on.
pub struct Narrator<W: Write> {
    out: W,
    config: DemoConfig,
}

impl<W: Write> Narrator<W> {
    pub fn new(out: W, config: DemoConfig) -> Self {
        Narrator { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn heading(&mut self, title: &str) -> Result<(), DemoError> {
        let title = if self.config.color {
            title.bold().to_string()
        } else {
            title.to_string()
        };
        writeln!(self.out, "{title}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<(), DemoError> {
        writeln!(self.out)?;
        Ok(())
    }

    pub fn value(&mut self, label: &str, value: impl Display) -> Result<(), DemoError> {
        let value = self.paint(value.to_string(), Color::Green);
        writeln!(self.out, "{label}: {value}")?;
        Ok(())
    }

    pub fn address<T: ?Sized>(&mut self, label: &str, ptr: *const T) -> Result<(), DemoError> {
        let shown = self.format_address(ptr);
        writeln!(self.out, "{label}: {shown}")?;
        Ok(())
    }

    /// A handle's own value: its target's address, or the state it is in.
    pub fn handle<T>(&mut self, label: &str, handle: &Handle<'_, T>) -> Result<(), DemoError> {
        let shown = match handle.address() {
            Some(ptr) => self.format_address(ptr),
            None if handle.is_null() => self.paint("null".to_string(), Color::Yellow),
            None => self.paint("unbound (no target yet)".to_string(), Color::Yellow),
        };
        writeln!(self.out, "{label}: {shown}")?;
        Ok(())
    }

    /// A value together with where it lives.
    pub fn value_at<T>(&mut self, label: &str, value: &T) -> Result<(), DemoError>
    where
        T: Display,
    {
        let shown = self.paint(value.to_string(), Color::Green);
        let at = self.format_address(value as *const T);
        writeln!(self.out, "{label}: {shown} with memory address: {at}")?;
        Ok(())
    }

    pub fn format_address<T: ?Sized>(&self, ptr: *const T) -> String {
        if self.config.show_addresses {
            self.paint(format!("{ptr:p}"), Color::Blue)
        } else {
            HIDDEN_ADDRESS.to_string()
        }
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.config.color {
            text.color(color).to_string()
        } else {
            text
        }
    }
}
