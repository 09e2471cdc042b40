//! Output writing utilities
//!
//! Rendered documentation goes to stdout. Status messages go to stderr so
//! the documentation stream can be piped without noise.

use crate::error::Result;
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

/// Output writer that separates documents from status messages
pub struct OutputWriter {
    use_color: bool,
    quiet: bool,
    documents: Box<dyn Write>,
    status: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout and stderr
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self::with_writers(use_color, quiet, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Create an output writer with custom writers
    pub fn with_writers(
        use_color: bool,
        quiet: bool,
        documents: Box<dyn Write>,
        status: Box<dyn Write>,
    ) -> Self {
        Self {
            use_color,
            quiet,
            documents,
            status,
        }
    }

    /// Write a rendered document verbatim
    pub fn document(&mut self, content: &str) -> Result<()> {
        self.documents.write_all(content.as_bytes())?;
        self.documents.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet {
            return Ok(());
        }

        let line = if self.use_color {
            format!("{} {}", "ℹ".blue(), message)
        } else {
            format!("INFO: {}", message)
        };
        self.status_line(&line)
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let line = if self.use_color {
            message.green().to_string()
        } else {
            message.to_string()
        };
        self.status_line(&line)
    }

    /// Write a warning message, shown even in quiet mode
    pub fn warning(&mut self, message: &str) -> Result<()> {
        let line = if self.use_color {
            message.yellow().to_string()
        } else {
            format!("WARNING: {}", message)
        };
        self.status_line(&line)
    }

    fn status_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.status, "{}", line)?;
        self.status.flush()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_buffer {
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    /// In-memory writer whose contents stay readable after being boxed
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
