//! Console output device.
//!
//! A single write-only port: each stored byte is emitted as an ASCII
//! character to a sink supplied by the embedder via callback, the same
//! integration shape as a serial transmit line. Loads return 0. With no
//! callback configured, stored bytes are dropped.

use super::PortDevice;
use crate::ExecutionError;
use std::any::Any;

/// One-port character output sink.
///
/// # Examples
///
/// ```
/// use pipe8::devices::Console;
/// use pipe8::PortDevice;
///
/// let mut console = Console::new();
/// console.set_write_callback(|byte| print!("{}", byte as char));
/// console.store(0, b'!').unwrap();
/// ```
pub struct Console {
    on_write: Option<Box<dyn Fn(u8)>>,
}

impl Console {
    /// Creates a console with no sink attached.
    pub fn new() -> Self {
        Self { on_write: None }
    }

    /// Sets the function invoked for every byte the program emits.
    ///
    /// Tests typically capture output through a shared buffer:
    ///
    /// ```
    /// use pipe8::devices::Console;
    /// use pipe8::PortDevice;
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// let captured = Rc::new(RefCell::new(Vec::new()));
    /// let sink = Rc::clone(&captured);
    ///
    /// let mut console = Console::new();
    /// console.set_write_callback(move |byte| sink.borrow_mut().push(byte));
    /// console.store(0, b'H').unwrap();
    /// console.store(0, b'i').unwrap();
    ///
    /// assert_eq!(&*captured.borrow(), b"Hi");
    /// ```
    pub fn set_write_callback<F>(&mut self, callback: F)
    where
        F: Fn(u8) + 'static,
    {
        self.on_write = Some(Box::new(callback));
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl PortDevice for Console {
    fn load(&mut self, _offset: u8) -> u8 {
        0
    }

    fn store(&mut self, _offset: u8, value: u8) -> Result<(), ExecutionError> {
        if let Some(callback) = &self.on_write {
            callback(value);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
