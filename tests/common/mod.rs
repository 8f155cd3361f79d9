#![allow(dead_code)]

use std::os::unix::io::RawFd;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A pipe whose ends are closed on drop.
pub struct Pipe {
    pub read: RawFd,
    pub write: RawFd,
}

impl Pipe {
    pub fn new() -> Self {
        let mut fds = [0i32; 2];
        let res = unsafe { libc::pipe(fds.as_mut_ptr()) };
        assert_eq!(res, 0, "pipe() failed");

        Self {
            read: fds[0],
            write: fds[1],
        }
    }

    pub fn send(&self, byte: u8) {
        let buf = [byte; 1];
        let wrote = unsafe { libc::write(self.write, buf.as_ptr() as *const _, 1) };
        assert_eq!(wrote, 1);
    }
}

impl Drop for Pipe {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.read);
            libc::close(self.write);
        }
    }
}
