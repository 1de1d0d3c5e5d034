//! Handing URLs and documents to the desktop.

use std::io;
use std::process::{Command, Stdio};

/// Something that can show a URL or file outside the terminal.
pub trait LinkOpener {
    fn open(&mut self, target: &str) -> io::Result<()>;
}

/// Uses the platform's default handler in a detached child process.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(target: &str) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        }
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", target]);
            cmd
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&mut self, target: &str) -> io::Result<()> {
        // The child must never draw over the alternate screen.
        Self::command(target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|mut child| {
                // Reap it off the UI thread.
                std::thread::spawn(move || child.wait());
            })
    }
}
