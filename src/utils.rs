use std::io::Write;
use crossterm::{cursor, terminal, QueueableCommand};

use crate::gallery_error::{GalleryError, Result};

/// Overwrites the current terminal line with `msg`, leaving the cursor where it was.
pub fn rewrite_message<W: Write>(out: &mut W, msg: &str) -> Result<()> {
    out.queue(cursor::SavePosition)
        .and_then(|o| o.queue(terminal::Clear(terminal::ClearType::UntilNewLine)))
        .map_err(|e| GalleryError::Terminal(e.to_string()))?;
    out.write_all(msg.as_bytes())?;
    out.queue(cursor::RestorePosition)
        .map_err(|e| GalleryError::Terminal(e.to_string()))?;
    out.flush()?;
    Ok(())
}

pub fn progress_message(done: usize, total: usize) -> String {
    format!("uploaded {} / {} files", done, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_message_between_cursor_commands() {
        let mut out: Vec<u8> = Vec::new();
        rewrite_message(&mut out, &progress_message(2, 5)).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("uploaded 2 / 5 files"));
        assert!(written.starts_with('\u{1b}'));
    }
}
