use std::convert::TryFrom;
use std::io::{self, stdout, BufWriter, Stdout, Write};

/// Rows addressable with `termion::cursor::Goto`.
pub(crate) const MAX_ROWS: usize = u16::MAX as usize - 1;

/// Where frames go. Each frame is preceded by a `clear`.
pub(crate) trait Screen {
    fn clear(&mut self) -> io::Result<()>;
    fn draw(&mut self, frame: &str) -> io::Result<()>;
}

pub(super) struct Renderer<W: Write = Stdout> {
    out: BufWriter<W>,
}

impl Renderer {
    pub(super) fn new() -> io::Result<Self> {
        Self::with_writer(stdout())
    }
}

impl<W: Write> Renderer<W> {
    pub(super) fn with_writer(w: W) -> io::Result<Self> {
        let mut out = BufWriter::new(w);
        write!(out, "{}", termion::cursor::Hide)?;
        out.flush()?;
        Ok(Self { out })
    }
}

impl<W: Write> Screen for Renderer<W> {
    fn clear(&mut self) -> io::Result<()> {
        write!(self.out, "{}", termion::clear::All)
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        for (i, line) in frame.lines().enumerate() {
            let row = u16::try_from(i + 1).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("frame has more than {} lines", u16::MAX),
                )
            })?;
            write!(self.out, "{}{}", termion::cursor::Goto(1, row), line)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> Drop for Renderer<W> {
    fn drop(&mut self) {
        let _ = write!(self.out, "{}", termion::cursor::Show);
        let _ = self.out.flush();
    }
}
