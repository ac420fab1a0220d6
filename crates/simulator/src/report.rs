use std::io::{self, Write};

use crate::analyzer::InterpretationRecord;

/// Consumer of the per-qubit records at the end of a run.
pub trait ReportSink {
    fn render(&mut self, iterations: usize, records: &[InterpretationRecord]) -> io::Result<()>;
}

pub fn title(iterations: usize) -> String {
    format!("Quantum State After {} Feedback Iteration(s)", iterations)
}

/// Plain-text stand-in for the Bloch-sphere figure.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn render(&mut self, iterations: usize, records: &[InterpretationRecord]) -> io::Result<()> {
        writeln!(self.out, "{}", title(iterations))?;
        for r in records {
            let [x, y, z] = r.bloch_vector;
            writeln!(self.out)?;
            writeln!(self.out, "Qubit {} Bloch Sphere", r.index)?;
            writeln!(self.out, "  r = ({:.3}, {:.3}, {:.3})", x, y, z)?;
            writeln!(self.out, "{}", r)?;
        }
        self.out.flush()
    }
}
