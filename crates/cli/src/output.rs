use std::io::{self, Write};

use swing_pendulum::TrajectoryPoint;

/// Writes one `x1,y1,x2,y2` line per point with six decimals, then flushes.
///
/// Returns the number of lines written.
pub(crate) fn write_csv<W: Write>(
    out: &mut W,
    points: impl IntoIterator<Item = TrajectoryPoint>,
) -> io::Result<usize> {
    let mut written = 0;

    for TrajectoryPoint { x1, y1, x2, y2 } in points {
        writeln!(out, "{x1:.6},{y1:.6},{x2:.6},{y2:.6}")?;
        written += 1;
    }

    out.flush()?;
    Ok(written)
}
