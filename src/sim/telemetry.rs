use std::io::{self, Write};
use std::path::Path;

use crate::dynamics::state::KinematicState;

/// Per-tick samples kept for plotting: time, altitude and speed.
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    pub time: Vec<f64>,
    pub altitude: Vec<f64>,
    pub speed: Vec<f64>,
}

impl Telemetry {
    pub fn record(&mut self, state: &KinematicState) {
        self.time.push(state.time);
        self.altitude.push(state.altitude);
        self.speed.push(state.speed());
    }

    pub fn clear(&mut self) {
        self.time.clear();
        self.altitude.clear();
        self.speed.clear();
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Samples as (time, altitude, speed) rows.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.time
            .iter()
            .zip(&self.altitude)
            .zip(&self.speed)
            .map(|((&t, &h), &v)| (t, h, v))
    }

    /// Write the samples as CSV with columns `time,altitude,speed`.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "time,altitude,speed")?;
        for (t, h, v) in self.rows() {
            writeln!(writer, "{:.3},{:.4},{:.4}", t, h, v)?;
        }
        Ok(())
    }

    pub fn write_csv_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = io::BufWriter::new(std::fs::File::create(path)?);
        self.write_csv(&mut file)?;
        file.flush()
    }
}
