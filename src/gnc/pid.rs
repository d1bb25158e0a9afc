// ---------------------------------------------------------------------------
// PID combiner (per-tick, no time scaling)
// ---------------------------------------------------------------------------

/// Combines an error, its rate, and a running sum of errors.
///
/// The sum grows by the raw error once per call and is never decayed or
/// clamped: there is no anti-windup. Callers that saturate the output must
/// live with the accumulator running away while saturated.
#[derive(Debug, Clone)]
pub struct Pid {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    integral: f64,
}

impl Pid {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd, integral: 0.0 }
    }

    pub fn update(&mut self, error: f64, error_rate: f64) -> f64 {
        self.integral += error;
        self.kp * error + self.ki * self.integral + self.kd * error_rate
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
    }
}
