//! Constant-jerk Kalman filter over one axis.
//!
//! State vector: [position, velocity, acceleration, jerk]ᵀ, in units of one
//! sample interval. Derivatives are rescaled to real time by the caller.

use nalgebra::{SMatrix, SVector};

type Vector4 = SVector<f64, 4>;
type Matrix4 = SMatrix<f64, 4, 4>;
type RowVector4 = SMatrix<f64, 1, 4>;

#[derive(Clone, Debug)]
pub struct KalmanFilter {
    state: Vector4,
    covariance: Matrix4,
    transition: Matrix4,
    process_noise: Matrix4,
    observation: RowVector4,
    measurement_noise: f64,
    initialized: bool,
}

impl KalmanFilter {
    pub fn new(process_noise: f64, measurement_noise: f64) -> Self {
        // Jerk is driven by white noise; G maps it onto every state term.
        let noise_gain = Vector4::new(1.0 / 6.0, 0.5, 1.0, 1.0);
        Self {
            state: Vector4::zeros(),
            covariance: Matrix4::identity() * measurement_noise,
            transition: Self::transition_matrix(),
            process_noise: noise_gain * noise_gain.transpose() * process_noise,
            observation: RowVector4::new(1.0, 0.0, 0.0, 0.0),
            measurement_noise,
            initialized: false,
        }
    }

    /// Transition over one sample interval.
    ///
    /// ```text
    /// | 1  1  1/2  1/6 |
    /// | 0  1  1    1/2 |
    /// | 0  0  1    1   |
    /// | 0  0  0    1   |
    /// ```
    #[rustfmt::skip]
    fn transition_matrix() -> Matrix4 {
        Matrix4::new(
            1.0, 1.0, 0.5, 1.0 / 6.0,
            0.0, 1.0, 1.0, 0.5,
            0.0, 0.0, 1.0, 1.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Restarts the filter at rest on the first observed position.
    pub fn reset(&mut self, position: f64) {
        self.state = Vector4::new(position, 0.0, 0.0, 0.0);
        self.covariance = Matrix4::identity() * self.measurement_noise;
        self.initialized = true;
    }

    /// Advances the state by one sample interval.
    pub fn predict(&mut self) {
        self.state = self.transition * self.state;
        self.covariance =
            self.transition * self.covariance * self.transition.transpose() + self.process_noise;
    }

    /// Corrects the state with an observed position.
    pub fn update(&mut self, measurement: f64) {
        let innovation = measurement - (self.observation * self.state)[0];
        let innovation_covariance = (self.observation
            * self.covariance
            * self.observation.transpose())[0]
            + self.measurement_noise;
        let gain: Vector4 =
            self.covariance * self.observation.transpose() / innovation_covariance;
        self.state += gain * innovation;
        self.covariance = (Matrix4::identity() - gain * self.observation) * self.covariance;
    }

    pub fn position(&self) -> f64 {
        self.state[0]
    }

    pub fn velocity(&self) -> f64 {
        self.state[1]
    }

    pub fn acceleration(&self) -> f64 {
        self.state[2]
    }

    pub fn jerk(&self) -> f64 {
        self.state[3]
    }
}
