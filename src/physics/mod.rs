pub mod deposition;
pub mod emission;
pub mod interpolation;
pub mod particle;
pub mod poisson;
pub mod pusher;
pub mod weighting;

/// Speed of light [m/s]
pub const C: f64 = 299_792_458.0;
/// Electron charge [C]
pub const E_CHARGE: f64 = -1.602176565e-19;
/// Electron mass [kg]
pub const E_MASS: f64 = 9.10938291e-31;
/// Vacuum permittivity [F/m]
pub const EPSILON0: f64 = 8.85418782e-12;
/// Charge to rest-energy ratio q/(m c^2) [1/V], negative for electrons.
pub const ALPHA: f64 = E_CHARGE / (E_MASS * C * C);

/// Reduced velocity `p / sqrt(1 + p^2)` of a reduced momentum `p`.
pub fn beta(p: f64) -> f64 {
    p / (1.0 + p * p).sqrt()
}

pub fn gamma(p: f64) -> f64 {
    (1.0 + p * p).sqrt()
}

/// Reduced momentum of an electron with kinetic energy `w` [eV].
pub fn momentum_from_energy(w: f64) -> f64 {
    let g = 1.0 - ALPHA * w;
    (g * g - 1.0).sqrt()
}

/// Kinetic energy [eV] from the reduced momentum, `(-1/alpha) (gamma - 1)`.
pub fn energy_from_momentum(p: f64) -> f64 {
    -(gamma(p) - 1.0) / ALPHA
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn coupling_constant_is_negative_for_electrons() {
        assert!(ALPHA < 0.0);
        assert_relative_eq!(ALPHA, -1.9569512693314196e-6, max_relative = 1e-8);
    }

    #[test]
    fn energy_momentum_round_trip() {
        for w in [0.0, 1.0, 1e3, 1.2e5] {
            let p = momentum_from_energy(w);
            assert_relative_eq!(energy_from_momentum(p), w, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn slow_electron_is_nonrelativistic() {
        // 1 eV: v = sqrt(2 e W / m) ~ 5.93e5 m/s
        let b = beta(momentum_from_energy(1.0));
        assert_relative_eq!(b * C, 5.93e5, max_relative = 1e-2);
        assert!(beta(1e6) < 1.0);
    }
}
