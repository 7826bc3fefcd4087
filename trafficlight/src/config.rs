use rand::Rng;

/// Tiempos del ciclo del semáforo.
///
/// Cada ciclo dura un valor uniforme en `[min_cycle_ms, max_cycle_ms]`,
/// ambos inclusive. Los tests usan rangos cortos para no esperar los
/// 4 a 6 segundos reales.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub min_cycle_ms: u64,
    pub max_cycle_ms: u64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            min_cycle_ms: 4000,
            max_cycle_ms: 6000,
        }
    }
}

impl CycleConfig {
    pub fn new(min_cycle_ms: u64, max_cycle_ms: u64) -> Self {
        assert!(
            min_cycle_ms > 0 && min_cycle_ms <= max_cycle_ms,
            "rango de ciclo invalido: [{}, {}]",
            min_cycle_ms,
            max_cycle_ms
        );
        Self {
            min_cycle_ms,
            max_cycle_ms,
        }
    }

    /// Duración aleatoria del próximo ciclo, uniforme en `[min, max]`.
    pub fn random_cycle_ms(&self, rng: &mut impl Rng) -> u64 {
        rng.random_range(self.min_cycle_ms..=self.max_cycle_ms)
    }
}
