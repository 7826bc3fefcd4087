// modulo raiz de trafficlight
// organiza el semaforo, su cola de fases y la configuracion

pub mod config;
pub mod light;
pub mod log;
pub mod phase;

// reexports comodos
pub use config::CycleConfig;
pub use light::{LightState, TrafficLight};
pub use phase::Phase;
