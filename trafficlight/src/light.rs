// Semaforo autonomo: alterna su fase en un hilo de fondo y publica cada
// cambio en su cola privada para los observadores bloqueados.

use crate::config::CycleConfig;
use crate::phase::Phase;
use crate::tl_log;
use msgqueue::MessageQueue;
use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Estados del ciclo de vida del semáforo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightState {
    Created,
    Running,
    Stopped,
}

/// Señal de parada para el hilo de ciclo.
///
/// El flag va protegido por mutex y la condvar corta la espera del ciclo,
/// asi la misma espera cronometra el ciclo y observa la parada de inmediato.
struct StopSignal {
    stopped: Mutex<bool>,
    cond: Condvar,
}

impl StopSignal {
    fn new() -> Self {
        Self {
            stopped: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    /// Espera hasta cumplir el timeout o hasta que se pida la parada.
    /// Retorna true si la parada fue solicitada.
    fn wait_stop(&self, timeout: Duration) -> bool {
        let stopped = self.stopped.lock().unwrap();
        let (stopped, _timed_out) = self
            .cond
            .wait_timeout_while(stopped, timeout, |stopped| !*stopped)
            .unwrap();
        *stopped
    }

    fn raise(&self) {
        let mut stopped = self.stopped.lock().unwrap();
        *stopped = true;
        self.cond.notify_all();
    }
}

/// Estado compartido entre el semaforo y su hilo de ciclo.
struct CycleShared {
    /// snapshot de la fase actual, escrito solo por el hilo de ciclo
    phase: AtomicU8,
    queue: MessageQueue<Phase>,
    stop: StopSignal,
    greens: AtomicU32,
    reds: AtomicU32,
}

struct Lifecycle {
    state: LightState,
    handle: Option<JoinHandle<()>>,
}

/// Semáforo con fase roja/verde, ciclo aleatorio de 4 a 6 segundos por
/// defecto y espera bloqueante por fase para los observadores.
///
/// Se comparte entre hilos detrás de un `Arc`: el hilo de ciclo produce
/// las transiciones y cualquier cantidad de observadores consume de la
/// misma cola. Cada transición publicada la consume UN solo observador;
/// no hay broadcast.
pub struct TrafficLight {
    pub id: u32,
    config: CycleConfig,
    shared: Arc<CycleShared>,
    lifecycle: Mutex<Lifecycle>,
}

impl TrafficLight {
    /// Crea un semáforo en fase roja con los tiempos por defecto.
    pub fn new(id: u32) -> Self {
        Self::with_config(id, CycleConfig::default())
    }

    pub fn with_config(id: u32, config: CycleConfig) -> Self {
        Self {
            id,
            config,
            shared: Arc::new(CycleShared {
                phase: AtomicU8::new(Phase::Red.code()),
                queue: MessageQueue::new(),
                stop: StopSignal::new(),
                greens: AtomicU32::new(0),
                reds: AtomicU32::new(0),
            }),
            lifecycle: Mutex::new(Lifecycle {
                state: LightState::Created,
                handle: None,
            }),
        }
    }

    /// Lectura instantánea de la fase actual.
    ///
    /// Es un snapshot best-effort: el hilo de ciclo puede cambiar la fase
    /// en cualquier momento. Para sincronizarse con una fase usar
    /// `wait_for_phase`.
    pub fn current_phase(&self) -> Phase {
        Phase::from_code(self.shared.phase.load(Ordering::Relaxed))
    }

    pub fn state(&self) -> LightState {
        self.lifecycle.lock().unwrap().state
    }

    /// Cantidad de transiciones publicadas hacia la fase dada.
    pub fn published_transitions(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Green => self.shared.greens.load(Ordering::SeqCst),
            Phase::Red => self.shared.reds.load(Ordering::SeqCst),
        }
    }

    /// Arranca el hilo de ciclo. Solo la primera llamada tiene efecto:
    /// repetir start, o llamar start despues de stop, se ignora con un aviso.
    pub fn start(&self) {
        let mut lifecycle = self.lifecycle.lock().unwrap();
        match lifecycle.state {
            LightState::Running => {
                tl_log!("[Semaforo {}] ⚠️  start ignorado, el ciclo ya corre", self.id);
            }
            LightState::Stopped => {
                tl_log!("[Semaforo {}] ⚠️  start ignorado, ya fue detenido", self.id);
            }
            LightState::Created => {
                let id = self.id;
                let config = self.config.clone();
                let shared = Arc::clone(&self.shared);
                let handle = thread::Builder::new()
                    .name(format!("Semaforo-{}", id))
                    .spawn(move || cycle_loop(id, config, shared))
                    .expect("no se pudo crear el hilo del semaforo");

                lifecycle.handle = Some(handle);
                lifecycle.state = LightState::Running;
                tl_log!("[Semaforo {}] ▶️  ciclo iniciado", id);
            }
        }
    }

    /// Detiene el ciclo y espera a que el hilo de fondo termine.
    /// Es inofensivo llamarla más de una vez o sin haber arrancado.
    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle.lock().unwrap();
        if lifecycle.state == LightState::Stopped {
            return;
        }

        self.shared.stop.raise();
        if let Some(handle) = lifecycle.handle.take() {
            let _ = handle.join();
        }

        if lifecycle.state == LightState::Running {
            tl_log!("[Semaforo {}] 🛑 ciclo detenido", self.id);
        }
        lifecycle.state = LightState::Stopped;
    }

    /// Bloquea al hilo llamador hasta que el ciclo publique la fase pedida.
    ///
    /// Consume mensajes de la cola descartando las fases intermedias. La
    /// espera es por la PRÓXIMA publicación: si el semáforo ya está en la
    /// fase pedida igual se espera la siguiente transición hacia ella.
    /// No hay timeout; el ciclo corriendo garantiza progreso.
    pub fn wait_for_phase(&self, target: Phase) {
        loop {
            let phase = self.shared.queue.receive();
            if phase == target {
                return;
            }
        }
    }

    /// Espera la próxima luz verde.
    pub fn wait_for_green(&self) {
        self.wait_for_phase(Phase::Green);
    }
}

impl Drop for TrafficLight {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Bucle de fases que corre en el hilo de fondo.
///
/// Cronometra un ciclo aleatorio, alterna la fase y publica el cambio en la
/// cola. El send completa antes de cronometrar el siguiente ciclo, asi las
/// fases se encolan en el mismo orden en que ocurren.
fn cycle_loop(id: u32, config: CycleConfig, shared: Arc<CycleShared>) {
    let mut rng = rand::rng();

    loop {
        let cycle_ms = config.random_cycle_ms(&mut rng);
        if shared.stop.wait_stop(Duration::from_millis(cycle_ms)) {
            return;
        }

        let next = Phase::from_code(shared.phase.load(Ordering::Relaxed)).toggle();
        shared.phase.store(next.code(), Ordering::Relaxed);

        let counter = match next {
            Phase::Green => &shared.greens,
            Phase::Red => &shared.reds,
        };
        counter.fetch_add(1, Ordering::SeqCst);

        shared.queue.send(next);
        tl_log!(
            "[Semaforo {}] 🚦 cambio de fase a {:?} (ciclo de {} ms)",
            id,
            next,
            cycle_ms
        );
    }
}
