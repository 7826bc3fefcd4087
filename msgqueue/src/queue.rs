//! cola generica protegida por mutex con espera por condvar
//! cualquier cantidad de productores y consumidores comparten la misma cola

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

/// Cola de mensajes compartida entre productores y consumidores.
///
/// El mutex serializa todo acceso al contenedor y la condvar despierta
/// a los consumidores bloqueados en `receive`. No hay limite de capacidad:
/// `send` siempre tiene exito.
pub struct MessageQueue<T> {
    messages: Mutex<VecDeque<T>>,
    available: Condvar,
}

impl<T> MessageQueue<T> {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    /// Agrega un mensaje a la cola y despierta a un consumidor si hay alguno
    /// esperando. Si nadie espera, el mensaje queda guardado para el proximo
    /// `receive`.
    pub fn send(&self, message: T) {
        let mut queue = self.messages.lock().unwrap();
        queue.push_back(message);
        self.available.notify_one();
    }

    /// Bloquea al hilo llamador hasta que haya un mensaje y lo retira de la
    /// cola, transfiriendo la propiedad al llamador. Cada mensaje se entrega
    /// exactamente a un consumidor.
    ///
    /// Se retira del extremo mas reciente de la cola.
    pub fn receive(&self) -> T {
        let mut queue = self.messages.lock().unwrap();
        loop {
            if let Some(message) = queue.pop_back() {
                return message;
            }
            // el predicado se re-chequea en cada despertar de la condvar
            queue = self.available.wait(queue).unwrap();
        }
    }

    /// Intenta retirar un mensaje sin bloquear.
    pub fn try_receive(&self) -> Option<T> {
        self.messages.lock().unwrap().pop_back()
    }

    /// Cantidad de mensajes en espera.
    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().unwrap().is_empty()
    }
}

impl<T> Default for MessageQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
