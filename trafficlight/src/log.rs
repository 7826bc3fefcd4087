// trafficlight/src/log.rs
// Logger redirigible para la salida de los semaforos. Por defecto imprime
// a consola; set_logger(fn(&str)) lo cambia una sola vez.

use once_cell::sync::OnceCell;

type LogFn = fn(&str);

static LOGGER: OnceCell<LogFn> = OnceCell::new();

/// Instala un logger propio. Solo la primera llamada tiene efecto; llamadas
/// posteriores se ignoran.
pub fn set_logger(f: LogFn) {
    let _ = LOGGER.set(f);
}

pub fn log_str(s: &str) {
    match LOGGER.get() {
        Some(f) => f(s),
        None => println!("{}", s),
    }
}

#[macro_export]
macro_rules! tl_log {
    ($($arg:tt)*) => {{
        $crate::log::log_str(&format!($($arg)*));
    }};
}
