//! `log` backend that writes to the browser console.
use log::{LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    max: LevelFilter,
}

static LOGGER: ConsoleLogger = ConsoleLogger {
    max: LevelFilter::Info,
};

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        #[cfg(target_arch = "wasm32")]
        {
            let line = wasm_bindgen::JsValue::from(line);
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&line),
                log::Level::Warn => web_sys::console::warn_1(&line),
                log::Level::Info => web_sys::console::info_1(&line),
                log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        drop(line);
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

/// Route `log` records to the console. Later calls are no-ops.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LOGGER.max);
    }
}
